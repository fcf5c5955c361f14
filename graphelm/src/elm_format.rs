//! `elm-format` invocation.

use std::path::Path;
use std::process::Command;

/// Formatter executable.
pub const ELM_FORMAT: &str = "elm-format";

/// Formats a generated file in place.
///
/// A missing or failing formatter is logged and otherwise ignored.
///
/// # Returns
/// True if the file was formatted.
pub fn format_file(path: &Path) -> bool {
    match Command::new(ELM_FORMAT).arg(path).arg("--yes").output() {
        Ok(output) if output.status.success() => {
            tracing::debug!(path = %path.display(), "formatted");
            true
        }
        Ok(output) => {
            tracing::debug!(
                path = %path.display(),
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "elm-format failed"
            );
            false
        }
        Err(e) => {
            tracing::debug!(error = %e, "elm-format not available");
            false
        }
    }
}

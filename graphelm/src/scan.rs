//! Query file discovery and module naming.

use anyhow::{Context, Result};
use graphelm_core::naming::capitalize;
use glob::{MatchOptions, Pattern};
use std::path::{Component, Path, PathBuf};

/// Extension of GraphQL query files.
pub const QUERY_EXTENSION: &str = "graphql";

/// Directory under which module paths start.
const SOURCE_DIR: &str = "src";

/// Finds every query file below `root`, skipping hidden files and
/// directories. Paths are returned sorted.
///
/// # Errors
/// Returns an error if `root` is not valid UTF-8.
pub fn find_query_files(root: &Path) -> Result<Vec<PathBuf>> {
    let root_str = root
        .to_str()
        .with_context(|| format!("root path is not valid UTF-8: {}", root.display()))?;
    let pattern = format!("{}/**/*.{QUERY_EXTENSION}", Pattern::escape(root_str));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options).context("invalid scan pattern")? {
        match entry {
            Ok(path) if is_hidden(&path, root) => {}
            Ok(path) => files.push(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable path");
            }
        }
    }
    files.sort();
    tracing::debug!(root = %root.display(), count = files.len(), "found query files");
    Ok(files)
}

fn is_hidden(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| matches!(c, Component::Normal(name) if name.to_string_lossy().starts_with('.')))
}

/// Derives the Elm module name of a query file.
///
/// The path below the last `src` directory is used, or the whole path if
/// there is none. Each segment is converted to Pascal case and segments are
/// joined with dots, so `app/src/Api/user-list.graphql` becomes
/// `Api.UserList`.
///
/// # Errors
/// Returns an error if the path is not valid UTF-8, has no file name, or
/// has a segment that cannot start an Elm module name.
pub fn module_name(path: &Path) -> Result<String> {
    let stem = path.with_extension("");
    let segments = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<&str>>>()
        .with_context(|| format!("path is not valid UTF-8: {}", path.display()))?;

    let Some((_, dirs)) = segments.split_last() else {
        anyhow::bail!("path has no file name: {}", path.display());
    };
    let start = dirs
        .iter()
        .rposition(|segment| *segment == SOURCE_DIR)
        .map_or(0, |i| i + 1);

    let name = segments[start..]
        .iter()
        .map(|segment| module_segment(segment))
        .collect::<Option<Vec<String>>>()
        .with_context(|| format!("path is not a valid Elm module name: {}", path.display()))?;
    Ok(name.join("."))
}

/// Turns a path segment into an Elm module name segment: characters other
/// than ASCII letters and digits separate words, and every word is
/// capitalized. `user-list` becomes `UserList`.
fn module_segment(segment: &str) -> Option<String> {
    let name: String = segment
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    name.starts_with(|c: char| c.is_ascii_uppercase()).then_some(name)
}

/// Returns the path of the Elm module generated for a query file.
#[must_use]
pub fn output_path(path: &Path) -> PathBuf {
    path.with_extension("elm")
}

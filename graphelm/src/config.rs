//! Project configuration (`graphelm.json`).

use crate::cli::Cli;
use anyhow::{Context, Result, bail};
use graphelm_codegen::HttpMethod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file in the working directory.
pub const CONFIG_FILE: &str = "graphelm.json";

/// Contents of `graphelm.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Schema file, relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
    /// `GET` or `POST`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Config {
    /// Reads the configuration of a directory.
    ///
    /// # Returns
    /// `None` if the directory has no configuration file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let text =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let config =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(Some(config))
    }

    /// Writes the configuration into a directory.
    ///
    /// # Returns
    /// The path of the written file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// Settings of one generation run, from the command line over the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Schema file.
    pub schema: PathBuf,
    /// HTTP method of the request functions.
    pub method: HttpMethod,
    /// Directory scanned for query files.
    pub root: PathBuf,
    /// Whether to run elm-format on generated files.
    pub format: bool,
}

impl Settings {
    /// Resolves the settings of a run in `dir`.
    ///
    /// Relative paths are taken relative to `dir`.
    ///
    /// # Errors
    /// Returns an error if no endpoint or schema is known, or if the
    /// configured method is invalid.
    pub fn resolve(cli: &Cli, config: Option<Config>, dir: &Path) -> Result<Self> {
        let config = config.unwrap_or_default();

        let Some(endpoint) = cli.endpoint.clone().or(config.endpoint) else {
            bail!("graphelm is not configured for this project; run `graphelm --init ENDPOINT`");
        };

        let method: HttpMethod = match (cli.method, config.method) {
            (Some(method), _) => method.into(),
            (None, Some(method)) => method
                .parse()
                .with_context(|| format!("invalid method in {CONFIG_FILE}"))?,
            (None, None) => HttpMethod::default(),
        };

        let schema = cli.schema.clone().or(config.schema).with_context(|| {
            format!("no schema file given; pass --schema PATH or set \"schema\" in {CONFIG_FILE}")
        })?;

        Ok(Self {
            endpoint,
            schema: dir.join(schema),
            method,
            root: dir.join(&cli.root).components().collect(),
            format: !cli.no_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("graphelm").chain(args.iter().copied()))
            .expect("Failed to parse")
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        assert_eq!(Config::load(dir.path()).expect("Failed to load"), None);

        let config = Config {
            endpoint: Some("https://api.example.com/graphql".to_string()),
            schema: Some(PathBuf::from("schema.json")),
            method: None,
        };
        let path = config.save(dir.path()).expect("Failed to save");
        let text = fs::read_to_string(path).expect("Failed to read");
        assert!(!text.contains("method"));

        let loaded = Config::load(dir.path()).expect("Failed to load");
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        fs::write(dir.path().join(CONFIG_FILE), "{ nope").expect("Failed to write");
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            endpoint: Some("https://a.example.com".to_string()),
            schema: Some(PathBuf::from("a.graphql")),
            method: Some("POST".to_string()),
        };
        let dir = Path::new("/project");

        let settings = Settings::resolve(&cli(&[]), Some(config.clone()), dir)
            .expect("Failed to resolve");
        assert_eq!(settings.endpoint, "https://a.example.com");
        assert_eq!(settings.schema, PathBuf::from("/project/a.graphql"));
        assert_eq!(settings.method, HttpMethod::Post);
        assert_eq!(settings.root, PathBuf::from("/project"));
        assert!(settings.format);

        let settings = Settings::resolve(
            &cli(&["https://b.example.com", "--method", "GET", "--no-format"]),
            Some(config),
            dir,
        )
        .expect("Failed to resolve");
        assert_eq!(settings.endpoint, "https://b.example.com");
        assert_eq!(settings.method, HttpMethod::Get);
        assert!(!settings.format);
    }

    #[test]
    fn test_missing_endpoint_or_schema() {
        let dir = Path::new("/project");
        let err = Settings::resolve(&cli(&[]), None, dir).unwrap_err();
        assert!(err.to_string().contains("--init"));

        let err = Settings::resolve(&cli(&["https://a.example.com"]), None, dir).unwrap_err();
        assert!(err.to_string().contains("--schema"));
    }

    #[test]
    fn test_invalid_configured_method() {
        let config = Config {
            endpoint: Some("https://a.example.com".to_string()),
            schema: Some(PathBuf::from("a.graphql")),
            method: Some("PATCH".to_string()),
        };
        assert!(Settings::resolve(&cli(&[]), Some(config), Path::new(".")).is_err());
    }
}

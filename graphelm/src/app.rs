//! The `graphelm` command.

use crate::cli::Cli;
use crate::config::{Config, Settings};
use crate::elm_format::format_file;
use crate::scan::{find_query_files, module_name, output_path};
use anyhow::{Context, Result};
use graphelm_codegen::{HttpMethod, ModuleOptions, generate_module_from_file};
use graphelm_schema::{load_schema_file, validate_schema};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--init` wrote the configuration file.
    Initialized(PathBuf),
    /// Modules were generated.
    Generated(usize),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized(path) => write!(f, "Success! Wrote {}.", path.display()),
            Self::Generated(count) => {
                let plural = if *count == 1 { "" } else { "s" };
                write!(f, "Success! Generated {count} module{plural}.")
            }
        }
    }
}

/// Runs the command in working directory `dir`.
///
/// # Errors
/// Returns an error if configuration, schema loading or generation of any
/// file fails. Files generated before the failure are kept.
pub fn run(cli: &Cli, dir: &Path) -> Result<Outcome> {
    if cli.init {
        return init(cli, dir);
    }

    let settings = Settings::resolve(cli, Config::load(dir)?, dir)?;
    generate(&settings)
}

fn init(cli: &Cli, dir: &Path) -> Result<Outcome> {
    let endpoint = cli
        .endpoint
        .clone()
        .context("usage: graphelm --init ENDPOINT [--schema PATH] [--method GET|POST]")?;
    let config = Config {
        endpoint: Some(endpoint),
        schema: cli.schema.clone(),
        method: cli.method.map(|m| HttpMethod::from(m).to_string()),
    };
    let path = config.save(dir)?;
    tracing::info!(path = %path.display(), "wrote configuration");
    Ok(Outcome::Initialized(path))
}

/// Generates a module next to every query file of the project.
///
/// # Errors
/// Returns an error on the first file that cannot be generated.
pub fn generate(settings: &Settings) -> Result<Outcome> {
    let schema = load_schema_file(&settings.schema)
        .with_context(|| format!("loading schema {}", settings.schema.display()))?;
    validate_schema(&schema)
        .with_context(|| format!("invalid schema {}", settings.schema.display()))?;

    let schema_file = fs::canonicalize(&settings.schema)
        .with_context(|| format!("resolving schema path {}", settings.schema.display()))?;
    let files: Vec<PathBuf> = find_query_files(&settings.root)?
        .into_iter()
        .filter(|file| !is_same_file(file, &schema_file))
        .collect();
    if files.is_empty() {
        tracing::warn!(root = %settings.root.display(), "no query files found");
    }

    for file in &files {
        let relative = file.strip_prefix(&settings.root).unwrap_or(file);
        let options = ModuleOptions::builder(module_name(relative)?)
            .endpoint(settings.endpoint.as_str())
            .method(settings.method)
            .build();

        let elm = generate_module_from_file(file, &schema, &options)
            .with_context(|| format!("Error processing {}", file.display()))?;

        let out = output_path(file);
        fs::write(&out, elm).with_context(|| format!("writing {}", out.display()))?;
        tracing::info!(path = %out.display(), module = options.module_name(), "wrote module");

        if settings.format {
            format_file(&out);
        }
    }

    Ok(Outcome::Generated(files.len()))
}

/// Returns true if `path` resolves to `canonical`.
fn is_same_file(path: &Path, canonical: &Path) -> bool {
    fs::canonicalize(path).is_ok_and(|p| p == canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const SCHEMA: &str = r#"
        type Query { user(id: ID!): User }
        type User { id: ID! name: String }
    "#;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("graphelm").chain(args.iter().copied()))
            .expect("Failed to parse")
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::Generated(1).to_string(), "Success! Generated 1 module.");
        assert_eq!(Outcome::Generated(3).to_string(), "Success! Generated 3 modules.");
    }

    #[test]
    fn test_init_writes_config() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        let outcome = run(
            &cli(&["--init", "https://api.example.com/graphql", "--method", "POST"]),
            dir.path(),
        )
        .expect("Failed to run");
        assert!(matches!(outcome, Outcome::Initialized(_)));

        let config = Config::load(dir.path())
            .expect("Failed to load")
            .expect("config");
        assert_eq!(config.endpoint.as_deref(), Some("https://api.example.com/graphql"));
        assert_eq!(config.method.as_deref(), Some("POST"));
        assert_eq!(config.schema, None);
    }

    #[test]
    fn test_init_requires_endpoint() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        assert!(run(&cli(&["--init"]), dir.path()).is_err());
    }

    #[test]
    fn test_generate_project() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        let root = dir.path();
        fs::write(root.join("schema.graphql"), SCHEMA).expect("Failed to write");
        fs::create_dir_all(root.join("src/Api")).expect("Failed to create dir");
        fs::write(
            root.join("src/Api/user.graphql"),
            "query user($id: ID!) { user(id: $id) { id name } }",
        )
        .expect("Failed to write");
        Config {
            endpoint: Some("https://api.example.com/graphql".to_string()),
            schema: Some(PathBuf::from("schema.graphql")),
            method: None,
        }
        .save(root)
        .expect("Failed to save");

        let outcome = run(&cli(&["--no-format"]), root).expect("Failed to run");
        assert_eq!(outcome, Outcome::Generated(1));

        let elm = fs::read_to_string(root.join("src/Api/user.elm")).expect("Failed to read");
        assert!(elm.starts_with("module Api.User exposing (..)\n"));
        assert!(elm.contains("\"https://api.example.com/graphql\""));
        assert!(elm.contains("userDecoder : Decoder User\n"));
        assert!(!root.join("schema.elm").exists());
    }

    #[test]
    fn test_generate_skips_schema_below_root() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        let root = dir.path();
        fs::create_dir_all(root.join("src/Api")).expect("Failed to create dir");
        fs::write(root.join("src/schema.graphql"), SCHEMA).expect("Failed to write");
        fs::write(root.join("src/Api/user.graphql"), "{ user(id: \"1\") { id } }")
            .expect("Failed to write");

        let outcome = run(
            &cli(&[
                "https://api.example.com",
                "--schema",
                "./src/../src/schema.graphql",
                "--no-format",
            ]),
            root,
        )
        .expect("Failed to run");
        assert_eq!(outcome, Outcome::Generated(1));
        assert!(root.join("src/Api/user.elm").exists());
        assert!(!root.join("src/schema.elm").exists());
    }

    #[test]
    fn test_generate_reports_failing_file() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        let root = dir.path();
        fs::write(root.join("schema.graphql"), SCHEMA).expect("Failed to write");
        fs::write(root.join("bad.graphql"), "{ user(id: \"1\") { email } }").expect("Failed to write");

        let err = run(
            &cli(&["https://api.example.com", "--schema", "schema.graphql", "--no-format"]),
            root,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Error processing"));
        assert!(format!("{err:#}").contains("unknown field 'email' on type 'User'"));
    }

    #[test]
    fn test_generate_rejects_invalid_schema() {
        let dir = tempfile::tempdir().expect("Failed to create dir");
        let root = dir.path();
        fs::write(root.join("schema.graphql"), "type Query { user: Missing }").expect("Failed to write");

        let err = run(
            &cli(&["https://api.example.com", "--schema", "schema.graphql"]),
            root,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid schema"));
    }
}

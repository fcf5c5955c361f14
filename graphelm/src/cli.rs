//! Command-line arguments.

use clap::{ArgAction, Parser, ValueEnum};
use graphelm_codegen::HttpMethod;
use std::path::PathBuf;

/// Generates Elm modules from the GraphQL query files of a project.
#[derive(Debug, Parser)]
#[command(name = "graphelm", version)]
#[command(about = "Generate Elm types, decoders and requests from GraphQL query files", long_about = None)]
pub struct Cli {
    /// GraphQL endpoint URL; overrides the configured one
    pub endpoint: Option<String>,

    /// Write graphelm.json with the endpoint and options, then exit
    #[arg(long)]
    pub init: bool,

    /// Schema file: GraphQL SDL, or introspection JSON for `.json` files
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// HTTP method of the generated request functions
    #[arg(long, value_enum, ignore_case = true)]
    pub method: Option<MethodArg>,

    /// Directory scanned for `.graphql` files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Do not run elm-format on generated files
    #[arg(long)]
    pub no_format: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// HTTP method as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// `GET`
    #[value(name = "GET")]
    Get,
    /// `POST`
    #[value(name = "POST")]
    Post,
}

impl From<MethodArg> for HttpMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => Self::Get,
            MethodArg::Post => Self::Post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["graphelm"]).expect("Failed to parse");
        assert_eq!(cli.endpoint, None);
        assert!(!cli.init);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.no_format);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from([
            "graphelm",
            "--init",
            "https://api.example.com/graphql",
            "--schema",
            "schema.json",
            "--method",
            "post",
            "-vv",
        ])
        .expect("Failed to parse");
        assert!(cli.init);
        assert_eq!(cli.endpoint.as_deref(), Some("https://api.example.com/graphql"));
        assert_eq!(cli.schema, Some(PathBuf::from("schema.json")));
        assert_eq!(cli.method.map(HttpMethod::from), Some(HttpMethod::Post));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_unknown_method() {
        assert!(Cli::try_parse_from(["graphelm", "--method", "PUT"]).is_err());
    }
}

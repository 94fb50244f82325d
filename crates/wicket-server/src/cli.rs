use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `wicket` binary.
#[derive(Debug, Parser)]
#[command(name = "wicket", version, about = "Wicket - natural language cricket analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Run one analysis and print the JSON response.
    Ask(AskArgs),
    /// Print the JSON Schema of a wire type.
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.bind_addr`)
    #[arg(long)]
    pub bind: Option<String>,

    /// `DuckDB` file to query (overrides `database.path`)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Question in plain English
    pub prompt: String,

    /// Run the multi-step deep analysis
    #[arg(long)]
    pub deep: bool,

    /// Steps for a deep analysis
    #[arg(long, requires = "deep")]
    pub max_steps: Option<u32>,

    /// `DuckDB` file to query (overrides `database.path`)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Wire type to describe
    #[arg(value_enum)]
    pub type_name: WireType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WireType {
    Analysis,
    DeepAnalysis,
    Project,
    Validation,
    Publish,
    RateLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["wicket", "--verbose", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        assert!(cli.verbose);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(args.database, None);
    }

    #[test]
    fn max_steps_requires_deep() {
        assert!(Cli::try_parse_from(["wicket", "ask", "Who?", "--max-steps", "3"]).is_err());
        let cli = Cli::try_parse_from(["wicket", "ask", "Who?", "--deep", "--max-steps", "3"]).unwrap();
        let Commands::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.max_steps, Some(3));
    }

    #[test]
    fn schema_types_are_kebab_case() {
        let cli = Cli::try_parse_from(["wicket", "schema", "deep-analysis"]).unwrap();
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema");
        };
        assert_eq!(args.type_name, WireType::DeepAnalysis);
    }
}

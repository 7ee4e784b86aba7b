use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fbq",
    about = "Convert between search rule trees and backend filters",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Log every rule that is left out of the output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Output encoding
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pick which subcommand to use
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build backend filters from a rule tree
    Build(DocumentArgs),
    /// Rebuild a rule tree from backend filters
    Parse(DocumentArgs),
    /// Build filters and wrap them in a search request body
    Show(DocumentArgs),
    /// List the operators each schema field accepts
    Operators(OperatorsArgs),
    /// Print the rule the editor starts with for a field
    Seed(SeedArgs),
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Field schema, JSON or YAML
    #[arg(long)]
    pub schema: PathBuf,

    /// Rule tree or filter list to convert, JSON or YAML
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct OperatorsArgs {
    /// Field schema, JSON or YAML
    #[arg(long)]
    pub schema: PathBuf,

    /// Only show this field
    #[arg(long)]
    pub field: Option<String>,
}

#[derive(Args)]
pub struct SeedArgs {
    /// Field schema, JSON or YAML
    #[arg(long)]
    pub schema: PathBuf,

    /// Field the new rule is for
    #[arg(long)]
    pub field: String,

    /// Date to seed date rules with, as DD/MM/YYYY (default: today)
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_command() {
        let cli = Cli::try_parse_from([
            "fbq", "build", "--schema", "s.json", "--input", "r.yaml", "--format", "yaml",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Yaml);
        assert!(!cli.verbose);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.schema, PathBuf::from("s.json"));
                assert_eq!(args.input, PathBuf::from("r.yaml"));
            }
            _ => panic!("Expected build command"),
        }
    }

    #[test]
    fn test_seed_requires_field() {
        assert!(Cli::try_parse_from(["fbq", "seed", "--schema", "s.json"]).is_err());
    }
}

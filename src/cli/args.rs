use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "archmap")]
#[command(about = "Architecture graph and code quality report for a repository", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the architecture graph and quality score for a repository
    Analyze {
        /// Repository directory or snapshot JSON file
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .archmap.toml)
        #[arg(short, long, env = "ARCHMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Classification rule table overriding the embedded defaults
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Activity metadata JSON (commits, pull requests, dependencies)
        #[arg(long)]
        activity: Option<PathBuf>,

        /// Number of worker threads (0 = number of CPU cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,

        /// Analyze files sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Increase log verbosity (-v info, -vv debug, -vvv trace)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .archmap.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the embedded classification rule table
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["archmap", "analyze", "."]).unwrap();
        match cli.command {
            Commands::Analyze {
                path,
                format,
                jobs,
                no_parallel,
                verbosity,
                ..
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert_eq!(format, OutputFormat::Terminal);
                assert_eq!(jobs, 0);
                assert!(!no_parallel);
                assert_eq!(verbosity, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::try_parse_from([
            "archmap", "analyze", "repo", "--format", "json", "-o", "out.json", "-j", "3",
            "--no-parallel", "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                format,
                output,
                jobs,
                no_parallel,
                verbosity,
                ..
            } => {
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(jobs, 3);
                assert!(no_parallel);
                assert_eq!(verbosity, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_force() {
        let cli = Cli::try_parse_from(["archmap", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}

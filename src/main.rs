use anyhow::Result;
use archmap::cli::{self, Commands};
use archmap::commands::{self, AnalyzeConfig};
use archmap::observability::install_panic_hook;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = cli::parse_args();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            rules,
            activity,
            jobs,
            no_parallel,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            cli::configure_thread_pool(jobs);
            commands::handle_analyze(AnalyzeConfig {
                path,
                format: format.into(),
                output,
                config,
                rules,
                activity,
                jobs,
                parallel: !no_parallel,
            })
        }
        Commands::Init { force } => commands::init_config(force),
        Commands::Rules => commands::print_rules(),
    }
}

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::configure_logging(cli.log_level) {
        eprintln!("Warning: could not initialize logging: {e}");
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match cli.command() {
        Commands::Tools => {
            commands::tools::handle_tools();
            Ok(())
        }
        Commands::Config => commands::config::handle_config(&commands::load_settings(cli)?),
        Commands::Serve => commands::serve::handle_serve(commands::load_settings(cli)?).await,
    }
}

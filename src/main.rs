//! ClipStack CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clipstack::cli::{
    agent_app::run_agent,
    app::{load_merged_config, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    ctl_cmd::handle_ctl_command,
    presenter::Presenter,
};
use clipstack::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();
    let cli_config = cli.as_config();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Ctl { action }) => {
            if let Err(e) = handle_ctl_command(action, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Default invocation: run the agent
    let config = load_merged_config(cli_config).await;
    run_agent(config).await
}

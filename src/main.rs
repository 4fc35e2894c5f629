//! atunc CLI entry point

use std::process::ExitCode;

use clap::Parser;

use atunc::cli::{
    app::{handle_parse_error, load_merged_config, print_usage, EXIT_ERROR},
    args::{Cli, Commands, Invocation},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
    run_list_devices, run_record,
};
use atunc::domain::config::AppConfig;
use atunc::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let presenter = Presenter::new();

    let mut cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e, &presenter).await,
    };

    // Merge config
    let cli_config = AppConfig {
        log_level: cli.log_level.clone(),
        ..Default::default()
    };
    let config = load_merged_config(cli_config, &presenter).await;
    init_logging(config.log_level_or_default());

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command.take() {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Route to appropriate handler
    match cli.invocation() {
        Invocation::ListDevices => run_list_devices(&presenter),
        Invocation::Record(request) => run_record(request, &config).await,
        Invocation::Usage => print_usage(&presenter, config.usage_exit_code_or_default()),
    }
}

//! Main app runners

use std::env;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::CommandFactory;

use crate::application::ports::{AudioInput, ConfigStore, SinkFactory};
use crate::application::{ListInputDevicesUseCase, RecordRequest, Recorder};
use crate::domain::config::AppConfig;
use crate::infrastructure::{CpalDeviceCatalog, CpalInput, WavSinkFactory, XdgConfigStore};

use super::args::Cli;
use super::config_cmd::report_rejected;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Environment variable overriding the configured log level
pub const LOG_LEVEL_ENV: &str = "ATUNC_LOG";

/// Print the input devices as a JSON array on stdout
pub fn run_list_devices(presenter: &Presenter) -> ExitCode {
    let devices = ListInputDevicesUseCase::new(CpalDeviceCatalog::new()).execute();

    match serde_json::to_string(&devices) {
        Ok(json) => {
            presenter.output(&json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&format!("Failed to encode device list: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Record until SIGINT/SIGTERM, then finalize the file and exit with the
/// signal number
pub async fn run_record(request: RecordRequest, config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    // Hook signals before touching the device so an early Ctrl+C still
    // goes through the orderly path
    let shutdown = match ShutdownSignal::install().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let recorder = Recorder::new(
        CpalInput::new(config.buffer_frames_or_default()),
        WavSinkFactory,
    );

    ExitCode::from(record_until_shutdown(recorder, &request, shutdown, &mut presenter).await)
}

/// Run one session until a termination request arrives. Returns the exit
/// code: the signal number after a stop, [`EXIT_ERROR`] if setup failed.
pub async fn record_until_shutdown<I, F>(
    recorder: Recorder<I, F>,
    request: &RecordRequest,
    mut shutdown: ShutdownSignal,
    presenter: &mut Presenter,
) -> u8
where
    I: AudioInput,
    F: SinkFactory,
{
    let recording = match recorder.start(request) {
        Ok(recording) => recording,
        Err(e) => {
            presenter.error(&e.to_string());
            return EXIT_ERROR;
        }
    };

    presenter.info(&format!(
        "Recording device {} to {} ({})",
        request.device_id,
        recording.output_path().display(),
        recording.format()
    ));
    presenter.start_spinner("Recording... Press Ctrl+C to stop.");

    let termination = shutdown.recv().await;

    presenter.stop_spinner();
    if let Some(termination) = termination {
        presenter.info(&format!(
            "Received {}. Stopping recording.",
            termination.name()
        ));
    }

    let summary = recording.stop();
    presenter.success(&presenter.format_summary(&summary));
    if summary.write_failures > 0 {
        presenter.warn(&format!(
            "{} buffers could not be written",
            summary.write_failures
        ));
    }

    termination.map_or(EXIT_SUCCESS, |t| t.exit_code())
}

/// Print usage text on stdout
pub fn print_usage(presenter: &Presenter, exit_code: u8) -> ExitCode {
    presenter.output(&Cli::command().render_help().to_string());
    ExitCode::from(exit_code)
}

/// Handle a command line clap refused: help and version print as usual,
/// anything else prints the reason and the usage text
pub async fn handle_parse_error(err: clap::Error, presenter: &Presenter) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::from(EXIT_SUCCESS)
        }
        _ => {
            let rendered = err.to_string();
            let reason = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            presenter.error(reason);

            let config = load_merged_config(AppConfig::empty(), presenter).await;
            print_usage(presenter, config.usage_exit_code_or_default())
        }
    }
}

/// Load and merge configuration from file, env, and CLI. An unreadable
/// file counts as empty; rejected entries are reported and skipped.
pub async fn load_merged_config(cli_config: AppConfig, presenter: &Presenter) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(loaded) => {
            report_rejected(&loaded, presenter);
            loaded.config
        }
        Err(e) => {
            presenter.warn(&format!("{}. Using defaults.", e));
            AppConfig::empty()
        }
    };

    // Build env config
    let env_config = AppConfig {
        log_level: env::var(LOG_LEVEL_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

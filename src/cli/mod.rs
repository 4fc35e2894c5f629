//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! logging setup and the main application runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_list_devices, run_record, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, Invocation};
pub use presenter::Presenter;
pub use signals::{ShutdownSignal, Termination};

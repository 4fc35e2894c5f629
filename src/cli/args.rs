//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::RecordRequest;
use crate::domain::device::DeviceId;

/// atunc - list audio input devices and record one of them to a WAV file
#[derive(Parser, Debug)]
#[command(name = "atunc")]
#[command(version)]
#[command(about = "List audio input devices and record one of them to a WAV file")]
#[command(long_about = None)]
pub struct Cli {
    /// List all audio input devices in JSON format
    #[arg(long)]
    pub list_devices: bool,

    /// Device id to record from (as printed by --list-devices)
    #[arg(long, value_name = "ID")]
    pub device_id: Option<DeviceId>,

    /// Output path for the WAV file
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Log filter for diagnostics on stderr (e.g. warn, debug)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// What a parsed command line asks for
#[derive(Debug, Clone)]
pub enum Invocation {
    ListDevices,
    Record(RecordRequest),
    Usage,
}

impl Cli {
    /// Resolve the top-level flags. `--list-devices` wins over recording
    /// flags; recording needs both a device and a path.
    pub fn invocation(&self) -> Invocation {
        if self.list_devices {
            return Invocation::ListDevices;
        }

        match (self.device_id, &self.output_path) {
            (Some(device_id), Some(output_path)) => Invocation::Record(RecordRequest {
                device_id,
                output_path: output_path.clone(),
            }),
            _ => Invocation::Usage,
        }
    }
}

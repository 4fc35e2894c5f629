//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio host, the file system and the config file.

pub mod audio;
pub mod config;
pub mod recording;

// Re-export adapters
pub use audio::{CpalDeviceCatalog, CpalInput};
pub use config::XdgConfigStore;
pub use recording::{WavFileSink, WavSinkFactory};

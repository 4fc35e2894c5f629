//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod devices;
pub mod sink;

// Re-export common types
pub use capture::{ActiveStream, AudioInput, BufferCallback, InputBinding, RecordingError};
pub use config::{ConfigStore, LoadedConfig};
pub use devices::{DeviceCatalog, DeviceError, DeviceProbe};
pub use sink::{PcmSink, SinkError, SinkFactory};

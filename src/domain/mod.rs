//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod device;
pub mod error;
pub mod recording;

// Re-export common types
pub use config::{AppConfig, ConfigKey};
pub use device::{AudioDeviceDescriptor, DeviceId};
pub use error::*;
pub use recording::{InvalidStateTransition, PcmFormat, RecordingLifecycle, SessionState};

//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod list_devices;
pub mod ports;
pub mod record;

// Re-export use cases
pub use list_devices::ListInputDevicesUseCase;
pub use record::{ActiveRecording, RecordRequest, Recorder, RecordingSummary};

//! Audio capture port interfaces

use thiserror::Error;

use super::sink::SinkError;
use crate::domain::device::DeviceId;
use crate::domain::recording::{InvalidStateTransition, PcmFormat};

/// Recording errors
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("No audio device with id {0}")]
    DeviceNotFound(DeviceId),

    #[error("Device {id} has no input capability: {reason}")]
    NoInput { id: DeviceId, reason: String },

    #[error("Failed to enumerate audio devices: {0}")]
    HostUnavailable(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to create output file: {0}")]
    Sink(#[from] SinkError),

    #[error("Failed to start input stream: {0}")]
    StartFailed(String),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateTransition),
}

/// Receives each captured buffer as interleaved 16-bit samples
pub type BufferCallback = Box<dyn FnMut(&[i16]) + Send + 'static>;

/// Port for binding to an audio input
pub trait AudioInput {
    /// Resolve `device_id` and negotiate its native input format.
    ///
    /// Nothing is created on disk and no stream runs yet.
    fn bind(&self, device_id: DeviceId) -> Result<Box<dyn InputBinding>, RecordingError>;
}

/// A device bound for capture, with its negotiated format
pub trait InputBinding {
    /// Format the hardware delivers at
    fn format(&self) -> PcmFormat;

    /// Start streaming. Buffers are handed to `on_buffer` in capture order
    /// from the audio layer's own thread.
    fn start(self: Box<Self>, on_buffer: BufferCallback)
        -> Result<Box<dyn ActiveStream>, RecordingError>;
}

/// A running input stream
pub trait ActiveStream {
    /// Halt the stream and release the callback registration.
    ///
    /// No buffer is delivered once this returns.
    fn stop(self: Box<Self>);
}

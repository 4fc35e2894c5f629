//! Audio file sink port interfaces

use std::path::Path;

use thiserror::Error;

use crate::domain::recording::PcmFormat;

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create {path}: {message}")]
    CreateFailed { path: String, message: String },

    #[error("Failed to write audio data after {committed_frames} frames: {message}")]
    WriteFailed {
        committed_frames: u64,
        message: String,
    },

    #[error("Failed to finalize audio file: {0}")]
    FinalizeFailed(String),
}

impl SinkError {
    /// Whole frames that reached the sink before the error
    pub fn committed_frames(&self) -> u64 {
        match self {
            Self::WriteFailed {
                committed_frames, ..
            } => *committed_frames,
            _ => 0,
        }
    }
}

/// Destination for captured 16-bit PCM
pub trait PcmSink: Send {
    /// Append interleaved samples and return the number of frames stored.
    ///
    /// Only whole frames are stored. A failure partway through reports how
    /// many frames were committed before it, and the next write starts on a
    /// frame boundary.
    fn write(&mut self, samples: &[i16]) -> Result<u64, SinkError>;

    /// Flush and write the container header. Consumes the sink.
    fn finalize(self: Box<Self>) -> Result<(), SinkError>;
}

/// Port for opening sinks at a path in a given format
pub trait SinkFactory {
    fn create(&self, path: &Path, format: PcmFormat) -> Result<Box<dyn PcmSink>, SinkError>;
}

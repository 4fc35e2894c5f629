//! Recording value objects and lifecycle

mod format;
mod lifecycle;

pub use format::{PcmFormat, BITS_PER_SAMPLE};
pub use lifecycle::{InvalidStateTransition, RecordingLifecycle, SessionState};

//! Recording infrastructure module
//!
//! Captured audio is written as 16-bit integer PCM WAV via hound.

mod wav_sink;

pub use wav_sink::{WavFileSink, WavSinkFactory};

//! Negotiated PCM format value object

use std::fmt;
use std::time::Duration;

/// Bit depth of every recorded file. Samples are signed integers, little-endian.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Sample rate and channel count negotiated from the hardware at start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmFormat {
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Number of complete frames contained in `samples` interleaved samples
    pub fn frames_in(&self, samples: usize) -> u64 {
        if self.channels == 0 {
            return 0;
        }
        (samples / self.channels as usize) as u64
    }

    /// Playback duration of `frames` frames at this rate
    pub fn duration_of(&self, frames: u64) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(frames as f64 / self.sample_rate as f64)
    }
}

impl fmt::Display for PcmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {}-bit PCM",
            self.sample_rate, self.channels, BITS_PER_SAMPLE
        )
    }
}

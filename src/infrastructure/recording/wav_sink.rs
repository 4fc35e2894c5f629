//! WAV file sink
//!
//! Settings:
//! - Sample rate and channels from the negotiated device format
//! - 16-bit signed integer samples, little-endian (RIFF)
//!
//! Each frame is handed to the writer in a single call, so a failed write
//! never leaves part of a frame behind and the channels stay interleaved.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use hound::{WavSpec, WavWriter};
use tracing::debug;

use crate::application::ports::{PcmSink, SinkError, SinkFactory};
use crate::domain::recording::{PcmFormat, BITS_PER_SAMPLE};

/// Open WAV stream being recorded into
pub struct WavFileSink<W: Write + Seek = BufWriter<File>> {
    writer: WavWriter<W>,
    format: PcmFormat,
    path: PathBuf,
}

impl WavFileSink {
    /// Create (or truncate) `path` as a WAV file in `format`
    pub fn create(path: &Path, format: PcmFormat) -> Result<Self, SinkError> {
        let create_failed = |message: String| SinkError::CreateFailed {
            path: path.display().to_string(),
            message,
        };

        if format.channels == 0 {
            return Err(create_failed("device reported zero channels".to_string()));
        }

        let file = File::create(path).map_err(|e| create_failed(e.to_string()))?;
        let sink = Self::new(BufWriter::new(file), format, path)
            .map_err(|e| create_failed(e.to_string()))?;

        debug!("Created {} ({})", path.display(), format);
        Ok(sink)
    }
}

impl<W: Write + Seek> WavFileSink<W> {
    /// Start a WAV stream on `writer`. `path` is only used in messages.
    fn new(writer: W, format: PcmFormat, path: &Path) -> Result<Self, hound::Error> {
        Ok(Self {
            writer: WavWriter::new(writer, Self::spec(format))?,
            format,
            path: path.to_path_buf(),
        })
    }

    fn spec(format: PcmFormat) -> WavSpec {
        WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: hound::SampleFormat::Int,
        }
    }
}

impl<W: Write + Seek + Send> PcmSink for WavFileSink<W> {
    fn write(&mut self, samples: &[i16]) -> Result<u64, SinkError> {
        let channels = self.format.channels;
        let whole_frames = self.format.frames_in(samples.len());
        if whole_frames * u64::from(channels) != samples.len() as u64 {
            debug!(
                "Dropping {} samples of an incomplete frame",
                samples.len() % usize::from(channels)
            );
        }

        let mut committed = 0;
        for frame in samples.chunks_exact(usize::from(channels)) {
            let mut frame_writer = self.writer.get_i16_writer(u32::from(channels));
            for &sample in frame {
                frame_writer.write_sample(sample);
            }
            frame_writer
                .flush()
                .map_err(|e| SinkError::WriteFailed {
                    committed_frames: committed,
                    message: e.to_string(),
                })?;
            committed += 1;
        }
        Ok(committed)
    }

    fn finalize(self: Box<Self>) -> Result<(), SinkError> {
        let WavFileSink { writer, path, .. } = *self;
        writer
            .finalize()
            .map_err(|e| SinkError::FinalizeFailed(format!("{}: {}", path.display(), e)))?;
        debug!("Finalized {}", path.display());
        Ok(())
    }
}

/// Opens [`WavFileSink`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct WavSinkFactory;

impl SinkFactory for WavSinkFactory {
    fn create(&self, path: &Path, format: PcmFormat) -> Result<Box<dyn PcmSink>, SinkError> {
        Ok(Box::new(WavFileSink::create(path, format)?))
    }
}

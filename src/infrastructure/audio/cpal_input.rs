//! Audio input backed by cpal
//!
//! The stream runs at the device's default input config. Whatever sample
//! type the hardware delivers is converted to i16 before it reaches the
//! buffer callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{
    BufferSize, FromSample, Sample, SampleFormat, SizedSample, StreamConfig, SupportedBufferSize,
    SupportedStreamConfig,
};
use tracing::{debug, warn};

use crate::application::ports::{
    ActiveStream, AudioInput, BufferCallback, InputBinding, RecordingError,
};
use crate::domain::device::DeviceId;
use crate::domain::recording::PcmFormat;

/// cpal-based audio input
pub struct CpalInput {
    host: cpal::Host,
    /// Frames requested per callback
    buffer_frames: u32,
}

impl CpalInput {
    /// Create an input over the default host
    pub fn new(buffer_frames: u32) -> Self {
        Self {
            host: cpal::default_host(),
            buffer_frames,
        }
    }
}

impl AudioInput for CpalInput {
    fn bind(&self, device_id: DeviceId) -> Result<Box<dyn InputBinding>, RecordingError> {
        let device = self
            .host
            .devices()
            .map_err(|e| RecordingError::HostUnavailable(e.to_string()))?
            .nth(device_id.as_index())
            .ok_or(RecordingError::DeviceNotFound(device_id))?;

        let config = device
            .default_input_config()
            .map_err(|e| RecordingError::NoInput {
                id: device_id,
                reason: e.to_string(),
            })?;

        debug!(
            "Device {} native input: {:?}, {} Hz, {} ch",
            device_id,
            config.sample_format(),
            config.sample_rate().0,
            config.channels()
        );

        Ok(Box::new(CpalBinding {
            device,
            config,
            buffer_frames: self.buffer_frames,
        }))
    }
}

struct CpalBinding {
    device: cpal::Device,
    config: SupportedStreamConfig,
    buffer_frames: u32,
}

impl InputBinding for CpalBinding {
    fn format(&self) -> PcmFormat {
        PcmFormat::new(self.config.sample_rate().0, self.config.channels())
    }

    fn start(
        self: Box<Self>,
        on_buffer: BufferCallback,
    ) -> Result<Box<dyn ActiveStream>, RecordingError> {
        let stream_config = StreamConfig {
            channels: self.config.channels(),
            sample_rate: self.config.sample_rate(),
            buffer_size: buffer_size(self.config.buffer_size(), self.buffer_frames),
        };

        let device = &self.device;
        let stream = match self.config.sample_format() {
            SampleFormat::I8 => build_stream::<i8>(device, &stream_config, on_buffer),
            SampleFormat::I16 => build_stream::<i16>(device, &stream_config, on_buffer),
            SampleFormat::I32 => build_stream::<i32>(device, &stream_config, on_buffer),
            SampleFormat::I64 => build_stream::<i64>(device, &stream_config, on_buffer),
            SampleFormat::U8 => build_stream::<u8>(device, &stream_config, on_buffer),
            SampleFormat::U16 => build_stream::<u16>(device, &stream_config, on_buffer),
            SampleFormat::U32 => build_stream::<u32>(device, &stream_config, on_buffer),
            SampleFormat::U64 => build_stream::<u64>(device, &stream_config, on_buffer),
            SampleFormat::F32 => build_stream::<f32>(device, &stream_config, on_buffer),
            SampleFormat::F64 => build_stream::<f64>(device, &stream_config, on_buffer),
            other => return Err(RecordingError::UnsupportedFormat(format!("{:?}", other))),
        }
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        Ok(Box::new(CpalStream { stream }))
    }
}

/// Build an input stream that converts `T` samples to i16
fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut on_buffer: BufferCallback,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    i16: FromSample<T>,
{
    let mut converted: Vec<i16> = Vec::new();

    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            converted.clear();
            converted.extend(data.iter().map(|&s| s.to_sample::<i16>()));
            on_buffer(&converted);
        },
        |err| warn!("Audio stream error: {}", err),
        None,
    )
}

/// Requested buffer size, clamped to the device's supported range
fn buffer_size(supported: &SupportedBufferSize, requested: u32) -> BufferSize {
    match supported {
        SupportedBufferSize::Range { min, max } if min <= max => {
            BufferSize::Fixed(requested.clamp(*min, *max))
        }
        _ => BufferSize::Default,
    }
}

struct CpalStream {
    stream: cpal::Stream,
}

impl ActiveStream for CpalStream {
    fn stop(self: Box<Self>) {
        if let Err(e) = self.stream.pause() {
            debug!("Failed to pause stream: {}", e);
        }
        drop(self.stream);
    }
}

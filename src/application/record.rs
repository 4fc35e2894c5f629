//! Record-to-file use case

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::device::DeviceId;
use crate::domain::recording::{PcmFormat, RecordingLifecycle, SessionState};

use super::ports::{ActiveStream, AudioInput, PcmSink, RecordingError, SinkFactory};

/// Input parameters for the record use case
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub device_id: DeviceId,
    pub output_path: PathBuf,
}

/// Outcome of a finished recording
#[derive(Debug, Clone)]
pub struct RecordingSummary {
    pub output_path: PathBuf,
    pub format: PcmFormat,
    pub frames_written: u64,
    pub write_failures: u64,
}

impl RecordingSummary {
    /// Audio duration actually written to the file
    pub fn duration(&self) -> Duration {
        self.format.duration_of(self.frames_written)
    }
}

/// State shared between the audio callback and the shutdown path.
///
/// The callback writes only while the sink is present. Shutdown takes it
/// out under the lock, which waits for an in-flight write to finish.
struct CaptureState {
    sink: Mutex<Option<Box<dyn PcmSink>>>,
    format: PcmFormat,
    frames_written: AtomicU64,
    write_failures: AtomicU64,
}

impl CaptureState {
    fn new(sink: Box<dyn PcmSink>, format: PcmFormat) -> Self {
        Self {
            sink: Mutex::new(Some(sink)),
            format,
            frames_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    /// Append one captured buffer. Failures are counted, never fatal.
    fn deliver(&self, samples: &[i16]) {
        let mut guard = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let Some(sink) = guard.as_mut() else {
            return;
        };

        match sink.write(samples) {
            Ok(frames) => {
                self.frames_written.fetch_add(frames, Ordering::SeqCst);
            }
            Err(e) => {
                self.frames_written
                    .fetch_add(e.committed_frames(), Ordering::SeqCst);
                let failures = self.write_failures.fetch_add(1, Ordering::SeqCst) + 1;
                warn!(failures, "{}", e);
            }
        }
    }

    /// Take the sink away from the streaming side
    fn release(&self) -> Option<Box<dyn PcmSink>> {
        self.sink.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    fn finalize(&self) {
        if let Some(sink) = self.release() {
            if let Err(e) = sink.finalize() {
                warn!("{}", e);
            }
        }
    }
}

/// Single-use recorder: binds a device, opens the file, starts the stream.
pub struct Recorder<I, F>
where
    I: AudioInput,
    F: SinkFactory,
{
    input: I,
    sinks: F,
}

impl<I, F> Recorder<I, F>
where
    I: AudioInput,
    F: SinkFactory,
{
    /// Create a new recorder
    pub fn new(input: I, sinks: F) -> Self {
        Self { input, sinks }
    }

    /// Start recording `request.device_id` into `request.output_path`.
    ///
    /// Setup runs in order: bind the device, create the file, start the
    /// stream. A failure at any step aborts; nothing is created on disk
    /// before the device is bound. If the stream fails to start, the
    /// already-created file is finalized empty.
    pub fn start(self, request: &RecordRequest) -> Result<ActiveRecording, RecordingError> {
        let mut lifecycle = RecordingLifecycle::new();
        lifecycle.begin()?;

        let binding = self.input.bind(request.device_id)?;
        let format = binding.format();
        info!("Bound device {} ({})", request.device_id, format);

        let sink = self.sinks.create(&request.output_path, format)?;
        let state = Arc::new(CaptureState::new(sink, format));

        let callback_state = Arc::clone(&state);
        let stream = match binding.start(Box::new(move |samples: &[i16]| {
            callback_state.deliver(samples)
        })) {
            Ok(stream) => stream,
            Err(e) => {
                state.finalize();
                return Err(e);
            }
        };

        info!("Recording to {}", request.output_path.display());

        Ok(ActiveRecording {
            lifecycle,
            stream: Some(stream),
            state,
            output_path: request.output_path.clone(),
        })
    }
}

/// Handle to the one running recording.
///
/// Dropping the handle without calling [`ActiveRecording::stop`] performs
/// the same teardown, so the file is finalized on every exit path.
pub struct ActiveRecording {
    lifecycle: RecordingLifecycle,
    stream: Option<Box<dyn ActiveStream>>,
    state: Arc<CaptureState>,
    output_path: PathBuf,
}

impl ActiveRecording {
    pub fn format(&self) -> PcmFormat {
        self.state.format
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn session_state(&self) -> SessionState {
        self.lifecycle.state()
    }

    /// Frames appended to the file so far
    pub fn frames_written(&self) -> u64 {
        self.state.frames_written.load(Ordering::SeqCst)
    }

    /// Buffers that failed to reach the file so far
    pub fn write_failures(&self) -> u64 {
        self.state.write_failures.load(Ordering::SeqCst)
    }

    /// Stop the stream and finalize the file
    pub fn stop(mut self) -> RecordingSummary {
        self.shutdown();
        RecordingSummary {
            output_path: self.output_path.clone(),
            format: self.state.format,
            frames_written: self.frames_written(),
            write_failures: self.write_failures(),
        }
    }

    fn shutdown(&mut self) {
        if self.lifecycle.finish().is_err() {
            return;
        }

        // Stream first: once it is down no callback can race the finalize.
        if let Some(stream) = self.stream.take() {
            stream.stop();
        }
        self.state.finalize();

        debug!(
            frames = self.frames_written(),
            failures = self.write_failures(),
            "Recording finalized"
        );
    }
}

impl Drop for ActiveRecording {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{BufferCallback, InputBinding, SinkError};
    use std::sync::atomic::AtomicBool;

    #[derive(Default)]
    struct Recorded {
        samples: Vec<i16>,
        finalized: bool,
    }

    #[derive(Clone, Default)]
    struct MemorySinks {
        recorded: Arc<Mutex<Recorded>>,
        created: Arc<AtomicBool>,
    }

    struct MemorySink {
        recorded: Arc<Mutex<Recorded>>,
        format: PcmFormat,
    }

    impl PcmSink for MemorySink {
        fn write(&mut self, samples: &[i16]) -> Result<u64, SinkError> {
            self.recorded.lock().unwrap().samples.extend_from_slice(samples);
            Ok(self.format.frames_in(samples.len()))
        }

        fn finalize(self: Box<Self>) -> Result<(), SinkError> {
            self.recorded.lock().unwrap().finalized = true;
            Ok(())
        }
    }

    impl SinkFactory for MemorySinks {
        fn create(&self, _path: &Path, format: PcmFormat) -> Result<Box<dyn PcmSink>, SinkError> {
            self.created.store(true, Ordering::SeqCst);
            Ok(Box::new(MemorySink {
                recorded: Arc::clone(&self.recorded),
                format,
            }))
        }
    }

    /// Commits the first frame of every buffer, then fails
    struct ShortWriteSink;

    impl PcmSink for ShortWriteSink {
        fn write(&mut self, _samples: &[i16]) -> Result<u64, SinkError> {
            Err(SinkError::WriteFailed {
                committed_frames: 1,
                message: "disk full".into(),
            })
        }

        fn finalize(self: Box<Self>) -> Result<(), SinkError> {
            Ok(())
        }
    }

    /// Delivers its buffers synchronously from `start`
    struct ScriptedInput {
        format: PcmFormat,
        buffers: Vec<Vec<i16>>,
        fail_start: bool,
    }

    struct ScriptedBinding {
        format: PcmFormat,
        buffers: Vec<Vec<i16>>,
        fail_start: bool,
    }

    struct NullStream;

    impl ActiveStream for NullStream {
        fn stop(self: Box<Self>) {}
    }

    impl AudioInput for ScriptedInput {
        fn bind(&self, device_id: DeviceId) -> Result<Box<dyn InputBinding>, RecordingError> {
            if device_id.value() != 1 {
                return Err(RecordingError::DeviceNotFound(device_id));
            }
            Ok(Box::new(ScriptedBinding {
                format: self.format,
                buffers: self.buffers.clone(),
                fail_start: self.fail_start,
            }))
        }
    }

    impl InputBinding for ScriptedBinding {
        fn format(&self) -> PcmFormat {
            self.format
        }

        fn start(
            self: Box<Self>,
            mut on_buffer: BufferCallback,
        ) -> Result<Box<dyn ActiveStream>, RecordingError> {
            if self.fail_start {
                return Err(RecordingError::StartFailed("device busy".into()));
            }
            for buffer in &self.buffers {
                on_buffer(buffer);
            }
            Ok(Box::new(NullStream))
        }
    }

    fn request(id: u32) -> RecordRequest {
        RecordRequest {
            device_id: DeviceId::new(id),
            output_path: PathBuf::from("/tmp/ignored.wav"),
        }
    }

    fn input(buffers: Vec<Vec<i16>>) -> ScriptedInput {
        ScriptedInput {
            format: PcmFormat::new(48_000, 2),
            buffers,
            fail_start: false,
        }
    }

    #[test]
    fn buffers_are_appended_in_order() {
        let sinks = MemorySinks::default();
        let recorder = Recorder::new(input(vec![vec![1, 2], vec![3, 4], vec![5, 6]]), sinks.clone());

        let recording = recorder.start(&request(1)).unwrap();
        assert_eq!(recording.session_state(), SessionState::Recording);

        let summary = recording.stop();
        assert_eq!(summary.frames_written, 3);
        assert_eq!(summary.write_failures, 0);

        let recorded = sinks.recorded.lock().unwrap();
        assert_eq!(recorded.samples, vec![1, 2, 3, 4, 5, 6]);
        assert!(recorded.finalized);
    }

    #[test]
    fn unknown_device_creates_nothing() {
        let sinks = MemorySinks::default();
        let recorder = Recorder::new(input(vec![]), sinks.clone());

        let err = recorder.start(&request(73)).err().unwrap();
        assert!(matches!(err, RecordingError::DeviceNotFound(id) if id.value() == 73));
        assert!(!sinks.created.load(Ordering::SeqCst));
    }

    #[test]
    fn failed_stream_start_finalizes_file() {
        let sinks = MemorySinks::default();
        let mut scripted = input(vec![vec![1, 2]]);
        scripted.fail_start = true;

        let err = Recorder::new(scripted, sinks.clone())
            .start(&request(1))
            .err()
            .unwrap();
        assert!(matches!(err, RecordingError::StartFailed(_)));
        assert!(sinks.recorded.lock().unwrap().finalized);
    }

    #[test]
    fn dropping_handle_finalizes_file() {
        let sinks = MemorySinks::default();
        let recording = Recorder::new(input(vec![vec![0, 0]]), sinks.clone())
            .start(&request(1))
            .unwrap();

        drop(recording);
        assert!(sinks.recorded.lock().unwrap().finalized);
    }

    #[test]
    fn buffers_after_release_are_dropped() {
        let sinks = MemorySinks::default();
        let sink = sinks.create(Path::new("x.wav"), PcmFormat::new(8_000, 1)).unwrap();
        let state = CaptureState::new(sink, PcmFormat::new(8_000, 1));

        state.deliver(&[1, 2]);
        state.finalize();
        state.deliver(&[3, 4]);

        assert_eq!(sinks.recorded.lock().unwrap().samples, vec![1, 2]);
        assert_eq!(state.frames_written.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn short_write_counts_committed_frames() {
        let state = CaptureState::new(Box::new(ShortWriteSink), PcmFormat::new(8_000, 2));

        state.deliver(&[1, 1, 2, 2, 3, 3]);
        state.deliver(&[4, 4]);

        assert_eq!(state.frames_written.load(Ordering::SeqCst), 2);
        assert_eq!(state.write_failures.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn summary_duration_uses_negotiated_rate() {
        let summary = RecordingSummary {
            output_path: PathBuf::from("out.wav"),
            format: PcmFormat::new(16_000, 1),
            frames_written: 48_000,
            write_failures: 0,
        };
        assert_eq!(summary.duration(), Duration::from_secs(3));
    }
}

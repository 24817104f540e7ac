//! Record pipeline use case: capture -> persist -> transcode -> cleanup

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::fs;

use crate::domain::recording::RecordingSession;

use super::ports::{
    AudioRecorder, CaptureOutcome, PersistError, ProgressCallback, RecordingError, TranscodeError,
    Transcoder, WaveformWriter,
};

/// Bitrate for the compressed artifact
pub const MP3_BITRATE_KBPS: u32 = 192;

/// Fatal pipeline errors. Transcoding failure is deliberately absent: it
/// degrades the outcome instead of failing the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Saving recording failed: {0}")]
    Persist(#[from] PersistError),
}

/// Terminal state of a pipeline run
#[derive(Debug)]
pub enum PipelineOutcome {
    /// MP3 written, intermediate WAV removed
    Transcoded { mp3: PathBuf },
    /// Transcoding failed; the WAV is the final artifact
    WavRetained {
        wav: PathBuf,
        reason: TranscodeError,
    },
    /// A termination signal stopped capture; no artifacts were written
    Interrupted,
}

/// Callbacks for progress and status updates
#[derive(Default)]
pub struct PipelineCallbacks {
    /// Called during capture with (elapsed_secs, total_secs)
    pub on_progress: Option<ProgressCallback>,
    /// Called when capture starts
    pub on_capture_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called after the WAV artifact is written
    pub on_wav_saved: Option<Box<dyn Fn(&Path) + Send + Sync>>,
    /// Called after the WAV artifact is removed post-transcode
    pub on_wav_removed: Option<Box<dyn Fn(&Path) + Send + Sync>>,
    /// Called when post-transcode cleanup hits a non-fatal problem
    pub on_cleanup_warning: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

/// One-shot record pipeline. Strictly linear: the only branch points are
/// the termination check after capture and the transcode failure fallback.
pub struct RecordPipelineUseCase<R, W, T>
where
    R: AudioRecorder,
    W: WaveformWriter,
    T: Transcoder,
{
    recorder: R,
    writer: W,
    transcoder: T,
    shutdown: Arc<AtomicBool>,
}

impl<R, W, T> RecordPipelineUseCase<R, W, T>
where
    R: AudioRecorder,
    W: WaveformWriter,
    T: Transcoder,
{
    /// Create a new pipeline. `shutdown` is written only by the signal
    /// handler and read here after the capture call returns.
    pub fn new(recorder: R, writer: W, transcoder: T, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            recorder,
            writer,
            transcoder,
            shutdown,
        }
    }

    /// Execute the pipeline for one session.
    pub async fn execute(
        &self,
        session: &RecordingSession,
        callbacks: PipelineCallbacks,
    ) -> Result<PipelineOutcome, PipelineError> {
        if let Some(cb) = &callbacks.on_capture_start {
            cb();
        }

        let outcome = self
            .recorder
            .record(
                session.duration(),
                Arc::clone(&self.shutdown),
                callbacks.on_progress.clone(),
            )
            .await?;

        // Termination check: the flag is authoritative even if the capture
        // call managed to fill its buffer before noticing the signal.
        let audio = match outcome {
            CaptureOutcome::Interrupted => return Ok(PipelineOutcome::Interrupted),
            CaptureOutcome::Completed(_) if self.shutdown.load(Ordering::SeqCst) => {
                return Ok(PipelineOutcome::Interrupted)
            }
            CaptureOutcome::Completed(audio) => audio,
        };

        let wav_path = session.wav_path();
        self.writer.write(&wav_path, audio).await?;
        if let Some(cb) = &callbacks.on_wav_saved {
            cb(&wav_path);
        }

        let mp3_path = session.mp3_path();
        match self
            .transcoder
            .transcode(&wav_path, &mp3_path, MP3_BITRATE_KBPS)
            .await
        {
            Ok(()) => {
                self.remove_wav(&wav_path, &callbacks).await;
                Ok(PipelineOutcome::Transcoded { mp3: mp3_path })
            }
            Err(reason) => Ok(PipelineOutcome::WavRetained {
                wav: wav_path,
                reason,
            }),
        }
    }

    /// Remove the intermediate WAV after a confirmed transcode. A missing
    /// file is a warning, never a pipeline failure.
    async fn remove_wav(&self, wav_path: &Path, callbacks: &PipelineCallbacks) {
        match fs::remove_file(wav_path).await {
            Ok(()) => {
                if let Some(cb) = &callbacks.on_wav_removed {
                    cb(wav_path);
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(cb) = &callbacks.on_cleanup_warning {
                    cb("Temporary WAV file not found for deletion");
                }
            }
            Err(e) => {
                if let Some(cb) = &callbacks.on_cleanup_warning {
                    cb(&format!("Could not delete temporary WAV file: {}", e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CapturedAudio;
    use crate::domain::recording::Duration;

    use async_trait::async_trait;
    use std::sync::Mutex;

    fn test_audio() -> CapturedAudio {
        CapturedAudio {
            samples: vec![0.0; 44100],
            channels: 1,
            sample_rate: 44100,
        }
    }

    struct StubRecorder {
        outcome: Mutex<Option<Result<CaptureOutcome, RecordingError>>>,
    }

    impl StubRecorder {
        fn completed() -> Self {
            Self {
                outcome: Mutex::new(Some(Ok(CaptureOutcome::Completed(test_audio())))),
            }
        }

        fn interrupted() -> Self {
            Self {
                outcome: Mutex::new(Some(Ok(CaptureOutcome::Interrupted))),
            }
        }

        fn failing() -> Self {
            Self {
                outcome: Mutex::new(Some(Err(RecordingError::NoAudioDevice))),
            }
        }
    }

    #[async_trait]
    impl AudioRecorder for StubRecorder {
        async fn record(
            &self,
            _duration: Duration,
            _shutdown: Arc<AtomicBool>,
            _on_progress: Option<ProgressCallback>,
        ) -> Result<CaptureOutcome, RecordingError> {
            self.outcome.lock().unwrap().take().unwrap()
        }
    }

    /// Writer that creates an empty file at the target path
    struct TouchWriter;

    #[async_trait]
    impl WaveformWriter for TouchWriter {
        async fn write(&self, path: &Path, _audio: CapturedAudio) -> Result<(), PersistError> {
            std::fs::write(path, b"RIFF").map_err(|e| PersistError::WriteFailed(e.to_string()))
        }
    }

    struct FailingWriter;

    #[async_trait]
    impl WaveformWriter for FailingWriter {
        async fn write(&self, _path: &Path, _audio: CapturedAudio) -> Result<(), PersistError> {
            Err(PersistError::WriteFailed("disk full".into()))
        }
    }

    enum StubTranscoder {
        /// Creates the output file
        Succeeding,
        /// Creates the output file, then deletes the input out from under
        /// the pipeline's cleanup
        SucceedingStealingInput,
        NotFound,
        Failing,
    }

    #[async_trait]
    impl Transcoder for StubTranscoder {
        async fn transcode(
            &self,
            input: &Path,
            output: &Path,
            _bitrate_kbps: u32,
        ) -> Result<(), TranscodeError> {
            match self {
                StubTranscoder::Succeeding => {
                    std::fs::write(output, b"ID3").unwrap();
                    Ok(())
                }
                StubTranscoder::SucceedingStealingInput => {
                    std::fs::write(output, b"ID3").unwrap();
                    std::fs::remove_file(input).unwrap();
                    Ok(())
                }
                StubTranscoder::NotFound => Err(TranscodeError::EncoderNotFound),
                StubTranscoder::Failing => {
                    Err(TranscodeError::EncoderFailed("exit status 1".into()))
                }
            }
        }
    }

    fn session_in(dir: &Path) -> RecordingSession {
        RecordingSession::with_stem(Duration::from_minutes(1), dir, "2026-01-02_03-04-05")
    }

    fn flag() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[tokio::test]
    async fn successful_run_leaves_only_mp3() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::completed(),
            TouchWriter,
            StubTranscoder::Succeeding,
            flag(),
        );

        let outcome = pipeline
            .execute(&session, PipelineCallbacks::default())
            .await
            .unwrap();

        assert!(matches!(outcome, PipelineOutcome::Transcoded { .. }));
        assert!(session.mp3_path().exists());
        assert!(!session.wav_path().exists());
    }

    #[tokio::test]
    async fn encoder_missing_retains_wav() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::completed(),
            TouchWriter,
            StubTranscoder::NotFound,
            flag(),
        );

        let outcome = pipeline
            .execute(&session, PipelineCallbacks::default())
            .await
            .unwrap();

        match outcome {
            PipelineOutcome::WavRetained { wav, reason } => {
                assert_eq!(wav, session.wav_path());
                assert!(matches!(reason, TranscodeError::EncoderNotFound));
            }
            other => panic!("expected WavRetained, got {:?}", other),
        }
        assert!(session.wav_path().exists());
        assert!(!session.mp3_path().exists());
    }

    #[tokio::test]
    async fn encoder_failure_retains_wav() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::completed(),
            TouchWriter,
            StubTranscoder::Failing,
            flag(),
        );

        let outcome = pipeline
            .execute(&session, PipelineCallbacks::default())
            .await
            .unwrap();

        assert!(matches!(outcome, PipelineOutcome::WavRetained { .. }));
        assert!(session.wav_path().exists());
    }

    #[tokio::test]
    async fn interrupted_capture_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::interrupted(),
            TouchWriter,
            StubTranscoder::Succeeding,
            flag(),
        );

        let outcome = pipeline
            .execute(&session, PipelineCallbacks::default())
            .await
            .unwrap();

        assert!(matches!(outcome, PipelineOutcome::Interrupted));
        assert!(!session.wav_path().exists());
        assert!(!session.mp3_path().exists());
    }

    #[tokio::test]
    async fn shutdown_flag_set_during_capture_skips_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let shutdown = flag();
        shutdown.store(true, Ordering::SeqCst);
        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::completed(),
            TouchWriter,
            StubTranscoder::Succeeding,
            shutdown,
        );

        let outcome = pipeline
            .execute(&session, PipelineCallbacks::default())
            .await
            .unwrap();

        assert!(matches!(outcome, PipelineOutcome::Interrupted));
        assert!(!session.wav_path().exists());
    }

    #[tokio::test]
    async fn capture_error_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::failing(),
            TouchWriter,
            StubTranscoder::Succeeding,
            flag(),
        );

        let result = pipeline.execute(&session, PipelineCallbacks::default()).await;

        assert!(matches!(result, Err(PipelineError::Recording(_))));
        assert!(!session.wav_path().exists());
    }

    #[tokio::test]
    async fn persist_error_is_fatal_and_skips_transcode() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::completed(),
            FailingWriter,
            StubTranscoder::Succeeding,
            flag(),
        );

        let result = pipeline.execute(&session, PipelineCallbacks::default()).await;

        assert!(matches!(result, Err(PipelineError::Persist(_))));
        assert!(!session.mp3_path().exists());
    }

    #[tokio::test]
    async fn missing_wav_at_cleanup_warns_but_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        let warned = Arc::new(AtomicBool::new(false));
        let warned_clone = Arc::clone(&warned);

        let pipeline = RecordPipelineUseCase::new(
            StubRecorder::completed(),
            TouchWriter,
            StubTranscoder::SucceedingStealingInput,
            flag(),
        );
        let callbacks = PipelineCallbacks {
            on_cleanup_warning: Some(Box::new(move |_| {
                warned_clone.store(true, Ordering::SeqCst);
            })),
            ..Default::default()
        };

        let outcome = pipeline.execute(&session, callbacks).await.unwrap();

        assert!(matches!(outcome, PipelineOutcome::Transcoded { .. }));
        assert!(warned.load(Ordering::SeqCst));
        assert!(session.mp3_path().exists());
    }
}

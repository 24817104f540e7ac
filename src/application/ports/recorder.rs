//! Audio capture port

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::Duration;

/// Capture errors. All of these are fatal to the pipeline.
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Failed to query device configuration: {0}")]
    DeviceQueryFailed(String),

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

/// Raw audio captured from a device: interleaved f32 frames.
#[derive(Debug, Clone)]
pub struct CapturedAudio {
    /// Interleaved samples, `channels` per frame
    pub samples: Vec<f32>,
    /// Channel count the device was opened with
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl CapturedAudio {
    /// Number of sample frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }
}

/// Result of a capture call that completed without a device error.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// The full buffer was captured
    Completed(CapturedAudio),
    /// A termination signal arrived before the buffer filled; nothing usable
    /// was produced and the pipeline must not persist or transcode.
    Interrupted,
}

/// Progress callback type for capture progress.
/// Parameters: (elapsed_secs, total_secs)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Port for blocking, fixed-duration audio capture.
#[async_trait]
pub trait AudioRecorder: Send + Sync {
    /// Capture audio for `duration` from the default input device.
    ///
    /// Blocks (on a worker thread) until the buffer is full or `shutdown`
    /// becomes true, whichever comes first. The shutdown flag is only ever
    /// written by the signal path.
    async fn record(
        &self,
        duration: Duration,
        shutdown: Arc<AtomicBool>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<CaptureOutcome, RecordingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_divides_by_channels() {
        let audio = CapturedAudio {
            samples: vec![0.0; 88200],
            channels: 2,
            sample_rate: 44100,
        };
        assert_eq!(audio.frame_count(), 44100);
    }

    #[test]
    fn frame_count_mono() {
        let audio = CapturedAudio {
            samples: vec![0.0; 100],
            channels: 1,
            sample_rate: 44100,
        };
        assert_eq!(audio.frame_count(), 100);
    }
}

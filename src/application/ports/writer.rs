//! Waveform persistence port

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use super::recorder::CapturedAudio;

/// Persistence errors. Fatal: no MP3 attempt follows a failed WAV write.
#[derive(Debug, Clone, Error)]
pub enum PersistError {
    #[error("Failed to create output directory: {0}")]
    DirectoryFailed(String),

    #[error("Failed to write WAV file: {0}")]
    WriteFailed(String),
}

/// Port for writing captured audio to a waveform container file.
#[async_trait]
pub trait WaveformWriter: Send + Sync {
    /// Write `audio` to `path` as a WAV file, preserving the capture's
    /// sample rate and channel count.
    async fn write(&self, path: &Path, audio: CapturedAudio) -> Result<(), PersistError>;
}

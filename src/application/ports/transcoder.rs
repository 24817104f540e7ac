//! Transcoding port

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Transcoding errors. Non-fatal: the pipeline degrades to WAV-only output.
#[derive(Debug, Clone, Error)]
pub enum TranscodeError {
    #[error("Encoder not found. Please ensure ffmpeg is installed and on PATH")]
    EncoderNotFound,

    #[error("Encoder failed: {0}")]
    EncoderFailed(String),
}

/// Port for converting a WAV artifact into a compressed audio file via an
/// external encoder.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Transcode `input` into `output` at `bitrate_kbps`.
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        bitrate_kbps: u32,
    ) -> Result<(), TranscodeError>;
}

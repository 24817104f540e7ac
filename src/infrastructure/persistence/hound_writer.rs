//! WAV file writer using hound

use std::path::Path;

use async_trait::async_trait;
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::application::ports::{CapturedAudio, PersistError, WaveformWriter};

/// Writes captured audio as 32-bit float PCM WAV files.
pub struct HoundWriter;

impl HoundWriter {
    pub fn new() -> Self {
        Self
    }

    fn write_blocking(path: &Path, audio: &CapturedAudio) -> Result<(), PersistError> {
        let spec = WavSpec {
            channels: audio.channels,
            sample_rate: audio.sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let mut writer =
            WavWriter::create(path, spec).map_err(|e| PersistError::WriteFailed(e.to_string()))?;
        for &sample in &audio.samples {
            writer
                .write_sample(sample)
                .map_err(|e| PersistError::WriteFailed(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| PersistError::WriteFailed(e.to_string()))
    }
}

impl Default for HoundWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WaveformWriter for HoundWriter {
    async fn write(&self, path: &Path, audio: CapturedAudio) -> Result<(), PersistError> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::write_blocking(&path, &audio))
            .await
            .map_err(|e| PersistError::WriteFailed(format!("Task join error: {}", e)))?
    }
}

//! FFmpeg-based transcoder adapter

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{TranscodeError, Transcoder};

/// Name of the encoder binary resolved from PATH
const ENCODER_BIN: &str = "ffmpeg";

/// Converts WAV artifacts to MP3 by invoking ffmpeg as a subprocess.
pub struct FfmpegTranscoder;

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self
    }

    /// Build ffmpeg args for a WAV to MP3 conversion
    fn build_args(input: &Path, output: &Path, bitrate_kbps: u32) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-b:a".to_string(),
            format!("{}k", bitrate_kbps),
            output.to_string_lossy().to_string(),
        ]
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        bitrate_kbps: u32,
    ) -> Result<(), TranscodeError> {
        let args = Self::build_args(input, output, bitrate_kbps);

        let result = Command::new(ENCODER_BIN)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::EncoderNotFound
                } else {
                    TranscodeError::EncoderFailed(e.to_string())
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(TranscodeError::EncoderFailed(format!(
                "ffmpeg exited with error: {}",
                stderr.lines().last().unwrap_or("unknown error")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn args_carry_paths_and_bitrate() {
        let args = FfmpegTranscoder::build_args(
            &PathBuf::from("out/a.wav"),
            &PathBuf::from("out/a.mp3"),
            192,
        );
        assert_eq!(args, vec!["-y", "-i", "out/a.wav", "-b:a", "192k", "out/a.mp3"]);
    }

    #[tokio::test]
    async fn missing_binary_maps_to_encoder_not_found() {
        // Exercise the spawn-error classification with a binary that cannot
        // exist on PATH.
        let result = Command::new("micrec-test-no-such-encoder")
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::EncoderNotFound
                } else {
                    TranscodeError::EncoderFailed(e.to_string())
                }
            });
        assert!(matches!(result, Err(TranscodeError::EncoderNotFound)));
    }
}

//! Recording session value object

use std::path::PathBuf;

use chrono::Local;

use super::Duration;

/// Capture sample rate in Hz
pub const SAMPLE_RATE: u32 = 44100;

/// Maximum channel count requested from a device. Devices reporting fewer
/// input channels are captured at their own maximum.
pub const CHANNEL_CAP: u16 = 2;

/// A single recording session: resolved duration, output location, and the
/// timestamp stem shared by the WAV and MP3 artifacts.
///
/// The stem is resolved once at construction so both artifacts carry the
/// identical name regardless of how long capture and transcoding take.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    duration: Duration,
    output_dir: PathBuf,
    stem: String,
}

impl RecordingSession {
    /// Create a session, timestamping it with the current local time.
    pub fn new(duration: Duration, output_dir: impl Into<PathBuf>) -> Self {
        let stem = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        Self::with_stem(duration, output_dir, stem)
    }

    /// Create a session with an explicit stem (used by tests).
    pub fn with_stem(
        duration: Duration,
        output_dir: impl Into<PathBuf>,
        stem: impl Into<String>,
    ) -> Self {
        Self {
            duration,
            output_dir: output_dir.into(),
            stem: stem.into(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path of the intermediate WAV artifact
    pub fn wav_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.wav", self.stem))
    }

    /// Path of the final MP3 artifact
    pub fn mp3_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.mp3", self.stem))
    }
}

//! Port interfaces for the record pipeline

mod recorder;
mod transcoder;
mod writer;

pub use recorder::{
    AudioRecorder, CaptureOutcome, CapturedAudio, ProgressCallback, RecordingError,
};
pub use transcoder::{Transcoder, TranscodeError};
pub use writer::{PersistError, WaveformWriter};

//! Recording domain types

mod duration;
mod session;

pub use duration::{Duration, DEFAULT_DURATION_MINUTES};
pub use session::{RecordingSession, CHANNEL_CAP, SAMPLE_RATE};

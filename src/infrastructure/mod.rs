//! Infrastructure layer: adapter implementations

pub mod persistence;
pub mod recording;
pub mod transcode;

pub use persistence::HoundWriter;
pub use recording::CpalRecorder;
pub use transcode::FfmpegTranscoder;

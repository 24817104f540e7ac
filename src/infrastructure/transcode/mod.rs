//! Transcoding adapters

mod ffmpeg;

pub use ffmpeg::FfmpegTranscoder;

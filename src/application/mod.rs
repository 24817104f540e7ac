//! Application layer: the record pipeline use case and its ports

pub mod ports;
mod record;

pub use record::{
    PipelineCallbacks, PipelineError, PipelineOutcome, RecordPipelineUseCase, MP3_BITRATE_KBPS,
};

//! Audio capture adapters

mod cpal_recorder;

pub use cpal_recorder::CpalRecorder;

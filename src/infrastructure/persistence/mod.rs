//! Waveform persistence adapters

mod hound_writer;

pub use hound_writer::HoundWriter;

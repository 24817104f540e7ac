//! CLI layer: argument parsing, interactive prompt, output, signals

pub mod app;
pub mod args;
pub mod presenter;
pub mod prompt;
pub mod signals;

pub use args::RecordOptions;

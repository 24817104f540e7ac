//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::Parser;

/// micrec - record from the microphone, save as MP3
#[derive(Parser, Debug)]
#[command(name = "micrec")]
#[command(version)]
#[command(about = "Record audio using a microphone and save as MP3")]
#[command(long_about = None)]
pub struct Cli {
    /// Duration of recording in minutes (default=60, prompts when omitted)
    #[arg(
        short = 'd',
        long,
        value_name = "MINUTES",
        allow_negative_numbers = true
    )]
    pub duration: Option<i64>,

    /// Directory to store output audio files
    #[arg(long, value_name = "PATH", default_value = "recordings")]
    pub output_dir: PathBuf,
}

/// Parsed record options
#[derive(Debug, Clone)]
pub struct RecordOptions {
    /// Explicit duration in minutes, if given on the command line
    pub duration: Option<i64>,
    pub output_dir: PathBuf,
}

impl From<Cli> for RecordOptions {
    fn from(cli: Cli) -> Self {
        Self {
            duration: cli.duration,
            output_dir: cli.output_dir,
        }
    }
}

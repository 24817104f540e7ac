//! micrec - microphone recorder CLI
//!
//! This crate records audio from the default input device for a resolved
//! duration, persists it as a timestamped WAV file, and transcodes the WAV
//! to MP3 using an external ffmpeg binary.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (duration, recording session) and errors
//! - **Application**: The record pipeline use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, hound, ffmpeg)
//! - **CLI**: Command-line interface, interactive prompt, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

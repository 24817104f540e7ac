//! Domain layer: value objects and domain errors

pub mod error;
pub mod recording;

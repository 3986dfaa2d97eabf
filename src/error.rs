//! Error types for building and running a simulation
//!
//! Every variant except the last two is a precondition violation raised
//! while a `Simulation` is constructed; a running tick never fails

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("particle set is empty, at least one particle is required")]
    EmptyParticleSet,

    #[error("time_delta must be positive, got {0}")]
    NonPositiveTimeDelta(f64),

    #[error("time_factor must be finite, got {0}")]
    InvalidTimeFactor(f64),

    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("gravitational constant must be finite, got {0}")]
    InvalidGravitationalConstant(f64),

    #[error("min_distance must be positive and finite, got {0}")]
    NonPositiveMinDistance(f64),

    #[error("initial extent must be positive and finite, got {0}")]
    InvalidExtent(f64),

    #[error("batch count {batches} is invalid for {n} particles (expected 1..={n})")]
    InvalidBatchCount { batches: usize, n: usize },

    #[error("window length {window} is invalid for {n} particles (expected 1..={n})")]
    InvalidWindow { window: usize, n: usize },

    #[error("body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },

    #[error("snapshot channel closed")]
    ChannelClosed,

    #[error("simulation thread panicked")]
    ProducerPanicked,
}

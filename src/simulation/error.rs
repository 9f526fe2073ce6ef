//! Error types for configuration and file loading.
//!
//! Nothing inside a simulation tick can fail: every error here is raised
//! before the first tick runs.

use thiserror::Error;

/// Errors raised when validating a configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The simulation must advance at a positive rate.
    #[error("tick rate must be positive, got {0}")]
    NonPositiveTickRate(f32),
    /// The time between ticks must fit in a `Duration`.
    #[error("tick rate {0} is too slow to pace")]
    TickPeriodOutOfRange(f32),
    /// Pipes and ground must scroll to the left.
    #[error("scroll speed must be positive, got {0}")]
    NonPositiveScrollSpeed(f32),
    /// A gap no taller than the bird makes every pipe unavoidable.
    #[error("pipe gap {gap} must be larger than the bird height {bird_height}")]
    DegenerateGap {
        /// Configured vertical opening.
        gap: f32,
        /// Height of the bird sprite.
        bird_height: f32,
    },
    /// The gap height range contains no values.
    #[error("gap range {min}..{max} is empty")]
    EmptyGapRange {
        /// Inclusive lower bound.
        min: i32,
        /// Exclusive upper bound.
        max: i32,
    },
    /// Some gap heights in the range would place the opening outside the playfield.
    #[error("gap range {min}..{max} with gap {gap} does not fit between 0 and the ground at {ground_y}")]
    GapOutOfBounds {
        /// Inclusive lower bound.
        min: i32,
        /// Exclusive upper bound.
        max: i32,
        /// Configured vertical opening.
        gap: f32,
        /// Ground line.
        ground_y: f32,
    },
    /// Birds would be eliminated before their first tick.
    #[error("bird start height {y} is outside the playfield (ground at {ground_y})")]
    StartOutOfBounds {
        /// Configured start height.
        y: f32,
        /// Ground line.
        ground_y: f32,
    },
    /// The evolution driver needs at least one genome.
    #[error("population size must be non-zero")]
    EmptyPopulation,
    /// Initial weights are drawn from `[-scale, scale)`, which must be non-empty.
    #[error("weight scale must be positive, got {0}")]
    NonPositiveWeightScale(f32),
    /// Network layouts must map the three sensor inputs onto one output.
    #[error("network layout {0:?} must start with 3 inputs and end with 1 output")]
    InvalidLayout(Vec<usize>),
}

/// Errors raised when reading configurations or brains from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for the expected type.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

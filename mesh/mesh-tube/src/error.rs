//! Error types for tube generation.

use curve_fields::FieldError;
use mesh_poly::MeshError;
use thiserror::Error;

/// Result type for tube generation.
pub type TubeResult<T> = Result<T, TubeError>;

/// Errors that reject a tube before any mesh is emitted.
///
/// Degenerate geometry (coincident samples, near-parallel axes) is not an
/// error: it is recovered locally and reported through the generation
/// statistics instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TubeError {
    /// Path resolution is too low.
    #[error("resolution must be at least {min} rings, got {actual}")]
    TooFewRings {
        /// Minimum ring count.
        min: usize,
        /// Requested ring count.
        actual: usize,
    },

    /// Cross-section has too few sides.
    #[error("cross-section needs at least {min} sides, got {actual}")]
    TooFewSides {
        /// Minimum side count.
        min: usize,
        /// Requested side count.
        actual: usize,
    },

    /// The radius field produced a negative or non-finite radius.
    #[error("invalid radius {value} at sample {index}")]
    InvalidRadius {
        /// Sample index.
        index: usize,
        /// The offending radius.
        value: f64,
    },

    /// The parameter domain is empty, reversed, or not finite.
    #[error("invalid parameter domain [{start}, {end}]")]
    InvalidDomain {
        /// Domain start.
        start: f64,
        /// Domain end.
        end: f64,
    },

    /// A configuration value is NaN or infinite.
    #[error("`{name}` is not finite: {value}")]
    NonFinite {
        /// Name of the configuration value.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Rings handed to the assembler disagree on their vertex count.
    #[error("ring {ring} has {actual} vertices, expected {expected}")]
    RingSizeMismatch {
        /// Index of the offending ring.
        ring: usize,
        /// Vertex count of the first ring.
        expected: usize,
        /// Vertex count of the offending ring.
        actual: usize,
    },

    /// A curve or radius field could not be constructed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The mesh buffers could not be built.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl TubeError {
    /// Check if this error was raised by configuration validation.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::TooFewRings { .. }
                | Self::TooFewSides { .. }
                | Self::InvalidDomain { .. }
                | Self::NonFinite { .. }
                | Self::Field(_)
        )
    }
}

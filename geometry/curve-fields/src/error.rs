//! Error types for curve and field construction.

use thiserror::Error;

/// Errors raised when a curve or field is constructed from invalid data.
///
/// Evaluation itself never fails; these only guard constructors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    /// Insufficient points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// A coefficient is NaN or infinite.
    #[error("coefficient `{name}` is not finite: {value}")]
    NonFinite {
        /// Name of the coefficient.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The parameter span is empty or reversed.
    #[error("invalid parameter span [{start}, {end}]")]
    InvalidSpan {
        /// Span start.
        start: f64,
        /// Span end.
        end: f64,
    },
}

impl FieldError {
    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Fail with [`FieldError::NonFinite`] unless `value` is finite.
    pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldError::insufficient_points(2, 1);
        assert!(err.to_string().contains("need at least 2"));
        assert!(err.to_string().contains("got 1"));

        let err = FieldError::InvalidSpan {
            start: 1.0,
            end: 0.0,
        };
        assert!(err.to_string().contains("[1, 0]"));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(FieldError::ensure_finite("radius", 2.5), Ok(2.5));
        let err = FieldError::ensure_finite("radius", f64::NAN);
        assert!(matches!(err, Err(FieldError::NonFinite { name: "radius", .. })));
    }
}

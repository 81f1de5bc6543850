//! Frame-relative offset curves.
//!
//! A dependent curve (a rib or a strand) is described relative to its
//! primary curve: at every parameter value, a 2D vector in the plane of the
//! primary's cross-section says how far and in which direction to go.

use nalgebra::{Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vector of fixed length rotating in the cross-section plane:
/// `radius · (cos(frequency · t + phase), sin(frequency · t + phase))`.
///
/// With integral `frequency` the offset repeats every `2π`, so a dependent
/// curve closes whenever its primary does.
///
/// # Example
///
/// ```
/// use curve_fields::OrbitOffset;
///
/// let rib = OrbitOffset::new(5.0, 2.0);
/// let twin = rib.phase_shifted(std::f64::consts::PI);
/// assert!((rib.local(0.0) + twin.local(0.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitOffset {
    /// Distance from the primary centerline.
    pub radius: f64,
    /// Revolutions around the primary per `2π` of parameter.
    pub frequency: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

impl OrbitOffset {
    /// Create an offset starting at phase zero.
    #[must_use]
    pub fn new(radius: f64, frequency: f64) -> Self {
        Self {
            radius,
            frequency,
            phase: 0.0,
        }
    }

    /// Copy with `delta` radians added to the phase.
    #[must_use]
    pub fn phase_shifted(&self, delta: f64) -> Self {
        Self {
            phase: self.phase + delta,
            ..*self
        }
    }

    /// The 2D offset at parameter `t`.
    #[must_use]
    pub fn local(&self, t: f64) -> Vector2<f64> {
        let (sin_a, cos_a) = (self.frequency * t + self.phase).sin_cos();
        Vector2::new(cos_a, sin_a) * self.radius
    }

    /// The offset lifted into the cross-section plane (`z = 0`).
    #[must_use]
    pub fn local_3d(&self, t: f64) -> Vector3<f64> {
        let v = self.local(t);
        Vector3::new(v.x, v.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, TAU};

    #[test]
    fn test_offset_length_is_radius() {
        let offset = OrbitOffset::new(5.0, 3.0).phase_shifted(0.7);
        for i in 0..10 {
            assert_relative_eq!(offset.local(i as f64).norm(), 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_offset_rotates() {
        let offset = OrbitOffset::new(1.0, 1.0);
        assert_relative_eq!(offset.local(FRAC_PI_2), Vector2::new(0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(offset.local_3d(0.0), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn test_integral_frequency_repeats() {
        let offset = OrbitOffset::new(5.0, 2.0);
        assert_relative_eq!(offset.local(0.0), offset.local(TAU), epsilon = 1e-12);
    }
}

//! Built-in radius fields.

use crate::{FieldError, RadiusField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The same radius everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant(pub f64);

impl RadiusField for Constant {
    fn radius(&self, _t: f64) -> f64 {
        self.0
    }
}

/// A radius that breathes around a base value:
/// `base + amplitude · sin(frequency · t + phase)`.
///
/// # Example
///
/// ```
/// use curve_fields::{Pulse, RadiusField};
///
/// let pulse = Pulse::new(2.0, 0.5, 4.0);
/// assert!((pulse.radius(0.0) - 2.0).abs() < 1e-12);
/// assert!(pulse.min_radius() >= 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pulse {
    /// Mean radius.
    pub base: f64,
    /// Peak deviation from the mean.
    pub amplitude: f64,
    /// Pulses per `2π` of parameter.
    pub frequency: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

impl Pulse {
    /// Create a pulse starting at phase zero.
    #[must_use]
    pub fn new(base: f64, amplitude: f64, frequency: f64) -> Self {
        Self {
            base,
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    /// Set the phase offset in radians.
    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Smallest radius the pulse reaches.
    #[must_use]
    pub fn min_radius(&self) -> f64 {
        self.base - self.amplitude.abs()
    }
}

impl RadiusField for Pulse {
    fn radius(&self, t: f64) -> f64 {
        self.base + self.amplitude * (self.frequency * t + self.phase).sin()
    }
}

/// A radius interpolated linearly from `start` to `end` over a span,
/// held constant outside it, with an optional superimposed pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Taper {
    start: f64,
    end: f64,
    span: (f64, f64),
    pulse: Option<Pulse>,
}

impl Taper {
    /// Create a taper over `t ∈ [t0, t1]`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidSpan`] unless `t0 < t1` and both are finite,
    /// or [`FieldError::NonFinite`] for a non-finite radius.
    pub fn new(start: f64, end: f64, t0: f64, t1: f64) -> Result<Self, FieldError> {
        FieldError::ensure_finite("start", start)?;
        FieldError::ensure_finite("end", end)?;
        if !(t0.is_finite() && t1.is_finite() && t0 < t1) {
            return Err(FieldError::InvalidSpan { start: t0, end: t1 });
        }
        Ok(Self {
            start,
            end,
            span: (t0, t1),
            pulse: None,
        })
    }

    /// Superimpose `amplitude · sin(frequency · t + phase)`.
    #[must_use]
    pub fn with_pulse(mut self, amplitude: f64, frequency: f64, phase: f64) -> Self {
        self.pulse = Some(Pulse::new(0.0, amplitude, frequency).with_phase(phase));
        self
    }
}

impl RadiusField for Taper {
    fn radius(&self, t: f64) -> f64 {
        let (t0, t1) = self.span;
        let alpha = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
        let linear = self.start + (self.end - self.start) * alpha;
        linear + self.pulse.map_or(0.0, |p| p.radius(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_constant() {
        assert_relative_eq!(Constant(2.0).radius(123.0), 2.0);
    }

    #[test]
    fn test_pulse_peaks() {
        let pulse = Pulse::new(3.0, 1.0, 1.0);
        assert_relative_eq!(pulse.radius(FRAC_PI_2), 4.0, epsilon = 1e-12);
        assert_relative_eq!(pulse.radius(3.0 * FRAC_PI_2), 2.0, epsilon = 1e-12);
        assert_relative_eq!(pulse.min_radius(), 2.0);
    }

    #[test]
    fn test_pulse_phase() {
        let pulse = Pulse::new(3.0, 1.0, 2.0).with_phase(PI);
        assert_relative_eq!(pulse.radius(FRAC_PI_2 / 2.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_taper_interpolates_and_clamps() {
        let taper = Taper::new(4.0, 1.0, 0.0, 1.0).unwrap();
        assert_relative_eq!(taper.radius(0.5), 2.5);
        assert_relative_eq!(taper.radius(-1.0), 4.0);
        assert_relative_eq!(taper.radius(2.0), 1.0);
    }

    #[test]
    fn test_taper_with_pulse() {
        let taper = Taper::new(2.0, 2.0, 0.0, PI)
            .unwrap()
            .with_pulse(0.5, 1.0, 0.0);
        assert_relative_eq!(taper.radius(FRAC_PI_2), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_taper_rejects_bad_span() {
        assert!(Taper::new(1.0, 2.0, 1.0, 0.0).is_err());
        assert!(Taper::new(f64::NAN, 2.0, 0.0, 1.0).is_err());
    }
}

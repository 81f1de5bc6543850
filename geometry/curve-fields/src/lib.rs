//! Parametric space curves and scalar radius fields.
//!
//! A procedurally generated tube is defined by two pure functions of a path
//! parameter `t`: the centerline position and the tube radius. This crate
//! provides both halves:
//!
//! - [`PathCurve`] - position as a function of `t`
//! - [`RadiusField`] - radius as a function of `t`
//! - [`OrbitOffset`] - a frame-relative 2D offset for dependent curves
//!
//! Closures implement the traits directly, so ad-hoc formulas need no new
//! types. The built-in shapes cover the recurring cases: [`Circle`],
//! [`Line`], [`Helix`], [`TorusKnot`], [`Polyline`] for positions and
//! [`Constant`], [`Pulse`], [`Taper`] for radii.
//!
//! # Parameterization
//!
//! `t` is measured in radians. Periodic shapes repeat every `2π`, and every
//! evaluator is total over the real line: there is no failure mode beyond
//! ordinary floating-point behavior (NaN and infinities propagate).
//!
//! # Example
//!
//! ```
//! use curve_fields::{PathCurve, Pulse, RadiusField, TorusKnot};
//!
//! let spine = TorusKnot::trefoil(20.0, 6.0);
//! let radius = Pulse::new(2.0, 0.5, 9.0);
//!
//! let p = spine.position(0.0);
//! let r = radius.radius(0.0);
//! assert!((p.x - 26.0).abs() < 1e-12);
//! assert!((r - 2.0).abs() < 1e-12);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::many_single_char_names
)]

mod curves;
mod error;
mod offset;
mod radius;
mod traits;

pub use curves::{Circle, Helix, Line, Polyline, TorusKnot};
pub use error::FieldError;
pub use offset::OrbitOffset;
pub use radius::{Constant, Pulse, Taper};
pub use traits::{PathCurve, RadiusField};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};

/// Result type for curve and field construction.
pub type Result<T> = std::result::Result<T, FieldError>;

//! Procedural tube meshes swept along parametric space curves.
//!
//! Given a centerline [`PathCurve`] and a [`RadiusField`], this crate
//! produces a closed polygon mesh: a tube of polygonal cross-section that
//! follows the curve, twists, pulsates in radius, and either wraps into a
//! seamless loop or is capped at both ends.
//!
//! # Pipeline
//!
//! 1. **Sample** - evaluate curve and radius at uniform parameter steps
//!    ([`sample_path`])
//! 2. **Frame** - orient each sample so its forward axis follows the path
//!    tangent ([`build_frames`], [`Frame::from_tangent`])
//! 3. **Ring** - place the cross-section vertices in each frame
//!    ([`sample_ring`])
//! 4. **Assemble** - stitch consecutive rings into quads and close the ends
//!    ([`assemble`])
//!
//! [`generate_tube`] runs all four stages. [`compose`] runs them for a spine
//! and for secondary curves that follow the spine at a frame-relative
//! offset, such as ribs spiralling around a body.
//!
//! # Example
//!
//! ```
//! use curve_fields::{Pulse, TorusKnot};
//! use mesh_tube::{generate_tube, TubeConfig};
//!
//! let spine = TorusKnot::trefoil(20.0, 6.0);
//! let radius = Pulse::new(2.0, 0.5, 9.0);
//! let config = TubeConfig::default().with_resolution(128).with_sides(12);
//!
//! let tube = generate_tube(&spine, &radius, &config).unwrap();
//! assert_eq!(tube.mesh.vertex_count(), 128 * 12);
//! assert!(tube.mesh.validate().is_ok());
//! ```
//!
//! # Winding
//!
//! Ring vertices run counter-clockwise about the path tangent, which makes
//! every side quad face outward. Caps are wound to match, so closed tubes
//! have positive [`PolyMesh::signed_volume`].
//!
//! # Logging
//!
//! Progress is reported through [`tracing`]; degenerate tangents, open
//! seamless paths, and twists that cannot close a seam are logged as
//! warnings. No subscriber is installed.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for configuration types

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

mod assemble;
mod compose;
mod error;
mod frame;
mod ring;
mod sample;
mod tube;

pub mod presets;

pub use assemble::{Closure, assemble};
pub use compose::{
    Composite, SecondaryCurve, compose, compose_from_spine, derive_positions, offset_point,
};
pub use error::{TubeError, TubeResult};
pub use frame::{
    ALIGNMENT_EPSILON, Frame, FrameMode, FrameSet, REFERENCE_SWITCH_DOT, build_frames, rodrigues,
    tangents,
};
pub use ring::{Ring, sample_ring};
pub use sample::{SEAM_TOLERANCE, Sample, SampleSet, sample_path};
pub use tube::{TubeConfig, TubeMesh, generate_tube, tube_from_samples};

pub use curve_fields::{PathCurve, RadiusField};
pub use mesh_poly::{Face, PolyMesh};

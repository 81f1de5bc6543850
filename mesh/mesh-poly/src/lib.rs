//! Polygon mesh buffers for generated geometry.
//!
//! This crate provides the output side of the tube generators:
//!
//! - [`Face`] - A triangle or quad as vertex indices
//! - [`PolyMesh`] - A vertex buffer plus a face buffer
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`MeshError`] - Structural problems found by [`PolyMesh::validate`]
//!
//! Faces keep their natural arity (quads for tube walls, triangles for end
//! caps) so exporters that understand polygons get them untouched;
//! [`PolyMesh::triangulate`] serves everything else.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system** with Z up. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod error;
mod face;
mod mesh;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use face::Face;
pub use mesh::PolyMesh;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

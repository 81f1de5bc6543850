//! Cross-section rings.

use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

use crate::frame::Frame;

/// One cross-section's worth of vertices, plus the path point it surrounds.
///
/// Vertex `j` sits at angle `j · 2π/N + twist` in the frame's local XY
/// plane, so the same `j` names the same side of every ring along a tube.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Path position at the ring's sample.
    pub center: Point3<f64>,
    /// Ring vertices in increasing angle order.
    pub vertices: Vec<Point3<f64>>,
}

impl Ring {
    /// Number of vertices (the cross-section side count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the ring has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Place `sides` vertices on a circle of `radius` around `center`, in the
/// plane spanned by the frame's right and up axes.
///
/// `twist` (radians) rotates the whole ring about the frame's forward axis.
///
/// # Example
///
/// ```
/// use mesh_tube::{sample_ring, Frame};
/// use nalgebra::Point3;
///
/// let ring = sample_ring(&Frame::identity(), &Point3::origin(), 2.0, 4, 0.0);
/// assert_eq!(ring.len(), 4);
/// assert!((ring.vertices[1].y - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn sample_ring(
    frame: &Frame,
    center: &Point3<f64>,
    radius: f64,
    sides: usize,
    twist: f64,
) -> Ring {
    let step = TAU / sides as f64;
    let vertices = (0..sides)
        .map(|j| {
            let (sin_a, cos_a) = (j as f64 * step + twist).sin_cos();
            let local = Vector3::new(radius * cos_a, radius * sin_a, 0.0);
            center + frame.to_world(&local)
        })
        .collect();

    Ring {
        center: *center,
        vertices,
    }
}

//! Ring-to-mesh assembly.
//!
//! Consecutive rings are stitched into quads; the ends are either wrapped
//! onto each other or closed with triangle fans.

use mesh_poly::{Face, MeshError, PolyMesh};

use crate::error::{TubeError, TubeResult};
use crate::ring::Ring;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the ends of a tube are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Closure {
    /// The last ring connects back to the first; the tube is a loop with no
    /// boundary and no duplicated seam vertices.
    #[default]
    Seamless,
    /// The tube is open-ended and each end is closed by a triangle fan
    /// around the end ring's path point.
    Capped,
}

impl Closure {
    /// Fewest rings that give a mesh without duplicate faces.
    ///
    /// Two seamless rings would stitch the same band twice, once per
    /// direction.
    #[must_use]
    pub fn min_rings(self) -> usize {
        match self {
            Self::Seamless => 3,
            Self::Capped => 2,
        }
    }

    /// Number of bands of quads between `rings` rings.
    #[must_use]
    pub fn band_count(self, rings: usize) -> usize {
        match self {
            Self::Seamless => rings,
            Self::Capped => rings.saturating_sub(1),
        }
    }
}

/// Stitch rings into a closed polygon mesh.
///
/// Ring `i`'s vertices occupy indices `i·N .. (i+1)·N`. Each band emits one
/// quad per side, `[(i, j), (i, j+1), (i+1, j+1), (i+1, j)]`, which faces
/// outward for rings whose vertices run counter-clockwise about the path
/// tangent.
///
/// - [`Closure::Seamless`]: `R` bands, the last joining ring `R-1` to ring
///   0. `seam_shift` offsets the side index on ring 0 for that final band
///   only, so a tube twisted by `k/N` turns meets itself vertex to vertex.
/// - [`Closure::Capped`]: `R-1` bands, then the first and last ring centers
///   are appended and fanned into their rings with opposite windings.
///
/// # Errors
///
/// Returns an error if there are too few rings or sides, if the rings
/// disagree on their side count, or if the vertex count overflows `u32`.
///
/// # Example
///
/// ```
/// use mesh_tube::{assemble, sample_ring, Closure, Frame};
/// use nalgebra::Point3;
///
/// let rings: Vec<_> = (0..3)
///     .map(|i| {
///         let center = Point3::new(0.0, 0.0, f64::from(i) * 5.0);
///         sample_ring(&Frame::identity(), &center, 2.0, 3, 0.0)
///     })
///     .collect();
///
/// let mesh = assemble(&rings, Closure::Capped, 0).unwrap();
/// assert_eq!(mesh.vertex_count(), 11);
/// assert_eq!(mesh.face_count(), 12);
/// ```
pub fn assemble(rings: &[Ring], closure: Closure, seam_shift: usize) -> TubeResult<PolyMesh> {
    let ring_count = rings.len();
    if ring_count < closure.min_rings() {
        return Err(TubeError::TooFewRings {
            min: closure.min_rings(),
            actual: ring_count,
        });
    }

    let sides = rings[0].len();
    if sides < 3 {
        return Err(TubeError::TooFewSides {
            min: 3,
            actual: sides,
        });
    }
    if let Some((ring, bad)) = rings.iter().enumerate().find(|(_, r)| r.len() != sides) {
        return Err(TubeError::RingSizeMismatch {
            ring,
            expected: sides,
            actual: bad.len(),
        });
    }

    let cap_vertices = match closure {
        Closure::Seamless => 0,
        Closure::Capped => 2,
    };
    let vertex_total = ring_count * sides + cap_vertices;
    if u32::try_from(vertex_total).is_err() {
        return Err(MeshError::TooManyVertices {
            count: vertex_total,
        }
        .into());
    }

    let bands = closure.band_count(ring_count);
    let face_total = (bands + cap_vertices) * sides;
    let mut mesh = PolyMesh::with_capacity(vertex_total, face_total);
    for ring in rings {
        mesh.vertices.extend_from_slice(&ring.vertices);
    }

    // vertex_total fits in u32
    let index = |ring: usize, side: usize| (ring * sides + side % sides) as u32;

    for i in 0..bands {
        let next = (i + 1) % ring_count;
        let shift = if next == 0 { seam_shift % sides } else { 0 };
        for j in 0..sides {
            mesh.faces.push(Face::Quad([
                index(i, j),
                index(i, j + 1),
                index(next, j + 1 + shift),
                index(next, j + shift),
            ]));
        }
    }

    if closure == Closure::Capped {
        let last = ring_count - 1;
        let start_center = (ring_count * sides) as u32;
        let end_center = start_center + 1;
        mesh.vertices.push(rings[0].center);
        mesh.vertices.push(rings[last].center);

        for j in 0..sides {
            mesh.faces
                .push(Face::Tri([start_center, index(0, j + 1), index(0, j)]));
        }
        for j in 0..sides {
            mesh.faces
                .push(Face::Tri([end_center, index(last, j), index(last, j + 1)]));
        }
    }

    Ok(mesh)
}

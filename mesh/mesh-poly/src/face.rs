//! Variable-arity faces.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh face: a triangle or a quad, as indices into a vertex buffer.
///
/// Faces are wound counter-clockwise when viewed from outside, so normals
/// point outward by the right-hand rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face {
    /// Three-sided face (end-cap fans).
    Tri([u32; 3]),
    /// Four-sided face (tube walls).
    Quad([u32; 4]),
}

impl Face {
    /// The vertex indices in winding order.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        match self {
            Self::Tri(idx) => idx.as_slice(),
            Self::Quad(idx) => idx.as_slice(),
        }
    }

    /// Number of vertices (3 or 4).
    #[must_use]
    pub fn arity(&self) -> usize {
        self.indices().len()
    }

    /// Check if this is a quad.
    #[must_use]
    pub fn is_quad(&self) -> bool {
        matches!(self, Self::Quad(_))
    }

    /// Split into triangles with the same winding.
    ///
    /// Quads are split along the diagonal from their first to third vertex.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> {
        let (first, second) = match *self {
            Self::Tri(t) => (t, None),
            Self::Quad([a, b, c, d]) => ([a, b, c], Some([a, c, d])),
        };
        std::iter::once(first).chain(second)
    }

    /// The same face with opposite winding.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Tri([a, b, c]) => Self::Tri([a, c, b]),
            Self::Quad([a, b, c, d]) => Self::Quad([a, d, c, b]),
        }
    }

    /// The same face with every index shifted by `offset`.
    #[must_use]
    pub fn offset(&self, offset: u32) -> Self {
        match *self {
            Self::Tri(t) => Self::Tri(t.map(|i| i + offset)),
            Self::Quad(q) => Self::Quad(q.map(|i| i + offset)),
        }
    }

    /// Check whether any vertex index appears twice.
    #[must_use]
    pub fn has_repeated_vertex(&self) -> bool {
        let idx = self.indices();
        (0..idx.len()).any(|i| idx[i + 1..].contains(&idx[i]))
    }
}

impl From<[u32; 3]> for Face {
    fn from(indices: [u32; 3]) -> Self {
        Self::Tri(indices)
    }
}

impl From<[u32; 4]> for Face {
    fn from(indices: [u32; 4]) -> Self {
        Self::Quad(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_arity() {
        assert_eq!(Face::Tri([0, 1, 2]).arity(), 3);
        assert_eq!(Face::Quad([0, 1, 2, 3]).arity(), 4);
        assert!(Face::from([0, 1, 2, 3]).is_quad());
        assert!(!Face::from([0, 1, 2]).is_quad());
    }

    #[test]
    fn quad_triangulation_keeps_winding() {
        let tris: Vec<_> = Face::Quad([4, 5, 6, 7]).triangles().collect();
        assert_eq!(tris, vec![[4, 5, 6], [4, 6, 7]]);

        let tris: Vec<_> = Face::Tri([1, 2, 3]).triangles().collect();
        assert_eq!(tris, vec![[1, 2, 3]]);
    }

    #[test]
    fn reversed_twice_is_identity() {
        let quad = Face::Quad([0, 1, 2, 3]);
        assert_eq!(quad.reversed(), Face::Quad([0, 3, 2, 1]));
        assert_eq!(quad.reversed().reversed(), quad);
    }

    #[test]
    fn offset_and_repeats() {
        assert_eq!(Face::Tri([0, 1, 2]).offset(10), Face::Tri([10, 11, 12]));
        assert!(Face::Quad([0, 1, 1, 2]).has_repeated_vertex());
        assert!(!Face::Quad([0, 1, 2, 3]).has_repeated_vertex());
    }
}

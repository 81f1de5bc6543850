//! Error types for mesh buffer checks.

use thiserror::Error;

/// Result type for mesh buffer operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Structural problems found in a vertex/face buffer pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face references a vertex past the end of the vertex buffer.
    #[error("face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Length of the vertex buffer.
        vertex_count: usize,
    },

    /// A face uses the same vertex more than once.
    #[error("face {face} repeats a vertex")]
    DegenerateFace {
        /// Index of the offending face.
        face: usize,
    },

    /// The mesh has more vertices than a `u32` index can address.
    #[error("{count} vertices exceed the u32 index range")]
    TooManyVertices {
        /// Vertex count that overflowed.
        count: usize,
    },
}

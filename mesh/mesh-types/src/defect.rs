//! Structural defects found by fragment validation.

use std::fmt;

use thiserror::Error;

/// Which per-vertex buffer a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Vertex position.
    Vertex,
    /// Vertex normal.
    Normal,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// A violation of a fragment's structural invariants.
///
/// A fragment with any defect cannot be serialized: its faces reference
/// vertex and normal slots through one shared index, so both buffers must
/// line up and every index must land inside them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentDefect {
    /// Vertex and normal buffers have different lengths.
    #[error("vertex/normal count mismatch: {vertices} vertices, {normals} normals")]
    NormalCountMismatch {
        /// Number of vertices.
        vertices: usize,
        /// Number of normals.
        normals: usize,
    },

    /// A face references a vertex slot past the end of the buffers.
    #[error("face {face} references index {index}, but only {vertex_count} vertices exist")]
    FaceIndexOutOfRange {
        /// Position of the offending face in the fragment.
        face: usize,
        /// The out-of-range index.
        index: u32,
        /// Number of vertices in the fragment.
        vertex_count: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("{kind} {element} has a non-finite component")]
    NonFiniteComponent {
        /// Buffer holding the bad value.
        kind: ComponentKind,
        /// Position of the offending element in its buffer.
        element: usize,
    },
}

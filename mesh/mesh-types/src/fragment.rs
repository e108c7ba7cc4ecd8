//! Locally-indexed mesh fragments.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, ComponentKind, FragmentDefect, FragmentId};

/// One locally-contiguous piece of scanned geometry.
///
/// Vertices and normals share a single index space: normal `i` belongs to
/// vertex `i`. Faces are triangles of zero-based indices into that space.
///
/// # Example
///
/// ```
/// use mesh_types::{FragmentDefect, MeshFragment, Point3, Vector3};
///
/// let fragment = MeshFragment::from_parts(
///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![Vector3::z(); 3],
///     vec![[0, 1, 3]],
/// );
///
/// assert!(matches!(
///     fragment.validate(),
///     Err(FragmentDefect::FaceIndexOutOfRange { face: 0, index: 3, .. })
/// ));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshFragment {
    /// Identifier assigned by the scanner, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<FragmentId>,

    /// Vertex positions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vertices: Vec<Point3<f32>>,

    /// Unit normals, one per vertex.
    #[cfg_attr(feature = "serde", serde(default))]
    pub normals: Vec<Vector3<f32>>,

    /// Triangles as indices into `vertices`/`normals`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub faces: Vec<[u32; 3]>,
}

impl MeshFragment {
    /// Create an empty fragment with no identifier.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            id: None,
            vertices: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a fragment from its buffers. No validation is performed.
    #[inline]
    #[must_use]
    pub const fn from_parts(
        vertices: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        faces: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            id: None,
            vertices,
            normals,
            faces,
        }
    }

    /// Create a fragment from flat scanner buffers.
    ///
    /// # Arguments
    ///
    /// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `normals` - `[nx0, ny0, nz0, ...]`
    /// * `indices` - `[a0, b0, c0, a1, b1, c1, ...]`
    ///
    /// Returns `None` if any buffer length is not a multiple of 3.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::MeshFragment;
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let normals = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
    /// let fragment = MeshFragment::from_raw(&positions, &normals, &[0, 1, 2]).unwrap();
    /// assert_eq!(fragment.vertex_count(), 3);
    ///
    /// assert!(MeshFragment::from_raw(&positions[..4], &normals, &[0, 1, 2]).is_none());
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f32], normals: &[f32], indices: &[u32]) -> Option<Self> {
        if positions.len() % 3 != 0 || normals.len() % 3 != 0 || indices.len() % 3 != 0 {
            return None;
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let normals = normals
            .chunks_exact(3)
            .map(|c| Vector3::new(c[0], c[1], c[2]))
            .collect();
        let faces = indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Some(Self::from_parts(vertices, normals, faces))
    }

    /// Attach an identifier.
    #[must_use]
    pub fn with_id(mut self, id: FragmentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of normals.
    #[inline]
    #[must_use]
    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// A fragment with no vertices and no faces contributes nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.normals.is_empty() && self.faces.is_empty()
    }

    /// Check the structural invariants.
    ///
    /// # Errors
    ///
    /// - [`FragmentDefect::NormalCountMismatch`] if the vertex and normal
    ///   buffers differ in length.
    /// - [`FragmentDefect::FaceIndexOutOfRange`] for the first face corner
    ///   that indexes past the vertex buffer.
    pub fn validate(&self) -> Result<(), FragmentDefect> {
        let vertex_count = self.vertices.len();
        if self.normals.len() != vertex_count {
            return Err(FragmentDefect::NormalCountMismatch {
                vertices: vertex_count,
                normals: self.normals.len(),
            });
        }

        for (face, corners) in self.faces.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(FragmentDefect::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }

    /// Check that every vertex and normal component is finite.
    ///
    /// # Errors
    ///
    /// [`FragmentDefect::NonFiniteComponent`] for the first vertex, then the
    /// first normal, holding a NaN or infinity.
    pub fn validate_finite(&self) -> Result<(), FragmentDefect> {
        if let Some(element) = self
            .vertices
            .iter()
            .position(|v| !v.iter().all(|c| c.is_finite()))
        {
            return Err(FragmentDefect::NonFiniteComponent {
                kind: ComponentKind::Vertex,
                element,
            });
        }

        if let Some(element) = self
            .normals
            .iter()
            .position(|n| !n.iter().all(|c| c.is_finite()))
        {
            return Err(FragmentDefect::NonFiniteComponent {
                kind: ComponentKind::Normal,
                element,
            });
        }

        Ok(())
    }

    /// Bounding box of the vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

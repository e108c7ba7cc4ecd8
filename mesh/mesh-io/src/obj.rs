//! Wavefront OBJ serialization of merged fragments.
//!
//! Every fragment is written in turn as a block of vertex records, then
//! normal records, then face records:
//!
//! ```text
//! v <x> <y> <z>
//! vn <x> <y> <z>
//! f <a>//<a> <b>//<b> <c>//<c>
//! ```
//!
//! Face indices are rebased into one global, 1-based index space: a
//! fragment's local index `i` becomes `offset + i + 1`, where `offset` is the
//! number of vertices written by all earlier fragments. Vertices and normals
//! share that index, hence the paired `a//a` corner syntax.
//!
//! Coordinates use the shortest decimal representation that parses back to
//! the same `f32`. No comments, groups, materials or texture records are
//! written.

use std::fmt::{self, Write};

use mesh_types::{Aabb, MeshFragment};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::params::ExportParams;

/// An OBJ document held in memory, with counts of what it contains.
#[derive(Debug, Clone, Default)]
pub struct EncodedObj {
    /// Document bytes (ASCII).
    pub document: Vec<u8>,
    /// Number of fragments consumed.
    pub fragments: usize,
    /// Number of `v` records.
    pub vertices: usize,
    /// Number of `vn` records.
    pub normals: usize,
    /// Number of `f` records.
    pub faces: usize,
    /// Extent of all vertex positions.
    pub bounds: Aabb,
}

impl EncodedObj {
    /// The document as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII is ever written.
        std::str::from_utf8(&self.document).unwrap_or_default()
    }
}

/// Serialize fragments into a single OBJ document in memory.
///
/// Each fragment is validated before any of its records are written, so a
/// malformed fragment aborts the whole document. An empty input produces an
/// empty document.
///
/// # Errors
///
/// [`ExportError::MalformedFragment`] for the first fragment that fails
/// [`MeshFragment::validate`] (or [`MeshFragment::validate_finite`] when
/// `params.reject_non_finite` is set).
///
/// # Example
///
/// ```
/// use mesh_io::{encode_obj, ExportParams};
/// use mesh_types::{MeshFragment, Point3, Vector3};
///
/// let fragment = MeshFragment::from_parts(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![Vector3::z(); 3],
///     vec![[0, 1, 2]],
/// );
///
/// let encoded = encode_obj([&fragment, &fragment], &ExportParams::default()).unwrap();
/// assert!(encoded.as_str().ends_with("f 4//4 5//5 6//6\n"));
/// assert_eq!(encoded.vertices, 6);
/// ```
pub fn encode_obj<'a, I>(fragments: I, params: &ExportParams) -> ExportResult<EncodedObj>
where
    I: IntoIterator<Item = &'a MeshFragment>,
{
    let mut encoded = EncodedObj::default();
    let mut text = String::new();
    let mut offset = 0usize;

    for (index, fragment) in fragments.into_iter().enumerate() {
        check_fragment(index, fragment, params)?;

        debug!(
            fragment = index,
            offset,
            vertices = fragment.vertex_count(),
            faces = fragment.face_count(),
            "Encoding fragment"
        );

        // Formatting into a `String` cannot fail.
        write_fragment(&mut text, fragment, offset, params).unwrap_or_default();

        offset += fragment.vertex_count();
        encoded.fragments += 1;
        encoded.normals += fragment.normal_count();
        encoded.faces += fragment.face_count();
        encoded.bounds = encoded.bounds.union(&fragment.bounds());
    }

    encoded.vertices = offset;
    encoded.document = text.into_bytes();
    Ok(encoded)
}

fn check_fragment(
    index: usize,
    fragment: &MeshFragment,
    params: &ExportParams,
) -> ExportResult<()> {
    let finite = || {
        if params.reject_non_finite {
            fragment.validate_finite()
        } else {
            Ok(())
        }
    };

    fragment
        .validate()
        .and_then(|()| finite())
        .map_err(|defect| ExportError::MalformedFragment {
            fragment: index,
            defect,
        })
}

/// Write one validated fragment whose first vertex has global index
/// `offset + 1`.
fn write_fragment(
    out: &mut String,
    fragment: &MeshFragment,
    offset: usize,
    params: &ExportParams,
) -> fmt::Result {
    let eol = params.line_ending.as_str();

    for v in &fragment.vertices {
        write!(out, "v {} {} {}{eol}", v.x, v.y, v.z)?;
    }

    for n in &fragment.normals {
        write!(out, "vn {} {} {}{eol}", n.x, n.y, n.z)?;
    }

    let base = offset + 1;
    for &[a, b, c] in &fragment.faces {
        let (a, b, c) = (base + a as usize, base + b as usize, base + c as usize);
        write!(out, "f {a}//{a} {b}//{b} {c}//{c}{eol}")?;
    }

    Ok(())
}

//! Fragment export: encode, then commit to a sink.

use std::fmt;
use std::path::{Path, PathBuf};

use mesh_types::{Aabb, MeshFragment};
use tracing::{info, warn};

use crate::error::{ExportError, ExportResult};
use crate::obj::encode_obj;
use crate::params::ExportParams;
use crate::sink::{FileSink, Sink};

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport<L> {
    /// Where the sink stored the document.
    pub location: L,
    /// Number of fragments consumed.
    pub fragments: usize,
    /// Number of vertex records written.
    pub vertices: usize,
    /// Number of normal records written.
    pub normals: usize,
    /// Number of face records written.
    pub faces: usize,
    /// Size of the document in bytes.
    pub bytes: usize,
    /// Extent of all exported vertices.
    pub bounds: Aabb,
}

impl<L> ExportReport<L> {
    /// Whether the document has no records at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes == 0
    }
}

impl<L> fmt::Display for ExportReport<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Export: {} fragments → {} vertices, {} normals, {} faces ({} bytes)",
            self.fragments, self.vertices, self.normals, self.faces, self.bytes
        )
    }
}

/// Merge fragments into one OBJ document and store it in `sink`.
///
/// The document is built completely in memory before the sink is touched,
/// so a malformed fragment anywhere in the input leaves the destination
/// unchanged. Fragments are consumed in iteration order; that order only
/// decides which range of global indices each fragment occupies.
///
/// # Arguments
///
/// * `fragments` - Fragments to merge, possibly none
/// * `sink` - Destination for the document
/// * `params` - Export parameters
///
/// # Errors
///
/// - [`ExportError::MalformedFragment`] if a fragment fails validation.
/// - [`ExportError::SinkWriteFailure`] if the sink cannot store the document.
///
/// # Example
///
/// ```
/// use mesh_io::{export_mesh, ExportParams, MemorySink};
/// use mesh_types::{MeshFragment, Point3, Vector3};
///
/// let fragment = MeshFragment::from_parts(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![Vector3::z(); 3],
///     vec![[0, 1, 2]],
/// );
///
/// let mut sink = MemorySink::new();
/// let report = export_mesh([&fragment], &mut sink, &ExportParams::default()).unwrap();
///
/// assert_eq!(report.faces, 1);
/// assert!(sink.as_str().unwrap().contains("f 1//1 2//2 3//3"));
/// ```
pub fn export_mesh<'a, I, S>(
    fragments: I,
    sink: &mut S,
    params: &ExportParams,
) -> ExportResult<ExportReport<S::Location>>
where
    I: IntoIterator<Item = &'a MeshFragment>,
    S: Sink + ?Sized,
{
    let encoded = encode_obj(fragments, params).inspect_err(|e| {
        warn!(error = %e, "Rejected scan export");
    })?;

    let destination = sink.describe();
    let location = sink.commit(&encoded.document).map_err(|source| {
        warn!(destination = %destination, error = %source, "Failed to save scan");
        ExportError::SinkWriteFailure {
            destination: destination.clone(),
            source,
        }
    })?;

    info!(
        fragments = encoded.fragments,
        vertices = encoded.vertices,
        faces = encoded.faces,
        bytes = encoded.document.len(),
        destination = %destination,
        "Saved scan"
    );

    Ok(ExportReport {
        location,
        fragments: encoded.fragments,
        vertices: encoded.vertices,
        normals: encoded.normals,
        faces: encoded.faces,
        bytes: encoded.document.len(),
        bounds: encoded.bounds,
    })
}

/// Export fragments to an OBJ file with default parameters.
///
/// # Errors
///
/// See [`export_mesh`].
///
/// # Example
///
/// ```no_run
/// use mesh_io::save_obj;
/// use mesh_types::MeshFragment;
///
/// let fragments: Vec<MeshFragment> = Vec::new();
/// let report = save_obj(&fragments, "scan.obj").unwrap();
/// assert!(report.is_empty());
/// ```
pub fn save_obj<'a, I, P>(fragments: I, path: P) -> ExportResult<ExportReport<PathBuf>>
where
    I: IntoIterator<Item = &'a MeshFragment>,
    P: AsRef<Path>,
{
    let mut sink = FileSink::new(path.as_ref());
    export_mesh(fragments, &mut sink, &ExportParams::default())
}

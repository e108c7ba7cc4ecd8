//! End-to-end export scenarios against real files.
//!
//! Covers the reference scenarios for the exporter (single triangle, offset
//! across fragments, malformed fragments leaving the destination alone) and a
//! round-trip through an independent OBJ reader.
//!
//! Run with: cargo test -p mesh-io --test export_scenarios

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::BufReader;
use std::path::Path;

use approx::assert_relative_eq;
use mesh_io::{export_mesh, save_obj, ExportError, ExportParams, FileSink, MemorySink};
use mesh_types::{FragmentDefect, MeshFragment, Point3, Vector3};
use tempfile::tempdir;

// =============================================================================
// Fixtures
// =============================================================================

fn triangle() -> MeshFragment {
    MeshFragment::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![Vector3::new(0.0, 0.0, 1.0); 3],
        vec![[0, 1, 2]],
    )
}

fn quad_fragment() -> MeshFragment {
    MeshFragment::from_parts(
        vec![
            Point3::new(2.0, 0.0, 0.5),
            Point3::new(3.0, 0.0, 0.5),
            Point3::new(3.0, 1.0, 0.5),
            Point3::new(2.0, 1.0, 0.5),
        ],
        vec![Vector3::new(0.0, 0.0, 1.0); 4],
        vec![[1, 2, 3]],
    )
}

/// A small bumpy grid, the shape a depth sensor typically reports.
fn grid_fragment(origin: f32, size: u32) -> MeshFragment {
    let mut fragment = MeshFragment::new();
    for j in 0..=size {
        for i in 0..=size {
            #[allow(clippy::cast_precision_loss)]
            let (x, y) = (origin + i as f32 * 0.25, origin + j as f32 * 0.25);
            fragment.vertices.push(Point3::new(x, y, (x * y).sin() * 0.1));
            fragment.normals.push(Vector3::new(0.0, 0.0, 1.0));
        }
    }
    let row = size + 1;
    for j in 0..size {
        for i in 0..size {
            let a = j * row + i;
            fragment.faces.push([a, a + 1, a + row]);
            fragment.faces.push([a + 1, a + row + 1, a + row]);
        }
    }
    fragment
}

fn lines_with_prefix<'a>(document: &'a str, prefix: &str) -> Vec<&'a str> {
    document.lines().filter(|l| l.starts_with(prefix)).collect()
}

fn load_with_tobj(path: &Path) -> Vec<tobj::Model> {
    let file = std::fs::File::open(path).unwrap();
    let mut reader = BufReader::new(file);
    let options = tobj::LoadOptions {
        single_index: false,
        ..Default::default()
    };
    let (models, _materials) =
        tobj::load_obj_buf(&mut reader, &options, |_| Err(tobj::LoadError::GenericFailure))
            .expect("exported document should parse");
    models
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn scenario_single_triangle() {
    let mut sink = MemorySink::new();
    export_mesh([&triangle()], &mut sink, &ExportParams::default()).unwrap();
    let document = sink.as_str().unwrap();

    assert_eq!(lines_with_prefix(document, "v ").len(), 3);
    assert_eq!(lines_with_prefix(document, "vn ").len(), 3);
    assert_eq!(lines_with_prefix(document, "f "), vec!["f 1//1 2//2 3//3"]);
}

#[test]
fn scenario_second_fragment_is_offset() {
    let mut sink = MemorySink::new();
    export_mesh(
        [&triangle(), &quad_fragment()],
        &mut sink,
        &ExportParams::default(),
    )
    .unwrap();
    let document = sink.as_str().unwrap();

    assert_eq!(
        lines_with_prefix(document, "f "),
        vec!["f 1//1 2//2 3//3", "f 5//5 6//6 7//7"]
    );
}

#[test]
fn scenario_normal_mismatch_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scan.obj");
    std::fs::write(&path, "previous scan\n").unwrap();

    let mut bad = triangle();
    bad.normals.truncate(2);

    let err = export_mesh([&bad], &mut FileSink::new(&path), &ExportParams::default())
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::MalformedFragment {
            fragment: 0,
            defect: FragmentDefect::NormalCountMismatch { .. }
        }
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous scan\n");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn scenario_off_by_one_index_is_malformed() {
    let mut bad = triangle();
    bad.faces = vec![[0, 1, 3]];

    let mut sink = MemorySink::new();
    let err = export_mesh([&bad], &mut sink, &ExportParams::default()).unwrap_err();

    assert!(err.is_malformed());
    assert!(matches!(
        err,
        ExportError::MalformedFragment {
            defect: FragmentDefect::FaceIndexOutOfRange {
                index: 3,
                vertex_count: 3,
                ..
            },
            ..
        }
    ));
    assert!(sink.contents().is_none());
}

#[test]
fn empty_collection_writes_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.obj");

    let report = save_obj(&Vec::<MeshFragment>::new(), &path).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.location, path);
    assert_eq!(std::fs::read(&path).unwrap(), Vec::<u8>::new());
}

// =============================================================================
// Files and sinks
// =============================================================================

#[test]
fn unwritable_destination_is_sink_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("scan.obj");

    let err = export_mesh(
        [&triangle()],
        &mut FileSink::new(&path),
        &ExportParams::default(),
    )
    .unwrap_err();

    assert!(err.is_sink_failure());
    assert!(!path.exists());
}

#[test]
fn failed_export_keeps_previous_export() {
    let dir = tempdir().unwrap();
    let mut sink = FileSink::in_dir(dir.path());

    export_mesh([&triangle()], &mut sink, &ExportParams::default()).unwrap();
    let first = std::fs::read(sink.path()).unwrap();

    let mut bad = quad_fragment();
    bad.faces.push([4, 0, 1]);
    assert!(export_mesh([&triangle(), &bad], &mut sink, &ExportParams::default()).is_err());

    assert_eq!(std::fs::read(sink.path()).unwrap(), first);
}

#[test]
fn repeated_exports_are_byte_identical() {
    let dir = tempdir().unwrap();
    let fragments = vec![grid_fragment(0.0, 4), triangle(), grid_fragment(-3.0, 2)];

    let first = save_obj(&fragments, dir.path().join("a.obj")).unwrap();
    let second = save_obj(&fragments, dir.path().join("b.obj")).unwrap();

    assert_eq!(
        std::fs::read(&first.location).unwrap(),
        std::fs::read(&second.location).unwrap()
    );
}

#[test]
fn report_counts_match_file() {
    let dir = tempdir().unwrap();
    let fragments = vec![grid_fragment(0.0, 3), grid_fragment(1.0, 2)];

    let report = save_obj(&fragments, dir.path().join("scan.obj")).unwrap();
    let document = std::fs::read_to_string(&report.location).unwrap();

    assert_eq!(report.vertices, 16 + 9);
    assert_eq!(report.faces, 18 + 8);
    assert_eq!(report.bytes, document.len());
    assert_eq!(lines_with_prefix(&document, "v ").len(), report.vertices);
    assert_eq!(lines_with_prefix(&document, "vn ").len(), report.normals);
    assert_eq!(lines_with_prefix(&document, "f ").len(), report.faces);
}

// =============================================================================
// Round-trip through an independent reader
// =============================================================================

#[test]
fn roundtrip_preserves_geometry_and_connectivity() {
    let dir = tempdir().unwrap();
    let fragments = vec![grid_fragment(0.0, 3), triangle(), quad_fragment()];
    let report = save_obj(&fragments, dir.path().join("scan.obj")).unwrap();

    let models = load_with_tobj(&report.location);

    // Expected corners, in emission order.
    let expected: Vec<(Point3<f32>, Vector3<f32>)> = fragments
        .iter()
        .flat_map(|f| {
            f.faces
                .iter()
                .flat_map(|face| {
                    face.iter()
                        .map(|&i| (f.vertices[i as usize], f.normals[i as usize]))
                })
        })
        .collect();

    let mut actual = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        assert_eq!(mesh.indices.len(), mesh.normal_indices.len());
        for (&vi, &ni) in mesh.indices.iter().zip(&mesh.normal_indices) {
            let (vi, ni) = (vi as usize * 3, ni as usize * 3);
            actual.push((
                Point3::new(mesh.positions[vi], mesh.positions[vi + 1], mesh.positions[vi + 2]),
                Vector3::new(mesh.normals[ni], mesh.normals[ni + 1], mesh.normals[ni + 2]),
            ));
        }
    }

    assert_eq!(actual.len(), expected.len());
    for ((p, n), (ep, en)) in actual.iter().zip(&expected) {
        assert_relative_eq!(*p, *ep);
        assert_relative_eq!(*n, *en);
    }
}

#[test]
fn roundtrip_keeps_single_precision() {
    let dir = tempdir().unwrap();
    let fragment = MeshFragment::from_parts(
        vec![
            Point3::new(0.123_456_79, -1.0e-6, 1_024.000_1),
            Point3::new(3.333_333_3, 7.654_321e-3, -0.000_244_140_62),
            Point3::new(-12.5, 0.1, 0.2),
        ],
        vec![
            Vector3::new(0.267_261_24, 0.534_522_5, 0.801_783_74),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(-0.707_106_77, 0.0, 0.707_106_77),
        ],
        vec![[0, 1, 2]],
    );
    let report = save_obj([&fragment], dir.path().join("precise.obj")).unwrap();

    let models = load_with_tobj(&report.location);
    let mesh = &models[0].mesh;

    for (corner, &vi) in mesh.indices.iter().enumerate() {
        let vi = vi as usize * 3;
        let original = fragment.vertices[corner];
        // Exact: the shortest representation parses back to the same f32.
        assert_eq!(mesh.positions[vi].to_bits(), original.x.to_bits());
        assert_eq!(mesh.positions[vi + 1].to_bits(), original.y.to_bits());
        assert_eq!(mesh.positions[vi + 2].to_bits(), original.z.to_bits());
    }
}

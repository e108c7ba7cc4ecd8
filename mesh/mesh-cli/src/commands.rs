//! CLI command implementations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use mesh_io::{export_mesh, ExportParams, FileSink, LineEnding};
use mesh_types::Aabb;
use owo_colors::OwoColorize;

use crate::input;

/// Options for the `export` command.
#[derive(Debug)]
pub struct ExportOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub crlf: bool,
    pub allow_non_finite: bool,
    pub no_sync: bool,
}

impl ExportOptions {
    fn params(&self) -> ExportParams {
        let line_ending = if self.crlf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        ExportParams::new()
            .with_reject_non_finite(!self.allow_non_finite)
            .with_line_ending(line_ending)
    }

    fn sink(&self) -> FileSink {
        let sink = match (&self.output, &self.dir) {
            (Some(path), _) => FileSink::new(path),
            (None, Some(dir)) => FileSink::in_dir(dir),
            (None, None) => FileSink::in_dir("."),
        };
        sink.with_sync(!self.no_sync)
    }
}

/// Export a fragment snapshot file to OBJ.
pub fn export(options: &ExportOptions) -> Result<()> {
    let snapshot = input::load(&options.input)?;
    let mut sink = options.sink();

    let fragments = snapshot.fragments();

    let report = export_mesh(fragments.iter().copied(), &mut sink, &options.params())
        .map_err(|err| {
            let id = err
                .fragment_index()
                .and_then(|index| fragments.get(index))
                .and_then(|fragment| fragment.id);
            let context = match id {
                Some(id) => format!(
                    "failed to export {} (fragment id {id})",
                    options.input.display()
                ),
                None => format!("failed to export {}", options.input.display()),
            };
            anyhow::Error::new(err).context(context)
        })?;

    println!("{report}");
    println!("Saved: {}", report.location.display());
    if !report.bounds.is_empty() {
        println!("Bounds: {}", format_bounds(&report.bounds));
    }
    Ok(())
}

/// Validate every fragment in a snapshot file and summarise it.
pub fn inspect(path: &Path) -> Result<()> {
    let snapshot = input::load(path)?;
    let fragments = snapshot.fragments();

    println!("Fragments: {}", fragments.len());
    println!("──────────");

    let mut bounds = Aabb::empty();
    let mut defects = 0usize;
    for (index, fragment) in fragments.iter().enumerate() {
        let label = fragment
            .id
            .map_or_else(|| format!("#{index}"), |id| id.to_string());
        let status = fragment.validate().and_then(|()| fragment.validate_finite());

        match status {
            Ok(()) => println!(
                "{} {label}: {} vertices, {} faces",
                "ok".green().bold(),
                fragment.vertex_count(),
                fragment.face_count()
            ),
            Err(defect) => {
                defects += 1;
                println!("{} {label}: {defect}", "defect".red().bold());
            }
        }
        bounds = bounds.union(&fragment.bounds());
    }

    let vertices: usize = fragments.iter().map(|f| f.vertex_count()).sum();
    let faces: usize = fragments.iter().map(|f| f.face_count()).sum();
    println!();
    println!("Total: {vertices} vertices, {faces} faces");
    if !bounds.is_empty() {
        println!("Bounds: {}", format_bounds(&bounds));
        println!("Extent: {}", format_extent(&bounds));
    }

    if defects > 0 {
        bail!("{defects} of {} fragments are malformed", fragments.len());
    }
    Ok(())
}

fn format_bounds(bounds: &Aabb) -> String {
    let (min, max) = (bounds.min, bounds.max);
    format!(
        "[{}, {}, {}] .. [{}, {}, {}]",
        min.x, min.y, min.z, max.x, max.y, max.z
    )
}

/// Longest edge and centre, e.g. to sanity-check the scanner's units.
fn format_extent(bounds: &Aabb) -> String {
    let center = bounds.center();
    format!(
        "{} around [{}, {}, {}]",
        bounds.max_extent(),
        center.x,
        center.y,
        center.z
    )
}

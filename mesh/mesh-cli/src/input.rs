//! Fragment snapshot loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mesh_scan::FragmentStore;
use mesh_types::MeshFragment;

/// Fragments read from a snapshot file, in the order they will be exported.
#[derive(Debug)]
pub enum Snapshot {
    /// Every fragment carried an identifier; replayed through a store so
    /// later entries for the same id replace earlier ones.
    Keyed(FragmentStore),
    /// At least one fragment had no identifier; file order is kept.
    Ordered(Vec<MeshFragment>),
}

impl Snapshot {
    /// Build a snapshot from decoded fragments.
    pub fn from_fragments(fragments: Vec<MeshFragment>) -> Self {
        if !fragments.is_empty() && fragments.iter().all(|f| f.id.is_some()) {
            Self::Keyed(
                fragments
                    .into_iter()
                    .filter_map(|f| f.id.map(|id| (id, f)))
                    .collect(),
            )
        } else {
            Self::Ordered(fragments)
        }
    }

    /// Fragments in export order.
    pub fn fragments(&self) -> Vec<&MeshFragment> {
        match self {
            Self::Keyed(store) => store.snapshot(),
            Self::Ordered(fragments) => fragments.iter().collect(),
        }
    }
}

/// Parse a JSON array of fragments.
pub fn parse_fragments(json: &str) -> Result<Vec<MeshFragment>> {
    serde_json::from_str(json).context("input is not a JSON array of fragments")
}

/// Read and parse a snapshot file.
pub fn load(path: &Path) -> Result<Snapshot> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let fragments =
        parse_fragments(&json).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Snapshot::from_fragments(fragments))
}

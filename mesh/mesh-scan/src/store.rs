//! Latest-snapshot store for scan fragments.

use hashbrown::HashMap;
use mesh_io::{export_mesh, ExportParams, ExportResult, ExportReport, Sink};
use mesh_types::{FragmentId, MeshFragment};
use tracing::debug;

/// A change reported by the scanning session.
#[derive(Debug, Clone)]
pub enum FragmentUpdate {
    /// A fragment was discovered or its geometry refined.
    Upsert(FragmentId, MeshFragment),
    /// The scanner dropped a fragment.
    Remove(FragmentId),
}

/// Latest geometry per fragment identifier.
///
/// Iteration order of the underlying map is unspecified, so [`snapshot`]
/// sorts by identifier: exporting the same store twice yields byte-identical
/// documents.
///
/// [`snapshot`]: FragmentStore::snapshot
#[derive(Debug, Clone, Default)]
pub struct FragmentStore {
    fragments: HashMap<FragmentId, MeshFragment>,
}

impl FragmentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the snapshot for `id`.
    ///
    /// The stored fragment carries `id`. Returns the replaced snapshot, if any.
    pub fn upsert(&mut self, id: FragmentId, fragment: MeshFragment) -> Option<MeshFragment> {
        debug!(
            fragment = %id,
            vertices = fragment.vertex_count(),
            faces = fragment.face_count(),
            "Upserting fragment"
        );
        self.fragments.insert(id, fragment.with_id(id))
    }

    /// Drop the snapshot for `id`, returning it if present.
    pub fn remove(&mut self, id: FragmentId) -> Option<MeshFragment> {
        let removed = self.fragments.remove(&id);
        if removed.is_some() {
            debug!(fragment = %id, "Removed fragment");
        }
        removed
    }

    /// Apply one session update.
    pub fn apply(&mut self, update: FragmentUpdate) {
        match update {
            FragmentUpdate::Upsert(id, fragment) => {
                self.upsert(id, fragment);
            }
            FragmentUpdate::Remove(id) => {
                self.remove(id);
            }
        }
    }

    /// Apply a batch of session updates in order.
    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = FragmentUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }

    /// The current snapshot for `id`.
    #[must_use]
    pub fn get(&self, id: FragmentId) -> Option<&MeshFragment> {
        self.fragments.get(&id)
    }

    /// Whether a snapshot exists for `id`.
    #[must_use]
    pub fn contains(&self, id: FragmentId) -> bool {
        self.fragments.contains_key(&id)
    }

    /// Number of fragments held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the store holds no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Drop every fragment, e.g. when a new scan starts.
    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// All fragments, ordered by identifier.
    #[must_use]
    pub fn snapshot(&self) -> Vec<&MeshFragment> {
        let mut entries: Vec<(&FragmentId, &MeshFragment)> = self.fragments.iter().collect();
        entries.sort_unstable_by_key(|(id, _)| **id);
        entries.into_iter().map(|(_, fragment)| fragment).collect()
    }

    /// Total vertex count across all fragments.
    #[must_use]
    pub fn total_vertices(&self) -> usize {
        self.fragments.values().map(MeshFragment::vertex_count).sum()
    }

    /// Total triangle count across all fragments.
    #[must_use]
    pub fn total_faces(&self) -> usize {
        self.fragments.values().map(MeshFragment::face_count).sum()
    }

    /// Export the current [`snapshot`](Self::snapshot) to `sink`.
    ///
    /// # Errors
    ///
    /// See [`mesh_io::export_mesh`].
    pub fn export<S>(
        &self,
        sink: &mut S,
        params: &ExportParams,
    ) -> ExportResult<ExportReport<S::Location>>
    where
        S: Sink + ?Sized,
    {
        export_mesh(self.snapshot(), sink, params)
    }
}

impl FromIterator<(FragmentId, MeshFragment)> for FragmentStore {
    fn from_iter<T: IntoIterator<Item = (FragmentId, MeshFragment)>>(iter: T) -> Self {
        let mut store = Self::new();
        for (id, fragment) in iter {
            store.upsert(id, fragment);
        }
        store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_io::{FileSink, MemorySink};
    use mesh_types::{Point3, Vector3};

    fn patch(x: f32) -> MeshFragment {
        MeshFragment::from_parts(
            vec![
                Point3::new(x, 0.0, 0.0),
                Point3::new(x + 1.0, 0.0, 0.0),
                Point3::new(x, 1.0, 0.0),
            ],
            vec![Vector3::z(); 3],
            vec![[0, 1, 2]],
        )
    }

    fn id(value: u128) -> FragmentId {
        FragmentId::from_u128(value)
    }

    #[test]
    fn upsert_replaces_previous_snapshot() {
        let mut store = FragmentStore::new();
        assert!(store.upsert(id(1), patch(0.0)).is_none());

        let previous = store.upsert(id(1), patch(5.0)).unwrap();

        assert_eq!(store.len(), 1);
        assert!((previous.vertices[0].x - 0.0).abs() < f32::EPSILON);
        assert!((store.get(id(1)).unwrap().vertices[0].x - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn upsert_stamps_identifier() {
        let mut store = FragmentStore::new();
        store.upsert(id(42), patch(0.0));
        assert_eq!(store.get(id(42)).unwrap().id, Some(id(42)));
    }

    #[test]
    fn remove_and_contains() {
        let mut store = FragmentStore::new();
        store.upsert(id(1), patch(0.0));
        assert!(store.contains(id(1)));

        assert!(store.remove(id(1)).is_some());
        assert!(store.remove(id(1)).is_none());
        assert!(!store.contains(id(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn apply_all_processes_in_order() {
        let mut store = FragmentStore::new();
        store.apply_all([
            FragmentUpdate::Upsert(id(1), patch(0.0)),
            FragmentUpdate::Upsert(id(2), patch(1.0)),
            FragmentUpdate::Remove(id(1)),
            FragmentUpdate::Upsert(id(3), patch(2.0)),
        ]);

        assert_eq!(store.len(), 2);
        assert!(!store.contains(id(1)));
        assert_eq!(store.total_vertices(), 6);
        assert_eq!(store.total_faces(), 2);
    }

    #[test]
    fn snapshot_is_sorted_by_identifier() {
        let store: FragmentStore = [
            (id(30), patch(3.0)),
            (id(10), patch(1.0)),
            (id(20), patch(2.0)),
        ]
        .into_iter()
        .collect();

        let ids: Vec<Option<FragmentId>> = store.snapshot().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![Some(id(10)), Some(id(20)), Some(id(30))]);
    }

    #[test]
    fn clear_empties_store() {
        let mut store: FragmentStore = [(id(1), patch(0.0))].into_iter().collect();
        store.clear();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn export_is_reproducible() {
        let forward: FragmentStore = (0..20u8)
            .map(|k| (id(u128::from(k)), patch(f32::from(k))))
            .collect();
        let backward: FragmentStore = (0..20u8)
            .rev()
            .map(|k| (id(u128::from(k)), patch(f32::from(k))))
            .collect();

        let mut a = MemorySink::new();
        let mut b = MemorySink::new();
        forward.export(&mut a, &ExportParams::default()).unwrap();
        backward.export(&mut b, &ExportParams::default()).unwrap();

        assert_eq!(a.contents(), b.contents());
    }

    #[test]
    fn empty_store_exports_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::in_dir(dir.path());

        let report = FragmentStore::new()
            .export(&mut sink, &ExportParams::default())
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(std::fs::read(report.location).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn malformed_fragment_fails_export() {
        let mut bad = patch(0.0);
        bad.normals.clear();
        let store: FragmentStore = [(id(1), patch(1.0)), (id(2), bad)].into_iter().collect();

        let mut sink = MemorySink::new();
        let err = store.export(&mut sink, &ExportParams::default()).unwrap_err();

        assert_eq!(err.fragment_index(), Some(1));
        assert_eq!(sink.commits(), 0);
    }
}

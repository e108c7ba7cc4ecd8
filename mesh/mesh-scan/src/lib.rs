//! Scan session bookkeeping.
//!
//! A depth-scanning session keeps refining the same pieces of geometry and
//! re-reports each one under a stable identifier. This crate holds the
//! latest snapshot of every fragment until the session stops, then hands a
//! deterministic snapshot to the exporter.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_io::{ExportParams, MemorySink};
//! use mesh_scan::{FragmentStore, FragmentUpdate};
//! use mesh_types::{FragmentId, MeshFragment, Point3, Vector3};
//!
//! let patch = MeshFragment::from_parts(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![Vector3::z(); 3],
//!     vec![[0, 1, 2]],
//! );
//!
//! let mut store = FragmentStore::new();
//! store.apply(FragmentUpdate::Upsert(FragmentId::from_u128(1), patch.clone()));
//! store.apply(FragmentUpdate::Upsert(FragmentId::from_u128(1), patch)); // refined
//! assert_eq!(store.len(), 1);
//!
//! let mut sink = MemorySink::new();
//! let report = store.export(&mut sink, &ExportParams::default()).unwrap();
//! assert_eq!(report.faces, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]

pub mod store;

pub use store::{FragmentStore, FragmentUpdate};

//! Scan fragment export.
//!
//! This crate merges the triangle-mesh fragments reported by a depth-scanning
//! session into a single Wavefront OBJ document and stores it all-or-nothing:
//!
//! 1. **Ingestion** - any finite collection of [`MeshFragment`]s, in any order
//! 2. **Index remapping** - fragment-local face indices become global and 1-based
//! 3. **Serialization** - `v`, `vn` and `f a//a b//b c//c` records per fragment
//! 4. **Sink write** - the complete document is committed atomically
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Mobile apps (through bindings)
//! - Servers
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{export_mesh, ExportParams, FileSink};
//! use mesh_types::MeshFragment;
//!
//! let fragments: Vec<MeshFragment> = Vec::new();
//! let mut sink = FileSink::in_dir("/var/scans");
//!
//! let report = export_mesh(&fragments, &mut sink, &ExportParams::default()).unwrap();
//! println!("{report} -> {}", report.location.display());
//! ```
//!
//! # Failure Semantics
//!
//! A failed export never leaves a partial document behind:
//!
//! - Malformed fragments are detected while encoding, before the sink is touched.
//! - [`FileSink`] writes through a temporary file and renames it into place.
//!
//! # Concurrency
//!
//! Export is a synchronous free function with no shared state. Independent
//! calls can run on different threads as long as each has its own sink.
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod export;
mod obj;
mod params;
mod sink;

pub use error::{ExportError, ExportResult};
pub use export::{export_mesh, save_obj, ExportReport};
pub use obj::{encode_obj, EncodedObj};
pub use params::{ExportParams, LineEnding};
pub use sink::{FileSink, MemorySink, Sink, DEFAULT_FILE_NAME};

pub use mesh_types::MeshFragment;

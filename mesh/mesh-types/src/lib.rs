//! Core scan fragment types.
//!
//! A depth-scanning session reports geometry as a set of independent
//! fragments. Each fragment owns its own vertex, normal and triangle buffers,
//! indexed locally from zero. This crate provides:
//!
//! - [`MeshFragment`] - One locally-indexed chunk of triangle geometry
//! - [`FragmentId`] - Opaque identifier assigned upstream by the scanner
//! - [`FragmentDefect`] - Structural problems detected by validation
//! - [`Aabb`] - Axis-aligned bounding box in single precision
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Mobile bindings
//!
//! # Precision
//!
//! Scanners hand out single-precision buffers, so all geometry is `f32`.
//! Coordinates are kept exactly as reported; nothing in this crate rounds.
//!
//! # Example
//!
//! ```
//! use mesh_types::{MeshFragment, Point3, Vector3};
//!
//! let mut fragment = MeshFragment::new();
//! fragment.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! fragment.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! fragment.vertices.push(Point3::new(0.0, 1.0, 0.0));
//! fragment.normals.extend([Vector3::z(); 3]);
//! fragment.faces.push([0, 1, 2]);
//!
//! assert!(fragment.validate().is_ok());
//! assert_eq!(fragment.face_count(), 1);
//! ```
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

mod bounds;
mod defect;
mod fragment;
mod id;

pub use bounds::Aabb;
pub use defect::{ComponentKind, FragmentDefect};
pub use fragment::MeshFragment;
pub use id::FragmentId;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

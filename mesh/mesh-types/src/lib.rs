//! Core mesh types for CortenForge.
//!
//! This crate provides the foundational types for mesh processing:
//!
//! - [`IndexedMesh`] - A triangle mesh with indexed vertex positions
//! - [`Triangle`] and [`Plane`] - Concrete triangle geometry
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Bounds`] - Running bounding box, centroid and radius over a point stream
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**; normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Point3};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod triangle;

// Re-export core types
pub use bounds::{Aabb, Bounds};
pub use mesh::{IndexedMesh, unit_cube};
pub use triangle::{Plane, Triangle};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

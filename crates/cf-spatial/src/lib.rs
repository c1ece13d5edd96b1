//! Spatial data structures for CortenForge.
//!
//! This crate provides the spatial indexing used by mesh processing:
//!
//! - [`VoxelCoord`] - Integer cell coordinates
//! - [`ProximityGrid`] - Sparse uniform grid for fixed-radius neighbour queries
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Embedded systems
//! - Other game engines
//!
//! # Coordinate Systems
//!
//! World coordinates are continuous `f64` values. Grid coordinates are
//! discrete `i32` values, obtained by flooring the offset from the grid origin
//! divided by the cell size.
//!
//! # Example
//!
//! ```
//! use cf_spatial::{ProximityGrid, VoxelCoord};
//! use nalgebra::Point3;
//!
//! let mut grid = ProximityGrid::new(Point3::origin(), 0.1).unwrap();
//! grid.insert(0_usize, Point3::new(0.55, 0.55, 0.55));
//! grid.insert(1_usize, Point3::new(0.58, 0.55, 0.55));
//!
//! assert_eq!(grid.cell_of(&Point3::new(0.55, 0.55, 0.55)), VoxelCoord::new(5, 5, 5));
//! assert_eq!(grid.neighbors(0, &Point3::new(0.55, 0.55, 0.55)), vec![1]);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod proximity;
mod voxel;

// Re-export core types
pub use error::SpatialError;
pub use proximity::ProximityGrid;
pub use voxel::VoxelCoord;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

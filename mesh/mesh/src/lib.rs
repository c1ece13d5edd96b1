//! Mesh simplification toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates and `cf-spatial`,
//! providing a unified API for decimating triangle meshes. All crates are
//! Layer 0 (zero Bevy dependencies) and can be used in CLI tools, WASM,
//! servers, or Python bindings.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! let cube = mesh::types::unit_cube();
//!
//! // One-shot decimation
//! let result = decimate_mesh(&cube, &DecimateParams::with_target_vertices(6))?;
//! assert!(result.final_vertices <= 6);
//!
//! // Incremental decimation
//! let mut decimator = Decimator::from_mesh(&cube, DecimateParams::default())?;
//! decimator.initialize_heap()?;
//! while decimator.model().vertex_count() > 5 {
//!     if decimator.step()?.is_none() {
//!         break;
//!     }
//! }
//! decimator.compact()?;
//! let simplified: IndexedMesh = decimator.to_mesh();
//! assert!(simplified.vertex_count() <= 5);
//! # Ok::<(), mesh::decimate::DecimateError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Triangle`, `Plane`, `Aabb`
//! - [`spatial`] - Sparse voxel grids for proximity queries
//! - [`decimate`] - Pair contraction with quadric error metrics
//!
//! # Feature Flags
//!
//! - `serde` - Serialize meshes, bounds and decimation parameters

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Triangle`, `Plane`, `Aabb`.
pub use mesh_types as types;

/// Sparse voxel grids for proximity queries.
pub use cf_spatial as spatial;

/// Mesh simplification (QEM-based pair contraction).
pub use mesh_decimate as decimate;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh processing.
///
/// This module re-exports the most commonly used types and functions.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, IndexedMesh, Point3, Triangle, Vector3};

    // Decimation
    pub use mesh_decimate::{
        DecimateParams, DecimationResult, Decimator, Placement, StopReason, decimate_mesh,
    };
}

// =============================================================================
// Tests
// =============================================================================

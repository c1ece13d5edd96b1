//! Mesh simplification by greedy pair contraction with quadric error metrics.
//!
//! Vertices are merged two at a time, cheapest first, where the cost of a
//! merge is the squared distance of the merged vertex to the planes around
//! both originals (Garland-Heckbert QEM).
//!
//! # Features
//!
//! - **Pair contraction**: Pairs come from edges and, optionally, from nearby
//!   unconnected vertices, so separate parts can be joined
//! - **Placement policies**: Endpoints, endpoints or midpoint, best point on
//!   the segment, or the unconstrained optimum
//! - **Boundary preservation**: Keep border vertices in place and add
//!   constraint planes along borders and creases
//! - **Inversion check**: Penalise contractions that would flip a face
//! - **Stop control**: Vertex target, face target, or error tolerance
//! - **Incremental API**: Drive a [`Decimator`] step by step and inspect it
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_decimate::{decimate_mesh, DecimateParams};
//!
//! let cube = unit_cube();
//!
//! // Keep half of the vertices
//! let result = decimate_mesh(&cube, &DecimateParams::with_target_ratio(0.5))?;
//! println!("{}", result);
//!
//! // Use aggressive settings for more reduction
//! let aggressive = decimate_mesh(&cube, &DecimateParams::aggressive())?;
//! assert!(aggressive.final_vertices < cube.vertex_count());
//! # Ok::<(), mesh_decimate::DecimateError>(())
//! ```
//!
//! # Algorithm
//!
//! 1. Accumulate a quadric per vertex from the planes of its faces, plus
//!    optional point and discontinuity constraints
//! 2. Create a pair for every edge (and every close vertex pair), choose its
//!    target and cost, and queue it
//! 3. Repeatedly contract the cheapest pair, merging quadrics and re-costing
//!    every pair that touches the surviving vertex
//! 4. Stop at the target or when the cheapest cost reaches the tolerance,
//!    then compact away degenerate faces and unused vertices

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod decimate;
mod error;
mod heap;
mod model;
mod pair;
mod params;
mod placement;
mod quadric;
mod result;

// Re-export main types and functions
pub use decimate::{DecimationStats, Decimator, decimate_mesh};
pub use error::{DecimateError, DecimateResult, TopologyError};
pub use heap::{HeapSlots, PairHeap};
pub use model::{AdjacencyModel, EdgeId, FaceId, VertexClass, VertexId};
pub use pair::{Pair, PairKey};
pub use params::{DecimateParams, NEUTRAL_BOUNDARY_WEIGHT, RIGID_BOUNDARY_WEIGHT};
pub use placement::{MESH_INVERSION_PENALTY, Placement, place, would_invert};
pub use quadric::Quadric;
pub use result::{ContractionRecord, DecimationResult, DecimatorState, StopReason};

//! Result and state types for decimation runs.

// Vertex and face counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use std::fmt;

use mesh_types::{IndexedMesh, Point3};

use crate::model::VertexId;

/// Why a decimation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The vertex (or face) target was met.
    TargetReached,
    /// No valid candidate pair was left in the queue.
    NoPairsAvailable,
    /// The cheapest remaining pair costs at least the error tolerance.
    ErrorToleranceExceeded,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetReached => write!(f, "target reached"),
            Self::NoPairsAvailable => write!(f, "no pairs available"),
            Self::ErrorToleranceExceeded => write!(f, "error tolerance exceeded"),
        }
    }
}

/// Lifecycle of a [`Decimator`](crate::Decimator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecimatorState {
    /// Accepting vertices and faces.
    #[default]
    Uninitialized,
    /// Quadrics accumulated and candidate pairs queued.
    HeapBuilt,
    /// At least one contraction has been performed.
    Running,
    /// A run finished.
    Stopped(StopReason),
}

impl fmt::Display for DecimatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::HeapBuilt => write!(f, "ready"),
            Self::Running => write!(f, "running"),
            Self::Stopped(reason) => write!(f, "stopped ({reason})"),
        }
    }
}

/// One performed contraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractionRecord {
    /// Surviving vertex (moved to `target`).
    pub kept: VertexId,
    /// Vertex merged into `kept`.
    pub removed: VertexId,
    /// New position of `kept`.
    pub target: Point3<f64>,
    /// Cost of the contraction when it was chosen.
    pub cost: f64,
}

/// Result of mesh decimation.
#[derive(Debug, Clone)]
pub struct DecimationResult {
    /// The decimated mesh.
    pub mesh: IndexedMesh,

    /// Number of vertices in the original mesh.
    pub original_vertices: usize,

    /// Number of triangles in the original mesh.
    pub original_triangles: usize,

    /// Number of vertices in the decimated mesh.
    pub final_vertices: usize,

    /// Number of triangles in the decimated mesh.
    pub final_triangles: usize,

    /// Number of pair contractions performed.
    pub collapses_performed: usize,

    /// Queued pairs dropped because an endpoint died first.
    pub stale_pairs_discarded: usize,

    /// Why the run stopped.
    pub stop_reason: StopReason,

    /// Performed contractions in order; empty unless history was requested.
    pub history: Vec<ContractionRecord>,
}

impl DecimationResult {
    /// Get the reduction ratio (final / original triangles).
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Get the percentage of triangles removed.
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    /// Check if any decimation occurred.
    #[must_use]
    pub const fn was_decimated(&self) -> bool {
        self.collapses_performed > 0
    }
}

impl fmt::Display for DecimationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decimation: {} → {} vertices, {} → {} triangles ({:.1}% reduction, {} collapses, {})",
            self.original_vertices,
            self.final_vertices,
            self.original_triangles,
            self.final_triangles,
            self.reduction_percent(),
            self.collapses_performed,
            self.stop_reason
        )
    }
}

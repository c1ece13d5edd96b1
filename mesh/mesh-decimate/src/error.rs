//! Error types for mesh decimation operations.

use cf_spatial::SpatialError;
use thiserror::Error;

use crate::model::{EdgeId, FaceId, VertexId};
use crate::result::DecimatorState;

/// Errors that can occur during decimation operations.
#[derive(Debug, Error)]
pub enum DecimateError {
    /// A face refers to a vertex that has not been added.
    #[error("Face index {index} out of range (mesh has {vertex_count} vertices)")]
    InvalidFaceIndex {
        /// The offending 0-based vertex index.
        index: u32,
        /// Number of vertices added so far.
        vertex_count: usize,
    },

    /// A face uses the same vertex more than once.
    #[error("Degenerate face {face:?}: a vertex index repeats")]
    DegenerateFace {
        /// The rejected index triple.
        face: [u32; 3],
    },

    /// Invalid target ratio.
    #[error("Invalid target ratio: {0} (must be between 0.0 and 1.0)")]
    InvalidRatio(f64),

    /// A numeric parameter is out of its valid range.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Field name in [`DecimateParams`](crate::DecimateParams).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An operation was called in a state that does not allow it.
    #[error("Cannot {operation} while decimator is {state}")]
    InvalidState {
        /// The attempted operation.
        operation: &'static str,
        /// The state the decimator was in.
        state: DecimatorState,
    },

    /// The proximity grid could not be built.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

/// An inconsistency found by
/// [`AdjacencyModel::validate`](crate::AdjacencyModel::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A live face names the same vertex twice.
    #[error("face {face} has repeated corners {corners:?}")]
    RepeatedCorners {
        /// The offending face.
        face: FaceId,
        /// Its corner vertices.
        corners: [VertexId; 3],
    },

    /// A live face uses a dead edge.
    #[error("face {face} uses dead edge {edge}")]
    DeadEdge {
        /// The offending face.
        face: FaceId,
        /// The dead edge.
        edge: EdgeId,
    },

    /// The three half-edges of a face do not chain head to tail.
    #[error("face {face} edges do not form a loop")]
    BrokenLoop {
        /// The offending face.
        face: FaceId,
    },

    /// A live face has a dead corner.
    #[error("face {face} uses dead vertex {vertex}")]
    DeadCorner {
        /// The offending face.
        face: FaceId,
        /// The dead vertex.
        vertex: VertexId,
    },

    /// The face-use list of an edge disagrees with the face's own slots.
    #[error("edge {edge} lists face {face} {listed} times, face uses it {used} times")]
    UseCountMismatch {
        /// The edge whose list is wrong.
        edge: EdgeId,
        /// The face involved.
        face: FaceId,
        /// Entries in the edge's face-use list.
        listed: usize,
        /// Slots of the face that use the edge.
        used: usize,
    },

    /// A live edge lists a dead face.
    #[error("edge {edge} lists dead face {face}")]
    DeadFace {
        /// The offending edge.
        edge: EdgeId,
        /// The dead face.
        face: FaceId,
    },

    /// A live edge lists a face that no longer uses it.
    #[error("edge {edge} lists face {face} which does not use it")]
    StaleFaceUse {
        /// The offending edge.
        edge: EdgeId,
        /// The listed face.
        face: FaceId,
    },

    /// A half-edge is missing from the outgoing list of its origin.
    #[error("edge {edge} missing from its origin {vertex}")]
    MissingOutgoing {
        /// The unlisted half-edge.
        edge: EdgeId,
        /// Its origin.
        vertex: VertexId,
    },

    /// A vertex lists a dead half-edge or one that starts elsewhere.
    #[error("vertex {vertex} lists foreign or dead edge {edge}")]
    ForeignOutgoing {
        /// The offending vertex.
        vertex: VertexId,
        /// The listed half-edge.
        edge: EdgeId,
    },

    /// The live counters disagree with the alive flags.
    #[error("live counters out of sync")]
    CounterMismatch,
}

/// Result type for decimation operations.
pub type DecimateResult<T> = std::result::Result<T, DecimateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::StopReason;

    #[test]
    fn test_error_display() {
        let err = DecimateError::InvalidFaceIndex {
            index: 9,
            vertex_count: 4,
        };
        assert_eq!(
            format!("{err}"),
            "Face index 9 out of range (mesh has 4 vertices)"
        );

        let err = DecimateError::InvalidRatio(1.5);
        assert!(format!("{err}").contains("1.5"));
    }

    #[test]
    fn test_state_error_display() {
        let err = DecimateError::InvalidState {
            operation: "add a face",
            state: DecimatorState::Stopped(StopReason::TargetReached),
        };
        assert_eq!(
            format!("{err}"),
            "Cannot add a face while decimator is stopped (target reached)"
        );
    }

    #[test]
    fn test_topology_error_display() {
        let err = TopologyError::UseCountMismatch {
            edge: EdgeId(6),
            face: FaceId(2),
            listed: 1,
            used: 2,
        };
        assert_eq!(
            format!("{err}"),
            "edge 6 lists face 2 1 times, face uses it 2 times"
        );
        assert_eq!(
            format!("{}", TopologyError::BrokenLoop { face: FaceId(3) }),
            "face 3 edges do not form a loop"
        );
    }

    #[test]
    fn test_spatial_error_converts() {
        let err: DecimateError = SpatialError::InvalidVoxelSize(-1.0).into();
        assert!(matches!(err, DecimateError::Spatial(_)));
        assert!(format!("{err}").contains("-1"));
    }
}

//! Choosing where a contracted pair ends up.

use mesh_types::{Point3, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{AdjacencyModel, VertexId};
use crate::quadric::Quadric;

/// Cost added once to a contraction that would flip a face.
pub const MESH_INVERSION_PENALTY: f64 = 1e9;

/// Where the merged vertex of a contraction may be placed.
///
/// Policies are ordered from most to least constrained; each one falls back to
/// the previous when its solve is singular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Placement {
    /// One of the two endpoints.
    Endpoints,
    /// One of the endpoints or their midpoint.
    EndOrMid,
    /// The best point on the segment between the endpoints.
    Line,
    /// The unconstrained error minimum.
    #[default]
    Optimal,
}

/// Best target for merging `v1` and `v2` under `policy`, with its error.
///
/// `Optimal` falls back to `Line`, which falls back to the endpoints. Among
/// discrete candidates the first minimum wins, in the order `v1`, `v2`,
/// midpoint (the midpoint only under `EndOrMid`).
///
/// # Example
///
/// ```
/// use mesh_decimate::{Placement, Quadric, place};
/// use mesh_types::Point3;
///
/// // Plane x = 0.25 between the endpoints
/// let q = Quadric::from_plane(1.0, 0.0, 0.0, -0.25);
/// let v1 = Point3::new(1.0, 0.0, 0.0);
/// let v2 = Point3::new(0.0, 0.0, 0.0);
///
/// let (target, cost) = place(&q, &v1, &v2, Placement::Line);
/// assert!((target.x - 0.25).abs() < 1e-12 && cost.abs() < 1e-12);
///
/// let (target, _) = place(&q, &v1, &v2, Placement::Endpoints);
/// assert_eq!(target, v2);
/// ```
#[must_use]
pub fn place(
    q: &Quadric,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
    policy: Placement,
) -> (Point3<f64>, f64) {
    if policy == Placement::Optimal {
        if let Some(p) = q.optimal_point() {
            return (p, q.evaluate(&p));
        }
    }

    if policy >= Placement::Line {
        if let Some(p) = q.line_point(v1, v2) {
            return (p, q.evaluate(&p));
        }
    }

    let mut best = (*v1, q.evaluate(v1));
    let e2 = q.evaluate(v2);
    if e2 < best.1 {
        best = (*v2, e2);
    }
    if policy == Placement::EndOrMid {
        let mid = nalgebra::center(v1, v2);
        let em = q.evaluate(&mid);
        if em < best.1 {
            best = (mid, em);
        }
    }
    best
}

/// Whether moving `v1` and `v2` to `target` flips any surrounding face.
///
/// Faces that would lose two corners to `target` are ignored (they collapse
/// rather than flip), as are faces whose current or predicted normal is
/// undefined.
pub fn would_invert(
    model: &mut AdjacencyModel,
    v1: VertexId,
    v2: VertexId,
    target: &Point3<f64>,
) -> bool {
    let region = model.contraction_region(&[v1, v2]);

    region.into_iter().any(|f| {
        let corners = model.face_vertices(f);
        let moved = corners.iter().filter(|&&v| v == v1 || v == v2).count();
        if moved >= 2 {
            return false;
        }

        let [a, b, c] = corners.map(|v| {
            if v == v1 || v == v2 {
                *target
            } else {
                model.position(v)
            }
        });
        let (Some(current), Some(predicted)) =
            (model.face_plane(f), Triangle::new(a, b, c).normal())
        else {
            return false;
        };
        predicted.dot(&current.normal) < 0.0
    })
}

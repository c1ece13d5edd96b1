//! Parameters for mesh decimation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DecimateError, DecimateResult};
use crate::placement::Placement;

/// Boundary constraint weight that leaves boundaries unconstrained.
pub const NEUTRAL_BOUNDARY_WEIGHT: f64 = 1.0;

/// Boundary constraint weight that effectively pins boundaries in place.
pub const RIGID_BOUNDARY_WEIGHT: f64 = 1000.0;

/// Parameters for mesh decimation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimateParams {
    /// Target number of live vertices. If None, uses `target_ratio` instead.
    pub target_vertices: Option<usize>,

    /// Target ratio of vertices to keep (0.0 to 1.0). Default: 0.5
    pub target_ratio: f64,

    /// Optional face budget; decimation also stops once the live face count
    /// is at or below it. Default: None
    pub target_faces: Option<usize>,

    /// Stop when the cheapest remaining contraction costs at least this much.
    /// Default: unbounded
    pub error_tolerance: f64,

    /// Placement policy for merged vertices. Default: [`Placement::Optimal`]
    pub placement: Placement,

    /// Accumulate face plane quadrics. Default: true
    pub use_plane_constraint: bool,

    /// Accumulate a point quadric at every vertex, pulling merged vertices
    /// toward the original samples. Default: false
    pub use_vertex_constraint: bool,

    /// Never move a boundary vertex toward an interior one, and keep pairs of
    /// boundary vertices on their connecting line. Default: false
    pub preserve_boundary: bool,

    /// Weight of the perpendicular constraint planes added along
    /// discontinuity edges. Values at or below
    /// [`NEUTRAL_BOUNDARY_WEIGHT`] add no constraints. Default: 1.0
    pub boundary_constraint_weight: f64,

    /// Dihedral angle in radians above which an interior edge counts as a
    /// discontinuity (a crease). None treats only border edges as
    /// discontinuities. Default: None
    pub crease_angle: Option<f64>,

    /// Scale face quadrics by area and normalise pair costs by the
    /// accumulated area. Default: false
    pub weight_by_area: bool,

    /// Penalise contractions that would flip a face. Default: false
    pub check_inversion: bool,

    /// Also pair unconnected vertices closer than this distance. Zero pairs
    /// only along edges; a negative value uses 5% of the bounding radius.
    /// Default: 0.0
    pub pair_tolerance: f64,

    /// Record every contraction in the result. Default: false
    pub record_history: bool,
}

impl Default for DecimateParams {
    fn default() -> Self {
        Self {
            target_vertices: None,
            target_ratio: 0.5,
            target_faces: None,
            error_tolerance: f64::INFINITY,
            placement: Placement::Optimal,
            use_plane_constraint: true,
            use_vertex_constraint: false,
            preserve_boundary: false,
            boundary_constraint_weight: NEUTRAL_BOUNDARY_WEIGHT,
            crease_angle: None,
            weight_by_area: false,
            check_inversion: false,
            pair_tolerance: 0.0,
            record_history: false,
        }
    }
}

impl DecimateParams {
    /// Create params targeting a specific vertex count.
    #[must_use]
    pub fn with_target_vertices(count: usize) -> Self {
        Self {
            target_vertices: Some(count),
            ..Default::default()
        }
    }

    /// Create params targeting a ratio of original vertices.
    #[must_use]
    pub fn with_target_ratio(ratio: f64) -> Self {
        Self {
            target_ratio: ratio.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Create aggressive decimation params (more simplification).
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            target_ratio: 0.25,
            preserve_boundary: false,
            boundary_constraint_weight: NEUTRAL_BOUNDARY_WEIGHT,
            ..Default::default()
        }
    }

    /// Create conservative decimation params (preserve more detail).
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            target_ratio: 0.75,
            preserve_boundary: true,
            boundary_constraint_weight: RIGID_BOUNDARY_WEIGHT,
            crease_angle: Some(0.3491), // 20 degrees
            weight_by_area: true,
            check_inversion: true,
            ..Default::default()
        }
    }

    /// Set the face budget.
    #[must_use]
    pub const fn with_target_faces(mut self, count: usize) -> Self {
        self.target_faces = Some(count);
        self
    }

    /// Set the error tolerance.
    #[must_use]
    pub const fn with_error_tolerance(mut self, tolerance: f64) -> Self {
        self.error_tolerance = tolerance;
        self
    }

    /// Set the placement policy.
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the vertex constraint option.
    #[must_use]
    pub const fn with_vertex_constraint(mut self, enabled: bool) -> Self {
        self.use_vertex_constraint = enabled;
        self
    }

    /// Set the plane constraint option.
    #[must_use]
    pub const fn with_plane_constraint(mut self, enabled: bool) -> Self {
        self.use_plane_constraint = enabled;
        self
    }

    /// Set preserve boundary option.
    #[must_use]
    pub const fn with_preserve_boundary(mut self, preserve: bool) -> Self {
        self.preserve_boundary = preserve;
        self
    }

    /// Set the boundary constraint weight.
    #[must_use]
    pub const fn with_boundary_weight(mut self, weight: f64) -> Self {
        self.boundary_constraint_weight = weight;
        self
    }

    /// Treat edges sharper than `angle` radians as discontinuities.
    #[must_use]
    pub const fn with_crease_angle(mut self, angle: f64) -> Self {
        self.crease_angle = Some(angle);
        self
    }

    /// Set the area weighting option.
    #[must_use]
    pub const fn with_area_weighting(mut self, enabled: bool) -> Self {
        self.weight_by_area = enabled;
        self
    }

    /// Set the face inversion check option.
    #[must_use]
    pub const fn with_inversion_check(mut self, enabled: bool) -> Self {
        self.check_inversion = enabled;
        self
    }

    /// Set the proximity pairing tolerance.
    #[must_use]
    pub const fn with_pair_tolerance(mut self, tolerance: f64) -> Self {
        self.pair_tolerance = tolerance;
        self
    }

    /// Set the history recording option.
    #[must_use]
    pub const fn with_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Whether discontinuity constraint quadrics are accumulated.
    #[must_use]
    pub fn constrains_discontinuities(&self) -> bool {
        self.boundary_constraint_weight > NEUTRAL_BOUNDARY_WEIGHT
    }

    /// Check that every numeric field is usable.
    ///
    /// # Errors
    ///
    /// - [`DecimateError::InvalidRatio`] if `target_ratio` is outside `[0, 1]`
    /// - [`DecimateError::InvalidParameter`] for NaN tolerances, a negative or
    ///   NaN boundary weight, or a negative or NaN crease angle
    pub fn validate(&self) -> DecimateResult<()> {
        if !(0.0..=1.0).contains(&self.target_ratio) {
            return Err(DecimateError::InvalidRatio(self.target_ratio));
        }
        if self.error_tolerance.is_nan() {
            return Err(DecimateError::InvalidParameter {
                name: "error_tolerance",
                value: self.error_tolerance,
            });
        }
        if self.boundary_constraint_weight.is_nan() || self.boundary_constraint_weight < 0.0 {
            return Err(DecimateError::InvalidParameter {
                name: "boundary_constraint_weight",
                value: self.boundary_constraint_weight,
            });
        }
        if !self.pair_tolerance.is_finite() {
            return Err(DecimateError::InvalidParameter {
                name: "pair_tolerance",
                value: self.pair_tolerance,
            });
        }
        if let Some(angle) = self.crease_angle {
            if angle.is_nan() || angle < 0.0 {
                return Err(DecimateError::InvalidParameter {
                    name: "crease_angle",
                    value: angle,
                });
            }
        }
        Ok(())
    }
}

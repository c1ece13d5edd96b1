//! API Regression Tests for the Mesh Simplification Crates
//!
//! These tests serve as a regression suite to ensure the public API remains
//! stable and consistent across the crates. They are organized in 4 tiers of
//! increasing complexity:
//!
//! - Tier 1: Foundation (mesh-types, basic primitives)
//! - Tier 2: Spatial queries (cf-spatial)
//! - Tier 3: One-shot decimation (mesh-decimate)
//! - Tier 4: Incremental decimation and the adjacency model
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;
use mesh::{decimate, prelude::*, spatial, types};

// =============================================================================
// TIER 1: Foundation - Basic Types and Primitives
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn indexed_mesh_construction() {
        // Empty mesh
        let mesh = types::IndexedMesh::new();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());

        // From parts
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2]];
        let mesh = types::IndexedMesh::from_parts(vertices, faces);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.has_valid_indices());
    }

    #[test]
    fn indexed_mesh_from_raw_buffers() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = types::IndexedMesh::from_raw(&positions, &[0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn primitive_unit_cube() {
        let cube = types::unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12); // 6 faces × 2 triangles
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-12);
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn mesh_bounds_calculation() {
        let cube = types::unit_cube();
        let bounds = cube.bounds();

        // Unit cube spans 0,0,0 to 1,1,1
        assert_relative_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn triangle_plane() {
        let tri = types::Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        let plane = tri.plane().unwrap();
        assert_eq!(plane.coefficients(), [0.0, 0.0, 1.0, -1.0]);
        assert_relative_eq!(tri.area(), 0.5);
    }
}

// =============================================================================
// TIER 2: Spatial Queries
// =============================================================================

mod tier2_spatial {
    use super::*;

    #[test]
    fn proximity_grid_queries() {
        let mut grid = spatial::ProximityGrid::new(Point3::origin(), 0.5).unwrap();
        grid.insert(0_u32, Point3::new(0.1, 0.1, 0.1));
        grid.insert(1, Point3::new(0.4, 0.1, 0.1));
        grid.insert(2, Point3::new(3.0, 3.0, 3.0));

        assert_eq!(grid.len(), 3);
        assert_eq!(grid.neighbors(0, &Point3::new(0.1, 0.1, 0.1)), vec![1]);
        assert!(grid.neighbors(2, &Point3::new(3.0, 3.0, 3.0)).is_empty());
    }

    #[test]
    fn proximity_grid_rejects_bad_cell_size() {
        assert!(spatial::ProximityGrid::<u32>::new(Point3::origin(), 0.0).is_err());
        assert!(spatial::ProximityGrid::<u32>::new(Point3::origin(), f64::NAN).is_err());
    }

    #[test]
    fn voxel_coords() {
        let coord =
            spatial::VoxelCoord::from_point(&Point3::new(1.5, -0.5, 0.0), &Point3::origin(), 1.0);
        assert_eq!(coord, spatial::VoxelCoord::new(1, -1, 0));
        assert_eq!(coord.neighborhood().len(), 27);
    }
}

// =============================================================================
// TIER 3: One-shot Decimation
// =============================================================================

mod tier3_decimation {
    use super::*;

    #[test]
    fn decimate_params_presets() {
        // Target ratio
        let params = DecimateParams::with_target_ratio(0.5);
        assert_relative_eq!(params.target_ratio, 0.5);

        // Aggressive preset
        let aggressive = DecimateParams::aggressive();
        assert!(aggressive.target_ratio < 0.5);

        // Conservative preset
        let conservative = DecimateParams::conservative();
        assert!(conservative.preserve_boundary);
        assert!(conservative.check_inversion);

        // Builder pattern
        let params = DecimateParams::default()
            .with_preserve_boundary(true)
            .with_boundary_weight(decimate::RIGID_BOUNDARY_WEIGHT)
            .with_crease_angle(0.5)
            .with_placement(Placement::Line)
            .with_pair_tolerance(-1.0);
        assert!(params.preserve_boundary);
        assert!(params.constrains_discontinuities());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn decimate_mesh_operation() {
        let cube = types::unit_cube();
        let result = decimate_mesh(&cube, &DecimateParams::default()).unwrap();

        // Result provides stats
        assert!(result.final_triangles <= cube.face_count());
        assert!(result.final_vertices <= 4);
        assert_eq!(result.stop_reason, StopReason::TargetReached);
        assert!(result.was_decimated());
        let display = format!("{}", result);
        assert!(display.contains("→")); // Shows before → after
    }

    #[test]
    fn decimate_mesh_rejects_bad_input() {
        let mut mesh = types::unit_cube();
        mesh.faces.push([0, 0, 1]);
        let err = decimate_mesh(&mesh, &DecimateParams::default()).unwrap_err();
        assert!(matches!(err, decimate::DecimateError::DegenerateFace { .. }));

        let params = DecimateParams {
            target_ratio: -1.0,
            ..Default::default()
        };
        assert!(decimate_mesh(&types::unit_cube(), &params).is_err());
    }

    #[test]
    fn decimate_with_history() {
        let params = DecimateParams::with_target_vertices(5).with_history(true);
        let result = decimate_mesh(&types::unit_cube(), &params).unwrap();
        assert_eq!(result.history.len(), result.collapses_performed);
        assert!(result.history.iter().all(|r| r.cost.is_finite()));
    }

    #[test]
    fn decimate_stops_at_tolerance() {
        let params = DecimateParams::with_target_vertices(1).with_error_tolerance(1e-9);
        let result = decimate_mesh(&types::unit_cube(), &params).unwrap();
        assert_eq!(result.stop_reason, StopReason::ErrorToleranceExceeded);
        assert_eq!(result.final_vertices, 8);
    }
}

// =============================================================================
// TIER 4: Incremental Decimation and the Adjacency Model
// =============================================================================

mod tier4_incremental {
    use super::*;
    use decimate::{AdjacencyModel, DecimatorState, Quadric, VertexClass, VertexId};

    #[test]
    fn decimator_lifecycle() {
        let mut d = Decimator::new(DecimateParams::with_target_vertices(4)).unwrap();
        assert_eq!(d.state(), DecimatorState::Uninitialized);

        for p in types::unit_cube().vertices {
            d.add_vertex(p).unwrap();
        }
        for [i, j, k] in types::unit_cube().faces {
            d.add_face(i, j, k).unwrap();
        }
        d.initialize_heap().unwrap();
        assert_eq!(d.state(), DecimatorState::HeapBuilt);
        assert_eq!(d.pair_count(), 18);

        let first = d.step().unwrap().unwrap();
        assert_ne!(first.kept, first.removed);
        assert_eq!(d.state(), DecimatorState::Running);

        let reason = d.run().unwrap();
        assert_eq!(reason, StopReason::TargetReached);
        assert_eq!(d.state(), DecimatorState::Stopped(reason));

        d.compact().unwrap();
        assert_eq!(d.remaining_points().len(), d.to_mesh().vertex_count());
        assert!(d.remaining_points().len() <= 4);
        assert!(d.into_result().is_ok());
    }

    #[test]
    fn decimator_error_queries() {
        let mut d = Decimator::from_mesh(&types::unit_cube(), DecimateParams::default()).unwrap();
        d.initialize_heap().unwrap();

        // Every corner lies on its own planes
        assert_relative_eq!(d.max_error(), 0.0, epsilon = 1e-12);
        let cheapest = d.min_error().unwrap();
        assert!(cheapest > 0.0);

        let q = d.vertex_quadric(VertexId(0)).unwrap();
        assert_relative_eq!(q.evaluate(&Point3::new(0.0, 0.0, 0.0)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn adjacency_model_queries() {
        let model = AdjacencyModel::from_mesh(&types::unit_cube()).unwrap();
        assert_eq!(model.vertex_count(), 8);
        assert_eq!(model.edge_count(), 18);
        assert_eq!(model.face_count(), 12);
        assert!(model.live_vertices().all(|v| model.vertex_class(v) == VertexClass::Interior));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn quadric_arithmetic() {
        let a = Quadric::from_plane(0.0, 0.0, 1.0, 0.0);
        let b = Quadric::from_plane(1.0, 0.0, 0.0, -1.0);
        let p = Point3::new(2.0, 0.0, 3.0);
        assert_relative_eq!((a + b).evaluate(&p), a.evaluate(&p) + b.evaluate(&p), epsilon = 1e-12);
        assert_relative_eq!((a * 2.0).evaluate(&p), 2.0 * a.evaluate(&p), epsilon = 1e-12);
    }

    #[test]
    fn placement_policies() {
        let q = Quadric::from_point(&Point3::new(0.5, 2.0, 0.0));
        let v1 = Point3::new(0.0, 0.0, 0.0);
        let v2 = Point3::new(1.0, 0.0, 0.0);

        let (optimal, _) = decimate::place(&q, &v1, &v2, Placement::Optimal);
        assert_relative_eq!(optimal, Point3::new(0.5, 2.0, 0.0), epsilon = 1e-9);

        let (line, _) = decimate::place(&q, &v1, &v2, Placement::Line);
        assert_relative_eq!(line, Point3::new(0.5, 0.0, 0.0), epsilon = 1e-9);

        let (mid, _) = decimate::place(&q, &v1, &v2, Placement::EndOrMid);
        assert_eq!(mid, Point3::new(0.5, 0.0, 0.0));

        let (end, _) = decimate::place(&q, &v1, &v2, Placement::Endpoints);
        assert_eq!(end, v1);
    }
}

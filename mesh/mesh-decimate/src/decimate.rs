//! Greedy pair contraction driven by quadric error metrics.
//!
//! [`Decimator`] owns the working surface, the per-vertex accumulators, the
//! pair arena and the priority queue. Pairs are created along every edge (and
//! optionally between nearby unconnected vertices), costed with the sum of
//! their endpoint quadrics, and contracted cheapest first.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use cf_spatial::ProximityGrid;
use mesh_types::{IndexedMesh, Point3};
use slotmap::SlotMap;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::error::{DecimateError, DecimateResult};
use crate::heap::PairHeap;
use crate::model::{AdjacencyModel, FaceId, VertexClass, VertexId};
use crate::pair::{Pair, PairKey};
use crate::params::DecimateParams;
use crate::placement::{MESH_INVERSION_PENALTY, Placement, place, would_invert};
use crate::quadric::Quadric;
use crate::result::{ContractionRecord, DecimationResult, DecimatorState, StopReason};

/// Fraction of the bounding radius used when the pairing tolerance is negative.
const AUTO_PAIR_TOLERANCE_FRACTION: f64 = 0.05;

/// Per-vertex state accumulated by the decimator.
#[derive(Debug, Clone, Default)]
struct VertexAccumulator {
    quadric: Quadric,
    /// Total area (and squared constraint edge length) folded into `quadric`.
    norm: f64,
    pairs: SmallVec<[PairKey; 8]>,
}

/// Counters collected while decimating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimationStats {
    /// Pairs created along edges.
    pub pairs_from_edges: usize,
    /// Pairs created between nearby unconnected vertices.
    pub pairs_from_proximity: usize,
    /// Contractions performed.
    pub collapses: usize,
    /// Queued pairs dropped because an endpoint died first.
    pub stale_pairs_discarded: usize,
}

/// Incremental mesh simplifier.
///
/// Typical use: add vertices and faces (or use [`Decimator::from_mesh`]), call
/// [`initialize_heap`](Self::initialize_heap), then [`run`](Self::run), then
/// [`compact`](Self::compact) before reading the result.
///
/// # Example
///
/// ```
/// use mesh_decimate::{DecimateParams, Decimator, StopReason};
/// use mesh_types::unit_cube;
///
/// let params = DecimateParams::with_target_vertices(6);
/// let mut decimator = Decimator::from_mesh(&unit_cube(), params)?;
/// decimator.initialize_heap()?;
/// assert_eq!(decimator.run()?, StopReason::TargetReached);
/// decimator.compact()?;
///
/// let mesh = decimator.to_mesh();
/// assert!(mesh.vertex_count() <= 6);
/// # Ok::<(), mesh_decimate::DecimateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Decimator {
    params: DecimateParams,
    model: AdjacencyModel,
    accumulators: Vec<VertexAccumulator>,
    pairs: SlotMap<PairKey, Pair>,
    heap: PairHeap<PairKey>,
    state: DecimatorState,
    target_vertices: usize,
    initial_vertices: usize,
    initial_faces: usize,
    stats: DecimationStats,
    history: Vec<ContractionRecord>,
}

impl Decimator {
    /// Create an empty decimator.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails [`DecimateParams::validate`].
    pub fn new(params: DecimateParams) -> DecimateResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            model: AdjacencyModel::new(),
            accumulators: Vec::new(),
            pairs: SlotMap::with_key(),
            heap: PairHeap::new(),
            state: DecimatorState::Uninitialized,
            target_vertices: 0,
            initial_vertices: 0,
            initial_faces: 0,
            stats: DecimationStats::default(),
            history: Vec::new(),
        })
    }

    /// Create a decimator loaded with the vertices and faces of `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid params or a face with an out-of-range or
    /// repeated index.
    pub fn from_mesh(mesh: &IndexedMesh, params: DecimateParams) -> DecimateResult<Self> {
        params.validate()?;
        let model = AdjacencyModel::from_mesh(mesh)?;
        let mut decimator = Self::new(params)?;
        decimator.model = model;
        Ok(decimator)
    }

    fn expect_state(
        &self,
        operation: &'static str,
        allowed: &[DecimatorState],
    ) -> DecimateResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(DecimateError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn is_stopped(&self) -> bool {
        matches!(self.state, DecimatorState::Stopped(_))
    }

    /// Add a vertex. Only allowed before [`initialize_heap`](Self::initialize_heap).
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidState`] once the heap is built.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> DecimateResult<VertexId> {
        self.expect_state("add a vertex", &[DecimatorState::Uninitialized])?;
        Ok(self.model.add_vertex(position))
    }

    /// Add a face by 0-based vertex indices. Only allowed before
    /// [`initialize_heap`](Self::initialize_heap).
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidState`] once the heap is built, and the
    /// errors of [`AdjacencyModel::add_face`].
    pub fn add_face(&mut self, i: u32, j: u32, k: u32) -> DecimateResult<FaceId> {
        self.expect_state("add a face", &[DecimatorState::Uninitialized])?;
        self.model.add_face(i, j, k)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> DecimatorState {
        self.state
    }

    /// The parameters in use.
    #[must_use]
    pub const fn params(&self) -> &DecimateParams {
        &self.params
    }

    /// The working surface.
    #[must_use]
    pub const fn model(&self) -> &AdjacencyModel {
        &self.model
    }

    /// Live vertex count the run stops at (set by `initialize_heap`).
    #[must_use]
    pub const fn target_vertices(&self) -> usize {
        self.target_vertices
    }

    /// Counters collected so far.
    #[must_use]
    pub const fn stats(&self) -> &DecimationStats {
        &self.stats
    }

    /// Performed contractions, if history recording is enabled.
    #[must_use]
    pub fn history(&self) -> &[ContractionRecord] {
        &self.history
    }

    /// Number of live candidate pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Number of pairs waiting in the queue.
    #[must_use]
    pub fn queued_pairs(&self) -> usize {
        self.heap.len()
    }

    /// Iterate over live candidate pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (PairKey, &Pair)> {
        self.pairs.iter()
    }

    /// Accumulated quadric of a vertex (after `initialize_heap`).
    #[must_use]
    pub fn vertex_quadric(&self, v: VertexId) -> Option<&Quadric> {
        self.accumulators.get(v.index()).map(|acc| &acc.quadric)
    }

    /// Whether a pair joining `a` and `b` exists.
    #[must_use]
    pub fn has_pair(&self, a: VertexId, b: VertexId) -> bool {
        self.find_pair(a, b).is_some()
    }

    fn find_pair(&self, a: VertexId, b: VertexId) -> Option<PairKey> {
        self.accumulators
            .get(a.index())?
            .pairs
            .iter()
            .copied()
            .find(|&k| self.pairs[k].joins(a, b))
    }

    // ------------------------------------------------------------------
    // Initialization
    // ------------------------------------------------------------------

    /// Accumulate quadrics and queue every candidate pair.
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidState`] unless called exactly once
    /// after loading, or a spatial error if the proximity grid cannot be
    /// built.
    pub fn initialize_heap(&mut self) -> DecimateResult<()> {
        self.expect_state("initialize the heap", &[DecimatorState::Uninitialized])?;

        self.initial_vertices = self.model.vertex_count();
        self.initial_faces = self.model.face_count();
        self.target_vertices = self.params.target_vertices.unwrap_or_else(|| {
            (self.initial_vertices as f64 * self.params.target_ratio).ceil() as usize
        });

        self.accumulators = vec![VertexAccumulator::default(); self.model.total_vertices()];
        self.accumulate_quadrics();

        let edges: Vec<(VertexId, VertexId)> = self
            .model
            .live_edges()
            .map(|e| self.model.edge_endpoints(e))
            .collect();
        for (a, b) in edges {
            if a != b && !self.has_pair(a, b) {
                self.create_pair(a, b);
                self.stats.pairs_from_edges += 1;
            }
        }

        let tolerance = self.pair_tolerance();
        if tolerance > 0.0 && !self.model.bounds().is_empty() {
            self.create_proximity_pairs(tolerance)?;
        }

        self.state = DecimatorState::HeapBuilt;
        debug!(
            vertices = self.initial_vertices,
            faces = self.initial_faces,
            target = self.target_vertices,
            pairs_from_edges = self.stats.pairs_from_edges,
            pairs_from_proximity = self.stats.pairs_from_proximity,
            proximity_limit = tolerance,
            "Initialized decimation heap"
        );
        Ok(())
    }

    /// Effective proximity tolerance (0 disables proximity pairing).
    fn pair_tolerance(&self) -> f64 {
        if self.params.pair_tolerance < 0.0 {
            AUTO_PAIR_TOLERANCE_FRACTION * self.model.bounds().radius()
        } else {
            self.params.pair_tolerance
        }
    }

    fn accumulate_quadrics(&mut self) {
        let weight_by_area = self.params.weight_by_area;

        if self.params.use_plane_constraint {
            let faces: Vec<FaceId> = self.model.live_faces().collect();
            for f in faces {
                let Some(plane) = self.model.face_plane(f) else {
                    continue;
                };
                let [a, b, c, d] = plane.coefficients();
                let mut q = Quadric::from_plane(a, b, c, d);
                let area = self.model.face_triangle(f).area();
                if weight_by_area {
                    q *= area;
                }
                for v in self.model.face_vertices(f) {
                    let acc = &mut self.accumulators[v.index()];
                    acc.quadric += q;
                    if weight_by_area {
                        acc.norm += area;
                    }
                }
            }
        }

        if self.params.use_vertex_constraint {
            for v in self.model.live_vertices() {
                self.accumulators[v.index()].quadric +=
                    Quadric::from_point(&self.model.position(v));
            }
        }

        if self.params.constrains_discontinuities() {
            let weight = self.params.boundary_constraint_weight;
            let crease = self.params.crease_angle;
            let edges: Vec<_> = self
                .model
                .live_edges()
                .filter(|&e| self.model.is_discontinuity(e, crease))
                .collect();

            for e in edges {
                let (org, dest) = self.model.edge_endpoints(e);
                let (p_org, p_dest) = (self.model.position(org), self.model.position(dest));
                let length_sq = (p_dest - p_org).norm_squared();

                for &f in self.model.edge_faces(e) {
                    let Some(plane) = self.model.face_plane(f) else {
                        continue;
                    };
                    let Some(mut q) = Quadric::from_discontinuity(&p_org, &p_dest, &plane.normal)
                    else {
                        continue;
                    };
                    q *= weight;
                    if weight_by_area {
                        q *= length_sq;
                    }
                    for v in [org, dest] {
                        let acc = &mut self.accumulators[v.index()];
                        acc.quadric += q;
                        if weight_by_area {
                            acc.norm += length_sq;
                        }
                    }
                }
            }
        }
    }

    fn create_proximity_pairs(&mut self, tolerance: f64) -> DecimateResult<()> {
        let mut grid = ProximityGrid::new(self.model.bounds().min(), tolerance)?;
        let live: Vec<VertexId> = self.model.live_vertices().collect();
        for &v in &live {
            grid.insert(v, self.model.position(v));
        }

        for &v in &live {
            for u in grid.neighbors(v, &self.model.position(v)) {
                if !self.has_pair(v, u) {
                    self.create_pair(v, u);
                    self.stats.pairs_from_proximity += 1;
                }
            }
        }

        debug!(
            cells = grid.cell_count(),
            pairs = self.stats.pairs_from_proximity,
            "Created proximity pairs"
        );
        Ok(())
    }

    fn create_pair(&mut self, a: VertexId, b: VertexId) -> PairKey {
        let key = self.pairs.insert(Pair::new(a, b, self.model.position(a)));
        self.accumulators[a.index()].pairs.push(key);
        self.accumulators[b.index()].pairs.push(key);
        self.refresh_pair(key);
        key
    }

    // ------------------------------------------------------------------
    // Costing
    // ------------------------------------------------------------------

    /// Target and cost of contracting `v2` into `v1`.
    fn evaluate_contraction(&mut self, v1: VertexId, v2: VertexId) -> (Point3<f64>, f64) {
        let acc1 = &self.accumulators[v1.index()];
        let acc2 = &self.accumulators[v2.index()];
        let q = acc1.quadric + acc2.quadric;
        let norm = acc1.norm + acc2.norm;

        let p1 = self.model.position(v1);
        let p2 = self.model.position(v2);

        let (target, mut cost) = if self.params.preserve_boundary {
            let c1 = self.model.vertex_class(v1);
            let c2 = self.model.vertex_class(v2);
            if c1 == c2 {
                let policy = if c1 > VertexClass::Interior {
                    self.params.placement.min(Placement::Line)
                } else {
                    self.params.placement
                };
                place(&q, &p1, &p2, policy)
            } else {
                let fixed = if c1 > c2 { p1 } else { p2 };
                (fixed, q.evaluate(&fixed))
            }
        } else {
            place(&q, &p1, &p2, self.params.placement)
        };

        if self.params.weight_by_area && norm > 0.0 {
            cost /= norm;
        }
        if self.params.check_inversion && would_invert(&mut self.model, v1, v2, &target) {
            cost += MESH_INVERSION_PENALTY;
        }
        (target, cost)
    }

    /// Recompute a pair's target and cost and (re)queue it.
    fn refresh_pair(&mut self, key: PairKey) {
        let (v1, v2) = {
            let pair = &self.pairs[key];
            (pair.v1, pair.v2)
        };
        let (target, cost) = self.evaluate_contraction(v1, v2);

        let pair = &mut self.pairs[key];
        pair.target = target;
        pair.cost = cost;

        if pair.heap_slot.is_some() {
            self.heap.update(&mut self.pairs, key, -cost);
        } else {
            self.heap.insert(&mut self.pairs, key, -cost);
        }
    }

    /// Unqueue a pair, unlink it from both endpoints and free it.
    fn delete_pair(&mut self, key: PairKey) {
        self.heap.remove_handle(&mut self.pairs, key);
        let Some(pair) = self.pairs.remove(key) else {
            return;
        };
        for v in [pair.v1, pair.v2] {
            let list = &mut self.accumulators[v.index()].pairs;
            if let Some(pos) = list.iter().position(|&k| k == key) {
                list.swap_remove(pos);
            }
        }
    }

    fn is_stale(&self, key: PairKey) -> bool {
        let pair = &self.pairs[key];
        !self.model.is_vertex_alive(pair.v1) || !self.model.is_vertex_alive(pair.v2)
    }

    // ------------------------------------------------------------------
    // Simplification
    // ------------------------------------------------------------------

    fn target_reached(&self) -> bool {
        self.model.vertex_count() <= self.target_vertices
            || self
                .params
                .target_faces
                .is_some_and(|faces| self.model.face_count() <= faces)
    }

    /// Pop queued pairs until a live one turns up, discarding stale ones.
    fn pop_live_pair(&mut self) -> Option<PairKey> {
        while let Some(key) = self.heap.extract_top(&mut self.pairs) {
            if self.is_stale(key) {
                self.delete_pair(key);
                self.stats.stale_pairs_discarded += 1;
                continue;
            }
            return Some(key);
        }
        None
    }

    /// Contract pairs cheapest first until a stop condition holds.
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidState`] unless the heap is built and the
    /// decimator has not stopped.
    ///
    /// # Panics
    ///
    /// Panics if the pair bookkeeping is corrupted (a vertex lists a pair that
    /// does not reference it).
    pub fn run(&mut self) -> DecimateResult<StopReason> {
        self.expect_state(
            "run",
            &[DecimatorState::HeapBuilt, DecimatorState::Running],
        )?;

        info!(
            vertices = self.model.vertex_count(),
            faces = self.model.face_count(),
            target = self.target_vertices,
            "Starting mesh decimation"
        );
        self.state = DecimatorState::Running;

        let reason = loop {
            if self.target_reached() {
                break StopReason::TargetReached;
            }
            let Some(key) = self.pop_live_pair() else {
                break StopReason::NoPairsAvailable;
            };
            let cost = self.pairs[key].cost;
            if cost >= self.params.error_tolerance {
                self.heap.insert(&mut self.pairs, key, -cost);
                break StopReason::ErrorToleranceExceeded;
            }
            self.contract_pair(key);
        };

        self.state = DecimatorState::Stopped(reason);
        info!(
            vertices = self.model.vertex_count(),
            faces = self.model.face_count(),
            collapses = self.stats.collapses,
            reason = %reason,
            "Decimation stopped"
        );
        Ok(reason)
    }

    /// Perform the single cheapest contraction, ignoring targets and the
    /// error tolerance.
    ///
    /// Returns `None` (and stops) when no live pair is left.
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidState`] unless the heap is built and the
    /// decimator has not stopped.
    ///
    /// # Panics
    ///
    /// Panics if the pair bookkeeping is corrupted.
    pub fn step(&mut self) -> DecimateResult<Option<ContractionRecord>> {
        self.expect_state(
            "step",
            &[DecimatorState::HeapBuilt, DecimatorState::Running],
        )?;

        let Some(key) = self.pop_live_pair() else {
            self.state = DecimatorState::Stopped(StopReason::NoPairsAvailable);
            return Ok(None);
        };
        self.state = DecimatorState::Running;
        Ok(Some(self.contract_pair(key)))
    }

    /// Contract a live pair and repair every pair touching its endpoints.
    fn contract_pair(&mut self, key: PairKey) -> ContractionRecord {
        let Pair {
            v1,
            v2,
            target,
            cost,
            ..
        } = self.pairs[key].clone();

        let merged = self.accumulators[v2.index()].quadric;
        let merged_norm = self.accumulators[v2.index()].norm;
        self.accumulators[v1.index()].quadric += merged;
        self.accumulators[v1.index()].norm += merged_norm;

        self.model.contract(v1, v2, target);
        self.delete_pair(key);

        let kept: SmallVec<[PairKey; 8]> = self.accumulators[v1.index()].pairs.clone();
        for k in kept {
            self.refresh_pair(k);
        }

        // Re-point v2's pairs onto v1, collecting redundant ones first
        let dying = std::mem::take(&mut self.accumulators[v2.index()].pairs);
        let mut condemned: SmallVec<[PairKey; 8]> = SmallVec::new();
        for k in dying {
            let Some(u) = self.pairs[k].other(v2) else {
                panic!("pair {k:?} is listed on vertex {v2} but does not reference it");
            };
            if self.has_pair(v1, u) {
                condemned.push(k);
            } else {
                let pair = &mut self.pairs[k];
                if pair.v1 == v2 {
                    pair.v1 = v1;
                } else {
                    pair.v2 = v1;
                }
                self.accumulators[v1.index()].pairs.push(k);
                self.refresh_pair(k);
            }
        }
        for k in condemned {
            self.delete_pair(k);
        }

        self.stats.collapses += 1;
        trace!(
            kept = %v1,
            removed = %v2,
            cost,
            vertices = self.model.vertex_count(),
            faces = self.model.face_count(),
            "Contracted pair"
        );

        let record = ContractionRecord {
            kept: v1,
            removed: v2,
            target,
            cost,
        };
        if self.params.record_history {
            self.history.push(record);
        }
        record
    }

    // ------------------------------------------------------------------
    // Error queries
    // ------------------------------------------------------------------

    /// Cost of the cheapest live pair, discarding stale pairs on top.
    pub fn min_error(&mut self) -> Option<f64> {
        while let Some((key, _)) = self.heap.top() {
            if self.is_stale(key) {
                self.delete_pair(key);
                self.stats.stale_pairs_discarded += 1;
                continue;
            }
            return Some(self.pairs[key].cost);
        }
        None
    }

    /// Largest quadric error of any live vertex at its own position.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.model
            .live_vertices()
            .filter_map(|v| {
                let acc = self.accumulators.get(v.index())?;
                Some(acc.quadric.evaluate(&self.model.position(v)))
            })
            .fold(0.0, f64::max)
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Drop degenerate faces and unused vertices before reading results.
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidState`] before any run or step.
    pub fn compact(&mut self) -> DecimateResult<()> {
        if !self.is_stopped() {
            self.expect_state("compact", &[DecimatorState::Running])?;
        }
        let (faces, vertices) = self.model.compact();
        debug!(
            faces_removed = faces,
            vertices_removed = vertices,
            "Compacted decimated model"
        );
        Ok(())
    }

    /// Positions of the surviving vertices in creation order.
    #[must_use]
    pub fn remaining_points(&self) -> Vec<Point3<f64>> {
        self.model.remaining_points()
    }

    /// Surviving faces, indexing into [`remaining_points`](Self::remaining_points).
    #[must_use]
    pub fn remaining_face_indices(&self) -> Vec<[u32; 3]> {
        self.model.remaining_face_indices()
    }

    /// The surviving surface as an indexed mesh.
    #[must_use]
    pub fn to_mesh(&self) -> IndexedMesh {
        self.model.to_indexed_mesh()
    }

    /// Consume the decimator and summarise the run.
    ///
    /// # Errors
    ///
    /// Returns [`DecimateError::InvalidState`] unless the decimator has stopped.
    pub fn into_result(self) -> DecimateResult<DecimationResult> {
        let DecimatorState::Stopped(stop_reason) = self.state else {
            return Err(DecimateError::InvalidState {
                operation: "build a result",
                state: self.state,
            });
        };
        let mesh = self.model.to_indexed_mesh();
        Ok(DecimationResult {
            original_vertices: self.initial_vertices,
            original_triangles: self.initial_faces,
            final_vertices: mesh.vertex_count(),
            final_triangles: mesh.face_count(),
            mesh,
            collapses_performed: self.stats.collapses,
            stale_pairs_discarded: self.stats.stale_pairs_discarded,
            stop_reason,
            history: self.history,
        })
    }
}

/// Decimate a mesh using pair contraction with quadric error metrics.
///
/// # Arguments
///
/// * `mesh` - The input mesh to decimate
/// * `params` - Decimation parameters
///
/// # Returns
///
/// A [`DecimationResult`] containing the decimated mesh and statistics.
///
/// # Errors
///
/// Returns an error for invalid params or malformed faces.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_decimate::{decimate_mesh, DecimateParams};
///
/// let cube = unit_cube();
/// let result = decimate_mesh(&cube, &DecimateParams::with_target_ratio(0.75))?;
/// assert!(result.final_vertices <= 6);
/// println!("{}", result);
/// # Ok::<(), mesh_decimate::DecimateError>(())
/// ```
pub fn decimate_mesh(
    mesh: &IndexedMesh,
    params: &DecimateParams,
) -> DecimateResult<DecimationResult> {
    let mut decimator = Decimator::from_mesh(mesh, params.clone())?;
    decimator.initialize_heap()?;
    decimator.run()?;
    decimator.compact()?;
    decimator.into_result()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    /// Flat `n x n` grid of unit squares in the z = 0 plane.
    fn flat_grid(n: u32) -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        for y in 0..=n {
            for x in 0..=n {
                mesh.vertices
                    .push(Point3::new(f64::from(x), f64::from(y), 0.0));
            }
        }
        let idx = |x: u32, y: u32| y * (n + 1) + x;
        for y in 0..n {
            for x in 0..n {
                mesh.faces.push([idx(x, y), idx(x + 1, y), idx(x + 1, y + 1)]);
                mesh.faces.push([idx(x, y), idx(x + 1, y + 1), idx(x, y + 1)]);
            }
        }
        mesh
    }

    fn ready(mesh: &IndexedMesh, params: DecimateParams) -> Decimator {
        let mut d = Decimator::from_mesh(mesh, params).unwrap();
        d.initialize_heap().unwrap();
        d
    }

    /// Every pair is reachable from both endpoint lists and the heap.
    fn check_pair_bookkeeping(d: &Decimator) {
        for (key, pair) in d.pairs() {
            assert_ne!(pair.v1, pair.v2);
            for v in [pair.v1, pair.v2] {
                let listed = d.accumulators[v.index()]
                    .pairs
                    .iter()
                    .filter(|&&k| k == key)
                    .count();
                assert_eq!(listed, 1, "pair {key:?} listed {listed} times on {v}");
            }
        }
        for acc in &d.accumulators {
            for &k in &acc.pairs {
                assert!(d.pairs.contains_key(k));
            }
        }
        let queued: usize = d.pairs().filter(|(_, p)| p.heap_slot().is_some()).count();
        assert_eq!(queued, d.queued_pairs());
    }

    #[test]
    fn test_state_machine() {
        let mut d = Decimator::new(DecimateParams::default()).unwrap();
        assert_eq!(d.state(), DecimatorState::Uninitialized);
        assert!(matches!(d.run(), Err(DecimateError::InvalidState { .. })));
        assert!(matches!(d.compact(), Err(DecimateError::InvalidState { .. })));

        for p in unit_cube().vertices {
            d.add_vertex(p).unwrap();
        }
        for [i, j, k] in unit_cube().faces {
            d.add_face(i, j, k).unwrap();
        }
        d.initialize_heap().unwrap();
        assert_eq!(d.state(), DecimatorState::HeapBuilt);
        assert!(matches!(
            d.add_vertex(Point3::origin()),
            Err(DecimateError::InvalidState { .. })
        ));
        assert!(matches!(
            d.initialize_heap(),
            Err(DecimateError::InvalidState { .. })
        ));

        let reason = d.run().unwrap();
        assert_eq!(d.state(), DecimatorState::Stopped(reason));
        assert!(matches!(d.run(), Err(DecimateError::InvalidState { .. })));
        assert!(matches!(d.step(), Err(DecimateError::InvalidState { .. })));
        d.compact().unwrap();
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = DecimateParams {
            target_ratio: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            Decimator::new(params),
            Err(DecimateError::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_malformed_face_rejected() {
        let mut mesh = unit_cube();
        mesh.faces.push([0, 1, 42]);
        assert!(matches!(
            decimate_mesh(&mesh, &DecimateParams::default()),
            Err(DecimateError::InvalidFaceIndex { index: 42, .. })
        ));
    }

    #[test]
    fn test_one_pair_per_edge() {
        let d = ready(&unit_cube(), DecimateParams::default());
        assert_eq!(d.pair_count(), 18);
        assert_eq!(d.stats().pairs_from_edges, 18);
        assert_eq!(d.stats().pairs_from_proximity, 0);
        assert_eq!(d.queued_pairs(), 18);
        check_pair_bookkeeping(&d);
    }

    #[test]
    fn test_cube_to_six_vertices() {
        let mut d = ready(&unit_cube(), DecimateParams::with_target_vertices(6));
        assert_eq!(d.run().unwrap(), StopReason::TargetReached);
        d.compact().unwrap();

        let points = d.remaining_points();
        let faces = d.remaining_face_indices();
        assert!(points.len() <= 6);
        assert!(faces.len() < 12);
        assert!(points.iter().all(|p| p.iter().all(|c| c.is_finite())));
        d.model().validate().unwrap();
    }

    #[test]
    fn test_fresh_pair_cost_is_quadric_sum() {
        let d = ready(&unit_cube(), DecimateParams::default());
        for (_, pair) in d.pairs() {
            let q = *d.vertex_quadric(pair.v1).unwrap() + *d.vertex_quadric(pair.v2).unwrap();
            assert_relative_eq!(pair.cost, q.evaluate(&pair.target), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_counts_never_increase() {
        let mut d = ready(&flat_grid(4), DecimateParams::with_target_vertices(4));
        let mut last = (d.model().vertex_count(), d.model().face_count());
        while d.step().unwrap().is_some() {
            let now = (d.model().vertex_count(), d.model().face_count());
            assert!(now.0 <= last.0 && now.1 <= last.1);
            last = now;
            d.model().validate().unwrap();
            check_pair_bookkeeping(&d);
            if now.0 <= 4 {
                break;
            }
        }
    }

    #[test]
    fn test_flat_grid_collapses_freely() {
        // A plane has zero error everywhere, so the target is always met
        let mut d = ready(&flat_grid(3), DecimateParams::with_target_vertices(5));
        assert_eq!(d.run().unwrap(), StopReason::TargetReached);
        assert!(d.model().vertex_count() <= 5);
        assert_relative_eq!(d.max_error(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_error_tolerance_stops_run() {
        let params = DecimateParams::with_target_vertices(0).with_error_tolerance(1e-6);
        let mut d = ready(&unit_cube(), params);

        let cheapest = d.min_error().unwrap();
        assert!(cheapest >= 1e-6);
        assert_eq!(d.run().unwrap(), StopReason::ErrorToleranceExceeded);
        assert_eq!(d.stats().collapses, 0);
        // The rejected pair is back in the queue
        assert_eq!(d.queued_pairs(), d.pair_count());
    }

    #[test]
    fn test_step_runs_out_of_pairs() {
        let mut d = ready(&flat_grid(1), DecimateParams::with_target_vertices(4));
        let mut steps = 0;
        while d.step().unwrap().is_some() {
            steps += 1;
            assert!(steps <= 3);
        }
        assert_eq!(d.state(), DecimatorState::Stopped(StopReason::NoPairsAvailable));
        assert_eq!(d.queued_pairs(), 0);
        assert!(d.min_error().is_none());
        d.compact().unwrap();
        assert!(d.remaining_face_indices().is_empty());
    }

    #[test]
    fn test_face_target() {
        let params = DecimateParams::with_target_vertices(0).with_target_faces(10);
        let mut d = ready(&flat_grid(3), params);
        assert_eq!(d.run().unwrap(), StopReason::TargetReached);
        assert!(d.model().face_count() <= 10);
        assert!(d.model().vertex_count() > 0);
    }

    #[test]
    fn test_proximity_pairs() {
        // Two separate triangles, nearest corners 0.1 apart
        let mut mesh = IndexedMesh::new();
        for p in [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.1, 0.0, 0.0],
            [2.1, 0.0, 0.0],
            [1.1, 1.0, 0.0],
        ] {
            mesh.vertices.push(Point3::new(p[0], p[1], p[2]));
        }
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([3, 4, 5]);

        let near = ready(&mesh, DecimateParams::default().with_pair_tolerance(0.2));
        assert!(near.has_pair(VertexId(1), VertexId(3)));
        assert_eq!(near.stats().pairs_from_proximity, 1);

        let far = ready(&mesh, DecimateParams::default().with_pair_tolerance(0.05));
        assert!(!far.has_pair(VertexId(1), VertexId(3)));

        let off = ready(&mesh, DecimateParams::default());
        assert!(!off.has_pair(VertexId(1), VertexId(3)));
        assert_eq!(off.pair_count(), 6);
    }

    #[test]
    fn test_auto_pair_tolerance() {
        let mut mesh = IndexedMesh::new();
        for p in [
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [0.0, 10.0, 0.0],
            [10.01, 0.0, 0.0],
            [20.0, 0.0, 0.0],
            [10.0, 10.0, 0.0],
        ] {
            mesh.vertices.push(Point3::new(p[0], p[1], p[2]));
        }
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([3, 4, 5]);

        let d = ready(&mesh, DecimateParams::default().with_pair_tolerance(-1.0));
        assert!(d.has_pair(VertexId(1), VertexId(3)));
    }

    #[test]
    fn test_redundant_pairs_condemned_on_merge() {
        // Proximity pairing with a huge tolerance pairs every vertex with
        // every other, so each contraction makes many of v2's pairs redundant
        let params = DecimateParams::with_target_vertices(2).with_pair_tolerance(100.0);
        let mut d = ready(&flat_grid(2), params);
        let n = d.model().vertex_count();
        assert_eq!(d.pair_count(), n * (n - 1) / 2);

        let record = d.step().unwrap().unwrap();
        check_pair_bookkeeping(&d);
        assert!(!d.model().is_vertex_alive(record.removed));
        assert!(d.pairs().all(|(_, p)| p.other(record.removed).is_none()));

        // Still exactly one pair per pair of survivors
        let alive: Vec<VertexId> = d.model().live_vertices().collect();
        for (i, &a) in alive.iter().enumerate() {
            for &b in &alive[i + 1..] {
                let joining = d.pairs().filter(|(_, p)| p.joins(a, b)).count();
                assert_eq!(joining, 1, "{a}-{b}");
            }
        }
        let live_pairs = d
            .pairs()
            .filter(|(_, p)| d.model().is_vertex_alive(p.v1) && d.model().is_vertex_alive(p.v2))
            .count();
        assert_eq!(live_pairs, alive.len() * (alive.len() - 1) / 2);
    }

    #[test]
    fn test_history_recorded() {
        let params = DecimateParams::with_target_vertices(6).with_history(true);
        let result = decimate_mesh(&unit_cube(), &params).unwrap();
        assert_eq!(result.history.len(), result.collapses_performed);
        for record in &result.history {
            assert_ne!(record.kept, record.removed);
            assert!(record.cost.is_finite());
        }
    }

    #[test]
    fn test_boundary_vertex_stays_put() {
        // Flat quad; vertex 1 only touches border edges
        let mut mesh = IndexedMesh::new();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] {
            mesh.vertices.push(Point3::new(p[0], p[1], p[2]));
        }
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([0, 2, 3]);

        let params = DecimateParams::with_target_vertices(0).with_preserve_boundary(true);
        let mut d = ready(&mesh, params);
        let (v0, v1) = (VertexId(0), VertexId(1));
        assert_eq!(d.model().vertex_class(v1), VertexClass::BorderOnly);
        assert_eq!(d.model().vertex_class(v0), VertexClass::Border);

        let fixed = d.model().position(v1);
        assert_eq!(d.evaluate_contraction(v0, v1).0, fixed);
        assert_eq!(d.evaluate_contraction(v1, v0).0, fixed);

        // Every queued pair with mixed classes targets its more-boundary end
        let pairs: Vec<Pair> = d.pairs().map(|(_, p)| p.clone()).collect();
        for pair in pairs {
            let (c1, c2) = (d.model().vertex_class(pair.v1), d.model().vertex_class(pair.v2));
            if c1 != c2 {
                let outer = if c1 > c2 { pair.v1 } else { pair.v2 };
                assert_eq!(pair.target, d.model().position(outer));
            }
        }
    }

    #[test]
    fn test_interior_vertex_moves_to_border() {
        let grid = flat_grid(2);
        let mut d = ready(&grid, DecimateParams::default().with_preserve_boundary(true));
        let (centre, edge) = (VertexId(4), VertexId(1));
        assert_eq!(d.model().vertex_class(centre), VertexClass::Interior);
        assert_eq!(d.model().vertex_class(edge), VertexClass::Border);

        let fixed = d.model().position(edge);
        assert_eq!(d.evaluate_contraction(centre, edge).0, fixed);
        assert_eq!(d.evaluate_contraction(edge, centre).0, fixed);
    }

    #[test]
    fn test_boundary_pair_capped_at_line() {
        // Two border-only corners: target must lie on their segment
        let mut mesh = IndexedMesh::new();
        for p in [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 1.0, 0.5]] {
            mesh.vertices.push(Point3::new(p[0], p[1], p[2]));
        }
        mesh.faces.push([0, 1, 2]);

        let params = DecimateParams::default()
            .with_preserve_boundary(true)
            .with_vertex_constraint(true);
        let d = ready(&mesh, params);
        let key = d
            .find_pair(VertexId(0), VertexId(1))
            .expect("edge pair exists");
        let target = d.pairs[key].target;
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(target.z, 0.0, epsilon = 1e-12);
        assert!((0.0..=2.0).contains(&target.x));
    }

    #[test]
    fn test_inversion_penalty_applied() {
        let mut mesh = IndexedMesh::new();
        for p in [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [3.0, 3.0, 0.0],
        ] {
            mesh.vertices.push(Point3::new(p[0], p[1], p[2]));
        }
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([1, 3, 2]);
        mesh.faces.push([3, 4, 2]);

        // Only endpoints are allowed; moving 4 onto 0 flips the far face
        let base = DecimateParams::default().with_placement(Placement::Endpoints);
        let mut checked = ready(&mesh, base.clone().with_inversion_check(true));
        let unchecked = ready(&mesh, base);

        let mut penalised = 0;
        for (key, pair) in unchecked.pairs() {
            let other = checked.find_pair(pair.v1, pair.v2).unwrap();
            let diff = checked.pairs[other].cost - pair.cost;
            assert!(diff == 0.0 || diff == MESH_INVERSION_PENALTY, "{key:?}: {diff}");
            if diff > 0.0 {
                penalised += 1;
            }
        }
        assert!(penalised > 0);
        assert!(checked.min_error().unwrap() < MESH_INVERSION_PENALTY);
    }

    #[test]
    fn test_area_weighting_normalises_cost() {
        let params = DecimateParams::with_target_vertices(6).with_area_weighting(true);
        let d = ready(&unit_cube(), params);
        for (_, pair) in d.pairs() {
            let acc1 = &d.accumulators[pair.v1.index()];
            let acc2 = &d.accumulators[pair.v2.index()];
            let q = acc1.quadric + acc2.quadric;
            let norm = acc1.norm + acc2.norm;
            assert!(norm > 0.0);
            assert_relative_eq!(pair.cost, q.evaluate(&pair.target) / norm, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_boundary_constraints_raise_border_cost() {
        let grid = flat_grid(2);
        let plain = ready(&grid, DecimateParams::default());
        let rigid = ready(
            &grid,
            DecimateParams::default().with_boundary_weight(crate::params::RIGID_BOUNDARY_WEIGHT),
        );

        // A corner sees its border constraint planes; the centre sees none
        let corner = VertexId(0);
        let centre = VertexId(4);
        let p = plain.model().position(corner) + mesh_types::Vector3::new(-0.5, -0.5, 0.0);
        assert_relative_eq!(plain.vertex_quadric(corner).unwrap().evaluate(&p), 0.0);
        assert!(rigid.vertex_quadric(corner).unwrap().evaluate(&p) > 100.0);
        assert_eq!(
            plain.vertex_quadric(centre).unwrap(),
            rigid.vertex_quadric(centre).unwrap()
        );
    }

    #[test]
    fn test_decimate_empty_mesh() {
        let result = decimate_mesh(&IndexedMesh::new(), &DecimateParams::default()).unwrap();
        assert_eq!(result.original_triangles, 0);
        assert_eq!(result.final_triangles, 0);
        assert_eq!(result.collapses_performed, 0);
        assert_eq!(result.stop_reason, StopReason::TargetReached);
    }

    #[test]
    fn test_decimate_aggressive() {
        let result = decimate_mesh(&flat_grid(4), &DecimateParams::aggressive()).unwrap();
        // 25 vertices, a quarter kept
        assert!(result.final_vertices <= 7);
        assert!(result.final_triangles < result.original_triangles);
        assert!(result.mesh.has_valid_indices());
    }
}

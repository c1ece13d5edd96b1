//! Mutable half-edge adjacency graph with soft deletion.
//!
//! Vertices, edges and faces live in dense arrays addressed by stable 0-based
//! handles. Nothing is ever physically removed during simplification; records
//! are marked dead instead, and [`AdjacencyModel::remaining_points`] /
//! [`AdjacencyModel::remaining_face_indices`] compact the survivors at the end.
//!
//! Edges are allocated in twin pairs: the twin of edge `e` is `e ^ 1`, and both
//! halves share one face-use list stored at index `e >> 1`. A face-use list is
//! a multiset holding one entry per face slot that refers to either half.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use mesh_types::{Bounds, IndexedMesh, Plane, Point3, Triangle};
use smallvec::SmallVec;

use crate::error::{DecimateError, DecimateResult, TopologyError};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            /// The handle as an array index.
            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

handle!(
    /// Stable 0-based vertex handle.
    VertexId
);
handle!(
    /// Stable directed half-edge handle.
    EdgeId
);
handle!(
    /// Stable 0-based face handle.
    FaceId
);

impl EdgeId {
    /// The opposite half-edge.
    #[inline]
    #[must_use]
    pub const fn twin(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Index of the face-use list shared by this edge and its twin.
    #[inline]
    const fn pair_index(self) -> usize {
        (self.0 >> 1) as usize
    }
}

/// How much of a vertex's neighbourhood lies on the mesh boundary.
///
/// Ordered so that a larger class is "more boundary".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexClass {
    /// No incident border edge.
    Interior,
    /// Some, but not all, incident edges are border edges.
    Border,
    /// Every incident edge is a border edge.
    BorderOnly,
}

#[derive(Debug, Clone)]
struct VertexRecord {
    position: Point3<f64>,
    /// Outgoing half-edges.
    edges: SmallVec<[EdgeId; 8]>,
    alive: bool,
}

#[derive(Debug, Clone)]
struct EdgeRecord {
    origin: VertexId,
    alive: bool,
}

#[derive(Debug, Clone)]
struct FaceRecord {
    /// `edges[i]` runs from corner `i` to corner `i + 1`.
    edges: [EdgeId; 3],
    /// Cached supporting plane; `None` when stale or degenerate.
    plane: Option<Plane>,
    /// Scratch mark for [`AdjacencyModel::contraction_region`].
    tag: bool,
    alive: bool,
}

/// Half-edge mesh used as the working surface during simplification.
///
/// # Example
///
/// ```
/// use mesh_decimate::{AdjacencyModel, VertexClass};
/// use mesh_types::Point3;
///
/// let mut model = AdjacencyModel::new();
/// let a = model.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let b = model.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// let c = model.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// model.add_face(a.0, b.0, c.0).unwrap();
///
/// assert_eq!(model.vertex_count(), 3);
/// assert_eq!(model.edge_count(), 3);
/// assert_eq!(model.vertex_class(a), VertexClass::BorderOnly);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdjacencyModel {
    vertices: Vec<VertexRecord>,
    edges: Vec<EdgeRecord>,
    /// Face-use multisets, one per twin pair.
    face_uses: Vec<SmallVec<[FaceId; 2]>>,
    faces: Vec<FaceRecord>,
    live_vertices: usize,
    live_edges: usize,
    live_faces: usize,
    bounds: Bounds,
}

impl AdjacencyModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with room for the given number of vertices and
    /// faces.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            // Closed meshes have about 1.5 undirected edges per face
            edges: Vec::with_capacity(face_count * 3),
            face_uses: Vec::with_capacity(face_count * 3 / 2),
            faces: Vec::with_capacity(face_count),
            ..Self::default()
        }
    }

    /// Build a model from an indexed mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if a face has an out-of-range or repeated index.
    pub fn from_mesh(mesh: &IndexedMesh) -> DecimateResult<Self> {
        let mut model = Self::with_capacity(mesh.vertex_count(), mesh.face_count());
        for p in &mesh.vertices {
            model.add_vertex(*p);
        }
        for &[i, j, k] in &mesh.faces {
            model.add_face(i, j, k)?;
        }
        Ok(model)
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Append a vertex and return its 0-based handle.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(VertexRecord {
            position,
            edges: SmallVec::new(),
            alive: true,
        });
        self.live_vertices += 1;
        self.bounds.add_point(&position);
        id
    }

    /// Append the triangle `i → j → k` (0-based vertex indices).
    ///
    /// Edges shared with earlier faces are reused.
    ///
    /// # Errors
    ///
    /// - [`DecimateError::InvalidFaceIndex`] if an index does not name an added vertex
    /// - [`DecimateError::DegenerateFace`] if an index repeats
    pub fn add_face(&mut self, i: u32, j: u32, k: u32) -> DecimateResult<FaceId> {
        for index in [i, j, k] {
            if index as usize >= self.vertices.len() {
                return Err(DecimateError::InvalidFaceIndex {
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        if i == j || j == k || k == i {
            return Err(DecimateError::DegenerateFace { face: [i, j, k] });
        }

        let (vi, vj, vk) = (VertexId(i), VertexId(j), VertexId(k));
        let edges = [
            self.find_or_create_edge(vi, vj),
            self.find_or_create_edge(vj, vk),
            self.find_or_create_edge(vk, vi),
        ];

        let id = FaceId(self.faces.len() as u32);
        let plane = Triangle::new(
            self.vertices[vi.index()].position,
            self.vertices[vj.index()].position,
            self.vertices[vk.index()].position,
        )
        .plane();
        self.faces.push(FaceRecord {
            edges,
            plane,
            tag: false,
            alive: true,
        });
        for e in edges {
            self.face_uses[e.pair_index()].push(id);
        }
        self.live_faces += 1;
        Ok(id)
    }

    /// Live half-edge from `org` to `dest`, if any.
    #[must_use]
    pub fn find_edge(&self, org: VertexId, dest: VertexId) -> Option<EdgeId> {
        self.vertices[org.index()]
            .edges
            .iter()
            .copied()
            .find(|&e| self.edges[e.index()].alive && self.destination(e) == dest)
    }

    fn find_or_create_edge(&mut self, org: VertexId, dest: VertexId) -> EdgeId {
        if let Some(e) = self.find_edge(org, dest) {
            return e;
        }

        let e = EdgeId(self.edges.len() as u32);
        self.edges.push(EdgeRecord {
            origin: org,
            alive: true,
        });
        self.edges.push(EdgeRecord {
            origin: dest,
            alive: true,
        });
        self.face_uses.push(SmallVec::new());
        self.vertices[org.index()].edges.push(e);
        self.vertices[dest.index()].edges.push(e.twin());
        self.live_edges += 1;
        e
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of live vertices.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.live_vertices
    }

    /// Number of live undirected edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// Number of live faces.
    #[must_use]
    pub const fn face_count(&self) -> usize {
        self.live_faces
    }

    /// Number of vertices ever added, live or dead.
    #[must_use]
    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces ever added, live or dead.
    #[must_use]
    pub fn total_faces(&self) -> usize {
        self.faces.len()
    }

    /// Bounding box, centroid and radius of all added vertices.
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Whether the vertex is live.
    #[must_use]
    pub fn is_vertex_alive(&self, v: VertexId) -> bool {
        self.vertices[v.index()].alive
    }

    /// Whether the half-edge (and its twin) is live.
    #[must_use]
    pub fn is_edge_alive(&self, e: EdgeId) -> bool {
        self.edges[e.index()].alive
    }

    /// Whether the face is live.
    #[must_use]
    pub fn is_face_alive(&self, f: FaceId) -> bool {
        self.faces[f.index()].alive
    }

    /// Current position of a vertex.
    #[must_use]
    pub fn position(&self, v: VertexId) -> Point3<f64> {
        self.vertices[v.index()].position
    }

    /// Outgoing half-edges of a vertex.
    #[must_use]
    pub fn outgoing_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.vertices[v.index()].edges
    }

    /// Origin vertex of a half-edge.
    #[must_use]
    pub fn origin(&self, e: EdgeId) -> VertexId {
        self.edges[e.index()].origin
    }

    /// Destination vertex of a half-edge.
    #[must_use]
    pub fn destination(&self, e: EdgeId) -> VertexId {
        self.edges[e.twin().index()].origin
    }

    /// `(origin, destination)` of a half-edge.
    #[must_use]
    pub fn edge_endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        (self.origin(e), self.destination(e))
    }

    /// Faces using this edge or its twin, one entry per face slot.
    #[must_use]
    pub fn edge_faces(&self, e: EdgeId) -> &[FaceId] {
        &self.face_uses[e.pair_index()]
    }

    /// Euclidean length of a half-edge.
    #[must_use]
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        let (a, b) = self.edge_endpoints(e);
        (self.position(b) - self.position(a)).norm()
    }

    /// The three half-edges of a face.
    #[must_use]
    pub fn face_edges(&self, f: FaceId) -> [EdgeId; 3] {
        self.faces[f.index()].edges
    }

    /// The three corners of a face, in winding order.
    #[must_use]
    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        self.face_edges(f).map(|e| self.origin(e))
    }

    /// Corner positions of a face.
    #[must_use]
    pub fn face_triangle(&self, f: FaceId) -> Triangle {
        let [a, b, c] = self.face_vertices(f);
        Triangle::new(self.position(a), self.position(b), self.position(c))
    }

    /// Supporting plane of a face, or `None` if it has zero area.
    ///
    /// Uses the cached plane when it is current.
    #[must_use]
    pub fn face_plane(&self, f: FaceId) -> Option<Plane> {
        self.faces[f.index()]
            .plane
            .or_else(|| self.face_triangle(f).plane())
    }

    /// Recompute and cache the plane of a face.
    pub fn refresh_face_plane(&mut self, f: FaceId) -> Option<Plane> {
        let plane = self.face_triangle(f).plane();
        self.faces[f.index()].plane = plane;
        plane
    }

    /// Live vertices in creation order.
    pub fn live_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.alive)
            .map(|(i, _)| VertexId(i as u32))
    }

    /// One half-edge per live undirected edge, in creation order.
    pub fn live_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .step_by(2)
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| EdgeId(i as u32))
    }

    /// Live faces in creation order.
    pub fn live_faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive)
            .map(|(i, _)| FaceId(i as u32))
    }

    /// Whether exactly one face uses the edge.
    #[must_use]
    pub fn is_border_edge(&self, e: EdgeId) -> bool {
        self.edge_faces(e).len() == 1
    }

    /// Classify a vertex by how many of its outgoing edges are border edges.
    #[must_use]
    pub fn vertex_class(&self, v: VertexId) -> VertexClass {
        let edges = self.outgoing_edges(v);
        let border = edges.iter().filter(|&&e| self.is_border_edge(e)).count();

        if border == 0 {
            VertexClass::Interior
        } else if border == edges.len() {
            VertexClass::BorderOnly
        } else {
            VertexClass::Border
        }
    }

    /// Whether the edge is a surface discontinuity: a border edge, or (when
    /// `crease_angle` is given) an edge between two faces whose normals differ
    /// by more than that many radians.
    #[must_use]
    pub fn is_discontinuity(&self, e: EdgeId, crease_angle: Option<f64>) -> bool {
        let uses = self.edge_faces(e);
        match (uses.len(), crease_angle) {
            (1, _) => true,
            (2, Some(threshold)) => {
                let (Some(p0), Some(p1)) = (self.face_plane(uses[0]), self.face_plane(uses[1]))
                else {
                    return false;
                };
                p0.normal.dot(&p1.normal).clamp(-1.0, 1.0).acos() > threshold
            }
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Primitive mutations
    // ------------------------------------------------------------------

    /// Soft-delete a vertex. Idempotent.
    pub fn kill_vertex(&mut self, v: VertexId) {
        let record = &mut self.vertices[v.index()];
        if !record.alive {
            return;
        }
        record.alive = false;
        record.edges.clear();
        self.live_vertices -= 1;
    }

    /// Soft-delete an edge together with its twin. Idempotent.
    ///
    /// Both halves are unlinked from their origins; an origin left without
    /// edges dies too.
    pub fn kill_edge(&mut self, e: EdgeId) {
        if !self.edges[e.index()].alive {
            return;
        }
        let twin = e.twin();
        self.edges[e.index()].alive = false;
        self.edges[twin.index()].alive = false;

        let org = self.origin(e);
        let dest = self.origin(twin);
        self.unlink_edge(org, e);
        self.unlink_edge(dest, twin);
        for v in [org, dest] {
            if self.vertices[v.index()].edges.is_empty() {
                self.kill_vertex(v);
            }
        }

        self.face_uses[e.pair_index()].clear();
        self.live_edges -= 1;
    }

    fn unlink_edge(&mut self, v: VertexId, e: EdgeId) {
        let edges = &mut self.vertices[v.index()].edges;
        if let Some(pos) = edges.iter().position(|&x| x == e) {
            edges.swap_remove(pos);
        }
    }

    /// Soft-delete a face. Idempotent.
    ///
    /// Removes one face-use entry per edge slot; an edge left without faces
    /// dies too.
    pub fn kill_face(&mut self, f: FaceId) {
        if !self.faces[f.index()].alive {
            return;
        }
        self.faces[f.index()].alive = false;
        self.live_faces -= 1;

        for e in self.faces[f.index()].edges {
            if !self.edges[e.index()].alive {
                continue;
            }
            let uses = &mut self.face_uses[e.pair_index()];
            if let Some(pos) = uses.iter().position(|&x| x == f) {
                uses.swap_remove(pos);
            }
            if uses.is_empty() {
                self.kill_edge(e);
            }
        }
    }

    /// Move every outgoing edge of `from` onto `to`, then kill `from`.
    pub fn remap_vertex(&mut self, from: VertexId, to: VertexId) {
        if from == to {
            return;
        }
        let moved = std::mem::take(&mut self.vertices[from.index()].edges);
        for &e in &moved {
            self.edges[e.index()].origin = to;
            for i in 0..self.face_uses[e.pair_index()].len() {
                let f = self.face_uses[e.pair_index()][i];
                self.faces[f.index()].plane = None;
            }
        }
        self.vertices[to.index()].edges.extend(moved);
        self.kill_vertex(from);
    }

    /// Replace every face use of `from` (or its twin) by `to` (or its twin),
    /// then kill `from`.
    ///
    /// The affected faces are collected before any of them is modified.
    pub fn remap_edge(&mut self, from: EdgeId, to: EdgeId) {
        if from.pair_index() == to.pair_index() {
            return;
        }

        let mut affected: SmallVec<[FaceId; 2]> = self.face_uses[from.pair_index()].clone();
        affected.sort_unstable();
        affected.dedup();

        for f in affected {
            let face = &mut self.faces[f.index()];
            let mut replaced = 0;
            for slot in &mut face.edges {
                if *slot == from {
                    *slot = to;
                    replaced += 1;
                } else if *slot == from.twin() {
                    *slot = to.twin();
                    replaced += 1;
                }
            }
            face.plane = None;
            for _ in 0..replaced {
                self.face_uses[to.pair_index()].push(f);
            }
        }

        self.kill_edge(from);
    }

    /// Kill faces that have collapsed, fusing their surviving edges.
    ///
    /// For a face `v0, v1, v2` with edges `e0 = v0→v1`, `e1 = v1→v2`,
    /// `e2 = v2→v0`, the edge between the two coincident corners dies and the
    /// two remaining edges, which now connect the same vertices, are fused.
    pub fn remove_degeneracy(&mut self, faces: &[FaceId]) {
        for &f in faces {
            if !self.is_face_alive(f) {
                continue;
            }
            let [e0, e1, e2] = self.face_edges(f);
            let [v0, v1, v2] = self.face_vertices(f);

            if v0 == v1 && v1 == v2 {
                self.kill_edge(e0);
                self.kill_edge(e1);
                self.kill_edge(e2);
                self.kill_face(f);
            } else if v0 == v1 {
                self.kill_edge(e0);
                self.remap_edge(e1, e2.twin());
                self.kill_face(f);
            } else if v0 == v2 {
                self.kill_edge(e2);
                self.remap_edge(e0, e1.twin());
                self.kill_face(f);
            } else if v1 == v2 {
                self.kill_edge(e1);
                self.remap_edge(e0, e2.twin());
                self.kill_face(f);
            }
        }
    }

    /// Live faces incident to any of the seed vertices, each exactly once.
    pub fn contraction_region(&mut self, seeds: &[VertexId]) -> Vec<FaceId> {
        for &v in seeds {
            for &e in &self.vertices[v.index()].edges {
                for &f in &self.face_uses[e.pair_index()] {
                    self.faces[f.index()].tag = false;
                }
            }
        }

        let mut region = Vec::new();
        for &v in seeds {
            for &e in &self.vertices[v.index()].edges {
                for &f in &self.face_uses[e.pair_index()] {
                    let face = &mut self.faces[f.index()];
                    if face.alive && !face.tag {
                        face.tag = true;
                        region.push(f);
                    }
                }
            }
        }
        region
    }

    /// Merge `v2` into `v1`, moving `v1` to `target`.
    ///
    /// Returns the faces that were incident to either vertex beforehand; the
    /// ones still alive have refreshed planes.
    pub fn contract(&mut self, v1: VertexId, v2: VertexId, target: Point3<f64>) -> Vec<FaceId> {
        let changed = self.contraction_region(&[v1, v2]);

        self.vertices[v1.index()].position = target;
        self.remap_vertex(v2, v1);
        self.remove_degeneracy(&changed);

        for &f in &changed {
            if self.is_face_alive(f) {
                self.refresh_face_plane(f);
            }
        }
        changed
    }

    /// Drop zero-area faces and vertices without edges.
    ///
    /// Returns `(faces_removed, vertices_removed)`.
    pub fn compact(&mut self) -> (usize, usize) {
        let (faces_before, vertices_before) = (self.live_faces, self.live_vertices);

        let degenerate: Vec<FaceId> = self
            .live_faces()
            .filter(|&f| self.face_triangle(f).plane().is_none())
            .collect();
        for f in degenerate {
            self.kill_face(f);
        }

        let isolated: Vec<VertexId> = self
            .live_vertices()
            .filter(|&v| self.vertices[v.index()].edges.is_empty())
            .collect();
        for v in isolated {
            self.kill_vertex(v);
        }

        (
            faces_before - self.live_faces,
            vertices_before - self.live_vertices,
        )
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Compacted index of every live vertex, `None` for dead ones.
    fn compacted_indices(&self) -> Vec<Option<u32>> {
        let mut next = 0;
        self.vertices
            .iter()
            .map(|v| {
                v.alive.then(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect()
    }

    /// Positions of the live vertices in creation order.
    #[must_use]
    pub fn remaining_points(&self) -> Vec<Point3<f64>> {
        self.vertices
            .iter()
            .filter(|v| v.alive)
            .map(|v| v.position)
            .collect()
    }

    /// Live faces in creation order, indexing into [`Self::remaining_points`].
    #[must_use]
    pub fn remaining_face_indices(&self) -> Vec<[u32; 3]> {
        let remap = self.compacted_indices();
        self.live_faces()
            .filter_map(|f| {
                let [a, b, c] = self.face_vertices(f);
                Some([remap[a.index()]?, remap[b.index()]?, remap[c.index()]?])
            })
            .collect()
    }

    /// The live surface as an indexed mesh.
    #[must_use]
    pub fn to_indexed_mesh(&self) -> IndexedMesh {
        IndexedMesh::from_parts(self.remaining_points(), self.remaining_face_indices())
    }

    /// Check the internal consistency of the graph.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for f in self.live_faces() {
            let edges = self.face_edges(f);
            let corners = self.face_vertices(f);
            if corners[0] == corners[1] || corners[1] == corners[2] || corners[0] == corners[2] {
                return Err(TopologyError::RepeatedCorners { face: f, corners });
            }
            for (i, &e) in edges.iter().enumerate() {
                if !self.is_edge_alive(e) {
                    return Err(TopologyError::DeadEdge { face: f, edge: e });
                }
                if self.destination(e) != self.origin(edges[(i + 1) % 3]) {
                    return Err(TopologyError::BrokenLoop { face: f });
                }
                if !self.is_vertex_alive(corners[i]) {
                    return Err(TopologyError::DeadCorner {
                        face: f,
                        vertex: corners[i],
                    });
                }
                let used = edges.iter().filter(|x| x.pair_index() == e.pair_index()).count();
                let listed = self.edge_faces(e).iter().filter(|&&x| x == f).count();
                if used != listed {
                    return Err(TopologyError::UseCountMismatch {
                        edge: e,
                        face: f,
                        listed,
                        used,
                    });
                }
            }
        }

        for e in self.live_edges() {
            for &f in self.edge_faces(e) {
                if !self.is_face_alive(f) {
                    return Err(TopologyError::DeadFace { edge: e, face: f });
                }
                if !self
                    .face_edges(f)
                    .iter()
                    .any(|x| x.pair_index() == e.pair_index())
                {
                    return Err(TopologyError::StaleFaceUse { edge: e, face: f });
                }
            }
            for half in [e, e.twin()] {
                let org = self.origin(half);
                if !self.outgoing_edges(org).contains(&half) {
                    return Err(TopologyError::MissingOutgoing {
                        edge: half,
                        vertex: org,
                    });
                }
            }
        }

        for v in self.live_vertices() {
            for &e in self.outgoing_edges(v) {
                if !self.is_edge_alive(e) || self.origin(e) != v {
                    return Err(TopologyError::ForeignOutgoing { vertex: v, edge: e });
                }
            }
        }

        let live_faces = self.live_faces().count();
        let live_edges = self.live_edges().count();
        let live_vertices = self.live_vertices().count();
        if (live_faces, live_edges, live_vertices)
            != (self.live_faces, self.live_edges, self.live_vertices)
        {
            return Err(TopologyError::CounterMismatch);
        }

        Ok(())
    }
}

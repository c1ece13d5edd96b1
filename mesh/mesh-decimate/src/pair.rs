//! Candidate contraction pairs.

use mesh_types::Point3;
use slotmap::{SlotMap, new_key_type};

use crate::heap::HeapSlots;
use crate::model::VertexId;

new_key_type! {
    /// Generational handle to a [`Pair`] in the decimator's pair arena.
    pub struct PairKey;
}

/// A candidate contraction of `v2` into `v1`.
///
/// Owned by a single arena slot and referenced by [`PairKey`] from the heap and
/// from the pair lists of both endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    /// Vertex that survives the contraction.
    pub v1: VertexId,
    /// Vertex merged into `v1`.
    pub v2: VertexId,
    /// Where `v1` moves to.
    pub target: Point3<f64>,
    /// Error of the contraction (after weighting and penalties).
    pub cost: f64,
    pub(crate) heap_slot: Option<usize>,
}

impl Pair {
    pub(crate) const fn new(v1: VertexId, v2: VertexId, target: Point3<f64>) -> Self {
        Self {
            v1,
            v2,
            target,
            cost: 0.0,
            heap_slot: None,
        }
    }

    /// Position in the priority queue, `None` if not queued.
    #[must_use]
    pub const fn heap_slot(&self) -> Option<usize> {
        self.heap_slot
    }

    /// The endpoint opposite `v`, or `None` if `v` is not an endpoint.
    #[must_use]
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.v1 == v {
            Some(self.v2)
        } else if self.v2 == v {
            Some(self.v1)
        } else {
            None
        }
    }

    /// Whether the pair joins `a` and `b`, in either order.
    #[must_use]
    pub fn joins(&self, a: VertexId, b: VertexId) -> bool {
        (self.v1 == a && self.v2 == b) || (self.v1 == b && self.v2 == a)
    }
}

impl HeapSlots<PairKey> for SlotMap<PairKey, Pair> {
    fn slot(&self, handle: PairKey) -> Option<usize> {
        self.get(handle).and_then(|p| p.heap_slot)
    }

    fn set_slot(&mut self, handle: PairKey, slot: Option<usize>) {
        if let Some(pair) = self.get_mut(handle) {
            pair.heap_slot = slot;
        }
    }
}

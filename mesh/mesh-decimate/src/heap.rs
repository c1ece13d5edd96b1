//! Indexed binary max-heap over candidate pairs.
//!
//! Each queued handle's position is stored on the handle's own record (via
//! [`HeapSlots`]), so updating or removing an arbitrary element is a direct
//! lookup followed by one sift.

use std::fmt::Debug;

use tracing::warn;

/// Storage for the heap position of each handle.
///
/// Implemented by whatever owns the handled records; the heap keeps the slots
/// current on every move.
pub trait HeapSlots<H> {
    /// Current heap position of `handle`, `None` if not queued.
    fn slot(&self, handle: H) -> Option<usize>;

    /// Record the heap position of `handle`.
    fn set_slot(&mut self, handle: H, slot: Option<usize>);
}

/// Array-backed binary max-heap of `(handle, priority)` entries.
///
/// Callers that want the cheapest element on top insert `-cost`.
///
/// # Example
///
/// ```
/// use mesh_decimate::{HeapSlots, PairHeap};
///
/// // Positions for handles 0..3
/// let mut slots: Vec<Option<usize>> = vec![None; 3];
/// let mut heap = PairHeap::new();
///
/// heap.insert(&mut slots, 0_usize, -5.0);
/// heap.insert(&mut slots, 1, -1.0);
/// heap.insert(&mut slots, 2, -3.0);
///
/// heap.update(&mut slots, 2, -0.5);
/// assert_eq!(heap.extract_top(&mut slots), Some(2));
/// assert_eq!(heap.extract_top(&mut slots), Some(1));
/// assert_eq!(slots[1], None);
/// ```
#[derive(Debug, Clone)]
pub struct PairHeap<H> {
    entries: Vec<(H, f64)>,
}

impl<H> Default for PairHeap<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> HeapSlots<H> for Vec<Option<usize>>
where
    H: Into<usize>,
{
    fn slot(&self, handle: H) -> Option<usize> {
        self.get(handle.into()).copied().flatten()
    }

    fn set_slot(&mut self, handle: H, slot: Option<usize>) {
        let index = handle.into();
        if index >= self.len() {
            self.resize(index + 1, None);
        }
        self[index] = slot;
    }
}

impl<H: Copy + PartialEq + Debug> PairHeap<H> {
    /// Create an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty heap with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocated capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// The highest-priority entry without removing it.
    #[must_use]
    pub fn top(&self) -> Option<(H, f64)> {
        self.entries.first().copied()
    }

    /// Priority of the entry at `slot`.
    #[must_use]
    pub fn priority_at(&self, slot: usize) -> Option<f64> {
        self.entries.get(slot).map(|&(_, p)| p)
    }

    /// Queue `handle` with the given priority.
    pub fn insert<S: HeapSlots<H>>(&mut self, slots: &mut S, handle: H, priority: f64) {
        if self.entries.len() == self.entries.capacity() {
            // Grow geometrically
            self.entries.reserve(self.entries.capacity().max(8));
        }
        let slot = self.entries.len();
        self.entries.push((handle, priority));
        slots.set_slot(handle, Some(slot));
        self.sift_up(slots, slot);
    }

    /// Change the priority of a queued handle.
    ///
    /// Returns `false` (and logs a warning) if the handle is not queued.
    pub fn update<S: HeapSlots<H>>(&mut self, slots: &mut S, handle: H, priority: f64) -> bool {
        let Some(slot) = self.queued_slot(slots, handle) else {
            warn!(?handle, "Attempted to update a handle that is not in the heap");
            return false;
        };

        let old = self.entries[slot].1;
        self.entries[slot].1 = priority;
        if priority > old {
            self.sift_up(slots, slot);
        } else {
            self.sift_down(slots, slot);
        }
        true
    }

    /// Remove and return the highest-priority handle.
    pub fn extract_top<S: HeapSlots<H>>(&mut self, slots: &mut S) -> Option<H> {
        self.remove(slots, 0)
    }

    /// Remove the entry at `slot` and return its handle.
    ///
    /// The element moved into the hole is sifted up or down depending on how
    /// its priority compares with the removed one.
    pub fn remove<S: HeapSlots<H>>(&mut self, slots: &mut S, slot: usize) -> Option<H> {
        if slot >= self.entries.len() {
            return None;
        }

        let (handle, priority) = self.entries.swap_remove(slot);
        slots.set_slot(handle, None);

        if let Some(&(moved, moved_priority)) = self.entries.get(slot) {
            slots.set_slot(moved, Some(slot));
            if moved_priority > priority {
                self.sift_up(slots, slot);
            } else {
                self.sift_down(slots, slot);
            }
        }
        Some(handle)
    }

    /// Remove `handle` if it is queued. Returns whether it was.
    pub fn remove_handle<S: HeapSlots<H>>(&mut self, slots: &mut S, handle: H) -> bool {
        match self.queued_slot(slots, handle) {
            Some(slot) => self.remove(slots, slot).is_some(),
            None => false,
        }
    }

    /// Remove every entry, clearing their slots.
    pub fn clear<S: HeapSlots<H>>(&mut self, slots: &mut S) {
        for (handle, _) in self.entries.drain(..) {
            slots.set_slot(handle, None);
        }
    }

    /// Iterate over queued `(handle, priority)` entries in heap order.
    pub fn iter(&self) -> impl Iterator<Item = &(H, f64)> {
        self.entries.iter()
    }

    /// The stored slot of `handle`, if it really points at `handle`.
    fn queued_slot<S: HeapSlots<H>>(&self, slots: &S, handle: H) -> Option<usize> {
        slots
            .slot(handle)
            .filter(|&slot| self.entries.get(slot).is_some_and(|&(h, _)| h == handle))
    }

    fn swap<S: HeapSlots<H>>(&mut self, slots: &mut S, i: usize, j: usize) {
        self.entries.swap(i, j);
        slots.set_slot(self.entries[i].0, Some(i));
        slots.set_slot(self.entries[j].0, Some(j));
    }

    fn sift_up<S: HeapSlots<H>>(&mut self, slots: &mut S, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.entries[i].1 <= self.entries[parent].1 {
                break;
            }
            self.swap(slots, i, parent);
            i = parent;
        }
    }

    fn sift_down<S: HeapSlots<H>>(&mut self, slots: &mut S, mut i: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut largest = i;

            if left < len && self.entries[left].1 > self.entries[largest].1 {
                largest = left;
            }
            if right < len && self.entries[right].1 > self.entries[largest].1 {
                largest = right;
            }
            if largest == i {
                break;
            }
            self.swap(slots, i, largest);
            i = largest;
        }
    }
}

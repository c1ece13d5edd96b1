//! Uniform-grid index for fixed-radius neighbour queries.

use hashbrown::HashMap;
use nalgebra::Point3;
use smallvec::SmallVec;

use crate::{SpatialError, VoxelCoord};

type Cell<K> = SmallVec<[(K, Point3<f64>); 4]>;

/// A sparse uniform grid answering "which keys lie within `tolerance` of this
/// point?".
///
/// The cell edge length equals the query tolerance, so every point closer than
/// the tolerance lies in the 3×3×3 block of cells around the query cell. Cells
/// are stored sparsely and only exist while they hold at least one entry.
///
/// Keys are opaque to the grid; callers typically use vertex indices.
///
/// # Example
///
/// ```
/// use cf_spatial::ProximityGrid;
/// use nalgebra::Point3;
///
/// let mut grid = ProximityGrid::new(Point3::origin(), 0.5).unwrap();
/// grid.insert(0_u32, Point3::new(0.0, 0.0, 0.0));
/// grid.insert(1_u32, Point3::new(0.3, 0.0, 0.0));
/// grid.insert(2_u32, Point3::new(2.0, 0.0, 0.0));
///
/// assert_eq!(grid.neighbors(0, &Point3::new(0.0, 0.0, 0.0)), vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct ProximityGrid<K> {
    /// World position of the corner of cell (0, 0, 0).
    origin: Point3<f64>,
    /// Cell edge length, also the neighbour tolerance.
    cell_size: f64,
    /// Cached reciprocal of `cell_size`.
    inv_cell_size: f64,
    cells: HashMap<VoxelCoord, Cell<K>>,
    len: usize,
}

impl<K: Copy + Eq> ProximityGrid<K> {
    /// Creates an empty grid anchored at `origin` (usually the minimum corner
    /// of the data's bounding box).
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidVoxelSize`] if `cell_size` is not
    /// positive and finite, and [`SpatialError::InvalidOrigin`] if `origin`
    /// has a non-finite coordinate.
    pub fn new(origin: Point3<f64>, cell_size: f64) -> Result<Self, SpatialError> {
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(SpatialError::InvalidVoxelSize(cell_size));
        }
        if !origin.iter().all(|c| c.is_finite()) {
            return Err(SpatialError::InvalidOrigin {
                x: origin.x,
                y: origin.y,
                z: origin.z,
            });
        }

        Ok(Self {
            origin,
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            len: 0,
        })
    }

    /// The neighbour tolerance (and cell edge length).
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.cell_size
    }

    /// Number of stored entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the grid holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The cell a point falls into.
    #[must_use]
    pub fn cell_of(&self, point: &Point3<f64>) -> VoxelCoord {
        VoxelCoord::from_point(point, &self.origin, self.inv_cell_size)
    }

    /// Stores `key` at `point`.
    ///
    /// The same key may be inserted more than once; each insertion is a
    /// separate entry.
    pub fn insert(&mut self, key: K, point: Point3<f64>) {
        let cell = self.cell_of(&point);
        self.cells.entry(cell).or_default().push((key, point));
        self.len += 1;
    }

    /// Removes one entry for `key` from the cell containing `point`.
    ///
    /// Returns `false` if no such entry exists. `point` must be the position
    /// the key was inserted with.
    pub fn remove(&mut self, key: K, point: &Point3<f64>) -> bool {
        let cell = self.cell_of(point);
        let Some(entries) = self.cells.get_mut(&cell) else {
            return false;
        };
        let Some(idx) = entries.iter().position(|(k, _)| *k == key) else {
            return false;
        };

        entries.swap_remove(idx);
        if entries.is_empty() {
            self.cells.remove(&cell);
        }
        self.len -= 1;
        true
    }

    /// Returns every other key whose point is strictly closer than the
    /// tolerance to `point`.
    ///
    /// Entries stored under `key` itself are skipped. Order is unspecified.
    #[must_use]
    pub fn neighbors(&self, key: K, point: &Point3<f64>) -> Vec<K> {
        let limit_sq = self.cell_size * self.cell_size;
        let mut result = Vec::new();

        for cell in self.cell_of(point).neighborhood() {
            let Some(entries) = self.cells.get(&cell) else {
                continue;
            };
            result.extend(
                entries
                    .iter()
                    .filter(|(k, p)| *k != key && (p - point).norm_squared() < limit_sq)
                    .map(|(k, _)| *k),
            );
        }

        result
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }
}

//! Cell coordinates for sparse spatial grids.

use nalgebra::Point3;

/// A discrete 3D coordinate in grid space.
///
/// Uses `i32` coordinates so that points below the grid origin still map to
/// valid (negative) cells.
///
/// # Example
///
/// ```
/// use cf_spatial::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, -2, 3);
/// assert_eq!(coord.as_array(), [1, -2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Maps a world-space point to the cell containing it.
    ///
    /// `origin` is the world position of the corner of cell `(0, 0, 0)` and
    /// `inv_cell_size` the reciprocal of the cell edge length.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let cell = VoxelCoord::from_point(&Point3::new(0.25, -0.05, 1.0), &Point3::origin(), 10.0);
    /// assert_eq!(cell, VoxelCoord::new(2, -1, 10));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_point(point: &Point3<f64>, origin: &Point3<f64>, inv_cell_size: f64) -> Self {
        let relative = point - origin;
        // Saturating float-to-int casts keep far-away points in the outermost cells
        Self::new(
            (relative.x * inv_cell_size).floor() as i32,
            (relative.y * inv_cell_size).floor() as i32,
            (relative.z * inv_cell_size).floor() as i32,
        )
    }

    /// Returns this cell and its 26 neighbors (the 3×3×3 block centred here).
    ///
    /// The centre cell comes at index 13.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_spatial::VoxelCoord;
    ///
    /// let c = VoxelCoord::new(0, 0, 0);
    /// let block = c.neighborhood();
    /// assert_eq!(block.len(), 27);
    /// assert_eq!(block[13], c);
    /// assert!(block.contains(&VoxelCoord::new(-1, 1, -1)));
    /// ```
    #[must_use]
    pub fn neighborhood(self) -> [Self; 27] {
        let mut result = [self; 27];
        let mut idx = 0;

        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                for dz in -1i32..=1 {
                    result[idx] = Self::new(
                        self.x.wrapping_add(dx),
                        self.y.wrapping_add(dy),
                        self.z.wrapping_add(dz),
                    );
                    idx += 1;
                }
            }
        }

        result
    }

    /// Computes the Chebyshev (chessboard) distance to another coordinate.
    ///
    /// Two cells are in each other's [`neighborhood`](Self::neighborhood)
    /// exactly when this distance is at most 1.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }
}

impl From<[i32; 3]> for VoxelCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl std::ops::Add for VoxelCoord {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

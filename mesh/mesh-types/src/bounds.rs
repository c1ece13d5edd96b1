//! Bounding volumes and running point statistics.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from two corners.
    ///
    /// The corners are reordered per axis so that `min <= max`.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an empty AABB (min > max on every axis).
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Check if the AABB contains no point at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Width, height and depth of the box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Geometric center of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Length of the box diagonal.
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }

    /// Check if the AABB contains a point. Points on the boundary are inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Grow the AABB in place so that it contains `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// Running statistics over a stream of points.
///
/// Tracks the bounding box, the centroid and a bounding radius around that
/// centroid. Points are folded in one at a time with [`Bounds::add_point`];
/// the centroid and radius are derived from the accumulated box and sum, so
/// they are always current.
///
/// The radius is the distance from the centroid to the farther of the two box
/// corners, which always encloses every added point.
///
/// # Example
///
/// ```
/// use mesh_types::{Bounds, Point3};
///
/// let mut bounds = Bounds::new();
/// bounds.add_point(&Point3::new(-1.0, 0.0, 0.0));
/// bounds.add_point(&Point3::new(1.0, 0.0, 0.0));
///
/// assert_eq!(bounds.point_count(), 2);
/// assert_eq!(bounds.centroid(), Point3::origin());
/// assert!((bounds.radius() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    aabb: Aabb,
    sum: Vector3<f64>,
    count: usize,
}

impl Bounds {
    /// Create statistics with no points.
    #[must_use]
    pub fn new() -> Self {
        Self {
            aabb: Aabb::empty(),
            sum: Vector3::zeros(),
            count: 0,
        }
    }

    /// Fold a point into the statistics.
    pub fn add_point(&mut self, point: &Point3<f64>) {
        self.aabb.expand_to_include(point);
        self.sum += point.coords;
        self.count += 1;
    }

    /// Number of points added so far.
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.count
    }

    /// Whether no point has been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The bounding box of all added points.
    #[must_use]
    pub const fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Minimum corner of the bounding box.
    #[must_use]
    pub const fn min(&self) -> Point3<f64> {
        self.aabb.min
    }

    /// Maximum corner of the bounding box.
    #[must_use]
    pub const fn max(&self) -> Point3<f64> {
        self.aabb.max
    }

    /// Mean of all added points; the origin when empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Point3<f64> {
        if self.count == 0 {
            return Point3::origin();
        }
        Point3::from(self.sum / self.count as f64)
    }

    /// Larger of the distances from [`Bounds::centroid`] to the box's `min`
    /// and `max` corners.
    ///
    /// This is a scale estimate, not a bounding sphere: another corner can
    /// lie farther from the centroid when the points are unevenly spread.
    ///
    /// Zero when fewer than two distinct points were added.
    #[must_use]
    pub fn radius(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let center = self.centroid();
        (self.aabb.max - center)
            .norm()
            .max((self.aabb.min - center).norm())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

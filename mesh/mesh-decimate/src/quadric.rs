//! Quadric error metric implementation.
//!
//! The quadric error metric (QEM) measures the squared distance from a point to
//! a set of planes. Quadrics add, so the error of a merged vertex is the sum of
//! the quadrics of the vertices it replaces.

// Algorithm uses standard mathematical variable names
#![allow(clippy::many_single_char_names)]

use std::ops::{Add, AddAssign, Mul, MulAssign};

use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

/// Determinant magnitude below which the optimal-placement system is singular.
const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Quadric error matrix (4x4 symmetric matrix stored as 10 values).
///
/// `Q(v) = vᵀ Q v` for the homogeneous point `v = [x, y, z, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quadric {
    // Symmetric 4x4 matrix stored as upper triangle:
    // [a b c d]
    // [  e f g]
    // [    h i]
    // [      j]
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    i: f64,
    j: f64,
}

impl Quadric {
    /// Create a quadric from a plane equation (ax + by + cz + d = 0).
    ///
    /// The plane should have a normalized normal vector (a, b, c), in which
    /// case the quadric evaluates to the squared distance to the plane.
    #[must_use]
    pub fn from_plane(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            a: a * a,
            b: a * b,
            c: a * c,
            d: a * d,
            e: b * b,
            f: b * c,
            g: b * d,
            h: c * c,
            i: c * d,
            j: d * d,
        }
    }

    /// Create a quadric measuring the squared distance to `point`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_decimate::Quadric;
    /// use mesh_types::Point3;
    ///
    /// let q = Quadric::from_point(&Point3::new(1.0, 2.0, 3.0));
    /// assert!((q.evaluate(&Point3::new(1.0, 2.0, 5.0)) - 4.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn from_point(point: &Point3<f64>) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: -point.x,
            e: 1.0,
            f: 0.0,
            g: -point.y,
            h: 1.0,
            i: -point.z,
            j: point.coords.norm_squared(),
        }
    }

    /// Create a constraint quadric for the edge `org → dest` of a face with
    /// unit normal `face_normal`.
    ///
    /// The constraint plane contains the edge and is perpendicular to the face,
    /// so it penalises moving the edge off the surface silhouette. Returns
    /// `None` when the edge is degenerate or parallel to the normal.
    #[must_use]
    pub fn from_discontinuity(
        org: &Point3<f64>,
        dest: &Point3<f64>,
        face_normal: &Vector3<f64>,
    ) -> Option<Self> {
        let edge = dest - org;
        let n = edge.cross(face_normal).try_normalize(f64::EPSILON)?;
        let d = -n.dot(&org.coords);
        Some(Self::from_plane(n.x, n.y, n.z, d))
    }

    /// Evaluate the quadric error for a point.
    ///
    /// For plane quadrics this is the sum of squared distances from the point
    /// to all planes that contributed to this quadric.
    #[must_use]
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        let (x, y, z) = (point.x, point.y, point.z);
        // v^T * Q * v where v = [x, y, z, 1]
        x.mul_add(
            x.mul_add(self.a, 2.0 * y.mul_add(self.b, z.mul_add(self.c, self.d))),
            y.mul_add(
                y.mul_add(self.e, 2.0 * z.mul_add(self.f, self.g)),
                z.mul_add(z.mul_add(self.h, 2.0 * self.i), self.j),
            ),
        )
    }

    /// The upper-left 3x3 block.
    #[must_use]
    pub fn tensor(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.a, self.b, self.c, //
            self.b, self.e, self.f, //
            self.c, self.f, self.h,
        )
    }

    /// The linear term `(d, g, i)`.
    #[must_use]
    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.d, self.g, self.i)
    }

    /// The constant term.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.j
    }

    /// The full symmetric matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Matrix4::new(
            self.a, self.b, self.c, self.d, //
            self.b, self.e, self.f, self.g, //
            self.c, self.f, self.h, self.i, //
            self.d, self.g, self.i, self.j,
        )
    }

    /// Find the point that minimizes the error, or `None` if the system is
    /// singular (`|det| < 1e-12`).
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_decimate::Quadric;
    ///
    /// // Three planes meeting at (1, 2, 3)
    /// let q = Quadric::from_plane(1.0, 0.0, 0.0, -1.0)
    ///     + Quadric::from_plane(0.0, 1.0, 0.0, -2.0)
    ///     + Quadric::from_plane(0.0, 0.0, 1.0, -3.0);
    ///
    /// let p = q.optimal_point().unwrap();
    /// assert!((p.x - 1.0).abs() < 1e-9 && (p.y - 2.0).abs() < 1e-9 && (p.z - 3.0).abs() < 1e-9);
    ///
    /// // A single plane has a whole plane of minima
    /// assert!(Quadric::from_plane(0.0, 0.0, 1.0, 0.0).optimal_point().is_none());
    /// ```
    #[must_use]
    pub fn optimal_point(&self) -> Option<Point3<f64>> {
        // Gradient rows with the homogeneous row appended:
        // [a b c d] [x]   [0]
        // [b e f g] [y] = [0]
        // [c f h i] [z]   [0]
        // [0 0 0 1] [1]   [1]
        let system = Matrix4::new(
            self.a, self.b, self.c, self.d, //
            self.b, self.e, self.f, self.g, //
            self.c, self.f, self.h, self.i, //
            0.0, 0.0, 0.0, 1.0,
        );

        if system.determinant().abs() < SINGULAR_DETERMINANT {
            return None;
        }

        let inverse = system.try_inverse()?;
        let v: Vector4<f64> = inverse.column(3).into_owned();
        Some(Point3::new(v.x, v.y, v.z))
    }

    /// Find the point minimizing the error on the segment from `v2` to `v1`.
    ///
    /// Returns `None` if the error is constant along the line (zero
    /// denominator); otherwise the line parameter is clamped to the segment.
    #[must_use]
    pub fn line_point(&self, v1: &Point3<f64>, v2: &Point3<f64>) -> Option<Point3<f64>> {
        let d = v1 - v2;
        let tensor = self.tensor();
        let ad = tensor * d;

        let denom = d.dot(&ad);
        if denom == 0.0 {
            return None;
        }

        let t = -(self.vector().dot(&d) + ad.dot(&v2.coords)) / denom;
        Some(v2 + d * t.clamp(0.0, 1.0))
    }
}

impl AddAssign for Quadric {
    fn add_assign(&mut self, other: Self) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
        self.e += other.e;
        self.f += other.f;
        self.g += other.g;
        self.h += other.h;
        self.i += other.i;
        self.j += other.j;
    }
}

impl Add for Quadric {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl MulAssign<f64> for Quadric {
    fn mul_assign(&mut self, s: f64) {
        self.a *= s;
        self.b *= s;
        self.c *= s;
        self.d *= s;
        self.e *= s;
        self.f *= s;
        self.g *= s;
        self.h *= s;
        self.i *= s;
        self.j *= s;
    }
}

impl Mul<f64> for Quadric {
    type Output = Self;

    fn mul(mut self, s: f64) -> Self {
        self *= s;
        self
    }
}

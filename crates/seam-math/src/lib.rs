#![warn(missing_docs)]

//! Math types for the seam contact kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types
//! for mesh intersection geometry, plus the consolidated tolerance
//! configuration threaded through every geometric comparison.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Scalar triple product `a · (b × c)`.
///
/// Equals the determinant of the 3×3 matrix with `a`, `b`, `c` as rows;
/// zero when the three vectors are coplanar.
pub fn triple(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    a.dot(&b.cross(c))
}

/// Tolerance configuration for the contact extraction.
///
/// All geometric comparisons in the kernel go through one of these
/// fields so that behavior stays reproducible and tests can vary a
/// tolerance independently of the geometry.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Coplanarity threshold on the scalar triple product of the cutting
    /// line direction, an edge direction, and their offset. Also bounds
    /// the gap distance in the congruent-edge test.
    pub coplanar: f64,
    /// Threshold on a cross-product norm below which two directions are
    /// treated as parallel.
    pub parallel: f64,
    /// Margin on edge parameters: hits within this distance of an edge
    /// endpoint are snapped onto the vertex.
    pub endpoint: f64,
    /// Absolute point-merge tolerance. Crossings are grouped by parameter
    /// rounded to this grid, and the output curve is deduplicated with it.
    pub merge: f64,
    /// Minimum |determinant| accepted when solving the 2×2 plane system.
    pub determinant: f64,
}

impl Tolerance {
    /// Default tolerances of the contact engine.
    pub const DEFAULT: Self = Self {
        coplanar: 1e-4,
        parallel: 1e-4,
        endpoint: 1e-6,
        merge: 1e-5,
        determinant: 1e-12,
    };

    /// Round a line parameter onto the merge grid.
    ///
    /// Crossings whose parameters land on the same grid cell are treated
    /// as one crossing group.
    pub fn parameter_key(&self, t: f64) -> i64 {
        (t / self.merge).round() as i64
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//! Plane-plane intersection for one candidate face pair.
//!
//! The supporting planes of the two faces intersect along the cutting
//! line. Every crossing and interval of the pair is expressed as a
//! signed parameter along this line.

use seam_math::{Point3, Tolerance, Vec3};

/// The line along which two supporting planes intersect.
///
/// Ephemeral: recomputed per candidate pair, never stored.
#[derive(Debug, Clone, Copy)]
pub struct CuttingLine {
    /// Unit direction, the cross product of the two plane normals.
    pub r: Vec3,
    /// Reference point on the line; parameters are measured from here.
    pub s: Point3,
}

impl CuttingLine {
    /// Evaluate the line at parameter `t`.
    pub fn point_at(&self, t: f64) -> Point3 {
        self.s + t * self.r
    }
}

/// Intersect the supporting planes `(n_a, p_a)` and `(n_b, p_b)`.
///
/// Returns `None` when the planes are effectively parallel; the candidate
/// pair is then skipped, which is not an error.
///
/// The reference point solves the two plane equations by Cramer's rule
/// on the two best-conditioned coordinate axes: the axis with the largest
/// `|r|` component is zeroed and the remaining 2×2 system is solved.
pub fn cutting_line(
    n_a: &Vec3,
    p_a: &Point3,
    n_b: &Vec3,
    p_b: &Point3,
    tol: &Tolerance,
) -> Option<CuttingLine> {
    let d_a = n_a.dot(&p_a.coords);
    let d_b = n_b.dot(&p_b.coords);

    let r = n_a.cross(n_b);
    if r.norm() < tol.parallel {
        return None;
    }
    let r = r.normalize();

    let mut i = 0;
    for j in 1..3 {
        if r[j].abs() > r[i].abs() {
            i = j;
        }
    }
    let (u, v) = match i {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };

    let det = n_a[u] * n_b[v] - n_b[u] * n_a[v];
    if det.abs() < tol.determinant {
        return None;
    }

    let mut s = Point3::origin();
    s[u] = (d_a * n_b[v] - d_b * n_a[v]) / det;
    s[v] = (n_a[u] * d_b - n_b[u] * d_a) / det;

    Some(CuttingLine { r, s })
}

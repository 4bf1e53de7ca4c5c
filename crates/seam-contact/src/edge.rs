//! Edge/line intersection classification.
//!
//! Tests one face's boundary edges against the cutting line and records
//! each hit as interior-to-edge, on-a-vertex, or part of a coincident
//! (congruent) overlap.

use std::fmt;

use seam_math::{triple, Point3, Tolerance};

use crate::plane::CuttingLine;

/// Which input mesh a crossing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Src {
    /// The first input mesh.
    A,
    /// The second input mesh.
    B,
}

impl fmt::Display for Src {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Src::A => write!(f, "first"),
            Src::B => write!(f, "second"),
        }
    }
}

/// A classified crossing between a face boundary edge and the cutting line.
///
/// `edge` and `end` hold slots into the face's vertex loop; the
/// accumulator maps them to global vertex ids when a segment is emitted.
#[derive(Debug, Clone, Copy)]
pub struct InterPt {
    /// Signed parameter along the cutting line.
    pub t: f64,
    /// 3D coordinates, evaluated on the line.
    pub point: Point3,
    /// Source mesh tag.
    pub src: Src,
    /// Local slots of the edge's two vertices within the face loop.
    pub edge: (usize, usize),
    /// Local slot of the face vertex this crossing lands on exactly,
    /// if any.
    pub end: Option<usize>,
    /// Touched vertex in the first mesh's face, filled when two interval
    /// extremities are merged across meshes.
    pub src_a: Option<usize>,
    /// Touched vertex in the second mesh's face, filled on merge.
    pub src_b: Option<usize>,
}

impl InterPt {
    fn new(t: f64, end: Option<usize>, point: Point3, src: Src) -> Self {
        Self {
            t,
            point,
            src,
            edge: (0, 0),
            end,
            src_a: None,
            src_b: None,
        }
    }

    /// Merge the extremity of the other mesh's interval into this point.
    ///
    /// The point always records its own side's touched vertex; it adopts
    /// the other side's marker only when the two parameters coincide.
    pub(crate) fn merge(&mut self, other: &InterPt, tol: &Tolerance) {
        debug_assert_ne!(self.src, other.src);

        match self.src {
            Src::A => self.src_a = self.end,
            Src::B => self.src_b = self.end,
        }
        if (self.t - other.t).abs() < tol.merge {
            match other.src {
                Src::A => self.src_a = other.end,
                Src::B => self.src_b = other.end,
            }
        }
    }
}

/// Intersect one edge `(e_a, e_b)` with the cutting line.
///
/// Produces zero hits (skew or off-edge), one hit (proper crossing, with
/// `end` marking slot 0 or 1 when it lands on an edge endpoint), or two
/// hits (the edge is congruent with the line; both endpoints become
/// crossings directly).
pub fn intersect_edge_line(
    e_a: &Point3,
    e_b: &Point3,
    line: &CuttingLine,
    src: Src,
    tol: &Tolerance,
) -> Vec<InterPt> {
    let mut hits = Vec::new();

    let mut e = e_b - e_a;
    let l = e.norm();
    if l < tol.endpoint {
        return hits;
    }
    e /= l;

    let p = e_a - line.s;

    // Coplanarity of the line, the edge, and their offset
    let w = triple(&line.r, &e, &p).abs();
    if w >= tol.coplanar {
        // skew
        return hits;
    }

    let v = line.r.cross(&e);
    let n = v.norm();

    if n > tol.parallel {
        let nn = n * n;
        let s_edge = triple(&p, &line.r, &v) / nn;

        if s_edge > -tol.endpoint && s_edge < l + tol.endpoint {
            let t = triple(&p, &e, &v) / nn;

            let end = if s_edge < tol.endpoint {
                Some(0)
            } else if s_edge > l - tol.endpoint {
                Some(1)
            } else {
                None
            };

            hits.push(InterPt::new(t, end, line.point_at(t), src));
        }
    } else {
        // Edge parallel to the line. When the gap distance vanishes the
        // two are congruent and both edge endpoints become crossings.
        let pt_b = line.s + line.r;

        let v_a = e_a - line.s;
        let d_a = v_a.cross(&(e_a - pt_b)).norm();
        let t_a = v_a.dot(&line.r);

        let v_b = e_b - line.s;
        let d_b = v_b.cross(&(e_b - pt_b)).norm();
        let t_b = v_b.dot(&line.r);

        if d_a < tol.coplanar || d_b < tol.coplanar {
            hits.push(InterPt::new(t_a, Some(0), line.point_at(t_a), src));
            hits.push(InterPt::new(t_b, Some(1), line.point_at(t_b), src));
        }
    }

    hits
}

/// Intersect every boundary edge of a face against the cutting line.
///
/// Hits are tagged with the face-local edge slots, and endpoint markers
/// are remapped from per-edge slots to face-loop slots.
pub fn face_crossings(
    points: &[Point3],
    verts: &[usize],
    line: &CuttingLine,
    src: Src,
    tol: &Tolerance,
) -> Vec<InterPt> {
    let mut out = Vec::new();
    let num = verts.len();

    for i in 0..num {
        let j = if i == num - 1 { 0 } else { i + 1 };

        for mut p in intersect_edge_line(&points[verts[i]], &points[verts[j]], line, src, tol) {
            p.edge = (i, j);
            p.end = p.end.map(|slot| if slot == 0 { i } else { j });
            out.push(p);
        }
    }

    out
}

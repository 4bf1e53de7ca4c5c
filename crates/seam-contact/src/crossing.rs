//! Crossing pairing and pocket resolution.
//!
//! Raw edge hits along the cutting line come in duplicated at shared
//! vertices and singly where the polygon merely grazes the line. This
//! pass groups them by quantized parameter and decides, per group,
//! whether the boundary actually crosses the line there.

use std::collections::BTreeMap;

use seam_math::{Point3, Tolerance, Vec3};

use crate::edge::InterPt;
use crate::plane::CuttingLine;

/// Reduce raw edge hits on one face to an even set of true crossings,
/// sorted by line parameter.
///
/// Vertex-touching hits arrive once per incident edge; a lone hit on a
/// vertex is first duplicated so every group holds a candidate pair.
/// The first and last groups along the line are trivially entry/exit
/// points and keep a single crossing. Interior vertex groups are
/// resolved by side tests against the in-plane normal `m = n x r`:
/// a true crossing keeps one point, a graze into a pocket that opens
/// away from the interval keeps none, and a tangential touch whose
/// neighbors stay on one side is dropped entirely when the pocket faces
/// the covered interval.
pub fn resolve_crossings(
    points: &[Point3],
    verts: &[usize],
    hits: Vec<InterPt>,
    line: &CuttingLine,
    normal: &Vec3,
    tol: &Tolerance,
) -> Vec<InterPt> {
    if hits.is_empty() {
        return hits;
    }

    let num = verts.len();

    let mut paired: BTreeMap<i64, Vec<InterPt>> = BTreeMap::new();
    for p in hits {
        paired.entry(tol.parameter_key(p.t)).or_default().push(p);
    }

    let mut groups: Vec<Vec<InterPt>> = paired
        .into_values()
        .map(|mut pts| {
            if pts.len() == 1 && pts[0].end.is_some() {
                // the second hit from the adjacent edge is missing
                pts.push(pts[0]);
            }
            pts
        })
        .collect();

    // The extreme groups bound the covered interval and are always
    // genuine crossings.
    if let Some(first) = groups.first_mut() {
        if first.len() == 2 {
            first.pop();
        }
    }
    if let Some(last) = groups.last_mut() {
        if last.len() == 2 {
            last.pop();
        }
    }

    // In-plane direction perpendicular to the line; side tests are
    // signed distances against it.
    let m = normal.cross(&line.r);
    let d = m.dot(&line.s.coords);

    let mut ends: BTreeMap<usize, f64> = BTreeMap::new();
    for g in &groups {
        if let Some(last) = g.last() {
            if let Some(end) = last.end {
                ends.entry(end).or_insert(last.t);
            }
        }
    }

    for g in &mut groups {
        let dupl = match g.last() {
            Some(p) => *p,
            None => continue,
        };
        let end = match dupl.end {
            Some(end) => end,
            None => continue,
        };

        let before = if end == 0 { num - 1 } else { end - 1 };
        let after = if end == num - 1 { 0 } else { end + 1 };

        if g.len() == 2 {
            if !ends.contains_key(&after) && ends.contains_key(&before) {
                let q = points[verts[after]];
                let e = m.dot(&q.coords) - d;
                let t = ends[&before];

                if (dupl.t > t && e > 0.0) || (dupl.t < t && e < 0.0) {
                    // pocket opening away from the interval
                    g.pop();
                }
                continue;
            } else if !ends.contains_key(&before) && ends.contains_key(&after) {
                let q = points[verts[before]];
                let e = m.dot(&q.coords) - d;
                let t = ends[&after];

                if (dupl.t > t && e < 0.0) || (dupl.t < t && e > 0.0) {
                    g.pop();
                }
                continue;
            }
        }

        if !ends.contains_key(&before) && !ends.contains_key(&after) {
            let p_after = points[verts[after]];
            let p_before = points[verts[before]];

            let d_a = m.dot(&p_after.coords) - d;
            let d_b = m.dot(&p_before.coords) - d;

            if d_a.is_sign_negative() != d_b.is_sign_negative() {
                // proper crossing through the vertex
                if g.len() == 2 {
                    g.pop();
                }
            } else {
                let t_a = (p_after - line.s).dot(&line.r);
                let t_b = (p_before - line.s).dot(&line.r);

                // Tangential touch; drop it when the pocket faces the
                // covered interval, otherwise the pair stands as a
                // zero-width entry/exit.
                if (t_b > t_a) == d_a.is_sign_negative() {
                    g.clear();
                }
            }
        }
    }

    groups.into_iter().flatten().collect()
}

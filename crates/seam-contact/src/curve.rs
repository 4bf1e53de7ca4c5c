//! Contact-curve accumulation.
//!
//! Collects per-face-pair overlaps into one indexed segment soup, welds
//! coincident endpoints, and drops segments that collapse under the
//! weld tolerance.

use std::collections::HashMap;

use seam_math::{Point3, Tolerance};
use seam_mesh::PreparedMesh;

use crate::edge::Src;
use crate::overlap::Overlap;

/// One straight piece of the contact curve, with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSegment {
    /// Endpoint indices into [`ContactCurve::points`], ordered by line
    /// parameter.
    pub points: [usize; 2],
    /// Face of the first mesh this segment was cut on.
    pub face_a: usize,
    /// Face of the second mesh.
    pub face_b: usize,
    /// Per endpoint, the first-mesh vertex the endpoint coincides with.
    pub sources_a: [Option<usize>; 2],
    /// Per endpoint, the second-mesh vertex it coincides with.
    pub sources_b: [Option<usize>; 2],
    /// Other first-mesh face sharing the edge the segment runs along,
    /// when it runs along one.
    pub neighbor_a: Option<usize>,
    /// Same for the second mesh.
    pub neighbor_b: Option<usize>,
}

/// The extracted contact curve as an indexed segment soup.
#[derive(Debug, Clone, Default)]
pub struct ContactCurve {
    /// Welded endpoint coordinates.
    pub points: Vec<Point3>,
    /// Segments referencing [`Self::points`].
    pub segments: Vec<ContactSegment>,
}

impl ContactCurve {
    /// True when no face pair produced a contact segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of contact segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Accumulates overlaps pair by pair, then welds on finish.
#[derive(Debug, Default)]
pub(crate) struct CurveBuilder {
    points: Vec<Point3>,
    segments: Vec<ContactSegment>,
    invalid_a: bool,
    invalid_b: bool,
}

impl CurveBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append all overlaps of one face pair, flagging contact through
    /// non-manifold edges as it goes.
    pub(crate) fn add_overlaps(
        &mut self,
        overlaps: &[Overlap],
        mesh_a: &PreparedMesh,
        mesh_b: &PreparedMesh,
        face_a: usize,
        face_b: usize,
    ) {
        fn global(slot: Option<usize>, verts: &[usize]) -> Option<usize> {
            slot.map(|s| verts[s])
        }

        let verts_a = &mesh_a.faces[face_a].verts;
        let verts_b = &mesh_b.faces[face_b].verts;

        for ol in overlaps {
            for p in [&ol.first, &ol.second] {
                match p.src {
                    Src::A => {
                        if mesh_a.is_non_manifold(verts_a[p.edge.0], verts_a[p.edge.1]) {
                            self.invalid_a = true;
                        }
                    }
                    Src::B => {
                        if mesh_b.is_non_manifold(verts_b[p.edge.0], verts_b[p.edge.1]) {
                            self.invalid_b = true;
                        }
                    }
                }
            }

            let base = self.points.len();
            self.points.push(ol.first.point);
            self.points.push(ol.second.point);

            self.segments.push(ContactSegment {
                points: [base, base + 1],
                face_a,
                face_b,
                sources_a: [
                    global(ol.first.src_a, verts_a),
                    global(ol.second.src_a, verts_a),
                ],
                sources_b: [
                    global(ol.first.src_b, verts_b),
                    global(ol.second.src_b, verts_b),
                ],
                neighbor_a: ol.neighbor_a,
                neighbor_b: ol.neighbor_b,
            });
        }
    }

    /// Weld endpoints closer than the merge tolerance and drop segments
    /// that degenerate to a point; returns the curve and the per-mesh
    /// invalidity flags.
    pub(crate) fn finish(self, tol: &Tolerance) -> (ContactCurve, bool, bool) {
        let mut keys: HashMap<(i64, i64, i64), usize> = HashMap::new();
        let mut points = Vec::new();
        let mut remap = Vec::with_capacity(self.points.len());

        let quantize = |v: f64| (v / tol.merge).round() as i64;

        for p in &self.points {
            let key = (quantize(p.x), quantize(p.y), quantize(p.z));
            let id = *keys.entry(key).or_insert_with(|| {
                points.push(*p);
                points.len() - 1
            });
            remap.push(id);
        }

        let segments = self
            .segments
            .into_iter()
            .filter_map(|mut seg| {
                seg.points = [remap[seg.points[0]], remap[seg.points[1]]];
                (seg.points[0] != seg.points[1]).then_some(seg)
            })
            .collect();

        (ContactCurve { points, segments }, self.invalid_a, self.invalid_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::InterPt;
    use seam_math::Vec3;
    use seam_mesh::{prepare, Cell, RawMesh};

    fn fan(n: usize) -> PreparedMesh {
        // n triangles around the shared edge (0, 1)
        let mut points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let mut cells = Vec::new();
        for k in 0..n {
            let ang = std::f64::consts::PI * k as f64 / n as f64;
            points.push(Point3::new(1.0, ang.cos(), ang.sin()));
            cells.push(Cell::Triangle([0, 1, 2 + k]));
        }
        prepare(&RawMesh { points, cells }).unwrap()
    }

    fn pt(t: f64, src: Src, edge: (usize, usize)) -> InterPt {
        InterPt {
            t,
            point: Point3::origin() + t * Vec3::x(),
            src,
            edge,
            end: None,
            src_a: None,
            src_b: None,
        }
    }

    // Both extremities sit on edge (0, 1), the only interior edge of
    // the fans; the rim edges count as non-manifold.
    fn overlap(t0: f64, t1: f64) -> Overlap {
        Overlap {
            first: pt(t0, Src::A, (0, 1)),
            second: pt(t1, Src::B, (0, 1)),
            neighbor_a: None,
            neighbor_b: None,
        }
    }

    #[test]
    fn test_weld_shares_coincident_endpoints() {
        let mesh = fan(2);
        let mut builder = CurveBuilder::new();
        builder.add_overlaps(&[overlap(0.0, 1.0)], &mesh, &mesh, 0, 0);
        builder.add_overlaps(&[overlap(1.0, 2.0)], &mesh, &mesh, 1, 1);

        let (curve, invalid_a, invalid_b) = builder.finish(&Tolerance::DEFAULT);

        assert_eq!(curve.len(), 2);
        assert_eq!(curve.points.len(), 3);
        assert_eq!(curve.segments[0].points[1], curve.segments[1].points[0]);
        assert!(!invalid_a);
        assert!(!invalid_b);
    }

    #[test]
    fn test_degenerate_segment_dropped() {
        let mesh = fan(2);
        let mut builder = CurveBuilder::new();
        builder.add_overlaps(&[overlap(1.0, 1.0 + 1e-7)], &mesh, &mesh, 0, 0);

        let (curve, _, _) = builder.finish(&Tolerance::DEFAULT);
        assert!(curve.is_empty());
    }

    #[test]
    fn test_non_manifold_edge_sets_flag() {
        // Three faces around edge (0, 1) make it non-manifold in the
        // first mesh only.
        let mesh_a = fan(3);
        let mesh_b = fan(2);
        let mut builder = CurveBuilder::new();
        builder.add_overlaps(&[overlap(0.0, 1.0)], &mesh_a, &mesh_b, 0, 0);

        let (_, invalid_a, invalid_b) = builder.finish(&Tolerance::DEFAULT);
        assert!(invalid_a);
        assert!(!invalid_b);
    }

    #[test]
    fn test_source_slots_become_vertex_ids() {
        let mesh = fan(2);
        let mut ol = overlap(0.0, 2.0);
        ol.first.src_a = Some(0);
        ol.second.src_b = Some(1);

        let mut builder = CurveBuilder::new();
        builder.add_overlaps(&[ol], &mesh, &mesh, 1, 1);

        let (curve, _, _) = builder.finish(&Tolerance::DEFAULT);
        let seg = &curve.segments[0];

        // Face 1 of the fan is (0, 1, 3); slot 0 -> vertex 0, slot 1 -> 1.
        assert_eq!(seg.sources_a, [Some(0), None]);
        assert_eq!(seg.sources_b, [None, Some(1)]);
    }
}

//! Cross-mesh interval stitching.
//!
//! Each face contributes an even list of crossings along the shared
//! cutting line, read as consecutive inside intervals. A contact
//! segment exists wherever an interval of one face overlaps an interval
//! of the other.

use seam_math::Tolerance;
use seam_mesh::PreparedMesh;

use crate::edge::InterPt;

/// One clipped interval common to both faces, with edge-neighbor
/// lookups for intervals that ran along a single boundary edge.
#[derive(Debug, Clone, Copy)]
pub struct Overlap {
    /// Extremity with the smaller line parameter.
    pub first: InterPt,
    /// Extremity with the larger line parameter.
    pub second: InterPt,
    /// Face of the first mesh sharing the carrying edge, when the whole
    /// interval lies on one edge of that face.
    pub neighbor_a: Option<usize>,
    /// Same for the second mesh.
    pub neighbor_b: Option<usize>,
}

/// Face sharing the edge that carries a whole interval, if the interval
/// lies on a single boundary edge.
fn interval_neighbor(pair: &[InterPt], mesh: &PreparedMesh, face: usize) -> Option<usize> {
    if pair[0].edge != pair[1].edge {
        return None;
    }
    let verts = &mesh.faces[face].verts;
    mesh.edge_neighbor(face, verts[pair[0].edge.0], verts[pair[0].edge.1])
}

fn clipped(
    mut first: InterPt,
    mut second: InterPt,
    outer_first: &InterPt,
    outer_second: &InterPt,
    neighbor_a: Option<usize>,
    neighbor_b: Option<usize>,
    tol: &Tolerance,
) -> Overlap {
    first.merge(outer_first, tol);
    second.merge(outer_second, tol);

    Overlap {
        first,
        second,
        neighbor_a,
        neighbor_b,
    }
}

/// Clip every inside interval of face A against every inside interval
/// of face B.
///
/// The interval lists must hold an even number of crossings sorted by
/// parameter; the caller has already enforced both. The kept extremity
/// of each overlap records which face vertices it touches on either
/// side via [`InterPt::merge`].
pub fn stitch_overlaps(
    inters_a: &[InterPt],
    inters_b: &[InterPt],
    mesh_a: &PreparedMesh,
    mesh_b: &PreparedMesh,
    face_a: usize,
    face_b: usize,
    tol: &Tolerance,
) -> Vec<Overlap> {
    let mut overlaps = Vec::new();

    for pair_a in inters_a.chunks_exact(2) {
        let neig_a = interval_neighbor(pair_a, mesh_a, face_a);

        for pair_b in inters_b.chunks_exact(2) {
            let neig_b = interval_neighbor(pair_b, mesh_b, face_b);

            let (a0, a1) = (&pair_a[0], &pair_a[1]);
            let (b0, b1) = (&pair_b[0], &pair_b[1]);

            if a0.t <= b0.t && a1.t > b0.t {
                if b1.t < a1.t {
                    // B inside A
                    overlaps.push(clipped(*b0, *b1, a0, a1, neig_a, neig_b, tol));
                } else {
                    // B enters A and runs past its end
                    overlaps.push(clipped(*b0, *a1, a0, b1, neig_a, neig_b, tol));
                }
            } else if b0.t <= a0.t && b1.t > a0.t {
                if a1.t < b1.t {
                    // A inside B
                    overlaps.push(clipped(*a0, *a1, b0, b1, neig_a, neig_b, tol));
                } else {
                    overlaps.push(clipped(*a0, *b1, b0, a1, neig_a, neig_b, tol));
                }
            }
        }
    }

    overlaps
}

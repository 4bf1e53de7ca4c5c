//! Contact extraction pipeline - broad phase, per-pair narrow phase,
//! accumulation.

use rayon::prelude::*;

use seam_mesh::{face_normal, PreparedMesh};

use crate::api::ContactConfig;
use crate::bbox;
use crate::crossing::resolve_crossings;
use crate::curve::{ContactCurve, CurveBuilder};
use crate::edge::{face_crossings, InterPt, Src};
use crate::overlap::{stitch_overlaps, Overlap};
use crate::plane::cutting_line;
use crate::trace::TraceEvent;

/// Contact found on one candidate face pair.
struct PairContact {
    face_a: usize,
    face_b: usize,
    overlaps: Vec<Overlap>,
}

/// Verify that resolved crossings still sit on their carrying edges.
///
/// With inaccurate normals the Cramer solve can drift; a drifted point
/// is reported to the trace sink but kept, matching the downstream
/// weld's willingness to absorb it.
fn audit_crossings(
    crossings: &[InterPt],
    mesh: &PreparedMesh,
    face: usize,
    pair: (usize, usize),
    src: Src,
    cfg: &ContactConfig,
) {
    let verts = &mesh.faces[face].verts;

    for p in crossings {
        let e_a = mesh.points[verts[p.edge.0]];
        let e_b = mesh.points[verts[p.edge.1]];

        let v = e_a - e_b;
        let n = v.norm();
        if n == 0.0 {
            continue;
        }

        let d = (v / n).cross(&(e_a - p.point)).norm();
        if d >= cfg.tolerance.merge {
            cfg.emit(|| TraceEvent::OffEdgePoint {
                face_a: pair.0,
                face_b: pair.1,
                src,
                distance: d,
            });
        }
    }
}

/// Narrow phase for one candidate pair.
///
/// Returns `None` when the pair contributes nothing: parallel or
/// coincident planes, a cutting line missing one of the faces, odd
/// crossing counts, or inside intervals that never overlap.
fn intersect_faces(
    mesh_a: &PreparedMesh,
    mesh_b: &PreparedMesh,
    face_a: usize,
    face_b: usize,
    cfg: &ContactConfig,
) -> Option<PairContact> {
    let tol = &cfg.tolerance;

    let verts_a = &mesh_a.faces[face_a].verts;
    let verts_b = &mesh_b.faces[face_b].verts;

    let n_a = face_normal(&mesh_a.points, verts_a);
    let n_b = face_normal(&mesh_b.points, verts_b);

    let line = match cutting_line(
        &n_a,
        &mesh_a.points[verts_a[0]],
        &n_b,
        &mesh_b.points[verts_b[0]],
        tol,
    ) {
        Some(line) => line,
        None => {
            cfg.emit(|| TraceEvent::PlanesParallel { face_a, face_b });
            return None;
        }
    };

    let hits_a = face_crossings(&mesh_a.points, verts_a, &line, Src::A, tol);
    let hits_b = face_crossings(&mesh_b.points, verts_b, &line, Src::B, tol);

    let inters_a = resolve_crossings(&mesh_a.points, verts_a, hits_a, &line, &n_a, tol);
    let inters_b = resolve_crossings(&mesh_b.points, verts_b, hits_b, &line, &n_b, tol);

    audit_crossings(&inters_a, mesh_a, face_a, (face_a, face_b), Src::A, cfg);
    audit_crossings(&inters_b, mesh_b, face_b, (face_a, face_b), Src::B, cfg);

    cfg.emit(|| TraceEvent::Crossings {
        face_a,
        face_b,
        count_a: inters_a.len(),
        count_b: inters_b.len(),
    });

    if inters_a.is_empty() || inters_b.is_empty() {
        return None;
    }

    // A closed flat polygon enters and leaves the line an even number
    // of times, but on mildly non-planar faces the estimated normal can
    // leave an odd count. Such crossings cannot be read as intervals;
    // the pair contributes nothing.
    if inters_a.len() % 2 != 0 || inters_b.len() % 2 != 0 {
        cfg.emit(|| TraceEvent::OddCrossings {
            face_a,
            face_b,
            count_a: inters_a.len(),
            count_b: inters_b.len(),
        });
        return None;
    }

    let overlaps = stitch_overlaps(&inters_a, &inters_b, mesh_a, mesh_b, face_a, face_b, tol);

    cfg.emit(|| TraceEvent::Overlaps {
        face_a,
        face_b,
        count: overlaps.len(),
    });

    if overlaps.is_empty() {
        return None;
    }

    Some(PairContact {
        face_a,
        face_b,
        overlaps,
    })
}

/// Run the full pipeline over two prepared meshes.
///
/// Returns the welded curve plus the two invalidity flags.
pub(crate) fn extract(
    mesh_a: &PreparedMesh,
    mesh_b: &PreparedMesh,
    cfg: &ContactConfig,
) -> (ContactCurve, bool, bool) {
    let pairs = bbox::candidate_face_pairs(mesh_a, mesh_b, &cfg.tolerance);
    cfg.emit(|| TraceEvent::CandidatePairs { count: pairs.len() });

    // Narrow phase is the hot path - parallelize with rayon, then merge
    // sequentially so segment order stays deterministic.
    let contacts: Vec<PairContact> = pairs
        .par_iter()
        .filter_map(|&(face_a, face_b)| intersect_faces(mesh_a, mesh_b, face_a, face_b, cfg))
        .collect();

    let mut builder = CurveBuilder::new();
    for contact in &contacts {
        builder.add_overlaps(
            &contact.overlaps,
            mesh_a,
            mesh_b,
            contact.face_a,
            contact.face_b,
        );
    }

    builder.finish(&cfg.tolerance)
}

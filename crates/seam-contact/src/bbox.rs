//! Axis-aligned bounding box computation and face-pair filtering.
//!
//! Used as the broad phase: only face pairs with overlapping AABBs are
//! handed to the plane intersector.

use seam_math::{Point3, Tolerance};
use seam_mesh::PreparedMesh;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &Aabb3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Expand the AABB by a tolerance in all directions.
    pub fn expand(&mut self, tol: f64) {
        self.min.x -= tol;
        self.min.y -= tol;
        self.min.z -= tol;
        self.max.x += tol;
        self.max.y += tol;
        self.max.z += tol;
    }
}

/// Compute the AABB of one face, expanded by the merge tolerance so that
/// tangentially touching faces still form a candidate pair.
pub fn face_aabb(mesh: &PreparedMesh, face: usize, tol: &Tolerance) -> Aabb3 {
    let mut aabb = Aabb3::empty();
    for &v in &mesh.faces[face].verts {
        aabb.include_point(&mesh.points[v]);
    }
    aabb.expand(tol.merge);
    aabb
}

/// Compute the AABB for a whole prepared mesh.
pub fn mesh_aabb(mesh: &PreparedMesh, tol: &Tolerance) -> Aabb3 {
    let mut aabb = Aabb3::empty();
    for face in 0..mesh.faces.len() {
        let face_box = face_aabb(mesh, face, tol);
        aabb.include_point(&face_box.min);
        aabb.include_point(&face_box.max);
    }
    aabb
}

/// Find candidate face pairs between two meshes whose AABBs overlap.
///
/// Returns `(face_from_a, face_from_b)` pairs. Only these pairs need
/// plane intersection tests.
pub fn candidate_face_pairs(
    a: &PreparedMesh,
    b: &PreparedMesh,
    tol: &Tolerance,
) -> Vec<(usize, usize)> {
    // First check if the two meshes overlap at all
    if !mesh_aabb(a, tol).overlaps(&mesh_aabb(b, tol)) {
        return Vec::new();
    }

    // Precompute face AABBs for mesh B
    let b_boxes: Vec<Aabb3> = (0..b.faces.len())
        .map(|face| face_aabb(b, face, tol))
        .collect();

    let mut pairs = Vec::new();

    for face_a in 0..a.faces.len() {
        let box_a = face_aabb(a, face_a, tol);
        for (face_b, box_b) in b_boxes.iter().enumerate() {
            if box_a.overlaps(box_b) {
                pairs.push((face_a, face_b));
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use seam_mesh::{prepare, Cell, RawMesh};

    fn triangle_at(x: f64) -> RawMesh {
        RawMesh {
            points: vec![
                Point3::new(x, 0.0, 0.0),
                Point3::new(x + 1.0, 0.0, 0.0),
                Point3::new(x, 1.0, 0.0),
            ],
            cells: vec![Cell::Triangle([0, 1, 2])],
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let mut a = Aabb3::empty();
        a.include_point(&Point3::new(0.0, 0.0, 0.0));
        a.include_point(&Point3::new(10.0, 10.0, 10.0));
        let mut b = Aabb3::empty();
        b.include_point(&Point3::new(5.0, 5.0, 5.0));
        b.include_point(&Point3::new(15.0, 15.0, 15.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let mut c = Aabb3::empty();
        c.include_point(&Point3::new(20.0, 20.0, 20.0));
        c.include_point(&Point3::new(30.0, 30.0, 30.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching() {
        let mut a = Aabb3::empty();
        a.include_point(&Point3::new(0.0, 0.0, 0.0));
        a.include_point(&Point3::new(1.0, 1.0, 1.0));
        let mut b = Aabb3::empty();
        b.include_point(&Point3::new(1.0, 0.0, 0.0));
        b.include_point(&Point3::new(2.0, 1.0, 1.0));
        assert!(a.overlaps(&b)); // touching counts
    }

    #[test]
    fn test_disjoint_meshes_no_pairs() {
        let tol = Tolerance::DEFAULT;
        let a = prepare(&triangle_at(0.0)).unwrap();
        let b = prepare(&triangle_at(100.0)).unwrap();
        assert!(candidate_face_pairs(&a, &b, &tol).is_empty());
    }

    #[test]
    fn test_overlapping_meshes_have_pairs() {
        let tol = Tolerance::DEFAULT;
        let a = prepare(&triangle_at(0.0)).unwrap();
        let b = prepare(&triangle_at(0.5)).unwrap();
        assert_eq!(candidate_face_pairs(&a, &b, &tol), vec![(0, 0)]);
    }
}

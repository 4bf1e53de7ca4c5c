#![warn(missing_docs)]

//! Polygonal mesh model for the seam contact kernel.
//!
//! An input surface arrives as a [`RawMesh`]: a vertex array plus a cell
//! list of arbitrary arity (triangles, quads, polygons, triangle strips).
//! [`prepare`] normalizes it into a [`PreparedMesh`] containing only
//! triangles and simple polygons, each tagged with the cell it came from,
//! together with the edge→incident-face adjacency and the non-manifold
//! edge set. A prepared mesh is read-only for the rest of a run.

use std::collections::{HashMap, HashSet};

use seam_math::{Point3, Vec3};

mod error;
mod prepare;

pub use error::MeshError;
pub use prepare::prepare;

/// An input cell. Unsupported kinds are dropped during preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Three vertex indices.
    Triangle([usize; 3]),
    /// Four vertex indices; decomposed into two triangles.
    Quad([usize; 4]),
    /// A simple polygon, kept as-is when its arity is at least 3.
    Polygon(Vec<usize>),
    /// A triangle strip; decomposed pairwise into triangles.
    TriangleStrip(Vec<usize>),
    /// A point cell. Not a surface, dropped.
    Vertex(usize),
    /// A polyline cell. Not a surface, dropped.
    PolyLine(Vec<usize>),
}

/// A raw input mesh before preparation.
#[derive(Debug, Clone)]
pub struct RawMesh {
    /// Vertex coordinates.
    pub points: Vec<Point3>,
    /// Cells indexing into `points`.
    pub cells: Vec<Cell>,
}

/// A prepared face: an ordered vertex loop plus the id of the input cell
/// it was decomposed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Ordered vertex indices, outward-normal convention.
    pub verts: Vec<usize>,
    /// Index of the originating cell in the raw input.
    pub origin: usize,
}

/// An unordered pair of vertex indices identifying a mesh edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(usize, usize);

impl EdgeKey {
    /// Build a key from two vertex indices, in either order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// A mesh normalized to triangles and simple polygons, with its edge
/// adjacency and non-manifold edge set built once.
#[derive(Debug, Clone)]
pub struct PreparedMesh {
    /// Vertex coordinates, identical to the raw input.
    pub points: Vec<Point3>,
    /// Prepared faces.
    pub faces: Vec<Face>,
    adjacency: HashMap<EdgeKey, Vec<usize>>,
    non_manifold: HashSet<EdgeKey>,
}

impl PreparedMesh {
    pub(crate) fn from_faces(points: Vec<Point3>, faces: Vec<Face>) -> Self {
        let mut adjacency: HashMap<EdgeKey, Vec<usize>> = HashMap::new();

        for (face_id, face) in faces.iter().enumerate() {
            let n = face.verts.len();
            for i in 0..n {
                let j = if i == n - 1 { 0 } else { i + 1 };
                let key = EdgeKey::new(face.verts[i], face.verts[j]);
                adjacency.entry(key).or_default().push(face_id);
            }
        }

        let non_manifold = adjacency
            .iter()
            .filter(|(_, faces)| faces.len() != 2)
            .map(|(&key, _)| key)
            .collect();

        Self {
            points,
            faces,
            adjacency,
            non_manifold,
        }
    }

    /// Faces incident to the edge `(a, b)`.
    pub fn edge_faces(&self, a: usize, b: usize) -> &[usize] {
        self.adjacency
            .get(&EdgeKey::new(a, b))
            .map_or(&[], Vec::as_slice)
    }

    /// The unique face sharing edge `(a, b)` with `face`, if exactly one
    /// other face is incident to it. `None` on open boundaries and on
    /// non-manifold edges.
    pub fn edge_neighbor(&self, face: usize, a: usize, b: usize) -> Option<usize> {
        let mut others = self
            .edge_faces(a, b)
            .iter()
            .copied()
            .filter(|&f| f != face);
        let neighbor = others.next()?;
        if others.next().is_some() {
            return None;
        }
        Some(neighbor)
    }

    /// Whether the edge `(a, b)` is bordered by a number of faces other
    /// than exactly two.
    pub fn is_non_manifold(&self, a: usize, b: usize) -> bool {
        self.non_manifold.contains(&EdgeKey::new(a, b))
    }

    /// Number of non-manifold edges.
    pub fn non_manifold_count(&self) -> usize {
        self.non_manifold.len()
    }
}

/// Normal of a face by Newell's method, normalized.
///
/// Robust to mildly non-planar polygons; returns a zero vector for
/// degenerate loops.
pub fn face_normal(points: &[Point3], verts: &[usize]) -> Vec3 {
    let mut n = Vec3::zeros();
    let len = verts.len();

    for i in 0..len {
        let j = if i == len - 1 { 0 } else { i + 1 };
        let p = &points[verts[i]];
        let q = &points[verts[j]];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }

    let norm = n.norm();
    if norm < 1e-15 {
        Vec3::zeros()
    } else {
        n / norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri_points() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_face_normal_ccw_triangle() {
        let points = tri_points();
        let n = face_normal(&points, &[0, 1, 2]);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(n.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_normal_reversed() {
        let points = tri_points();
        let n = face_normal(&points, &[2, 1, 0]);
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_normal_degenerate() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let n = face_normal(&points, &[0, 1, 2]);
        assert_eq!(n.norm(), 0.0);
    }

    #[test]
    fn test_edge_neighbor_shared() {
        // Two triangles sharing edge (0, 1)
        let points = tri_points();
        let faces = vec![
            Face {
                verts: vec![0, 1, 2],
                origin: 0,
            },
            Face {
                verts: vec![1, 0, 3],
                origin: 1,
            },
        ];
        let mesh = PreparedMesh::from_faces(points, faces);

        assert_eq!(mesh.edge_neighbor(0, 0, 1), Some(1));
        assert_eq!(mesh.edge_neighbor(1, 0, 1), Some(0));
        // Boundary edge has no neighbor
        assert_eq!(mesh.edge_neighbor(0, 1, 2), None);
        assert!(!mesh.is_non_manifold(0, 1));
        // Boundary edges count as non-manifold (incident count != 2)
        assert!(mesh.is_non_manifold(1, 2));
    }

    #[test]
    fn test_edge_neighbor_non_manifold() {
        // Three triangles sharing edge (0, 1)
        let mut points = tri_points();
        points.push(Point3::new(1.0, 0.0, -1.0));
        let faces = vec![
            Face {
                verts: vec![0, 1, 2],
                origin: 0,
            },
            Face {
                verts: vec![1, 0, 3],
                origin: 1,
            },
            Face {
                verts: vec![0, 1, 4],
                origin: 2,
            },
        ];
        let mesh = PreparedMesh::from_faces(points, faces);

        assert!(mesh.is_non_manifold(0, 1));
        assert!(mesh.is_non_manifold(1, 0));
        // Ambiguous lookup yields no neighbor
        assert_eq!(mesh.edge_neighbor(0, 0, 1), None);
    }
}

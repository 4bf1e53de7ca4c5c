//! Face preparation: decompose an arbitrary cell soup into triangles and
//! simple polygons, preserving the mapping back to the original cell.

use crate::{Cell, Face, MeshError, PreparedMesh, RawMesh};

/// Normalize a raw mesh for intersection.
///
/// Quads are split along their first diagonal, triangle strips are
/// decomposed pairwise (dropping degenerate triangles), triangles and
/// polygons pass through unchanged, and any other cell kind is dropped.
/// Each resulting face carries the index of the cell it came from.
///
/// Running this on an already prepared mesh (triangles/polygons only)
/// reproduces the same face loops.
pub fn prepare(raw: &RawMesh) -> Result<PreparedMesh, MeshError> {
    let mut faces = Vec::with_capacity(raw.cells.len());

    for (cell_id, cell) in raw.cells.iter().enumerate() {
        match cell {
            Cell::Triangle(v) => faces.push(Face {
                verts: v.to_vec(),
                origin: cell_id,
            }),
            Cell::Quad([a, b, c, d]) => {
                faces.push(Face {
                    verts: vec![*a, *b, *c],
                    origin: cell_id,
                });
                faces.push(Face {
                    verts: vec![*a, *c, *d],
                    origin: cell_id,
                });
            }
            Cell::Polygon(v) if v.len() >= 3 => faces.push(Face {
                verts: v.clone(),
                origin: cell_id,
            }),
            Cell::TriangleStrip(strip) => {
                for (k, w) in strip.windows(3).enumerate() {
                    // Alternate orientation so every triangle keeps the
                    // strip's winding
                    let tri = if k % 2 == 0 {
                        [w[0], w[1], w[2]]
                    } else {
                        [w[1], w[0], w[2]]
                    };
                    if tri[0] != tri[1] && tri[1] != tri[2] && tri[2] != tri[0] {
                        faces.push(Face {
                            verts: tri.to_vec(),
                            origin: cell_id,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    if faces.is_empty() {
        return Err(MeshError::NoSupportedCells);
    }

    Ok(PreparedMesh::from_faces(raw.points.clone(), faces))
}

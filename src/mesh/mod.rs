//! Marching squares triangulation of the finalized cave grid.
//!
//! The grid is padded with one ring of wall so no square straddles the map
//! edge. Walls form the mesh; floor is left open. Outline loops around every
//! wall/floor contour are traced afterwards for collision boundaries.

pub mod cases;
pub mod nodes;
pub mod outline;

use std::collections::HashMap;

use log::info;
use serde::Serialize;

use crate::error::{CaveError, Result};
use crate::grid::{CaveGrid, Tile};

use cases::{case_points, SOLID};
use nodes::{NodeId, Square, SquareGrid};
use outline::{trace_outlines, Triangle, TriangleAdjacency};

/// Triangulated wall geometry plus its boundary loops.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CaveMesh {
    pub vertices: Vec<[f32; 3]>,
    /// Flat triangle list, three indices per triangle.
    pub triangles: Vec<u32>,
    /// Closed vertex loops; the first index is repeated at the end.
    pub outlines: Vec<Vec<u32>>,
}

impl CaveMesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Outline loop as 2D points, ready for an edge collider.
    pub fn outline_points(&self, outline: usize) -> Vec<[f32; 2]> {
        self.outlines[outline]
            .iter()
            .map(|&v| {
                let [x, y, _] = self.vertices[v as usize];
                [x, y]
            })
            .collect()
    }

    /// Number of triangles sharing each undirected edge, keyed `(low, high)`.
    pub fn edge_use_counts(&self) -> HashMap<(u32, u32), usize> {
        let mut counts = HashMap::new();
        for tri in self.triangles.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Edges that belong to exactly one triangle.
    pub fn boundary_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .edge_use_counts()
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|(edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }
}

/// Accumulates vertices and triangles while squares are visited.
struct MeshBuilder {
    squares: SquareGrid,
    vertices: Vec<[f32; 3]>,
    triangles: Vec<u32>,
    adjacency: TriangleAdjacency,
    /// Vertices owned by solid squares; they never start an outline.
    checked: Vec<bool>,
}

impl MeshBuilder {
    fn new(squares: SquareGrid) -> Self {
        Self {
            squares,
            vertices: Vec::new(),
            triangles: Vec::new(),
            adjacency: TriangleAdjacency::new(0),
            checked: Vec::new(),
        }
    }

    fn triangulate_square(&mut self, square: Square) -> Result<()> {
        let slots = case_points(square.configuration)?;
        if slots.is_empty() {
            return Ok(());
        }

        let points: Vec<u32> = slots
            .iter()
            .map(|&slot| self.assign_vertex(square.node(slot)))
            .collect();

        for i in 1..points.len() - 1 {
            self.add_triangle(points[0], points[i], points[i + 1]);
        }

        if square.configuration == SOLID {
            for corner in square.corners() {
                if let Some(v) = self.squares.nodes[corner].vertex_index {
                    self.checked[v as usize] = true;
                }
            }
        }

        Ok(())
    }

    /// Vertex index for a node, allocating one on first use.
    fn assign_vertex(&mut self, node_id: NodeId) -> u32 {
        let node = &mut self.squares.nodes[node_id];
        if let Some(index) = node.vertex_index {
            return index;
        }
        let index = self.vertices.len() as u32;
        node.vertex_index = Some(index);
        self.vertices.push(node.position);
        self.checked.push(false);
        index
    }

    fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.extend_from_slice(&[a, b, c]);
        self.adjacency.add(Triangle::new(a, b, c));
    }
}

/// Triangulate a finalized grid. The grid is padded with a wall ring first.
pub fn generate_mesh(grid: &CaveGrid, square_size: f32) -> Result<CaveMesh> {
    if !square_size.is_finite() || square_size <= 0.0 {
        return Err(CaveError::InvalidSquareSize(square_size));
    }

    let padded = grid.padded(1, Tile::Wall);
    let mut builder = MeshBuilder::new(SquareGrid::new(&padded, square_size));

    for i in 0..builder.squares.squares.len() {
        let square = builder.squares.squares[i];
        builder.triangulate_square(square)?;
    }

    let outlines = trace_outlines(&builder.adjacency, builder.checked);

    let mesh = CaveMesh {
        vertices: builder.vertices,
        triangles: builder.triangles,
        outlines,
    };
    info!(
        "mesh: {} vertices, {} triangles, {} outlines",
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.outlines.len()
    );
    Ok(mesh)
}

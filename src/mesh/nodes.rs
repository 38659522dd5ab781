//! Control nodes, shared midpoint nodes and squares.
//!
//! Every node lives in one arena. Each control point owns three slots: itself,
//! the midpoint above it and the midpoint to its right. Squares refer to nodes
//! by arena id, so two neighbouring squares name the very same seam midpoint
//! and a vertex index assigned through one is seen by the other.

use crate::grid::CaveGrid;

use super::cases::{configuration, Slot};

pub type NodeId = usize;

const SLOTS_PER_CONTROL: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Control = 0,
    Above = 1,
    Right = 2,
}

/// A mesh vertex candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub position: [f32; 3],
    /// Set the first time a triangle references this node.
    pub vertex_index: Option<u32>,
}

impl Node {
    fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            vertex_index: None,
        }
    }
}

/// Four corner control nodes plus the four midpoints between them.
#[derive(Clone, Copy, Debug)]
pub struct Square {
    pub top_left: NodeId,
    pub top_right: NodeId,
    pub bottom_right: NodeId,
    pub bottom_left: NodeId,
    pub centre_top: NodeId,
    pub centre_right: NodeId,
    pub centre_bottom: NodeId,
    pub centre_left: NodeId,
    pub configuration: u8,
}

impl Square {
    pub fn node(&self, slot: Slot) -> NodeId {
        match slot {
            Slot::TopLeft => self.top_left,
            Slot::TopRight => self.top_right,
            Slot::BottomRight => self.bottom_right,
            Slot::BottomLeft => self.bottom_left,
            Slot::CentreTop => self.centre_top,
            Slot::CentreRight => self.centre_right,
            Slot::CentreBottom => self.centre_bottom,
            Slot::CentreLeft => self.centre_left,
        }
    }

    pub fn corners(&self) -> [NodeId; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

/// Node arena plus the squares laid over it, one fewer in each direction
/// than the occupancy grid.
pub struct SquareGrid {
    pub nodes: Vec<Node>,
    pub squares: Vec<Square>,
    /// Control nodes per row (equals the occupancy grid width).
    pub node_count_x: usize,
    pub node_count_y: usize,
}

impl SquareGrid {
    /// Walls are active control nodes. The map is centred on the origin.
    pub fn new(grid: &CaveGrid, square_size: f32) -> Self {
        let node_count_x = grid.width;
        let node_count_y = grid.height;
        let map_width = node_count_x as f32 * square_size;
        let map_height = node_count_y as f32 * square_size;
        let half = square_size / 2.0;

        let mut nodes = Vec::with_capacity(node_count_x * node_count_y * SLOTS_PER_CONTROL);
        for y in 0..node_count_y {
            for x in 0..node_count_x {
                let px = -map_width / 2.0 + x as f32 * square_size + half;
                let py = -map_height / 2.0 + y as f32 * square_size + half;
                nodes.push(Node::new([px, py, 0.0]));
                nodes.push(Node::new([px, py + half, 0.0]));
                nodes.push(Node::new([px + half, py, 0.0]));
            }
        }

        let id = |x: usize, y: usize, kind: NodeKind| {
            (y * node_count_x + x) * SLOTS_PER_CONTROL + kind as usize
        };

        let mut squares = Vec::with_capacity(node_count_x.saturating_sub(1) * node_count_y.saturating_sub(1));
        for y in 0..node_count_y.saturating_sub(1) {
            for x in 0..node_count_x.saturating_sub(1) {
                let config = configuration(
                    grid.get(x, y + 1).is_wall(),
                    grid.get(x + 1, y + 1).is_wall(),
                    grid.get(x + 1, y).is_wall(),
                    grid.get(x, y).is_wall(),
                );
                squares.push(Square {
                    top_left: id(x, y + 1, NodeKind::Control),
                    top_right: id(x + 1, y + 1, NodeKind::Control),
                    bottom_right: id(x + 1, y, NodeKind::Control),
                    bottom_left: id(x, y, NodeKind::Control),
                    centre_top: id(x, y + 1, NodeKind::Right),
                    centre_right: id(x + 1, y, NodeKind::Above),
                    centre_bottom: id(x, y, NodeKind::Right),
                    centre_left: id(x, y, NodeKind::Above),
                    configuration: config,
                });
            }
        }

        Self {
            nodes,
            squares,
            node_count_x,
            node_count_y,
        }
    }

    pub fn square_count_x(&self) -> usize {
        self.node_count_x.saturating_sub(1)
    }

    pub fn square(&self, x: usize, y: usize) -> &Square {
        &self.squares[y * self.square_count_x() + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;

    #[test]
    fn test_neighbouring_squares_share_seam_nodes() {
        let grid = CaveGrid::new_with(4, 4, Tile::Floor);
        let squares = SquareGrid::new(&grid, 1.0);

        let left = squares.square(0, 0);
        let right = squares.square(1, 0);
        assert_eq!(left.centre_right, right.centre_left);
        assert_eq!(left.top_right, right.top_left);

        let above = squares.square(0, 1);
        assert_eq!(left.centre_top, above.centre_bottom);
    }

    #[test]
    fn test_positions_are_centred() {
        let grid = CaveGrid::new_with(2, 2, Tile::Wall);
        let squares = SquareGrid::new(&grid, 2.0);
        let square = squares.square(0, 0);
        assert_eq!(squares.nodes[square.bottom_left].position, [-1.0, -1.0, 0.0]);
        assert_eq!(squares.nodes[square.top_right].position, [1.0, 1.0, 0.0]);
        assert_eq!(squares.nodes[square.centre_top].position, [0.0, 1.0, 0.0]);
        assert_eq!(squares.nodes[square.centre_left].position, [-1.0, 0.0, 0.0]);
        assert_eq!(square.configuration, 15);
    }

    #[test]
    fn test_configuration_reads_walls() {
        let mut grid = CaveGrid::new_with(2, 2, Tile::Floor);
        grid.set(0, 1, Tile::Wall);
        grid.set(1, 0, Tile::Wall);
        let squares = SquareGrid::new(&grid, 1.0);
        assert_eq!(squares.square(0, 0).configuration, 10);
    }
}

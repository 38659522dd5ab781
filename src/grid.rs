//! Occupancy grid types shared by every pipeline stage.

use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

impl Tile {
    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

/// Integer grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance between two cells.
    pub fn distance_sq(&self, other: &Cell) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

/// The cave occupancy map.
pub type CaveGrid = Tilemap<Tile>;

impl Tilemap<Tile> {
    /// Whether every cell on the outer ring is a wall.
    pub fn border_is_solid(&self) -> bool {
        self.iter()
            .filter(|&(x, y, _)| self.is_edge(x, y))
            .all(|(_, _, tile)| tile.is_wall())
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.iter().filter(|&(_, _, t)| *t == tile).count()
    }

    /// Whether any 4-connected neighbour of the cell is a wall.
    pub fn touches_wall(&self, x: usize, y: usize) -> bool {
        self.neighbors(x, y)
            .into_iter()
            .any(|(nx, ny)| self.get(nx, ny).is_wall())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sq() {
        let a = Cell::new(1, 2);
        let b = Cell::new(4, 6);
        assert_eq!(a.distance_sq(&b), 25);
        assert_eq!(b.distance_sq(&a), 25);
        assert_eq!(a.distance_sq(&a), 0);
    }

    #[test]
    fn test_border_is_solid() {
        let mut grid = CaveGrid::new_with(5, 5, Tile::Wall);
        grid.set(2, 2, Tile::Floor);
        assert!(grid.border_is_solid());
        grid.set(0, 3, Tile::Floor);
        assert!(!grid.border_is_solid());
    }

    #[test]
    fn test_touches_wall() {
        let mut grid = CaveGrid::new_with(5, 5, Tile::Floor);
        grid.set(0, 2, Tile::Wall);
        assert!(grid.touches_wall(1, 2));
        assert!(!grid.touches_wall(3, 2));
        // diagonal walls do not count
        assert!(!grid.touches_wall(1, 3));
    }
}

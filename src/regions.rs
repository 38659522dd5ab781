//! Connected region extraction and size filtering.
//!
//! Regions are 4-connected (no diagonals) sets of same-type cells found by
//! breadth-first flood fill in row-major discovery order.

use std::collections::VecDeque;

use log::{debug, info};

use crate::grid::{CaveGrid, Cell, Tile};
use crate::rooms::Room;
use crate::tilemap::Tilemap;

/// A 4-connected group of cells sharing one tile type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub tile: Tile,
    /// Cells in flood-fill order, starting at the first cell discovered.
    pub cells: Vec<Cell>,
}

impl Region {
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn touches_border(&self, grid: &CaveGrid) -> bool {
        self.cells.iter().any(|c| grid.is_edge(c.x, c.y))
    }
}

/// All regions of `tile`, partitioning its cells. Each cell is visited once.
pub fn find_regions(grid: &CaveGrid, tile: Tile) -> Vec<Region> {
    let mut visited: Tilemap<bool> = Tilemap::new(grid.width, grid.height);
    let mut regions = Vec::new();

    for y in 0..grid.height {
        for x in 0..grid.width {
            if *visited.get(x, y) || *grid.get(x, y) != tile {
                continue;
            }
            let cells = flood_fill(grid, &mut visited, Cell::new(x, y));
            regions.push(Region { tile, cells });
        }
    }

    regions
}

/// Collect the region containing `start`, marking its cells in `visited`.
fn flood_fill(grid: &CaveGrid, visited: &mut Tilemap<bool>, start: Cell) -> Vec<Cell> {
    let tile = *grid.get(start.x, start.y);
    let mut cells = Vec::new();
    let mut queue = VecDeque::new();

    queue.push_back(start);
    visited.set(start.x, start.y, true);

    while let Some(cell) = queue.pop_front() {
        cells.push(cell);

        for (nx, ny) in grid.neighbors(cell.x, cell.y) {
            if !*visited.get(nx, ny) && *grid.get(nx, ny) == tile {
                visited.set(nx, ny, true);
                queue.push_back(Cell::new(nx, ny));
            }
        }
    }

    cells
}

/// Convert interior wall regions smaller than `min_size` into floor.
///
/// Wall regions touching the map border are left alone so the border stays
/// solid. Returns the number of regions converted.
pub fn prune_wall_regions(grid: &mut CaveGrid, min_size: usize) -> usize {
    let mut pruned = 0;

    for region in find_regions(grid, Tile::Wall) {
        if region.size() >= min_size || region.touches_border(grid) {
            continue;
        }
        fill_region(grid, &region, Tile::Floor);
        pruned += 1;
    }

    debug!("pruned {} wall regions below {} cells", pruned, min_size);
    pruned
}

/// Convert floor regions smaller than `min_size` into wall and return the
/// survivors, in discovery order.
pub fn prune_room_regions(grid: &mut CaveGrid, min_size: usize) -> Vec<Region> {
    let mut survivors = Vec::new();
    let mut pruned = 0;

    for region in find_regions(grid, Tile::Floor) {
        if region.size() < min_size {
            fill_region(grid, &region, Tile::Wall);
            pruned += 1;
        } else {
            survivors.push(region);
        }
    }

    debug!("pruned {} floor regions below {} cells", pruned, min_size);
    survivors
}

fn fill_region(grid: &mut CaveGrid, region: &Region, tile: Tile) {
    for cell in &region.cells {
        grid.set(cell.x, cell.y, tile);
    }
}

/// Run both pruning passes (walls first, so tiny wall slivers don't split
/// what would otherwise be one room) and build a `Room` per surviving floor
/// region.
pub fn extract_rooms(grid: &mut CaveGrid, min_wall_size: usize, min_room_size: usize) -> Vec<Room> {
    prune_wall_regions(grid, min_wall_size);
    let regions = prune_room_regions(grid, min_room_size);

    let rooms: Vec<Room> = regions
        .into_iter()
        .map(|region| Room::new(region.cells, grid))
        .collect();

    info!(
        "found {} rooms ({} floor cells)",
        rooms.len(),
        rooms.iter().map(Room::size).sum::<usize>()
    );
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::parse_grid;
    use std::collections::HashSet;

    fn grid_from_rows(rows: &[&str]) -> CaveGrid {
        parse_grid(&rows.join("\n")).unwrap()
    }

    #[test]
    fn test_diagonal_cells_are_separate_regions() {
        let grid = grid_from_rows(&[
            "#####",
            "#.###",
            "##.##",
            "#####",
        ]);
        let rooms = find_regions(&grid, Tile::Floor);
        assert_eq!(rooms.len(), 2);
        assert!(rooms.iter().all(|r| r.size() == 1));
    }

    #[test]
    fn test_regions_partition_cells() {
        let grid = grid_from_rows(&[
            "#######",
            "#..#..#",
            "#..#.##",
            "####..#",
            "#.#####",
            "#######",
        ]);
        for tile in [Tile::Wall, Tile::Floor] {
            let regions = find_regions(&grid, tile);
            let mut seen = HashSet::new();
            for region in &regions {
                assert!(region.cells.iter().all(|c| *grid.get(c.x, c.y) == tile));
                for cell in &region.cells {
                    assert!(seen.insert(*cell), "{:?} appears twice", cell);
                }
            }
            assert_eq!(seen.len(), grid.count(tile));
        }
        assert_eq!(find_regions(&grid, Tile::Floor).len(), 3);
    }

    #[test]
    fn test_discovery_is_row_major() {
        let grid = grid_from_rows(&[
            "######",
            "#.##.#",
            "######",
            "#..###",
            "######",
        ]);
        let regions = find_regions(&grid, Tile::Floor);
        // y = 1 is scanned before y = 3
        assert_eq!(regions[0].cells[0], Cell::new(1, 1));
        assert_eq!(regions[1].cells[0], Cell::new(1, 3));
        assert_eq!(regions[2].cells[0], Cell::new(4, 3));
    }

    #[test]
    fn test_small_interior_wall_becomes_floor() {
        let mut grid = grid_from_rows(&[
            "#######",
            "#.....#",
            "#..#..#",
            "#.....#",
            "#######",
        ]);
        assert_eq!(prune_wall_regions(&mut grid, 2), 1);
        assert_eq!(*grid.get(3, 2), Tile::Floor);
        assert!(grid.border_is_solid());
    }

    #[test]
    fn test_border_wall_region_is_never_pruned() {
        let mut grid = grid_from_rows(&[
            "#####",
            "#...#",
            "#####",
        ]);
        assert_eq!(prune_wall_regions(&mut grid, 1000), 0);
        assert!(grid.border_is_solid());
    }

    #[test]
    fn test_small_room_becomes_wall() {
        let mut grid = grid_from_rows(&[
            "########",
            "#...##.#",
            "#...####",
            "#...####",
            "########",
        ]);
        let survivors = prune_room_regions(&mut grid, 2);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].size(), 9);
        assert_eq!(*grid.get(6, 3), Tile::Wall);
    }

    #[test]
    fn test_wall_pruning_merges_rooms_first() {
        // The wall ring encloses a one-cell pocket; removing the ring first
        // leaves a single room instead of pruning the pocket.
        let mut grid = grid_from_rows(&[
            "#######",
            "#.....#",
            "#.###.#",
            "#.#.#.#",
            "#.###.#",
            "#.....#",
            "#######",
        ]);
        let rooms = extract_rooms(&mut grid, 10, 4);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].size(), 25);
    }
}

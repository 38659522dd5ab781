//! Raw occupancy synthesis: seeded random fill followed by cellular automaton
//! smoothing.
//!
//! Every border cell starts as wall and the smoothing rule counts off-map
//! neighbours as walls, so erosion never eats into the border.

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{CaveError, Result};
use crate::grid::{CaveGrid, Tile};

/// Neighbour count at which a cell keeps its current state.
const SMOOTHING_PIVOT: usize = 4;

/// Produce a smoothed occupancy grid.
pub fn synthesize(
    width: usize,
    height: usize,
    fill_percent: u8,
    seed: u64,
    smoothing_iterations: u32,
) -> Result<CaveGrid> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = random_fill(width, height, fill_percent, &mut rng)?;

    for pass in 0..smoothing_iterations {
        let changed = smooth(&mut grid);
        debug!("smoothing pass {}: {} cells changed", pass + 1, changed);
        if changed == 0 {
            // Further passes would be no-ops.
            break;
        }
    }

    if grid.count(Tile::Floor) == 0 {
        warn!("synthesized {}x{} grid has no floor cells (fill {}%)", width, height, fill_percent);
    }

    Ok(grid)
}

/// Border cells become walls; interior cells are walls when a uniform draw in
/// `0..100` falls below `fill_percent`.
pub fn random_fill(
    width: usize,
    height: usize,
    fill_percent: u8,
    rng: &mut ChaCha8Rng,
) -> Result<CaveGrid> {
    if width < 3 || height < 3 {
        return Err(CaveError::InvalidDimension { width, height });
    }
    if fill_percent > 100 {
        return Err(CaveError::InvalidFillPercent(fill_percent));
    }

    let mut grid = CaveGrid::new_with(width, height, Tile::Wall);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let roll: u8 = rng.gen_range(0..100);
            let tile = if roll < fill_percent { Tile::Wall } else { Tile::Floor };
            grid.set(x, y, tile);
        }
    }

    Ok(grid)
}

/// One in-place smoothing pass in row-major order. Returns the number of
/// cells that flipped.
pub fn smooth(grid: &mut CaveGrid) -> usize {
    let mut changed = 0;

    for y in 0..grid.height {
        for x in 0..grid.width {
            let walls = count_wall_neighbors(grid, x, y);
            let next = if walls > SMOOTHING_PIVOT {
                Tile::Wall
            } else if walls < SMOOTHING_PIVOT {
                Tile::Floor
            } else {
                continue;
            };

            if *grid.get(x, y) != next {
                grid.set(x, y, next);
                changed += 1;
            }
        }
    }

    changed
}

/// Walls among the 8 surrounding cells; off-map cells count as walls.
pub fn count_wall_neighbors(grid: &CaveGrid, x: usize, y: usize) -> usize {
    let mut count = 0;

    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            match grid.get_checked(x as i64 + dx, y as i64 + dy) {
                Some(tile) if !tile.is_wall() => {}
                _ => count += 1,
            }
        }
    }

    count
}

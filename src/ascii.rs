//! ASCII rendering and parsing of cave grids.
//!
//! Rows are written top-down (highest `y` first) so the text reads the same
//! way the mesh is laid out in world space.

use crate::error::{CaveError, Result};
use crate::grid::{CaveGrid, Tile};
use crate::rooms::Room;

pub const WALL_CHAR: char = '#';
pub const FLOOR_CHAR: char = '.';

/// Characters used to tell rooms apart in `render_rooms`.
const ROOM_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

pub fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Wall => WALL_CHAR,
        Tile::Floor => FLOOR_CHAR,
    }
}

/// Render the grid with `#` for walls and `.` for floor.
pub fn render_grid(grid: &CaveGrid) -> String {
    let mut out = String::with_capacity((grid.width + 1) * grid.height);
    for y in (0..grid.height).rev() {
        for x in 0..grid.width {
            out.push(tile_char(*grid.get(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Render the grid with each room drawn in its own letter.
///
/// The main room is drawn as `@`; tunnel floor that belongs to no room stays `.`.
pub fn render_rooms(grid: &CaveGrid, rooms: &[Room], main_room: usize) -> String {
    let mut chars = grid.map(|tile| tile_char(*tile));

    for (i, room) in rooms.iter().enumerate() {
        let ch = if i == main_room {
            '@'
        } else {
            ROOM_CHARS[i % ROOM_CHARS.len()] as char
        };
        for cell in &room.cells {
            chars.set(cell.x, cell.y, ch);
        }
    }

    let mut out = String::with_capacity((grid.width + 1) * grid.height);
    for y in (0..grid.height).rev() {
        for x in 0..grid.width {
            out.push(*chars.get(x, y));
        }
        out.push('\n');
    }
    out
}

/// Parse text produced by `render_grid`. Any character other than `#` is floor.
pub fn parse_grid(text: &str) -> Result<CaveGrid> {
    let rows: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let height = rows.len();
    let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);

    if width < 3 || height < 3 {
        return Err(CaveError::InvalidDimension { width, height });
    }

    let mut grid = CaveGrid::new_with(width, height, Tile::Wall);
    for (row_idx, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(CaveError::Parse(format!(
                "row {} has {} cells, expected {}",
                row_idx,
                row.chars().count(),
                width
            )));
        }
        let y = height - 1 - row_idx;
        for (x, ch) in row.chars().enumerate() {
            if ch != WALL_CHAR {
                grid.set(x, y, Tile::Floor);
            }
        }
    }

    Ok(grid)
}

//! File exports: mesh JSON and grid PNG previews.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;

use crate::error::Result;
use crate::grid::{CaveGrid, Tile};
use crate::mesh::CaveMesh;
use crate::rooms::Room;

const WALL_COLOR: [u8; 3] = [38, 34, 32];
const FLOOR_COLOR: [u8; 3] = [196, 186, 168];
const MAIN_ROOM_COLOR: [u8; 3] = [150, 196, 150];
const EDGE_COLOR: [u8; 3] = [214, 120, 72];

/// Write vertices, triangles and outlines as pretty JSON.
pub fn export_mesh_json(mesh: &CaveMesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, mesh)?;
    info!(
        "wrote mesh ({} vertices, {} triangles) to {}",
        mesh.vertices.len(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

/// Render the grid to an RGB image, `scale` pixels per cell.
///
/// Walls are dark and floor is light. Main room cells get a green tint and
/// room edge cells are highlighted. Image rows run top-down, so grid row
/// `height - 1` is drawn first.
pub fn render_grid_image(grid: &CaveGrid, rooms: &[Room], scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let mut colors = grid.map(|tile| match tile {
        Tile::Wall => WALL_COLOR,
        Tile::Floor => FLOOR_COLOR,
    });

    for room in rooms {
        if room.is_main_room {
            for cell in room.interior_cells() {
                colors.set(cell.x, cell.y, MAIN_ROOM_COLOR);
            }
        }
        for cell in &room.edge_cells {
            colors.set(cell.x, cell.y, EDGE_COLOR);
        }
    }

    let width = grid.width as u32 * scale;
    let height = grid.height as u32 * scale;
    let mut img: RgbImage = ImageBuffer::new(width, height);
    for py in 0..height {
        for px in 0..width {
            let x = (px / scale) as usize;
            let y = grid.height - 1 - (py / scale) as usize;
            img.put_pixel(px, py, Rgb(*colors.get(x, y)));
        }
    }
    img
}

/// Save a PNG preview of the grid.
pub fn export_grid_png(
    grid: &CaveGrid,
    rooms: &[Room],
    path: impl AsRef<Path>,
    scale: u32,
) -> Result<()> {
    let path = path.as_ref();
    let img = render_grid_image(grid, rooms, scale);
    img.save(path)?;
    info!("wrote {}x{} preview to {}", img.width(), img.height(), path.display());
    Ok(())
}

//! Cave generation pipeline.
//!
//! Stages run to completion one after another:
//! 1. Synthesize a smoothed random occupancy grid
//! 2. Prune small wall regions, then small floor regions, and build rooms
//! 3. Pick the largest room as the main room
//! 4. Carve tunnels until every room can reach the main room
//!
//! The finalized grid can then be triangulated into a mesh with outlines.
//! Any error aborts the run; no partially processed grid is returned.

use log::info;
use serde::Serialize;

use crate::config::CaveConfig;
use crate::error::Result;
use crate::grid::CaveGrid;
use crate::mesh::{generate_mesh, CaveMesh};
use crate::regions::extract_rooms;
use crate::rooms::{connect_rooms, select_main_room, Room, Tunnel};
use crate::synthesis::synthesize;

/// A finished cave: the walled grid and the rooms carved into it.
#[derive(Clone, Debug, Serialize)]
pub struct Cave {
    /// Seed actually used, so random-mode runs can be replayed.
    pub seed: u64,
    pub grid: CaveGrid,
    pub rooms: Vec<Room>,
    pub main_room: usize,
    pub tunnels: Vec<Tunnel>,
}

impl Cave {
    pub fn main_room(&self) -> &Room {
        &self.rooms[self.main_room]
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Triangulate the finalized grid.
    pub fn mesh(&self, square_size: f32) -> Result<CaveMesh> {
        generate_mesh(&self.grid, square_size)
    }

    /// Whether every room can reach the main room.
    pub fn is_fully_connected(&self) -> bool {
        self.rooms.iter().all(|r| r.is_accessible_from_main_room)
    }
}

/// Run the grid pipeline for one config.
pub fn generate(config: &CaveConfig) -> Result<Cave> {
    config.validate()?;
    let seed = config.seed.resolve();
    info!(
        "generating {}x{} cave with seed {} (fill {}%, {} smoothing passes)",
        config.width, config.height, seed, config.fill_percent, config.smoothing_iterations
    );

    let mut grid = synthesize(
        config.width,
        config.height,
        config.fill_percent,
        seed,
        config.smoothing_iterations,
    )?;

    let mut rooms = extract_rooms(
        &mut grid,
        config.min_wall_region_size,
        config.min_room_region_size,
    );
    let main_room = select_main_room(&rooms)?;
    info!("main room {} has {} cells", main_room, rooms[main_room].size());

    let tunnels = connect_rooms(&mut grid, &mut rooms, main_room);

    Ok(Cave {
        seed,
        grid,
        rooms,
        main_room,
        tunnels,
    })
}

/// Run the full pipeline including triangulation.
pub fn generate_with_mesh(config: &CaveConfig) -> Result<(Cave, CaveMesh)> {
    let cave = generate(config)?;
    let mesh = cave.mesh(config.square_size)?;
    Ok((cave, mesh))
}

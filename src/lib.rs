//! Procedural cave generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod mesh;
pub mod regions;
pub mod rooms;
pub mod synthesis;
pub mod tilemap;

pub use config::{CaveConfig, SeedSetting};
pub use error::{CaveError, Result};
pub use generator::{generate, generate_with_mesh, Cave};
pub use grid::{CaveGrid, Cell, Tile};
pub use mesh::{generate_mesh, CaveMesh};

use clap::Parser;

use cave_generator::config::{CaveConfig, SeedSetting};
use cave_generator::{ascii, export, generator};

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate procedural 2D caves with cellular automata and marching squares")]
struct Args {
    /// Load base settings from a JSON config file
    #[arg(long)]
    config: Option<String>,

    /// Width of the map in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Initial wall chance in percent (0-100)
    #[arg(long)]
    fill: Option<u8>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of smoothing passes
    #[arg(long)]
    smoothing: Option<u32>,

    /// Wall regions smaller than this become floor
    #[arg(long)]
    min_wall: Option<usize>,

    /// Floor regions smaller than this become wall
    #[arg(long)]
    min_room: Option<usize>,

    /// World-space size of one mesh square
    #[arg(long)]
    square_size: Option<f32>,

    /// Export the triangulated mesh to JSON (e.g., "cave.json")
    #[arg(long)]
    export_mesh: Option<String>,

    /// Export a PNG preview of the grid
    #[arg(long)]
    export_png: Option<String>,

    /// Pixels per cell in the PNG preview
    #[arg(long, default_value = "4")]
    png_scale: u32,

    /// Print the room map to stdout
    #[arg(long)]
    ascii: bool,
}

impl Args {
    /// Start from the config file (or defaults) and apply command line overrides.
    fn build_config(&self) -> cave_generator::Result<CaveConfig> {
        let mut config = match &self.config {
            Some(path) => CaveConfig::from_json_file(path)?,
            None => CaveConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fill) = self.fill {
            config.fill_percent = fill;
        }
        if let Some(seed) = self.seed {
            config.seed = SeedSetting::Fixed(seed);
        }
        if let Some(smoothing) = self.smoothing {
            config.smoothing_iterations = smoothing;
        }
        if let Some(min_wall) = self.min_wall {
            config.min_wall_region_size = min_wall;
        }
        if let Some(min_room) = self.min_room {
            config.min_room_region_size = min_room;
        }
        if let Some(square_size) = self.square_size {
            config.square_size = square_size;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.build_config()?;

    println!("Map size: {}x{}", config.width, config.height);
    println!("Generating cave...");
    let (cave, mesh) = generator::generate_with_mesh(&config)?;
    println!("Seed: {}", cave.seed);

    let floor = cave.grid.count(cave_generator::Tile::Floor);
    println!(
        "Floor: {} cells ({:.1}%)",
        floor,
        100.0 * floor as f64 / (config.width * config.height) as f64
    );
    println!(
        "Rooms: {} (main room {} with {} cells), {} tunnels carved",
        cave.rooms.len(),
        cave.main_room,
        cave.main_room().size(),
        cave.tunnels.len()
    );
    println!(
        "Mesh: {} vertices, {} triangles, {} outlines",
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.outlines.len()
    );

    if args.ascii {
        println!();
        println!("{}", ascii::render_rooms(&cave.grid, &cave.rooms, cave.main_room));
    }

    if let Some(path) = &args.export_mesh {
        export::export_mesh_json(&mesh, path)?;
        println!("Exported mesh to: {}", path);
    }

    if let Some(path) = &args.export_png {
        export::export_grid_png(&cave.grid, &cave.rooms, path, args.png_scale)?;
        println!("Exported preview to: {}", path);
    }

    Ok(())
}

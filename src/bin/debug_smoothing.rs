//! Debug tool for watching the cellular automaton settle.
//! Renders the random fill and every smoothing pass side by side in one PNG.

use cave_generator::export::render_grid_image;
use cave_generator::grid::Tile;
use cave_generator::synthesis::{random_fill, smooth};
use clap::Parser;
use image::{ImageBuffer, Rgb, RgbImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const GAP: u32 = 4;

#[derive(Parser, Debug)]
#[command(name = "debug_smoothing")]
#[command(about = "Render each smoothing pass of a cave grid side by side")]
struct Args {
    #[arg(short = 'W', long, default_value = "96")]
    width: usize,

    #[arg(short = 'H', long, default_value = "54")]
    height: usize,

    #[arg(long, default_value = "47")]
    fill: u8,

    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of smoothing passes to render after the raw fill
    #[arg(long, default_value = "5")]
    passes: u32,

    /// Pixels per cell
    #[arg(long, default_value = "3")]
    scale: u32,

    #[arg(short, long, default_value = "smoothing_passes.png")]
    output: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    println!("Rendering {} smoothing passes (seed {})...", args.passes, args.seed);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut grid = random_fill(args.width, args.height, args.fill, &mut rng)?;

    let mut frames = vec![render_grid_image(&grid, &[], args.scale)];
    for pass in 1..=args.passes {
        let changed = smooth(&mut grid);
        println!(
            "  Pass {}: {} cells changed, {} floor",
            pass,
            changed,
            grid.count(Tile::Floor)
        );
        frames.push(render_grid_image(&grid, &[], args.scale));
    }

    let strip = create_strip(&frames);
    strip.save(&args.output)?;
    println!("Saved {}", args.output);
    Ok(())
}

fn create_strip(frames: &[RgbImage]) -> RgbImage {
    if frames.is_empty() {
        return ImageBuffer::new(1, 1);
    }

    let cell_width = frames[0].width();
    let cell_height = frames[0].height();
    let count = frames.len() as u32;
    let strip_width = cell_width * count + GAP * (count - 1);

    let mut strip: RgbImage = ImageBuffer::from_pixel(strip_width, cell_height, Rgb([255, 0, 255]));
    for (idx, frame) in frames.iter().enumerate() {
        let x_offset = idx as u32 * (cell_width + GAP);
        for y in 0..cell_height {
            for x in 0..cell_width {
                strip.put_pixel(x_offset + x, y, *frame.get_pixel(x, y));
            }
        }
    }
    strip
}

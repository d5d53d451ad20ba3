//! gen_terrain.rs - one-shot CLI writing a procedural colour/height map pair
//! loadable by `view_sw --color … --height-map …`.
//!
//! USAGE:
//! ```bash
//! cargo run --bin gen_terrain -- \
//!     --size 1024 --seed 7 \
//!     --out-dir ./maps
//! ```

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use std::{fs, path::PathBuf};

use voxspace_rs::{
    assets::{height_image, rgba_from_pixels},
    world::terrain_gen,
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Edge length in cells (power of two)
    #[arg(long, default_value_t = 1024)]
    size: usize,

    /// Noise seed
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Directory receiving `color.png` and `height.png`
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    if !opts.size.is_power_of_two() {
        bail!("--size must be a power of two, got {}", opts.size);
    }

    let heights = terrain_gen::height_map(opts.size, opts.seed);
    let colors = terrain_gen::color_map(&heights, opts.size, opts.seed);

    fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("creating {}", opts.out_dir.display()))?;
    let side = opts.size as u32;

    let color_path = opts.out_dir.join("color.png");
    rgba_from_pixels(side, side, &colors)
        .save(&color_path)
        .with_context(|| format!("writing {}", color_path.display()))?;

    let height_path = opts.out_dir.join("height.png");
    height_image(side, &heights)
        .save(&height_path)
        .with_context(|| format!("writing {}", height_path.display()))?;

    info!("wrote {} and {}", color_path.display(), height_path.display());
    println!("{side}x{side} terrain (seed {}) written to {}", opts.seed, opts.out_dir.display());
    Ok(())
}

//! Glint command line renderer.
//!
//! Usage: `glint <scene.json> <out.png> [width height]`

use std::time::Instant;

use anyhow::{bail, Context, Result};
use glint_renderer::Raytracer;

const DEFAULT_SIZE: u32 = 400;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 && args.len() != 4 {
        bail!("usage: glint <scene.json> <out.png> [width height]");
    }

    let scene_path = &args[0];
    let out_path = &args[1];
    let (width, height) = if args.len() == 4 {
        (parse_dimension(&args[2])?, parse_dimension(&args[3])?)
    } else {
        (DEFAULT_SIZE, DEFAULT_SIZE)
    };

    let start = Instant::now();
    let raytracer = Raytracer::from_file(scene_path)
        .with_context(|| format!("failed to load scene {scene_path}"))?;

    raytracer
        .render_to_file(width, height, out_path)
        .with_context(|| format!("failed to render to {out_path}"))?;

    log::info!("done in {:.2?}", start.elapsed());
    Ok(())
}

fn parse_dimension(arg: &str) -> Result<u32> {
    let value: u32 = arg
        .parse()
        .with_context(|| format!("invalid image dimension '{arg}'"))?;
    if value == 0 {
        bail!("image dimensions must be positive");
    }
    Ok(value)
}

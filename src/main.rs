//! Headless snapshot: render one frame of the stock scene to a PNG.
//!
//! ```bash
//! cargo run --release --bin voxspace_rs -- --out frame.png --yaw 0.8 --scope
//! ```

use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use voxspace_rs::{
    assets::rgba_from_pixels,
    config::{ScopeConfig, ScopeKind},
    demo::{Demo, TerrainSource},
    renderer::{
        FrameBuffer, Renderer, RendererExt, Scene, Software,
        software::{Mesh, ViewModel},
    },
    scope,
    world::Asset,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Output image
    #[arg(long, value_name = "FILE", default_value = "frame.png")]
    out: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    #[arg(long, default_value_t = 1024)]
    size: usize,

    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Heading in radians
    #[arg(long, default_value_t = 0.0)]
    yaw: f32,

    /// Composite a fully zoomed scope view
    #[arg(long)]
    scope: bool,

    #[arg(long, value_enum, default_value_t = ScopeKind::Crop)]
    scope_kind: ScopeKind,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let demo = Demo::build(&TerrainSource::Generated {
        size: opts.size,
        seed: opts.seed,
    })?;
    let mut camera = demo.spawn_camera();
    camera.set_yaw(opts.yaw);
    camera.rescale_horizon(600, opts.height);

    let scene = Scene {
        solids: &demo.world.solids,
        items: &demo.items,
        ..Scene::new(&demo.world.heightfield, &demo.bank)
    };

    let mut renderer = Software::default();
    let mut fb = FrameBuffer::new(opts.width, opts.height);
    renderer.draw_scene(&mut fb, &camera, &scene);

    if opts.scope {
        let mut scope = scope::from_config(&ScopeConfig {
            kind: opts.scope_kind,
            ..ScopeConfig::default()
        });
        // let the easing settle
        for _ in 0..60 {
            scope.update_camera(true, true);
        }
        scope.render(&mut fb, &camera, &mut |target, cam| {
            renderer.draw_scene(target, cam, &scene)
        });
    } else {
        ViewModel::new(Mesh::box_gun(), Asset::Pending).draw(&mut fb);
    }

    let mut image = None;
    renderer.end_frame(&fb, |buf, w, h| {
        image = Some(rgba_from_pixels(w as u32, h as u32, buf));
    });
    let image = image.context("renderer produced no frame")?;
    image
        .save(&opts.out)
        .with_context(|| format!("writing {}", opts.out.display()))?;
    info!("snapshot written to {}", opts.out.display());
    Ok(())
}

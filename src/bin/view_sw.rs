//! Interactive software-rendered fly-over.
//!
//! Controls  W/S forward · A/D strafe · ←/→ turn · PgUp/PgDn look
//!           Space fire · right mouse / Z aim · wheel zoom · Tab scope mode
//!           Esc quit
//!
//! Build:  cargo run --release --bin view_sw -- [--color c.png --height-map h.png]

use clap::Parser;
use log::{debug, info};
use minifb::{Key, KeyRepeat, MouseButton, Window, WindowOptions};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use voxspace_rs::{
    assets,
    config::{ScopeConfig, ScopeKind},
    demo::{Demo, TerrainSource},
    renderer::{
        FrameBuffer, Renderer, RendererExt, Scene, Software,
        software::{Mesh, ViewModel, ViewPose},
    },
    scope::{self, ScopeMode},
    world::{Asset, SpriteItem},
};

const MOVE_SPEED: f32 = 3.0;
const TURN_SPEED: f32 = 0.04;
const LOOK_SPEED: f32 = 6.0;
const BULLET_SPEED: f32 = 12.0;
const BULLET_RANGE: f32 = 1500.0;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    #[arg(long, default_value_t = 800)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Colour map (needs --height-map)
    #[arg(long, value_name = "FILE", requires = "height_map")]
    color: Option<PathBuf>,

    /// Greyscale height map (needs --color)
    #[arg(long, value_name = "FILE", requires = "color")]
    height_map: Option<PathBuf>,

    /// Edge length of the generated terrain when no maps are given
    #[arg(long, default_value_t = 1024)]
    size: usize,

    #[arg(long, default_value_t = 1)]
    seed: u32,

    #[arg(long, value_enum, default_value_t = ScopeKind::Crop)]
    scope: ScopeKind,

    /// Image used to colour the weapon (flat grey without it)
    #[arg(long, value_name = "FILE")]
    gun_skin: Option<PathBuf>,
}

struct Bullet {
    item: SpriteItem,
    travelled: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let source = match (opts.color, opts.height_map) {
        (Some(color), Some(height)) => TerrainSource::Files { color, height },
        _ => TerrainSource::Generated {
            size: opts.size,
            seed: opts.seed,
        },
    };
    let demo = Demo::build(&source)?;
    let mut camera = demo.spawn_camera();

    let mut scope_cfg = ScopeConfig {
        kind: opts.scope,
        ..ScopeConfig::default()
    };
    let mut scope = scope::from_config(&scope_cfg);

    let mut renderer = Software::default();
    let mut fb = FrameBuffer::new(opts.width, opts.height);
    let skin = match &opts.gun_skin {
        Some(path) => Asset::Ready(assets::load_texture(path)?),
        None => Asset::Pending,
    };
    let mut gun = ViewModel::new(Mesh::box_gun(), skin);
    let mut bullets: Vec<Bullet> = Vec::new();
    let mut aiming = false;
    camera.rescale_horizon(600, opts.height);
    // horizon row of a level view, kept in step with resizes
    let mut level_horizon = camera.horizon;

    let mut win = Window::new(
        "voxspace software render",
        opts.width,
        opts.height,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now(); // ┌─ frame timer start

        /* viewport ---------------------------------------------------------- */
        let (w, h) = win.get_size();
        if (w, h) != (fb.width, fb.height) && w > 0 && h > 0 {
            camera.rescale_horizon(fb.height, h);
            if fb.height > 0 {
                level_horizon *= h as f32 / fb.height as f32;
            }
            fb.resize(w, h);
        }

        /* movement --------------------------------------------------------- */
        let mut fwd = 0.0;
        let mut side = 0.0;
        if win.is_key_down(Key::W) || win.is_key_down(Key::Up) {
            fwd += MOVE_SPEED;
        }
        if win.is_key_down(Key::S) || win.is_key_down(Key::Down) {
            fwd -= MOVE_SPEED;
        }
        if win.is_key_down(Key::A) {
            side -= MOVE_SPEED;
        }
        if win.is_key_down(Key::D) {
            side += MOVE_SPEED;
        }
        if win.is_key_down(Key::Left) {
            camera.turn(TURN_SPEED);
        }
        if win.is_key_down(Key::Right) {
            camera.turn(-TURN_SPEED);
        }
        if win.is_key_down(Key::PageUp) {
            camera.horizon += LOOK_SPEED;
        }
        if win.is_key_down(Key::PageDown) {
            camera.horizon -= LOOK_SPEED;
        }
        camera.step(fwd, side);
        camera.pos.z = demo.world.ground_height(camera.pos.x, camera.pos.y);

        /* actions ---------------------------------------------------------- */
        if win.is_key_pressed(Key::Z, KeyRepeat::No) {
            aiming = !aiming;
        }
        let aim_held = win.get_mouse_down(MouseButton::Right);
        let scoped = aiming || aim_held;

        if let Some((_, dy)) = win.get_scroll_wheel() {
            let before = scope.zoom_index();
            scope.handle_zoom(-dy);
            if scope.zoom_index() != before {
                let levels = scope.target().levels();
                let i = scope.zoom_index();
                debug!("zoom {}x ({}/{})", levels[i], i + 1, levels.len());
            }
        }
        if win.is_key_pressed(Key::Tab, KeyRepeat::No) {
            scope_cfg.kind = match scope_cfg.kind {
                ScopeKind::Crop => ScopeKind::Forward,
                ScopeKind::Forward => ScopeKind::Crop,
            };
            scope = scope::from_config(&scope_cfg);
        }
        if win.is_key_pressed(Key::Space, KeyRepeat::No) {
            bullets.push(Bullet {
                item: demo.fire(&camera, BULLET_SPEED, level_horizon),
                travelled: 0.0,
            });
        }

        for b in &mut bullets {
            b.item.pos += b.item.vel;
            b.travelled += b.item.vel.length();
        }
        bullets.retain(|b| b.travelled < BULLET_RANGE);
        let tracers: Vec<SpriteItem> = bullets.iter().map(|b| b.item).collect();

        /* draw ------------------------------------------------------------- */
        let scene = Scene {
            solids: &demo.world.solids,
            items: &demo.items,
            extra_items: &tracers,
            ..Scene::new(&demo.world.heightfield, &demo.bank)
        };
        renderer.draw_scene(&mut fb, &camera, &scene);

        scope.update_camera(scoped, true);
        gun.pose = if scoped {
            ViewPose::aimed()
        } else {
            ViewPose::hip()
        };
        let drew_scope = scope.render(&mut fb, &camera, &mut |target, cam| {
            renderer.draw_scene(target, cam, &scene)
        });
        if !drew_scope {
            gun.draw(&mut fb);
        }

        let mut presented = Ok(());
        renderer.end_frame(&fb, |buf, w, h| {
            // ─────────── accumulate & report every ~3 s ────────────────────
            acc_time += t0.elapsed();
            acc_frames += 1;
            presented = win.update_with_buffer(buf, w, h);
        });
        presented?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

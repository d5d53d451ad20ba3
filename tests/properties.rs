//! Invariants every frame must hold, checked on small synthetic worlds.

use glam::{vec2, vec3};

use voxspace_rs::{
    renderer::{
        FrameBuffer, Passes, Projector, RendererExt, Scene, Software,
        software::raster::{ScreenVertex, draw_textured_triangle},
    },
    world::{
        Asset, Camera, Heightfield, SpriteItem, SpriteKind, Texture, TextureBank, World,
        terrain_gen,
    },
};

const GROUND: u32 = 0xFF_40_60_20;
const SPRITE: u32 = 0xFF_EE_11_EE;

#[test]
fn projection_is_monotonic_in_distance_and_height() {
    let cam = Camera::new(vec3(0.0, 0.0, 50.0), 0.0);
    let p = Projector::new(&cam, 320);

    let mut last_x = f32::INFINITY;
    let mut last_y = f32::INFINITY;
    for d in [10.0, 20.0, 40.0, 80.0, 160.0] {
        let s = p.project(vec3(5.0, -d, 0.0)).unwrap();
        assert!(s.x < last_x && s.x > 160.0, "offset shrinks toward centre");
        assert!(s.y < last_y, "ground rises toward the horizon");
        last_x = s.x;
        last_y = s.y;
    }

    let mut last = f32::NEG_INFINITY;
    for z in [100.0, 60.0, 20.0, 0.0] {
        let s = p.project(vec3(0.0, -30.0, z)).unwrap();
        assert!(s.y > last);
        last = s.y;
    }
}

#[test]
fn screen_x_increases_with_right_offset_at_fixed_distance() {
    for yaw in [0.0, 0.9, 2.5, 4.0, 5.8] {
        let cam = Camera::new(vec3(120.0, -35.0, 60.0), yaw);
        let p = Projector::new(&cam, 320);
        let (fwd, right) = (cam.forward(), cam.right());

        for forward in [0.5, 5.0, 50.0, 400.0] {
            let mut last = f32::NEG_INFINITY;
            for step in -10..=10 {
                let r = step as f32 * 10.0;
                let ground = cam.pos.truncate() + fwd * forward + right * r;
                let s = p.project(ground.extend(0.0)).unwrap();
                assert!(s.x > last, "yaw {yaw} forward {forward} right {r}");
                last = s.x;
            }
        }
    }
}

/// Cell the terrain march samples for column `col` of the slice at `z`,
/// and the screen row its top projects to, with the march's own arithmetic.
fn marched_cell(hf: &Heightfield, cam: &Camera, width: usize, col: usize, z: f32) -> (u32, f32) {
    let (sin, cos) = cam.yaw().sin_cos();
    let mut lx = -cos * z - sin * z + cam.pos.x;
    let mut ly = sin * z - cos * z + cam.pos.y;
    let rx = cos * z - sin * z + cam.pos.x;
    let ry = -sin * z - cos * z + cam.pos.y;
    let step_x = (rx - lx) / width as f32;
    let step_y = (ry - ly) / width as f32;
    for _ in 0..col {
        lx += step_x;
        ly += step_y;
    }
    let (alt, color) = hf.cell(hf.offset(lx, ly));
    let row = (cam.pos.z - alt as f32) * (cam.focal / z) + cam.horizon;
    (color, row)
}

#[test]
fn terrain_depth_maps_back_to_its_row() {
    let hf = terrain_gen::generate(128, 9).unwrap();
    let bank = TextureBank::default();
    let scene = Scene {
        passes: Passes::TERRAIN,
        ..Scene::new(&hf, &bank)
    };
    let mut renderer = Software::default();

    for yaw in [0.0, 2.2, 3.9] {
        let cam = Camera::new(vec3(17.0, 90.0, 180.0), yaw)
            .with_horizon(25.0)
            .with_distance(600.0);
        let mut fb = FrameBuffer::new(64, 48);
        renderer.draw_scene(&mut fb, &cam, &scene);

        let mut run_tops = 0;
        for x in 0..fb.width {
            for y in 0..fb.height {
                let z = fb.depth_at(x, y);
                if z.is_infinite() {
                    continue;
                }
                let (color, row) = marched_cell(&hf, &cam, fb.width, x, z);
                assert_eq!(fb.pixel(x, y), color, "({x},{y}) depth {z}");
                // a slice fills from its surface row downwards
                assert!(row < y as f32 + 1.0, "({x},{y}) row {row}");
                if y > 0 && fb.depth_at(x, y - 1) != z {
                    assert!((row - y as f32).abs() <= 1.0, "({x},{y}) row {row}");
                    run_tops += 1;
                }
            }
        }
        assert!(run_tops > 0);
    }
}

#[test]
fn terrain_fills_each_column_contiguously_from_the_bottom() {
    let hf = terrain_gen::generate(128, 5).unwrap();
    let bank = TextureBank::default();
    let scene = Scene {
        passes: Passes::TERRAIN,
        ..Scene::new(&hf, &bank)
    };
    let mut renderer = Software::default();

    for yaw in [0.0, 1.3, 2.9, 4.4] {
        let cam = Camera::new(vec3(40.0, 70.0, 200.0), yaw).with_horizon(30.0);
        let mut fb = FrameBuffer::new(80, 60);
        renderer.draw_scene(&mut fb, &cam, &scene);

        for x in 0..fb.width {
            let top = fb.hidden_y[x].max(0) as usize;
            for y in 0..fb.height {
                let d = fb.depth_at(x, y);
                if y < top {
                    assert!(d.is_infinite(), "({x},{y}) above the cursor");
                } else {
                    assert!(d.is_finite() && d >= 1.0, "({x},{y}) below the cursor");
                }
            }
            // farther up the column never gets nearer
            for y in top + 1..fb.height {
                assert!(fb.depth_at(x, y) <= fb.depth_at(x, y - 1));
            }
        }
    }
}

#[test]
fn drawing_a_triangle_twice_changes_nothing() {
    let tex = Asset::Ready(Texture::solid("T", 8, 8, 0xFF_12_34_56));
    let tri = [
        ScreenVertex { x: 3.2, y: 1.1, inv_z: 0.02, u: 0.0, v: 0.0 },
        ScreenVertex { x: 60.7, y: 20.3, inv_z: 0.05, u: 1.0, v: 0.0 },
        ScreenVertex { x: 12.4, y: 47.9, inv_z: 0.01, u: 0.0, v: 1.0 },
    ];
    let mut fb = FrameBuffer::new(64, 48);
    fb.clear(0);
    draw_textured_triangle(&mut fb, tri, &tex, 0.8, 0.5);
    let (color, depth) = (fb.color.clone(), fb.depth.clone());
    draw_textured_triangle(&mut fb, tri, &tex, 0.8, 0.5);
    assert_eq!(fb.color, color);
    assert_eq!(fb.depth, depth);
}

#[test]
fn heightfield_lookups_wrap_in_both_directions() {
    let hf = terrain_gen::generate(64, 11).unwrap();
    for (x, y) in [(0.0, 0.0), (3.5, 60.2), (63.9, 17.0)] {
        let h = hf.height_at(x, y);
        let c = hf.color_at(x, y);
        for (dx, dy) in [(64.0, 0.0), (0.0, -64.0), (-128.0, 192.0)] {
            assert_eq!(hf.height_at(x + dx, y + dy), h);
            assert_eq!(hf.color_at(x + dx, y + dy), c);
        }
    }
}

/// Flat ground at 0 with a tall ridge across the whole map 38..42 units in
/// front of a camera at the origin looking down −Y.
fn ridge_world() -> Heightfield {
    let size = 64;
    let mut alt = vec![0u8; size * size];
    for y in 22..=26 {
        alt[y * size..(y + 1) * size].fill(60);
    }
    Heightfield::from_parts(size, alt, vec![GROUND; size * size]).unwrap()
}

fn sprite_visible(distance: f32) -> bool {
    let hf = ridge_world();
    let mut bank = TextureBank::default();
    let tex = bank.insert("S", Texture::solid("S", 4, 4, SPRITE)).unwrap();
    let items = [SpriteItem::new(SpriteKind::Pickup, vec3(0.0, -distance, 0.0), tex)];
    let scene = Scene {
        items: &items,
        ..Scene::new(&hf, &bank)
    };
    let cam = Camera::new(vec3(0.0, 0.0, 10.0), 0.0)
        .with_focal(100.0)
        .with_horizon(60.0);
    let mut fb = FrameBuffer::new(160, 120);
    Software::default().draw_scene(&mut fb, &cam, &scene);
    fb.color.contains(&SPRITE)
}

#[test]
fn terrain_hides_sprites_behind_it_but_not_in_front() {
    assert!(!sprite_visible(50.0));
    assert!(sprite_visible(30.0));
}

#[test]
fn standing_on_a_box_raises_the_eye() {
    let mut world = World::new(Heightfield::flat(64, 12, GROUND).unwrap());
    let before = world.ground_height(32.0, 32.0);
    world.place_solid(voxspace_rs::world::SolidBox::cube(vec2(32.0, 32.0), 10.0, 0));
    assert_eq!(world.ground_height(32.0, 32.0), before + 10.0);
    assert_eq!(world.ground_height(5.0, 5.0), before);
}

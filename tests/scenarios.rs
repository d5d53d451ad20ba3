//! End-to-end frames on tiny buffers with synthetic worlds.

use glam::{Vec3, vec2, vec3};

use voxspace_rs::{
    config::{BACKGROUND, ScopeConfig},
    renderer::{FrameBuffer, Passes, RendererExt, Scene, Software},
    scope::{self, CropZoom, ScopeMode},
    world::{Camera, Heightfield, SolidBox, SpriteItem, SpriteKind, Texture, TextureBank},
};

const GRASS: u32 = 0xFF_20_80_20;
const NEAR_RED: u32 = 0xFF_FF_00_00;
const FAR_BLUE: u32 = 0xFF_00_00_FF;

fn flat(height: u8) -> Heightfield {
    Heightfield::flat(256, height, GRASS).unwrap()
}

#[test]
fn flat_terrain_fills_exactly_below_the_horizon() {
    let hf = flat(0);
    let bank = TextureBank::default();
    let camera = Camera::new(vec3(0.0, 0.0, 1.0), 0.0)
        .with_horizon(24.0)
        .with_focal(300.0);
    let mut fb = FrameBuffer::new(64, 48);
    let scene = Scene {
        passes: Passes::TERRAIN,
        ..Scene::new(&hf, &bank)
    };
    Software::default().draw_scene(&mut fb, &camera, &scene);

    for x in 0..64 {
        assert_eq!(fb.pixel(x, 23), BACKGROUND);
        for y in 24..48 {
            assert_eq!(fb.pixel(x, y), GRASS, "({x}, {y})");
        }
    }
}

fn box_row_span(camera: &Camera) -> (usize, usize) {
    let hf = flat(0);
    let mut bank = TextureBank::default();
    let tex = bank
        .insert("WHITE", Texture::solid("WHITE", 4, 4, 0xFF_FF_FF_FF))
        .unwrap();
    let solids = [SolidBox::cube(vec2(0.0, -100.0), 20.0, tex)];
    let scene = Scene {
        solids: &solids,
        passes: Passes::SOLIDS,
        ..Scene::new(&hf, &bank)
    };
    let mut fb = FrameBuffer::new(160, 120);
    Software::default().draw_scene(&mut fb, camera, &scene);

    let covered: Vec<usize> = (0..160).filter(|&x| fb.pixel(x, 60) != BACKGROUND).collect();
    assert!(!covered.is_empty());
    (covered[0], covered[covered.len() - 1])
}

#[test]
fn box_ahead_is_centred_and_grows_on_approach() {
    let cam = Camera::new(vec3(0.0, 0.0, 10.0), 0.0)
        .with_focal(100.0)
        .with_horizon(60.0);
    let (l, r) = box_row_span(&cam);
    assert!((l as i32 + r as i32 - 159).abs() <= 2, "span {l}..{r}");

    let mut closer = cam;
    closer.pos.y = -40.0;
    let (cl, cr) = box_row_span(&closer);
    assert!((cl as i32 + cr as i32 - 159).abs() <= 2);
    assert!(cr - cl > r - l);
}

#[test]
fn nearer_sprite_wins_where_they_overlap() {
    let hf = flat(0);
    let mut bank = TextureBank::default();
    let red = bank.insert("RED", Texture::solid("RED", 4, 4, NEAR_RED)).unwrap();
    let blue = bank.insert("BLUE", Texture::solid("BLUE", 4, 4, FAR_BLUE)).unwrap();

    // listed near-first on purpose; the compositor sorts
    let items = [
        SpriteItem::new(SpriteKind::Pickup, vec3(0.0, -50.0, 0.0), red),
        SpriteItem::new(SpriteKind::Pickup, vec3(0.0, -100.0, 0.0), blue),
    ];
    let scene = Scene {
        items: &items,
        ..Scene::new(&hf, &bank)
    };
    let cam = Camera::new(vec3(0.0, 0.0, 10.0), 0.0)
        .with_focal(100.0)
        .with_horizon(60.0);
    let mut fb = FrameBuffer::new(160, 120);
    Software::default().draw_scene(&mut fb, &cam, &scene);

    assert_eq!(fb.pixel(80, 65), NEAR_RED);
    // the far sprite still shows where the near one does not reach
    let mut fb2 = FrameBuffer::new(160, 120);
    let far_only = Scene {
        items: &items[1..],
        ..scene
    };
    Software::default().draw_scene(&mut fb2, &cam, &far_only);
    assert_eq!(fb2.pixel(80, 65), FAR_BLUE);
}

#[test]
fn crop_scope_aux_centre_matches_main_centre() {
    let hf = Heightfield::from_parts(
        64,
        (0..64 * 64).map(|i| (i % 61) as u8).collect(),
        (0..64 * 64u32).map(|i| 0xFF00_0000 | i.wrapping_mul(2_654_435_761) >> 8).collect(),
    )
    .unwrap();
    let bank = TextureBank::default();
    let scene = Scene::new(&hf, &bank);
    let cam = Camera::new(vec3(10.0, 10.0, 90.0), 0.4).with_horizon(40.0);

    let mut renderer = Software::default();
    let mut main = FrameBuffer::new(96, 80);
    renderer.draw_scene(&mut main, &cam, &scene);
    let centre = main.pixel(48, 40);

    let mut crop = CropZoom::new(&ScopeConfig::default());
    crop.update_camera(true, true);
    let drew = crop.render(&mut main, &cam, &mut |fb, c| {
        renderer.draw_scene(fb, c, &scene)
    });
    assert!(drew);
    assert_eq!(crop.target().aux().pixel(48, 40), centre);
}

#[test]
fn both_scope_modes_leave_camera_and_depth_alone() {
    let hf = flat(5);
    let bank = TextureBank::default();
    let scene = Scene::new(&hf, &bank);
    let cam = Camera::new(Vec3::new(3.0, 4.0, 40.0), 1.0).with_horizon(50.0);

    for kind in [
        voxspace_rs::config::ScopeKind::Crop,
        voxspace_rs::config::ScopeKind::Forward,
    ] {
        let mut renderer = Software::default();
        let mut main = FrameBuffer::new(400, 400);
        renderer.draw_scene(&mut main, &cam, &scene);
        let depth_before = main.depth.clone();
        let corner = main.pixel(0, 0);
        let before = cam;

        let mut s = scope::from_config(&ScopeConfig {
            kind,
            ..ScopeConfig::default()
        });
        for _ in 0..30 {
            s.update_camera(true, true);
        }
        assert!(s.render(&mut main, &cam, &mut |fb, c| renderer.draw_scene(fb, c, &scene)));

        assert_eq!(cam, before);
        assert_eq!(main.depth, depth_before);
        assert_eq!(main.pixel(0, 0), corner);
    }
}

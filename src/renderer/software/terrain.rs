use crate::{
    config::MarchConfig,
    renderer::FrameBuffer,
    world::{Camera, Heightfield},
};

/// Front-to-back column march over the heightfield.
///
/// Each slice at distance `z` is the segment of the view frustum's ground
/// footprint; it is sampled once per screen column. A column only draws
/// what rises above its occlusion cursor `hidden_y`, and the cursor moves up
/// to the new top afterwards. Every pixel it writes carries depth `z`.
pub fn march(cfg: &MarchConfig, fb: &mut FrameBuffer, camera: &Camera, hf: &Heightfield) {
    let w = fb.width;
    if w == 0 || fb.height == 0 {
        return;
    }
    let (sin, cos) = camera.yaw().sin_cos();
    let cam = camera.pos;

    let mut z = 1.0_f32;
    let mut dz = cfg.start_step;

    while z < camera.distance {
        // ─── slice end-points in world space ───
        let mut lx = -cos * z - sin * z + cam.x;
        let mut ly = sin * z - cos * z + cam.y;
        let rx = cos * z - sin * z + cam.x;
        let ry = -sin * z - cos * z + cam.y;

        let step_x = (rx - lx) / w as f32;
        let step_y = (ry - ly) / w as f32;
        let inv_z = camera.focal / z;

        let mut all_covered = true;
        for col in 0..w {
            let (alt, color) = hf.cell(hf.offset(lx, ly));
            let y = (cam.z - alt as f32) * inv_z + camera.horizon;
            let top = y as i32;

            let hidden = fb.hidden_y[col];
            if y < hidden as f32 {
                for row in top.max(0)..hidden {
                    fb.test_and_set(col, row as usize, z, color);
                }
                fb.hidden_y[col] = top;
            }
            all_covered &= fb.hidden_y[col] <= 0;

            lx += step_x;
            ly += step_y;
        }

        if all_covered {
            break;
        }

        (z, dz) = cfg.advance(z, dz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    const GROUND: u32 = 0xFF_33_66_11;

    #[test]
    fn flat_ground_fills_below_horizon_only() {
        let hf = Heightfield::flat(64, 0, GROUND).unwrap();
        let cam = Camera::new(vec3(0.0, 0.0, 1.0), 0.0).with_horizon(24.0);
        let mut fb = FrameBuffer::new(64, 48);
        fb.clear(0);

        march(&MarchConfig::default(), &mut fb, &cam, &hf);

        for x in 0..64 {
            assert_eq!(fb.pixel(x, 23), 0, "column {x} above horizon");
            for y in 24..48 {
                assert_eq!(fb.pixel(x, y), GROUND);
                assert!(fb.depth_at(x, y).is_finite());
            }
        }
    }

    #[test]
    fn nearer_rows_carry_smaller_depth() {
        let hf = Heightfield::flat(64, 0, GROUND).unwrap();
        let cam = Camera::new(vec3(0.0, 0.0, 10.0), 0.7).with_horizon(24.0);
        let mut fb = FrameBuffer::new(32, 48);
        fb.clear(0);
        march(&MarchConfig::default(), &mut fb, &cam, &hf);

        for x in 0..32 {
            assert!(fb.depth_at(x, 47) <= fb.depth_at(x, 30));
        }
    }

    #[test]
    fn wall_of_terrain_stops_march_early() {
        let hf = Heightfield::flat(64, 255, GROUND).unwrap();
        let cam = Camera::new(vec3(0.0, 0.0, 0.0), 0.0).with_horizon(0.0);
        let mut fb = FrameBuffer::new(16, 16);
        fb.clear(0);
        march(&MarchConfig::default(), &mut fb, &cam, &hf);

        assert!(fb.hidden_y.iter().all(|&h| h <= 0));
        // the first slice covered everything
        assert!(fb.depth.iter().all(|&d| d == 1.0));
    }
}

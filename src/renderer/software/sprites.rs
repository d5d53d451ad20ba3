use crate::{
    config::RenderConfig,
    renderer::{FrameBuffer, Projector},
    world::{Anchor, Camera, SpriteItem, SrcRect, TextureBank, TextureId},
};

/// A render-list entry that passed the distance filter, in screen space.
#[derive(Clone, Copy, Debug)]
pub struct VisSprite {
    pub forward: f32,
    pub sx: f32,
    pub sy: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub anchor: Anchor,
    pub tex: TextureId,
    pub frame: Option<SrcRect>,
}

/// Project `items` then `extra`, keep `sprite_near < forward < distance`
/// and leave them in `out` sorted far-to-near.
pub fn collect(
    cfg: &RenderConfig,
    camera: &Camera,
    width: usize,
    items: &[SpriteItem],
    extra: &[SpriteItem],
    out: &mut Vec<VisSprite>,
) {
    out.clear();
    let proj = Projector::new(camera, width);

    for it in items.iter().chain(extra) {
        let ground = it.pos.truncate();
        let forward = proj.ground_forward(ground);
        if !(forward > cfg.sprite_near && forward < camera.distance) {
            continue;
        }
        let rule = it.kind.rule(cfg.bullet_size);
        let scale = cfg.sprite_base_size * proj.focal / forward;
        out.push(VisSprite {
            forward,
            sx: proj.screen_x(proj.right(ground), forward),
            sy: proj.screen_y(it.pos.z, forward),
            scale_x: scale * rule.scale_x,
            scale_y: scale * rule.scale_y,
            anchor: rule.anchor,
            tex: it.tex,
            frame: it.frame,
        });
    }

    // stable: equal distances keep list order
    out.sort_by(|a, b| b.forward.total_cmp(&a.forward));
}

/// Scale-blit one sprite with a binary alpha cut-out.
///
/// Each pixel is depth-tested against what is already there but the depth
/// buffer is left untouched. A texture that has not loaded yet draws nothing.
pub fn blit(cfg: &RenderConfig, fb: &mut FrameBuffer, vis: &VisSprite, bank: &TextureBank) {
    let (sw, sh) = (fb.width as f32, fb.height as f32);
    if vis.sx < -vis.scale_x
        || vis.sx >= sw + vis.scale_x
        || vis.sy < -vis.scale_y
        || vis.sy >= sh + vis.scale_y
    {
        return;
    }
    let Some(tex) = bank.asset_or_missing(vis.tex).ready() else {
        return;
    };

    let src = match vis.frame {
        Some(r) => {
            let x = r.x.min(tex.w);
            let y = r.y.min(tex.h);
            SrcRect {
                x,
                y,
                w: r.w.min(tex.w - x),
                h: r.h.min(tex.h - y),
            }
        }
        None => SrcRect {
            x: 0,
            y: 0,
            w: tex.w,
            h: tex.h,
        },
    };
    if src.w == 0 || src.h == 0 {
        return;
    }

    let dest_w = vis.scale_x.ceil().max(1.0) as i32;
    let dest_h = vis.scale_y.ceil().max(1.0) as i32;
    let dest_x = (vis.sx - dest_w as f32 / 2.0).floor() as i32;
    let dest_y = match vis.anchor {
        Anchor::Center => (vis.sy - dest_h as f32 / 2.0).floor() as i32,
        Anchor::Bottom => (vis.sy - dest_h as f32).floor() as i32,
    };

    // only the on-screen part of the destination rectangle
    let (w, h) = (fb.width as i32, fb.height as i32);
    let rows = (-dest_y).max(0)..dest_h.min(h - dest_y);
    let cols = (-dest_x).max(0)..dest_w.min(w - dest_x);

    for py in rows {
        let y = (dest_y + py) as usize;
        let ty = py as usize * src.h / dest_h as usize + src.y;
        for px in cols.clone() {
            let x = (dest_x + px) as usize;
            let i = fb.index(x, y);
            if vis.forward >= fb.depth[i] {
                continue;
            }
            let tx = px as usize * src.w / dest_w as usize + src.x;
            if !tex.opaque(tx, ty, cfg.alpha_threshold) {
                continue;
            }
            fb.color[i] = tex.texel(tx, ty) | 0xFF00_0000;
        }
    }
}

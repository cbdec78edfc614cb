//! Software rasterizer: turns one frame's render commands into an RGBA image

use crate::camera::Camera;
use crate::projection::{point_depth, ScreenProjection, Viewport};
use crate::sprite::Sprite;
use image::{Rgba, RgbaImage};
use plexus_core::{Color, Vec2, Vec3};
use plexus_field::{Projector, RenderCommands};

/// Sprite texels below this alpha are discarded
pub const ALPHA_TEST: f32 = 0.5;

/// Rasterizer settings for headless frames
#[derive(Debug, Clone)]
pub struct FrameRasterizer {
    pub viewport: Viewport,
    pub background: Color,
    /// Lines are tinted by this color scaled by each vertex's opacity
    pub line_color: Color,
    /// Point size in world units, attenuated by view depth
    pub point_size: f32,
}

impl FrameRasterizer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::BLACK,
            line_color: Color::WHITE,
            point_size: 0.2,
        }
    }

    /// Draw lines then point sprites into a fresh image
    pub fn render(&self, cmds: &RenderCommands<'_>, camera: &Camera, sprite: &Sprite) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(
            self.viewport.width,
            self.viewport.height,
            Rgba(self.background.to_rgba8()),
        );
        let projection = ScreenProjection::new(camera, self.viewport);

        for seg in cmds.lines.segments() {
            let (Some(a), Some(b)) = (projection.project(seg.start), projection.project(seg.end))
            else {
                continue;
            };
            self.draw_line(&mut img, a, b, seg.opacity);
        }

        if !sprite.is_empty() {
            for chunk in cmds.positions.chunks_exact(3) {
                let world = Vec3::new(chunk[0], chunk[1], chunk[2]);
                let Some(center) = projection.project(world) else {
                    continue;
                };
                let depth = point_depth(camera, world);
                if depth <= 0.0 {
                    continue;
                }
                let size = self.point_size * (self.viewport.height as f32 / 2.0) / depth;
                self.draw_sprite(&mut img, center, size.max(1.0), sprite);
            }
        }

        img
    }

    fn draw_line(&self, img: &mut RgbaImage, a: Vec2, b: Vec2, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity == 0.0 {
            return;
        }
        let Some((a, b)) = clip_segment(a, b, img.width() as f32, img.height() as f32) else {
            return;
        };
        let color = self.line_color.to_array();
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = (a.x + dx * t).floor();
            let y = (a.y + dy * t).floor();
            blend_pixel(img, x, y, [color[0], color[1], color[2]], opacity * color[3]);
        }
    }

    fn draw_sprite(&self, img: &mut RgbaImage, center: Vec2, size: f32, sprite: &Sprite) {
        let half = size / 2.0;
        let Some((x0, y0, x1, y1)) = sprite_bounds(center, half, img.width(), img.height()) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let u = (px as f32 + 0.5 - (center.x - half)) / size;
                let v = (py as f32 + 0.5 - (center.y - half)) / size;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                let texel = sprite.sample(u, v);
                let alpha = texel[3] as f32 / 255.0;
                if alpha < ALPHA_TEST {
                    continue;
                }
                let rgb = [
                    texel[0] as f32 / 255.0,
                    texel[1] as f32 / 255.0,
                    texel[2] as f32 / 255.0,
                ];
                blend_pixel(img, px as f32, py as f32, rgb, alpha);
            }
        }
    }
}

/// Pixel box covered by a sprite of half-size `half` at `center`, clipped to
/// the image. None when nothing is visible.
fn sprite_bounds(center: Vec2, half: f32, width: u32, height: u32) -> Option<(i64, i64, i64, i64)> {
    if !(center.x.is_finite() && center.y.is_finite() && half.is_finite()) {
        return None;
    }
    let x0 = ((center.x - half).floor() as i64).max(0);
    let y0 = ((center.y - half).floor() as i64).max(0);
    let x1 = ((center.x + half).ceil() as i64).min(width as i64);
    let y1 = ((center.y + half).ceil() as i64).min(height as i64);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}

/// Liang-Barsky clip of segment `a..b` to the image rectangle (one pixel of
/// slack on each side). None when the segment misses the image.
fn clip_segment(a: Vec2, b: Vec2, width: f32, height: f32) -> Option<(Vec2, Vec2)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-dx, a.x + 1.0),
        (dx, width - a.x),
        (-dy, a.y + 1.0),
        (dy, height - a.y),
    ] {
        if !(p.is_finite() && q.is_finite()) {
            return None;
        }
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        Vec2::new(a.x + dx * t0, a.y + dy * t0),
        Vec2::new(a.x + dx * t1, a.y + dy * t1),
    ))
}

/// Source-over blend of `rgb` at `alpha` onto the pixel, ignoring out-of-bounds writes
fn blend_pixel(img: &mut RgbaImage, x: f32, y: f32, rgb: [f32; 3], alpha: f32) {
    if x < 0.0 || y < 0.0 || x >= img.width() as f32 || y >= img.height() as f32 {
        return;
    }
    let px = img.get_pixel_mut(x as u32, y as u32);
    for (channel, src) in px.0.iter_mut().zip(rgb) {
        let dst = *channel as f32 / 255.0;
        let out = src * alpha + dst * (1.0 - alpha);
        *channel = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    let dst_a = px.0[3] as f32 / 255.0;
    px.0[3] = ((alpha + dst_a * (1.0 - alpha)).clamp(0.0, 1.0) * 255.0).round() as u8;
}

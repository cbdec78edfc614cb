//! Circular point sprite generated once at setup

use image::{Rgba, RgbaImage};
use plexus_core::{Color, PlexusError, Result};
use std::path::Path;

/// Immutable RGBA sprite shared by every rendered point.
///
/// Pixels are stored with straight alpha; `premultiplied_alpha` records
/// whether consumers should premultiply on upload (see [`Sprite::upload_pixels`]).
#[derive(Debug, Clone)]
pub struct Sprite {
    image: RgbaImage,
    pub premultiplied_alpha: bool,
}

impl Sprite {
    /// Filled circle of diameter `size` centred in a `size x size` image.
    /// Edge pixels get partial coverage. A zero size yields an empty sprite.
    pub fn circle(size: u32, color: Color, premultiply: bool) -> Self {
        if size == 0 {
            tracing::warn!("sprite size is 0; points will render blank");
            return Self {
                image: RgbaImage::new(0, 0),
                premultiplied_alpha: premultiply,
            };
        }

        let [r, g, b, a] = color.to_rgba8();
        let radius = size as f32 / 2.0;
        let mut image = RgbaImage::new(size, size);

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                let distance = (dx * dx + dy * dy).sqrt();
                let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
                let alpha = (a as f32 * coverage).round() as u8;
                let pixel = if alpha == 0 {
                    Rgba([0, 0, 0, 0])
                } else {
                    Rgba([r, g, b, alpha])
                };
                image.put_pixel(x, y, pixel);
            }
        }

        Self {
            image,
            premultiplied_alpha: premultiply,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Nearest-neighbour lookup at normalized `(u, v)`, straight alpha
    pub fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        if self.is_empty() {
            return [0, 0, 0, 0];
        }
        let x = ((u.clamp(0.0, 1.0) * self.width() as f32) as u32).min(self.width() - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height() as f32) as u32).min(self.height() - 1);
        self.image.get_pixel(x, y).0
    }

    /// Raw RGBA8 bytes for texture upload, premultiplied when flagged
    pub fn upload_pixels(&self) -> Vec<u8> {
        let mut bytes = self.image.as_raw().clone();
        if self.premultiplied_alpha {
            for px in bytes.chunks_exact_mut(4) {
                let a = px[3] as u16;
                for c in &mut px[..3] {
                    *c = ((*c as u16 * a + 127) / 255) as u8;
                }
            }
        }
        bytes
    }

    /// Write the sprite as PNG
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_empty() {
            return Err(PlexusError::ImageError(
                "cannot encode an empty sprite".to_string(),
            ));
        }
        let path = path.as_ref();
        self.image.save(path).map_err(|e| {
            PlexusError::ImageError(format!("Failed to save sprite to {}: {}", path.display(), e))
        })
    }
}

//! World-to-screen projection for the line builder and rasterizer

use crate::camera::Camera;
use plexus_core::{mat4_transform, Vec2, Vec3};
use plexus_field::Projector;

/// Drawing surface size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Project a world-space point to screen coordinates (top-left origin).
/// Returns None if the point is behind the camera.
pub fn world_to_screen(camera: &Camera, viewport: Viewport, pos: Vec3) -> Option<Vec2> {
    clip_to_screen(&camera.view_projection_matrix(), viewport, pos)
}

fn clip_to_screen(vp: &[[f32; 4]; 4], viewport: Viewport, pos: Vec3) -> Option<Vec2> {
    let [clip_x, clip_y, _, clip_w] = mat4_transform(vp, pos.to_array());

    if clip_w <= 0.001 {
        return None;
    }

    let ndc_x = clip_x / clip_w;
    let ndc_y = clip_y / clip_w;

    Some(Vec2::new(
        (ndc_x * 0.5 + 0.5) * viewport.width as f32,
        (1.0 - (ndc_y * 0.5 + 0.5)) * viewport.height as f32,
    ))
}

/// View-space depth of a point (positive in front of the camera)
pub fn point_depth(camera: &Camera, pos: Vec3) -> f32 {
    let view = camera.view_matrix();
    let z = view[0][2] * pos.x + view[1][2] * pos.y + view[2][2] * pos.z + view[3][2];
    -z
}

/// A camera bound to a viewport, usable wherever a [`Projector`] is expected.
/// The view-projection matrix is computed once at construction.
pub struct ScreenProjection<'a> {
    pub camera: &'a Camera,
    pub viewport: Viewport,
    vp: [[f32; 4]; 4],
}

impl<'a> ScreenProjection<'a> {
    pub fn new(camera: &'a Camera, viewport: Viewport) -> Self {
        Self {
            camera,
            viewport,
            vp: camera.view_projection_matrix(),
        }
    }
}

impl Projector for ScreenProjection<'_> {
    fn project(&self, world: Vec3) -> Option<Vec2> {
        clip_to_screen(&self.vp, self.viewport, world)
    }
}

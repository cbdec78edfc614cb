//! Plexus Render - Camera, projection and headless rasterization
//!
//! This crate stands in for the host rendering framework: it projects the
//! point field through a perspective camera, generates the circular point
//! sprite, and rasterizes frames to RGBA images for PNG output.

mod camera;
mod projection;
pub mod raster;
mod sprite;

pub use camera::Camera;
pub use projection::{point_depth, world_to_screen, ScreenProjection, Viewport};
pub use raster::FrameRasterizer;
pub use sprite::Sprite;

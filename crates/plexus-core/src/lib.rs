//! Plexus Core - Foundational types for the Plexus point field
//!
//! This crate provides the types that all other Plexus crates depend on:
//! - `Vec3`, `Vec2` - World-space and screen-space vectors
//! - `Color` - RGBA color with CSS-style hex parsing
//! - Error types and Result alias

mod error;
mod types;

pub use error::{PlexusError, Result};
pub use types::{mat4_mul, mat4_transform, Color, Vec2, Vec3};

//! Options and setup shared by the frame-producing commands

use anyhow::{Context, Result};
use clap::Args;
use plexus_field::{FieldConfig, Panel};
use plexus_render::{Camera, FrameRasterizer, Sprite, Viewport};
use std::path::{Path, PathBuf};

/// Config file picked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "plexus.toml";

#[derive(Args, Debug, Clone)]
pub struct SceneOptions {
    /// Path to config file (defaults to ./plexus.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RNG seed (overrides the config's seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Image width in pixels
    #[arg(long, default_value = "1920")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "1080")]
    pub height: u32,

    /// Camera orbit distance
    #[arg(long)]
    pub distance: Option<f32>,

    /// Camera horizontal angle in degrees
    #[arg(long)]
    pub yaw: Option<f32>,

    /// Camera vertical angle in degrees
    #[arg(long)]
    pub pitch: Option<f32>,

    /// Field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,
}

/// Everything needed to step and draw a field
pub struct Scene {
    pub config: FieldConfig,
    pub panel: Panel,
    pub camera: Camera,
    pub viewport: Viewport,
}

impl Scene {
    pub fn rasterizer(&self) -> FrameRasterizer {
        let mut raster = FrameRasterizer::new(self.viewport);
        raster.point_size = self.config.point_size;
        raster
    }

    pub fn sprite(&self) -> Sprite {
        sprite_for(&self.config, None)
    }
}

impl SceneOptions {
    pub fn build(&self) -> Result<Scene> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("Image size must be non-zero, got {}x{}", self.width, self.height);
        }

        if let Some(d) = self.distance {
            if !(d > 0.0 && d.is_finite()) {
                anyhow::bail!("Camera distance must be positive, got {}", d);
            }
        }
        if let Some(f) = self.fov {
            if !(f > 0.0 && f < 180.0) {
                anyhow::bail!("Field of view must be between 0 and 180 degrees, got {}", f);
            }
        }

        let mut config = load_config(self.config.as_deref())?;
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        let panel = Panel::from_config(&config).context("Failed to build point field")?;
        let viewport = Viewport::new(self.width, self.height);

        let mut camera = Camera::for_viewport(viewport.width, viewport.height);
        if let Some(d) = self.distance {
            camera.distance = d;
        }
        if let Some(f) = self.fov {
            camera.fov = f;
        }
        camera.update_orbit();
        if let Some(y) = self.yaw {
            camera.orbit_horizontal(y.to_radians());
        }
        if let Some(p) = self.pitch {
            camera.orbit_vertical(p.to_radians());
        }
        tracing::debug!(
            distance = camera.distance,
            yaw = camera.yaw,
            pitch = camera.pitch,
            fov = camera.fov,
            "camera placed"
        );

        Ok(Scene {
            config,
            panel,
            camera,
            viewport,
        })
    }
}

/// Load an explicit config, else ./plexus.toml if present, else defaults
pub fn load_config(path: Option<&Path>) -> Result<FieldConfig> {
    match path {
        Some(path) => FieldConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                tracing::info!(path = DEFAULT_CONFIG_FILE, "loading config from working directory");
                println!("[config] using {}", DEFAULT_CONFIG_FILE);
                FieldConfig::load(fallback).context("Failed to load plexus.toml")
            } else {
                tracing::debug!("no config file, using defaults");
                Ok(FieldConfig::default())
            }
        }
    }
}

pub fn sprite_for(config: &FieldConfig, size: Option<u32>) -> Sprite {
    Sprite::circle(
        size.unwrap_or(config.dot_size),
        config.dots_color,
        config.premultiply_alpha,
    )
}

//! PNG sequence command

use super::common::SceneOptions;
use anyhow::{Context, Result};
use plexus_core::{PlexusError, Result as FieldResult};
use plexus_field::{FrameContext, RenderCommands};
use plexus_render::ScreenProjection;
use plexus_runtime::HostLoop;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FramesArgs {
    pub scene: SceneOptions,
    pub out_dir: PathBuf,
    pub count: u64,
}

pub fn frame_path(dir: &Path, frame: u64) -> PathBuf {
    dir.join(format!("frame_{:05}.png", frame))
}

pub fn run(args: FramesArgs) -> Result<()> {
    let mut scene = args.scene.build()?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create '{}'", args.out_dir.display()))?;
    println!(
        "[frames] {} frames of {} points -> {}",
        args.count,
        scene.config.dots_number,
        args.out_dir.display()
    );

    let raster = scene.rasterizer();
    let sprite = scene.sprite();
    let projection = ScreenProjection::new(&scene.camera, scene.viewport);
    let ctx = FrameContext::new(&projection);

    let mut written = 0u64;
    let mut sink = |cmds: &RenderCommands<'_>| -> FieldResult<()> {
        let path = frame_path(&args.out_dir, cmds.frame);
        raster
            .render(cmds, &scene.camera, &sprite)
            .save(&path)
            .map_err(|e| {
                PlexusError::ImageError(format!("Failed to save {}: {}", path.display(), e))
            })?;
        written += 1;
        Ok(())
    };
    HostLoop::new()
        .run_frames(&mut scene.panel, &ctx, args.count, &mut sink)
        .context("Frame sequence failed")?;

    println!("[frames] wrote {} images", written);
    Ok(())
}

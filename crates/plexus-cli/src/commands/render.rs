//! Headless field-to-PNG render command

use super::common::SceneOptions;
use anyhow::{Context, Result};
use image::RgbaImage;
use plexus_core::Result as FieldResult;
use plexus_field::{FrameContext, RenderCommands};
use plexus_render::ScreenProjection;
use plexus_runtime::HostLoop;
use std::path::PathBuf;

pub struct RenderArgs {
    pub scene: SceneOptions,
    pub output: PathBuf,
    pub frames: u64,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let mut scene = args.scene.build()?;
    let frames = args.frames.max(1);
    println!(
        "[render] {} points, {} frames, {}x{}",
        scene.config.dots_number, frames, scene.viewport.width, scene.viewport.height
    );

    let raster = scene.rasterizer();
    let sprite = scene.sprite();
    let projection = ScreenProjection::new(&scene.camera, scene.viewport);
    let ctx = FrameContext::new(&projection);

    let mut captured: Option<(RgbaImage, usize)> = None;
    let mut sink = |cmds: &RenderCommands<'_>| -> FieldResult<()> {
        if cmds.frame == frames {
            captured = Some((raster.render(cmds, &scene.camera, &sprite), cmds.lines.pair_count()));
        }
        Ok(())
    };
    HostLoop::new()
        .run_frames(&mut scene.panel, &ctx, frames, &mut sink)
        .context("Simulation failed")?;

    let (image, pairs) = captured.context("No frame was captured")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to save '{}'", args.output.display()))?;

    println!("[render] {} line pairs in final frame", pairs);
    println!("[render] wrote {}", args.output.display());
    Ok(())
}

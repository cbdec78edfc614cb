//! Headless simulation with line statistics

use super::common::SceneOptions;
use anyhow::{Context, Result};
use plexus_core::Result as FieldResult;
use plexus_field::{FrameContext, RenderCommands};
use plexus_render::ScreenProjection;
use plexus_runtime::HostLoop;
use serde::Serialize;

pub struct SimulateArgs {
    pub scene: SceneOptions,
    pub frames: u64,
    pub format: String,
}

/// Line statistics over the frames where lines were rebuilt
#[derive(Debug, Default, Serialize)]
pub struct SimulationReport {
    pub frames: u64,
    pub points: usize,
    pub motion: String,
    pub line_builds: u64,
    pub min_pairs: usize,
    pub max_pairs: usize,
    pub mean_pairs: f64,
    pub final_pairs: usize,
    /// Mean opacity across every pair of every build
    pub mean_opacity: f64,
    #[serde(skip)]
    total_pairs: usize,
    #[serde(skip)]
    opacity_sum: f64,
}

impl SimulationReport {
    fn record(&mut self, cmds: &RenderCommands<'_>) {
        self.frames = cmds.frame;
        if !cmds.lines_dirty {
            return;
        }
        let pairs = cmds.lines.pair_count();
        if self.line_builds == 0 {
            self.min_pairs = pairs;
        }
        self.line_builds += 1;
        self.min_pairs = self.min_pairs.min(pairs);
        self.max_pairs = self.max_pairs.max(pairs);
        self.final_pairs = pairs;

        self.total_pairs += pairs;
        self.opacity_sum += cmds.lines.segments().map(|s| s.opacity as f64).sum::<f64>();
    }

    fn finish(&mut self) {
        if self.line_builds > 0 {
            self.mean_pairs = self.total_pairs as f64 / self.line_builds as f64;
        }
        if self.total_pairs > 0 {
            self.mean_opacity = self.opacity_sum / self.total_pairs as f64;
        }
    }
}

pub fn simulate(scene: &SceneOptions, frames: u64) -> Result<SimulationReport> {
    let mut scene = scene.build()?;
    let projection = ScreenProjection::new(&scene.camera, scene.viewport);
    let ctx = FrameContext::new(&projection);

    let mut report = SimulationReport {
        points: scene.config.dots_number,
        motion: scene.panel.policy().name().to_string(),
        ..SimulationReport::default()
    };
    let mut sink = |cmds: &RenderCommands<'_>| -> FieldResult<()> {
        report.record(cmds);
        Ok(())
    };
    HostLoop::new()
        .run_frames(&mut scene.panel, &ctx, frames, &mut sink)
        .context("Simulation failed")?;

    report.finish();
    Ok(report)
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let report = simulate(&args.scene, args.frames)?;

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", json);
        return Ok(());
    }

    println!("[simulate] {} points, {} motion", report.points, report.motion);
    println!("[simulate] {} frames, {} line builds", report.frames, report.line_builds);
    println!(
        "[simulate] pairs min {} / mean {:.1} / max {} (final {})",
        report.min_pairs, report.mean_pairs, report.max_pairs, report.final_pairs
    );
    println!("[simulate] mean opacity {:.3}", report.mean_opacity);
    Ok(())
}

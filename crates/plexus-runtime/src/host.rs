//! Host render loop: drives a panel once per simulation step

use crate::clock::FrameClock;
use plexus_core::Result;
use plexus_field::{FrameContext, Panel, RenderCommands};

/// Consumer of each frame's buffers (GPU upload, rasterizer, stats, ...)
pub trait FrameSink {
    fn present(&mut self, cmds: &RenderCommands<'_>) -> Result<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(&RenderCommands<'_>) -> Result<()>,
{
    fn present(&mut self, cmds: &RenderCommands<'_>) -> Result<()> {
        self(cmds)
    }
}

/// Owns the scheduling the panel itself knows nothing about
pub struct HostLoop {
    pub clock: FrameClock,
    /// Upper bound on panel updates per `pump`; leftover time is dropped
    pub max_steps_per_tick: u32,
}

impl Default for HostLoop {
    fn default() -> Self {
        Self {
            clock: FrameClock::new(),
            max_steps_per_tick: 5,
        }
    }
}

impl HostLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run exactly `frames` updates back to back, ignoring wall-clock time.
    /// Stops at the first sink error.
    pub fn run_frames(
        &mut self,
        panel: &mut Panel,
        ctx: &FrameContext<'_>,
        frames: u64,
        sink: &mut dyn FrameSink,
    ) -> Result<u64> {
        for _ in 0..frames {
            self.clock.advance(self.clock.fixed_timestep);
            self.clock.consume_step();
            let cmds = panel.update(ctx);
            sink.present(&cmds)?;
        }
        tracing::debug!(frames, total = panel.frame(), "headless run finished");
        Ok(frames)
    }

    /// Tick the wall clock and run as many updates as accumulated time allows.
    /// Returns the number of updates run.
    pub fn pump(
        &mut self,
        panel: &mut Panel,
        ctx: &FrameContext<'_>,
        sink: &mut dyn FrameSink,
    ) -> Result<u32> {
        self.clock.tick();
        self.consume(panel, ctx, sink)
    }

    fn consume(
        &mut self,
        panel: &mut Panel,
        ctx: &FrameContext<'_>,
        sink: &mut dyn FrameSink,
    ) -> Result<u32> {
        let mut steps = 0;
        while self.clock.should_step() {
            if steps == self.max_steps_per_tick {
                tracing::debug!(steps, "step budget reached, dropping backlog");
                self.clock.discard_backlog();
                break;
            }
            self.clock.consume_step();
            let cmds = panel.update(ctx);
            sink.present(&cmds)?;
            steps += 1;
        }
        Ok(steps)
    }
}

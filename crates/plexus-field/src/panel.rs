//! Frame entry point: owns the field and hands buffers to the host renderer

use crate::cadence::LineCadence;
use crate::config::FieldConfig;
use crate::lines::{build_lines, LineSet, Projector};
use crate::math::OpacityCurve;
use crate::motion::{self, ArrivalReset, MotionPolicy};
use crate::points::PointField;
use crate::rand::{FieldRng, RandomSource, StdRandom};
use plexus_core::Result;

/// Per-frame input supplied by the host
pub struct FrameContext<'a> {
    pub projector: &'a dyn Projector,
}

impl<'a> FrameContext<'a> {
    pub fn new(projector: &'a dyn Projector) -> Self {
        Self { projector }
    }
}

/// Buffers for the host to upload after one update
pub struct RenderCommands<'a> {
    /// Frame number, starting at 1 for the first update
    pub frame: u64,
    /// Flat xyz point positions (always re-uploaded)
    pub positions: &'a [f32],
    pub positions_dirty: bool,
    /// Current line geometry; only changed when `lines_dirty` is set
    pub lines: &'a LineSet,
    pub lines_dirty: bool,
}

impl RenderCommands<'_> {
    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.positions)
    }

    pub fn line_position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines.positions)
    }

    pub fn line_color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines.colors)
    }
}

/// The animated point field: a fixed set of points plus their proximity lines
pub struct Panel {
    field: PointField,
    lines: LineSet,
    cadence: LineCadence,
    policy: MotionPolicy,
    curve: OpacityCurve,
    max_distance: f32,
    rng: Box<dyn RandomSource>,
    built_once: bool,
}

impl Panel {
    /// Build a panel from config, seeding positions from `rng`
    pub fn new(config: &FieldConfig, mut rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;

        let policy = config.motion_policy();
        let mut field =
            PointField::random(config.dots_number, config.placement_spread(), rng.as_mut());
        motion::prime(&mut field, &policy, rng.as_mut());

        if let MotionPolicy::Chase {
            reset: ArrivalReset::Factor,
            factor,
            ..
        } = policy
        {
            tracing::debug!(
                factor,
                "arrived targets collapse to the transition factor; set arrival_reset = \"random\" to keep points wandering"
            );
        }
        tracing::info!(
            points = config.dots_number,
            motion = policy.name(),
            line_interval = config.line_interval,
            "point field ready"
        );

        Ok(Self {
            field,
            lines: LineSet::new(),
            cadence: LineCadence::new(config.line_interval),
            policy,
            curve: config.opacity,
            max_distance: config.max_distance,
            rng,
            built_once: false,
        })
    }

    /// Build a panel with the config's seed, or an entropy seed when absent
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(StdRandom::seeded(seed)),
            None => Box::new(StdRandom::from_entropy()),
        };
        Self::new(config, rng)
    }

    /// Deterministic panel using the built-in xorshift generator
    pub fn with_seed(config: &FieldConfig, seed: u32) -> Result<Self> {
        Self::new(config, Box::new(FieldRng::new(seed)))
    }

    /// Advance one frame. Points always move; lines are rebuilt on the first
    /// frame and then whenever the cadence fires.
    pub fn update(&mut self, ctx: &FrameContext<'_>) -> RenderCommands<'_> {
        motion::advance(&mut self.field, &self.policy, self.rng.as_mut());

        let due = self.cadence.tick();
        let lines_dirty = due || !self.built_once;
        if lines_dirty {
            build_lines(
                self.field.positions(),
                ctx.projector,
                self.max_distance,
                self.curve,
                &mut self.lines,
            );
            self.built_once = true;
        }

        RenderCommands {
            frame: self.cadence.frame(),
            positions: self.field.positions(),
            positions_dirty: true,
            lines: &self.lines,
            lines_dirty,
        }
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn lines(&self) -> &LineSet {
        &self.lines
    }

    pub fn policy(&self) -> &MotionPolicy {
        &self.policy
    }

    pub fn frame(&self) -> u64 {
        self.cadence.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionKind;
    use crate::lines::tests::FlatProjector;

    fn projector() -> FlatProjector {
        // 5 units of spread become +-50 px
        FlatProjector {
            scale: 10.0,
            cull_z: f32::INFINITY,
        }
    }

    #[test]
    fn update_keeps_arity() {
        let config = FieldConfig {
            dots_number: 30,
            ..FieldConfig::default()
        };
        let mut panel = Panel::with_seed(&config, 4).unwrap();
        let proj = projector();
        let ctx = FrameContext::new(&proj);
        for _ in 0..50 {
            let cmds = panel.update(&ctx);
            assert_eq!(cmds.positions.len(), 90);
            assert!(cmds.positions_dirty);
            assert_eq!(cmds.lines.positions.len(), cmds.lines.colors.len());
            assert_eq!(cmds.lines.positions.len() % 6, 0);
        }
        assert_eq!(panel.frame(), 50);
    }

    #[test]
    fn lines_follow_cadence() {
        let config = FieldConfig {
            dots_number: 20,
            motion: MotionKind::Drift,
            line_interval: 3,
            ..FieldConfig::default()
        };
        let mut panel = Panel::with_seed(&config, 9).unwrap();
        let proj = projector();
        let ctx = FrameContext::new(&proj);
        let dirty: Vec<bool> = (0..7).map(|_| panel.update(&ctx).lines_dirty).collect();
        // first frame always builds, then every third frame
        assert_eq!(dirty, vec![true, false, true, false, false, true, false]);
    }

    #[test]
    fn positions_move_every_frame() {
        let config = FieldConfig {
            dots_number: 10,
            motion: MotionKind::Drift,
            line_interval: 5,
            ..FieldConfig::default()
        };
        let mut panel = Panel::with_seed(&config, 12).unwrap();
        let proj = projector();
        let ctx = FrameContext::new(&proj);
        let mut prev = panel.field().positions().to_vec();
        for _ in 0..4 {
            let now = panel.update(&ctx).positions.to_vec();
            assert_ne!(now, prev);
            prev = now;
        }
    }

    #[test]
    fn byte_views_match_buffers() {
        let config = FieldConfig {
            dots_number: 8,
            ..FieldConfig::default()
        };
        let mut panel = Panel::with_seed(&config, 1).unwrap();
        let proj = projector();
        let ctx = FrameContext::new(&proj);
        let cmds = panel.update(&ctx);
        assert_eq!(cmds.point_bytes().len(), 8 * 3 * 4);
        assert_eq!(cmds.line_position_bytes().len(), cmds.lines.positions.len() * 4);
        assert_eq!(cmds.line_color_bytes().len(), cmds.lines.colors.len() * 4);
    }

    #[test]
    fn seeded_panels_are_deterministic() {
        let config = FieldConfig {
            dots_number: 25,
            motion: MotionKind::Drift,
            seed: Some(31),
            ..FieldConfig::default()
        };
        let mut a = Panel::from_config(&config).unwrap();
        let mut b = Panel::from_config(&config).unwrap();
        let proj = projector();
        let ctx = FrameContext::new(&proj);
        for _ in 0..20 {
            let pa = a.update(&ctx).positions.to_vec();
            let pb = b.update(&ctx).positions.to_vec();
            assert_eq!(pa, pb);
        }
        assert_eq!(a.lines(), b.lines());
    }

    #[test]
    fn drift_targets_stay_reachable_when_spread_exceeds_boundary() {
        let config = FieldConfig {
            dots_number: 50,
            motion: MotionKind::Drift,
            spread: 8.0,
            boundary: 2.0,
            ..FieldConfig::default()
        };
        let mut panel = Panel::with_seed(&config, 21).unwrap();
        assert!(panel.field().targets().iter().all(|t| t.abs() <= 2.0));
        assert!(panel.field().positions().iter().all(|p| p.abs() <= 2.0));

        let proj = projector();
        let ctx = FrameContext::new(&proj);
        for _ in 0..2000 {
            panel.update(&ctx);
        }
        assert!(panel.field().targets().iter().all(|t| t.abs() <= 2.0));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = FieldConfig {
            dots_number: 0,
            ..FieldConfig::default()
        };
        assert!(Panel::with_seed(&config, 1).is_err());
    }
}

//! Screen-space proximity graph between points

use crate::math::{distance_between, opacity_from_distance, OpacityCurve};
use plexus_core::{Vec2, Vec3};

/// Default screen-space link distance in pixels
pub const DEFAULT_MAX_DISTANCE: f32 = 100.0;

/// Maps world positions to viewport pixels (origin top-left, y down).
///
/// Returns None when the point cannot be placed on screen, e.g. it sits
/// behind the camera.
pub trait Projector {
    fn project(&self, world: Vec3) -> Option<Vec2>;
}

/// Line segment geometry: two vertices per linked pair.
///
/// `positions` holds 6 floats per pair (xyz, xyz); `colors` holds 6 floats per
/// pair with the pair's opacity repeated for rgb of both vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

/// One linked pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub opacity: f32,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
    }

    pub fn push(&mut self, start: Vec3, end: Vec3, opacity: f32) {
        self.positions.extend_from_slice(&start.to_array());
        self.positions.extend_from_slice(&end.to_array());
        self.colors.extend_from_slice(&[opacity; 6]);
    }

    pub fn pair_count(&self) -> usize {
        self.positions.len() / 6
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.positions
            .chunks_exact(6)
            .zip(self.colors.chunks_exact(6))
            .map(|(p, c)| Segment {
                start: Vec3::new(p[0], p[1], p[2]),
                end: Vec3::new(p[3], p[4], p[5]),
                opacity: c[0],
            })
    }
}

/// Rebuild `out` with every pair `i < j` whose projected distance is below
/// `max_distance`. Under the threshold curve, pairs inside the fade distance
/// (opacity exactly zero) are left out. Pairs with a point that does not
/// project, or whose distance is not a number, are skipped.
///
/// Returns the number of pairs emitted.
pub fn build_lines(
    positions: &[f32],
    projector: &dyn Projector,
    max_distance: f32,
    curve: OpacityCurve,
    out: &mut LineSet,
) -> usize {
    out.clear();

    let count = positions.len() / 3;
    let projected: Vec<(Vec3, Option<Vec2>)> = (0..count)
        .map(|i| {
            let world = Vec3::from_slice(positions, i);
            (world, projector.project(world))
        })
        .collect();

    for i in 0..count {
        let (pos1, Some(screen1)) = projected[i] else {
            continue;
        };
        for (pos2, screen2) in &projected[i + 1..] {
            let Some(screen2) = screen2 else {
                continue;
            };
            let distance = distance_between(screen1, *screen2);
            if distance.is_nan() || distance >= max_distance {
                continue;
            }
            let alpha = opacity_from_distance(curve, distance);
            if curve == OpacityCurve::Threshold && alpha == 0.0 {
                continue;
            }
            out.push(pos1, *pos2, alpha);
        }
    }

    let pairs = out.pair_count();
    tracing::debug!(points = count, pairs, "rebuilt line set");
    pairs
}

//! Screen-space distance, opacity mapping and velocity helpers

use crate::rand::{random_between, RandomSource};
use plexus_core::{Vec2, Vec3};

/// Slowest speed a drifting point can be assigned
pub const MIN_VELOCITY_SPEED: f32 = 0.001;
/// Fastest speed a drifting point can be assigned (exclusive)
pub const MAX_VELOCITY_SPEED: f32 = 0.005;

/// Distance below which the threshold curve keeps lines invisible
const OPACITY_FADE_DISTANCE: f32 = 50.0;

/// Mapping from screen-space pair distance to line opacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpacityCurve {
    /// `distance / 100 / 5`
    #[default]
    Linear,
    /// Zero up to 50px, then `distance / 100 / 1.1`; lines brighten as points separate
    Threshold,
}

impl OpacityCurve {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "linear" => Some(Self::Linear),
            "threshold" => Some(Self::Threshold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Threshold => "threshold",
        }
    }
}

/// Planar distance between two screen positions
pub fn distance_between(a: Vec2, b: Vec2) -> f32 {
    a.distance(&b)
}

/// True when the two screen positions are at most `radius` apart
pub fn is_within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance_between(a, b) <= radius
}

/// Line opacity for a pair `distance` pixels apart
pub fn opacity_from_distance(curve: OpacityCurve, distance: f32) -> f32 {
    match curve {
        OpacityCurve::Linear => distance / 100.0 / 5.0,
        OpacityCurve::Threshold => {
            if distance <= OPACITY_FADE_DISTANCE {
                0.0
            } else {
                distance / 100.0 / 1.1
            }
        }
    }
}

/// Scale `delta` to length `speed`. A zero delta yields a zero velocity.
pub fn normalize_velocity(delta: Vec3, speed: f32) -> Vec3 {
    let distance = delta.length();
    if distance == 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        delta.x / distance * speed,
        delta.y / distance * speed,
        delta.z / distance * speed,
    )
}

/// Random speed in `[MIN_VELOCITY_SPEED, MAX_VELOCITY_SPEED)`
pub fn random_velocity_speed(rng: &mut dyn RandomSource) -> f32 {
    random_between(rng, MIN_VELOCITY_SPEED, MAX_VELOCITY_SPEED)
}

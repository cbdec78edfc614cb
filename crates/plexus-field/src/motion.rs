//! Per-frame point motion: target chasing and bounded drifting

use crate::math::{normalize_velocity, random_velocity_speed};
use crate::points::PointField;
use crate::rand::{random_coordinate, RandomSource};

/// Per-axis distance at which a chasing point counts as arrived
pub const CHASE_ARRIVAL_THRESHOLD: f32 = 0.3;
/// Per-axis distance at which a drifting point counts as arrived
pub const DRIFT_ARRIVAL_THRESHOLD: f32 = 0.1;
/// Fraction of velocity kept after reflecting off the boundary
pub const BOUNCE_DAMPING: f32 = 0.8;

/// What a chasing point's target becomes once it arrives on an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrivalReset {
    /// Target collapses to the interpolation factor itself, so every point
    /// eventually settles near `(factor, factor, factor)`
    Factor,
    /// Fresh coordinate drawn in `[-spread, spread)`
    Random { spread: f32 },
}

/// How points move each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionPolicy {
    /// First-order exponential approach toward the target
    Chase {
        factor: f32,
        arrival_threshold: f32,
        reset: ArrivalReset,
    },
    /// Constant-speed travel with elastic reflection off a cubic boundary
    Drift {
        arrival_threshold: f32,
        boundary: f32,
        /// Targets are redrawn within this range; usually equal to `boundary`
        spread: f32,
        bounce_damping: f32,
    },
}

impl MotionPolicy {
    pub fn chase(factor: f32, reset: ArrivalReset) -> Self {
        Self::Chase {
            factor,
            arrival_threshold: CHASE_ARRIVAL_THRESHOLD,
            reset,
        }
    }

    pub fn drift(boundary: f32, spread: f32) -> Self {
        Self::Drift {
            arrival_threshold: DRIFT_ARRIVAL_THRESHOLD,
            boundary,
            spread,
            bounce_damping: BOUNCE_DAMPING,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Chase { .. } => "chase",
            Self::Drift { .. } => "drift",
        }
    }
}

/// Give every point its starting velocity. Chasing points carry none;
/// drifting points head toward their first target at a random speed.
pub fn prime(field: &mut PointField, policy: &MotionPolicy, rng: &mut dyn RandomSource) {
    match *policy {
        MotionPolicy::Chase { .. } => field.velocities.fill(0.0),
        MotionPolicy::Drift { .. } => {
            for i in 0..field.len() {
                let speed = random_velocity_speed(rng);
                let v = normalize_velocity(field.target(i) - field.position(i), speed);
                field.set_velocity(i, v);
            }
        }
    }
}

/// Advance every point by one frame in place
pub fn advance(field: &mut PointField, policy: &MotionPolicy, rng: &mut dyn RandomSource) {
    match *policy {
        MotionPolicy::Chase {
            factor,
            arrival_threshold,
            reset,
        } => chase_step(field, factor, arrival_threshold, reset, rng),
        MotionPolicy::Drift {
            arrival_threshold,
            boundary,
            spread,
            bounce_damping,
        } => {
            for i in 0..field.len() {
                for axis in 0..3 {
                    drift_axis(
                        field,
                        i,
                        axis,
                        DriftParams {
                            arrival_threshold,
                            boundary,
                            spread,
                            bounce_damping,
                        },
                        rng,
                    );
                }
            }
        }
    }
}

fn chase_step(
    field: &mut PointField,
    factor: f32,
    arrival_threshold: f32,
    reset: ArrivalReset,
    rng: &mut dyn RandomSource,
) {
    for idx in 0..field.positions.len() {
        let target = field.targets[idx];
        let position = &mut field.positions[idx];
        *position += (target - *position) * factor;

        if (target - *position).abs() < arrival_threshold {
            field.targets[idx] = match reset {
                ArrivalReset::Factor => factor,
                ArrivalReset::Random { spread } => random_coordinate(rng, spread),
            };
        }
    }
}

#[derive(Clone, Copy)]
struct DriftParams {
    arrival_threshold: f32,
    boundary: f32,
    spread: f32,
    bounce_damping: f32,
}

fn drift_axis(
    field: &mut PointField,
    i: usize,
    axis: usize,
    params: DriftParams,
    rng: &mut dyn RandomSource,
) {
    let idx = i * 3 + axis;
    field.positions[idx] += field.velocities[idx];

    if (field.targets[idx] - field.positions[idx]).abs() < params.arrival_threshold {
        // Only this axis gets a new target; the direction is recomputed in 3D
        field.targets[idx] = random_coordinate(rng, params.spread);
        let delta = field.target(i) - field.position(i);
        let speed = random_velocity_speed(rng);
        field.set_velocity(i, normalize_velocity(delta, speed));
    }

    let position = field.positions[idx];
    if position.abs() > params.boundary {
        field.velocities[idx] = -field.velocities[idx] * params.bounce_damping;
        field.positions[idx] = params.boundary.copysign(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{MAX_VELOCITY_SPEED, MIN_VELOCITY_SPEED};
    use crate::rand::{FieldRng, SequenceRng};
    use plexus_core::Vec3;

    fn single(position: Vec3, target: Vec3, velocity: Vec3) -> PointField {
        let mut field = PointField::zeroed(1);
        field.set_position(0, position);
        field.set_target(0, target);
        field.set_velocity(0, velocity);
        field
    }

    #[test]
    fn chase_moves_fraction_of_gap() {
        let mut field = single(Vec3::ZERO, Vec3::new(10.0, -10.0, 4.0), Vec3::ZERO);
        let policy = MotionPolicy::chase(0.1, ArrivalReset::Factor);
        let mut rng = FieldRng::new(1);
        advance(&mut field, &policy, &mut rng);
        let p = field.position(0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y + 1.0).abs() < 1e-6);
        assert!((p.z - 0.4).abs() < 1e-6);
        assert_eq!(field.target(0), Vec3::new(10.0, -10.0, 4.0));
    }

    #[test]
    fn chase_factor_reset_collapses_target() {
        let mut field = single(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.2, 8.0, 8.0), Vec3::ZERO);
        let policy = MotionPolicy::chase(0.05, ArrivalReset::Factor);
        let mut rng = FieldRng::new(1);
        advance(&mut field, &policy, &mut rng);
        assert_eq!(field.target(0).x, 0.05);
        assert_eq!(field.target(0).y, 8.0);
    }

    #[test]
    fn chase_random_reset_draws_new_target() {
        let mut field = single(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.2, 8.0, 8.0), Vec3::ZERO);
        let policy = MotionPolicy::chase(0.05, ArrivalReset::Random { spread: 5.0 });
        // 0.75 maps to 2.5 in [-5, 5)
        let mut rng = SequenceRng::new(vec![0.75]);
        advance(&mut field, &policy, &mut rng);
        assert!((field.target(0).x - 2.5).abs() < 1e-6);
    }

    #[test]
    fn drift_adds_velocity() {
        let mut field = single(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 3.0, 3.0),
            Vec3::new(0.002, -0.001, 0.003),
        );
        let policy = MotionPolicy::drift(5.0, 5.0);
        let mut rng = FieldRng::new(1);
        advance(&mut field, &policy, &mut rng);
        let p = field.position(0);
        assert!((p.x - 0.002).abs() < 1e-7);
        assert!((p.y + 0.001).abs() < 1e-7);
        assert!((p.z - 0.003).abs() < 1e-7);
    }

    #[test]
    fn drift_arrival_renormalizes_to_drawn_speed() {
        // x axis is within 0.1 of its target; y and z are far away
        let mut field = single(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.05, 4.0, -4.0),
            Vec3::new(0.001, 0.0, 0.0),
        );
        let policy = MotionPolicy::drift(5.0, 5.0);
        // new x target: -5 + 0.5 * 10 = 0.0; speed: 0.001 + 0.5 * 0.004 = 0.003
        let mut rng = SequenceRng::new(vec![0.5, 0.5]);
        let mut step_x = field.clone();
        drift_axis(
            &mut step_x,
            0,
            0,
            DriftParams {
                arrival_threshold: DRIFT_ARRIVAL_THRESHOLD,
                boundary: 5.0,
                spread: 5.0,
                bounce_damping: BOUNCE_DAMPING,
            },
            &mut rng,
        );
        assert_eq!(step_x.target(0).x, 0.0);
        assert!((step_x.velocity(0).length() - 0.003).abs() < 1e-7);

        // Full frame keeps arity and moves every axis
        let mut rng = SequenceRng::new(vec![0.5, 0.5]);
        advance(&mut field, &policy, &mut rng);
        assert_eq!(field.positions().len(), 3);
        assert_eq!(field.velocities().len(), 3);
    }

    #[test]
    fn drift_arrival_with_zero_delta_stops_point() {
        // Target redraw lands exactly on the current position: x=0 target 0,
        // y and z already at their targets.
        let mut field = single(
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.05, 1.0, 1.0),
            Vec3::ZERO,
        );
        let mut rng = SequenceRng::new(vec![0.5]);
        drift_axis(
            &mut field,
            0,
            0,
            DriftParams {
                arrival_threshold: DRIFT_ARRIVAL_THRESHOLD,
                boundary: 5.0,
                spread: 5.0,
                bounce_damping: BOUNCE_DAMPING,
            },
            &mut rng,
        );
        assert_eq!(field.target(0), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(field.velocity(0), Vec3::ZERO);
    }

    #[test]
    fn drift_bounce_clamps_and_reflects() {
        let mut field = single(
            Vec3::new(4.999, -4.999, 0.0),
            Vec3::new(-3.0, 3.0, 3.0),
            Vec3::new(0.004, -0.004, 0.0),
        );
        let policy = MotionPolicy::drift(5.0, 5.0);
        let mut rng = FieldRng::new(2);
        advance(&mut field, &policy, &mut rng);
        let p = field.position(0);
        let v = field.velocity(0);
        assert_eq!(p.x, 5.0);
        assert_eq!(p.y, -5.0);
        assert!((v.x + 0.004 * 0.8).abs() < 1e-7);
        assert!((v.y - 0.004 * 0.8).abs() < 1e-7);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn prime_sets_drift_speed() {
        let mut rng = FieldRng::new(77);
        let mut field = PointField::random(20, 5.0, &mut rng);
        let policy = MotionPolicy::drift(5.0, 5.0);
        prime(&mut field, &policy, &mut rng);
        for i in 0..field.len() {
            let speed = field.velocity(i).length();
            assert!(speed >= MIN_VELOCITY_SPEED * 0.999 && speed <= MAX_VELOCITY_SPEED * 1.001);
        }

        let chase = MotionPolicy::chase(0.02, ArrivalReset::Factor);
        prime(&mut field, &chase, &mut rng);
        assert!(field.velocities().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn arity_preserved_over_many_frames() {
        let mut rng = FieldRng::new(123);
        for policy in [
            MotionPolicy::chase(0.02, ArrivalReset::Random { spread: 5.0 }),
            MotionPolicy::drift(5.0, 5.0),
        ] {
            let mut field = PointField::random(40, 5.0, &mut rng);
            prime(&mut field, &policy, &mut rng);
            for _ in 0..500 {
                advance(&mut field, &policy, &mut rng);
            }
            assert_eq!(field.positions().len(), 120);
            assert_eq!(field.targets().len(), 120);
            assert_eq!(field.velocities().len(), 120);
            if let MotionPolicy::Drift { boundary, .. } = policy {
                assert!(field.positions().iter().all(|p| p.abs() <= boundary));
            }
        }
    }
}

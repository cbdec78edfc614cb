//! Point field state: flat xyz buffers ready for direct upload

use crate::rand::{random_coordinate, RandomSource};
use plexus_core::Vec3;

/// Fixed-size set of points with positions, targets and velocities.
///
/// All three buffers hold exactly `3 * count` floats in xyz order and never
/// change length after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PointField {
    count: usize,
    pub(crate) positions: Vec<f32>,
    pub(crate) targets: Vec<f32>,
    pub(crate) velocities: Vec<f32>,
}

impl PointField {
    /// All points, targets and velocities at the origin
    pub fn zeroed(count: usize) -> Self {
        Self {
            count,
            positions: vec![0.0; count * 3],
            targets: vec![0.0; count * 3],
            velocities: vec![0.0; count * 3],
        }
    }

    /// Positions and targets drawn uniformly in `[-spread, spread)` per axis
    pub fn random(count: usize, spread: f32, rng: &mut dyn RandomSource) -> Self {
        let mut field = Self::zeroed(count);
        for i in 0..count {
            for axis in 0..3 {
                field.positions[i * 3 + axis] = random_coordinate(rng, spread);
            }
            for axis in 0..3 {
                field.targets[i * 3 + axis] = random_coordinate(rng, spread);
            }
        }
        field
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions, i)
    }

    pub fn target(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.targets, i)
    }

    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities, i)
    }

    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&p.to_array());
    }

    pub fn set_target(&mut self, i: usize, t: Vec3) {
        self.targets[i * 3..i * 3 + 3].copy_from_slice(&t.to_array());
    }

    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.velocities[i * 3..i * 3 + 3].copy_from_slice(&v.to_array());
    }
}

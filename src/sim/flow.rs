//! Flow-field sway applied to branch directions
//!
//! Purely cosmetic: deflects where a branch points this tick, never how far
//! it has grown or whether its descendants may start.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::noise::NoiseSource;
use crate::remap;

/// Noise-driven direction perturbation descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowField {
    /// Degrees removed from the range per level of depth below the tips
    pub change_step: f32,
    /// Lower bound of the range (degrees, before dividing by system age)
    pub min_change: f32,
    /// Upper bound of the range (degrees, before dividing by system age)
    pub max_change: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    /// Time scale (milliseconds per noise unit)
    pub z_scale: f32,
}

impl Default for FlowField {
    fn default() -> Self {
        Self {
            change_step: 5.0,
            min_change: 10.0,
            max_change: 100.0,
            x_scale: 50.0,
            y_scale: 50.0,
            z_scale: 2000.0,
        }
    }
}

impl FlowField {
    /// Maximum deflection in degrees for a branch of `branch_age`
    ///
    /// Branches near the tips (age close to the system age) get the full
    /// range; each level closer to the trunk loses `change_step` degrees,
    /// down to `min_change / system_age`.
    pub fn angle_range(&self, system_age: u32, branch_age: u32) -> f32 {
        let age = system_age.max(1) as f32;
        let below_tips = age - branch_age as f32;
        (self.min_change / age).max(self.max_change / age - self.change_step * below_tips)
    }

    /// Deflection in radians sampled at `at` and `time` (milliseconds)
    pub fn deflection<N: NoiseSource + ?Sized>(
        &self,
        at: Vec2,
        time: f32,
        system_age: u32,
        branch_age: u32,
        noise: &N,
    ) -> f32 {
        let range = self.angle_range(system_age, branch_age);
        let (x, y) = (at.x / self.x_scale, at.y / self.y_scale);
        let n = noise.sample(x, y, time / self.z_scale);
        remap(n, 0.0, 1.0, -range, range).to_radians()
    }

    /// All scales must be non-zero and the bounds ordered
    pub fn is_valid(&self) -> bool {
        self.x_scale != 0.0
            && self.y_scale != 0.0
            && self.z_scale != 0.0
            && self.min_change >= 0.0
            && self.max_change >= self.min_change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::noise::ConstantNoise;

    #[test]
    fn test_tips_sway_more_than_trunk() {
        let flow = FlowField::default();
        let tip = flow.angle_range(7, 7);
        let trunk = flow.angle_range(7, 0);
        assert!((tip - 100.0 / 7.0).abs() < 1e-4);
        assert!((trunk - 10.0 / 7.0).abs() < 1e-4);
        assert!(tip > trunk);
    }

    #[test]
    fn test_deflection_bounds() {
        let flow = FlowField::default();
        let at = Vec2::new(10.0, 20.0);
        let range = flow.angle_range(3, 3).to_radians();

        let sway = |n: f32| flow.deflection(at, 0.0, 3, 3, &ConstantNoise(n));
        assert!(sway(0.5).abs() < 1e-6);
        assert!((sway(1.0) - range).abs() < 1e-6);
        assert!((sway(0.0) + range).abs() < 1e-6);
    }

    #[test]
    fn test_validation() {
        assert!(FlowField::default().is_valid());
        let broken = FlowField {
            z_scale: 0.0,
            ..Default::default()
        };
        assert!(!broken.is_valid());
    }
}

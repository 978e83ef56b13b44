//! Grove - animated stochastic L-system plants
//!
//! Core modules:
//! - `sim`: Rewrite engine and growth state machine (deterministic given the injected sources)
//! - `plants`: Built-in plant definitions and validation
//! - `palette`: Leaf/branch color collaborator
//! - `renderer`: CPU tessellation of growth marks into vertices
//! - `settings`: Data-driven growth tuning
//! - `error`: Configuration errors

pub mod error;
pub mod palette;
pub mod plants;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use palette::{Palette, Rgba};
pub use plants::{PlantDefinition, PlantPreset, Variation};
pub use settings::Settings;

use glam::Vec2;

/// Growth configuration constants
pub mod consts {
    /// Base growth speed (length units per tick)
    pub const GROWTH_SPEED: f32 = 0.1;
    /// Per-tick growth increment jitter (multiplicative range)
    pub const GROWTH_JITTER: (f32, f32) = (0.8, 1.2);
    /// Final branch length jitter around the nominal length
    pub const LENGTH_JITTER: (f32, f32) = (0.8, 1.2);

    /// Maximum random branch rotation in degrees (scaled by relative depth)
    pub const BRANCH_JITTER: f32 = 5.0;
    /// Lower bound for the random branch rotation in degrees
    pub const MIN_BRANCH_JITTER: f32 = 1.0;

    /// Stroke width before per-plant scaling
    pub const BRANCH_WIDTH: f32 = 0.6;

    /// Symbol used for synthesized bridge placeholders
    pub const BRIDGE_SYMBOL: char = ':';
}

/// Rotate a direction by `degrees` (positive is counter-clockwise in y-up space)
#[inline]
pub fn rotate_degrees(direction: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(direction)
}

/// Rotate a direction by `radians`
#[inline]
pub fn rotate_radians(direction: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(direction)
}

/// Linear remap of `value` from `[in_lo, in_hi]` to `[out_lo, out_hi]` (unclamped)
///
/// A degenerate input range maps everything to `out_lo`.
#[inline]
pub fn remap(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    let span = in_hi - in_lo;
    if span == 0.0 {
        return out_lo;
    }
    out_lo + (value - in_lo) / span * (out_hi - out_lo)
}

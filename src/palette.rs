//! Leaf and branch colors
//!
//! Colors are chosen in HSB space (hue in degrees, the rest in 0-100) and
//! stored as linear RGBA in 0-1, ready for vertex buffers.

use serde::{Deserialize, Serialize};

use crate::sim::RandomSource;

/// RGBA color, each channel in 0-1
pub type Rgba = [f32; 4];

/// Per-plant offset applied to the leaf color ranges
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorShift {
    /// Degrees added to the hue range (wraps at 360)
    pub hue: f32,
    pub brightness: f32,
    pub saturation: f32,
    pub alpha: f32,
}

impl ColorShift {
    pub const fn new(hue: f32, brightness: f32, saturation: f32, alpha: f32) -> Self {
        Self {
            hue,
            brightness,
            saturation,
            alpha,
        }
    }
}

/// Color ranges for one plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Leaf hue range in degrees (before shift)
    pub leaf_hue: (f32, f32),
    pub leaf_saturation: (f32, f32),
    pub leaf_brightness: (f32, f32),
    pub leaf_alpha: f32,
    pub shift: ColorShift,
    /// Branch color as (hue, saturation, brightness, alpha)
    pub branch: (f32, f32, f32, f32),
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            leaf_hue: (250.0, 310.0),
            leaf_saturation: (70.0, 80.0),
            leaf_brightness: (75.0, 90.0),
            leaf_alpha: 20.0,
            shift: ColorShift::default(),
            branch: (250.0, 70.0, 30.0, 100.0),
        }
    }
}

impl Palette {
    pub fn with_shift(shift: ColorShift) -> Self {
        Self {
            shift,
            ..Self::default()
        }
    }

    /// Random leaf color within the shifted ranges
    pub fn leaf_color<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Rgba {
        let shift = &self.shift;
        let span = self.leaf_hue.1 - self.leaf_hue.0;
        let hue = (self.leaf_hue.0 + shift.hue + rng.range(0.0, span)).rem_euclid(360.0);
        let saturation = rng.range(
            self.leaf_saturation.0 + shift.saturation,
            self.leaf_saturation.1 + shift.saturation,
        );
        let brightness = rng.range(
            self.leaf_brightness.0 + shift.brightness,
            self.leaf_brightness.1 + shift.brightness,
        );
        hsb_to_rgba(hue, saturation, brightness, self.leaf_alpha + shift.alpha)
    }

    pub fn branch_color(&self) -> Rgba {
        let (h, s, b, a) = self.branch;
        hsb_to_rgba(h, s, b, a)
    }
}

/// Convert HSB (hue in degrees, saturation/brightness/alpha in 0-100) to RGBA
pub fn hsb_to_rgba(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let v = (brightness / 100.0).clamp(0.0, 1.0);
    let a = (alpha / 100.0).clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, a]
}

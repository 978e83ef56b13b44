//! Built-in plant definitions
//!
//! A definition pairs a grammar with the numbers that give it its look. Use
//! [`PlantDefinition::grow`] to turn one into a generated [`LSystem`].

use glam::Vec2;

use crate::error::ConfigError;
use crate::palette::{ColorShift, Palette};
use crate::settings::Settings;
use crate::sim::{GrowthParams, LSystem, RandomSource, RawRule, RuleSpec};

/// Named plant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlantPreset {
    Flower1,
    Flower2,
    Flower3,
    Flower4,
    Tree,
    Tree2,
    Tree3,
}

impl PlantPreset {
    pub const ALL: [PlantPreset; 7] = [
        PlantPreset::Flower1,
        PlantPreset::Flower2,
        PlantPreset::Flower3,
        PlantPreset::Flower4,
        PlantPreset::Tree,
        PlantPreset::Tree2,
        PlantPreset::Tree3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantPreset::Flower1 => "flower1",
            PlantPreset::Flower2 => "flower2",
            PlantPreset::Flower3 => "flower3",
            PlantPreset::Flower4 => "flower4",
            PlantPreset::Tree => "tree",
            PlantPreset::Tree2 => "tree2",
            PlantPreset::Tree3 => "tree3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let name = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|preset| preset.as_str() == name)
    }

    /// Like [`PlantPreset::from_str`], reporting unknown names as an error
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::from_str(s).ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }

    pub fn definition(&self) -> PlantDefinition {
        let base = |axiom, rules| PlantDefinition::new(self.as_str(), axiom, rules);

        match self {
            PlantPreset::Flower1 => PlantDefinition {
                length: 3.5,
                angle: 27.0,
                leaf_size: 2.0,
                iterations: 5,
                branch_width_scale: 0.8,
                ..base(
                    'S',
                    RuleSpec::new()
                        .rule('S', "X")
                        .rule('X', ["F[-X][+X]X"])
                        .rule('F', ["F", "Ff"]),
                )
            },
            PlantPreset::Flower2 => PlantDefinition {
                length: 3.0,
                angle: 3.0,
                leaf_size: 3.0,
                iterations: 3,
                branch_width_scale: 1.2,
                ..base(
                    'S',
                    RuleSpec::new()
                        .rule('S', "X")
                        .rule('X', ["[-FX][FX][+FX]"])
                        .rule('F', ["FF", "Ff"]),
                )
            },
            PlantPreset::Flower3 => PlantDefinition {
                length: 6.0,
                angle: 15.0,
                leaf_size: 2.0,
                iterations: 5,
                branch_width_scale: 1.2,
                color_shift: Some(ColorShift::new(0.0, 0.0, 0.0, 10.0)),
                ..base(
                    'S',
                    RuleSpec::new()
                        .rule('S', "X")
                        .rule('X', ["[-FX][FX][+FX]", "X"])
                        .rule('F', ["Ff"]),
                )
            },
            PlantPreset::Flower4 => PlantDefinition {
                length: 2.3,
                angle: 12.0,
                leaf_size: 8.0,
                iterations: 4,
                branch_width_scale: 0.3,
                color_shift: Some(ColorShift::new(0.0, 0.0, -10.0, -10.0)),
                ..base(
                    'S',
                    RuleSpec::new()
                        .rule('S', "X")
                        .rule('X', ["F[-X]F[+X]F+[[-X][X]]", "F[[+X][X]]F[+X]F[-X]"])
                        .rule('F', ["F", "FF", "FF"]),
                )
            },
            PlantPreset::Tree => PlantDefinition {
                length: 1.5,
                angle: 27.0,
                leaf_size: 5.0,
                iterations: 7,
                branch_width_scale: 0.6,
                color_shift: Some(ColorShift::new(0.0, -5.0, 0.0, -3.0)),
                growth_speed_mult: Some(1.2),
                ..base(
                    'S',
                    RuleSpec::new()
                        .rule('S', "gGX")
                        .rule('G', "gG")
                        .rule('X', ["F[-X]F[+X]F+[[-X][X]]"])
                        .rule('F', ["F", "FF", "FF"]),
                )
            },
            PlantPreset::Tree2 => PlantDefinition {
                length: 2.2,
                angle: 17.0,
                leaf_size: 5.0,
                iterations: 5,
                branch_width_scale: 0.6,
                color_shift: Some(ColorShift::new(30.0, 0.0, 0.0, -10.0)),
                ..base(
                    'X',
                    RuleSpec::new()
                        .rule('X', "F[-A]F[+X]Fx[[-X][X]]")
                        .rule('F', ["FF", "FF"]),
                )
            },
            PlantPreset::Tree3 => PlantDefinition {
                length: 5.0,
                angle: 10.0,
                leaf_size: 2.0,
                iterations: 7,
                branch_width_scale: 0.5,
                color_shift: Some(ColorShift::new(30.0, 0.0, 0.0, 15.0)),
                ..base(
                    'S',
                    RuleSpec::new()
                        .rule('S', "ffffX")
                        .rule('X', ["X", "[-FX][X][+FX]", "[X][+FX]"])
                        .rule('F', ["F", "Ff"]),
                )
            },
        }
    }
}

/// Per-instance offsets so plants of the same kind differ
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Variation {
    /// Degrees added to the definition's angle
    pub angle: f32,
    /// Added to the definition's nominal length
    pub length: f32,
    /// Degrees added to the leaf hue (on top of the definition's shift)
    pub hue: f32,
}

/// Everything needed to grow one kind of plant
#[derive(Debug, Clone, PartialEq)]
pub struct PlantDefinition {
    pub name: String,
    pub axiom: char,
    pub rules: RuleSpec,
    pub length: f32,
    /// Rotation for `+` / `-` in degrees
    pub angle: f32,
    pub leaf_size: f32,
    /// `generate()` calls before the animation starts
    pub iterations: u32,
    /// Multiplies the settings' branch width
    pub branch_width_scale: f32,
    pub color_shift: Option<ColorShift>,
    /// Multiplies the settings' growth speed
    pub growth_speed_mult: Option<f32>,
}

impl PlantDefinition {
    /// Definition with neutral look parameters
    pub fn new(name: impl Into<String>, axiom: char, rules: RuleSpec) -> Self {
        Self {
            name: name.into(),
            axiom,
            rules,
            length: 5.0,
            angle: 25.0,
            leaf_size: 2.0,
            iterations: 4,
            branch_width_scale: 1.0,
            color_shift: None,
            growth_speed_mult: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.axiom.is_whitespace() {
            return Err(ConfigError::BlankAxiom(self.name.clone()));
        }
        for (field, value) in [
            ("length", self.length),
            ("angle", self.angle),
            ("leaf_size", self.leaf_size),
            ("branch_width_scale", self.branch_width_scale),
            ("growth_speed_mult", self.growth_speed_mult.unwrap_or(1.0)),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive {
                    plant: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations(self.name.clone()));
        }
        for (symbol, rule) in self.rules.iter() {
            if matches!(rule, RawRule::Alternatives(alternatives) if alternatives.is_empty()) {
                return Err(ConfigError::EmptyRule {
                    plant: self.name.clone(),
                    symbol,
                });
            }
        }
        Ok(())
    }

    /// Growth parameters for one instance of this plant
    pub fn params(&self, settings: &Settings, variation: Variation) -> GrowthParams {
        let mut shift = self.color_shift.unwrap_or_default();
        shift.hue += variation.hue;

        GrowthParams {
            angle: self.angle + variation.angle,
            length: self.length + variation.length,
            leaf_size: self.leaf_size,
            growth_speed: settings.growth_speed * self.growth_speed_mult.unwrap_or(1.0),
            growth_jitter: settings.growth_jitter,
            length_jitter: settings.length_jitter,
            branch_jitter: settings.branch_jitter,
            min_branch_jitter: settings.min_branch_jitter,
            branch_width: settings.branch_width * self.branch_width_scale,
            palette: Palette::with_shift(shift),
            flow_field: settings.flow_field,
        }
    }

    /// Iteration count after the settings override
    pub fn iterations(&self, settings: &Settings) -> u32 {
        settings.iterations.unwrap_or(self.iterations)
    }

    /// Validate, create the L-system at `origin` and run every generation
    pub fn grow<R: RandomSource + ?Sized>(
        &self,
        settings: &Settings,
        origin: Vec2,
        variation: Variation,
        rng: &mut R,
    ) -> Result<LSystem, ConfigError> {
        self.validate()?;
        settings.validate()?;

        let params = self.params(settings, variation);
        let mut system = LSystem::new(self.axiom, &self.rules, params, origin, rng);
        let iterations = self.iterations(settings);
        for _ in 0..iterations {
            let stats = system.generate(rng);
            if !stats.balanced() {
                log::warn!(
                    "{}: unbalanced brackets in generation {} ({} stray, {} unclosed)",
                    self.name,
                    system.generation(),
                    stats.stray_pops,
                    stats.unclosed
                );
            }
        }

        log::info!(
            "Grew {}: {} iterations, {} symbols, age {}",
            self.name,
            iterations,
            system.sentence().len(),
            system.age()
        );
        Ok(system)
    }
}

//! L-system aggregate: sentence, grammar, transforms and global age
//!
//! Two phases drive it: `generate()` a fixed number of times to reach the
//! target structure, then `tick()` once per animation frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dispatch::{self, DispatchContext};
use super::flow::FlowField;
use super::grammar::{GrammarTable, RuleSpec};
use super::mark::Mark;
use super::noise::NoiseSource;
use super::random::RandomSource;
use super::rewrite::{GenerationStats, rewrite_sentence};
use super::sentence::Sentence;
use super::stack::{TransformFrame, TransformStack};
use super::symbol::{ActivatedSymbol, TickContext};
use super::transform::{Transform, TransformArena, TransformId};
use crate::consts::*;
use crate::palette::Palette;

/// Per-instance growth parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Rotation applied by `+` / `-` (degrees)
    pub angle: f32,
    /// Nominal branch length
    pub length: f32,
    /// Leaf/bud diameter
    pub leaf_size: f32,
    /// Nominal growth per tick
    pub growth_speed: f32,
    /// Multiplicative jitter range of each growth increment
    pub growth_jitter: (f32, f32),
    /// Multiplicative jitter range of final branch lengths
    pub length_jitter: (f32, f32),
    /// Random branch rotation at full relative depth (degrees)
    pub branch_jitter: f32,
    /// Random branch rotation floor (degrees)
    pub min_branch_jitter: f32,
    /// Stroke width before age taper
    pub branch_width: f32,
    pub palette: Palette,
    pub flow_field: Option<FlowField>,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            angle: 25.0,
            length: 5.0,
            leaf_size: 2.0,
            growth_speed: GROWTH_SPEED,
            growth_jitter: GROWTH_JITTER,
            length_jitter: LENGTH_JITTER,
            branch_jitter: BRANCH_JITTER,
            min_branch_jitter: MIN_BRANCH_JITTER,
            branch_width: BRANCH_WIDTH,
            palette: Palette::default(),
            flow_field: None,
        }
    }
}

/// A growing plant
#[derive(Debug, Clone)]
pub struct LSystem {
    params: GrowthParams,
    table: GrammarTable,
    sentence: Sentence,
    transforms: TransformArena,
    /// 1 + deepest bracket nesting reached so far (never decreases)
    age: u32,
    generation: u32,
    next_id: u32,
}

impl LSystem {
    /// Resolve the grammar and activate the axiom at `origin`
    ///
    /// An axiom that activates nothing (e.g. `[`) degrades to a placeholder
    /// carrying the root transform.
    pub fn new<R: RandomSource + ?Sized>(
        axiom: char,
        rules: &RuleSpec,
        params: GrowthParams,
        origin: Vec2,
        rng: &mut R,
    ) -> Self {
        let table = GrammarTable::resolve(rules);
        let mut transforms = TransformArena::new();
        let root = transforms.alloc(Transform::root(origin));
        let mut age = 1;
        let mut next_id = 0;

        let axiom_symbol = {
            let mut ctx = DispatchContext {
                arena: &mut transforms,
                params: &params,
                age: &mut age,
                next_id: &mut next_id,
                rng,
            };
            let mut stack = TransformStack::new(TransformFrame {
                transform: root,
                rotation: 0.0,
                depth: 0,
            });
            match dispatch::execute(&table.symbol(axiom), &mut stack, &mut ctx) {
                Some(activated) => activated,
                None => {
                    log::warn!("Axiom '{}' activates nothing, using a placeholder", axiom);
                    let id = ctx.allocate_id();
                    ActivatedSymbol::generic(id, axiom, root, 0.0, 0, ctx.arena)
                        .with_rule(table.has_rule(axiom))
                }
            }
        };

        log::info!(
            "L-system created: axiom '{}', {} rule(s), origin ({:.1}, {:.1})",
            axiom,
            table.len(),
            origin.x,
            origin.y
        );

        Self {
            params,
            table,
            sentence: std::iter::once(axiom_symbol).collect(),
            transforms,
            age,
            generation: 0,
            next_id,
        }
    }

    /// Run one rewrite step over the whole sentence
    pub fn generate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> GenerationStats {
        let sentence = std::mem::take(&mut self.sentence);
        let mut ctx = DispatchContext {
            arena: &mut self.transforms,
            params: &self.params,
            age: &mut self.age,
            next_id: &mut self.next_id,
            rng,
        };
        let (next, stats) = rewrite_sentence(sentence, &self.table, &mut ctx);
        self.sentence = next;

        let freed = self.transforms.compact(&mut self.sentence);
        self.generation += 1;

        log::debug!(
            "Generation {}: {} symbols, age {}, {} rewritten, {} bridged, {} slot(s) freed",
            self.generation,
            self.sentence.len(),
            self.age,
            stats.rewritten,
            stats.bridged,
            freed
        );
        stats
    }

    /// Advance growth by one frame and collect what should be drawn
    ///
    /// `time` is the animation clock in milliseconds (drives the flow field).
    pub fn tick<R, N>(&mut self, time: f32, rng: &mut R, noise: &N) -> Vec<Mark>
    where
        R: RandomSource + ?Sized,
        N: NoiseSource + ?Sized,
    {
        let mut marks = Vec::with_capacity(self.sentence.len());
        self.tick_into(time, rng, noise, &mut marks);
        marks
    }

    /// Like [`LSystem::tick`], appending into a reusable buffer
    pub fn tick_into<R, N>(&mut self, time: f32, rng: &mut R, noise: &N, marks: &mut Vec<Mark>)
    where
        R: RandomSource + ?Sized,
        N: NoiseSource + ?Sized,
    {
        let ctx = TickContext {
            params: &self.params,
            system_age: self.age,
            time,
        };
        for symbol in self.sentence.iter_mut() {
            if let Some(mark) = symbol.tick(&mut self.transforms, &ctx, rng, noise) {
                marks.push(mark);
            }
        }
    }

    /// True once every branch has reached its final length
    pub fn is_fully_grown(&self) -> bool {
        self.sentence
            .iter()
            .filter_map(ActivatedSymbol::as_branch)
            .all(|branch| branch.is_grown())
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn transforms(&self) -> &TransformArena {
        &self.transforms
    }

    pub fn transform(&self, id: TransformId) -> Option<&Transform> {
        self.transforms.get(id)
    }

    pub fn grammar(&self) -> &GrammarTable {
        &self.table
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Number of `generate()` calls so far
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

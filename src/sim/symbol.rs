//! Activated symbols and the per-tick growth state machine
//!
//! An activated symbol is one concrete occurrence of a grammar character in a
//! sentence. It reads its entry transform (borrowed from whatever precedes it)
//! and owns its exit transform. Three kinds exist:
//! - `Generic`: pass-through placeholder (unknown symbols, bridges)
//! - `Bud`: terminal marker, visible once the growth front reaches it
//! - `Branch`: segment that extends a little every tick

use super::lsystem::GrowthParams;
use super::mark::{Dot, Mark};
use super::noise::NoiseSource;
use super::random::RandomSource;
use super::transform::{Transform, TransformArena, TransformId};
use crate::palette::Rgba;
use crate::{remap, rotate_radians};

/// Stable identity of an activated symbol within one L-system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

/// Growth state of a branch segment
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Length at which the branch stops growing
    pub final_length: f32,
    /// Length reached so far (starts at 0, never exceeds `final_length`)
    pub current_length: f32,
    pub color: Rgba,
    /// Color of the leaf shown at the tip while growing
    pub leaf_color: Rgba,
}

impl Branch {
    pub fn new(final_length: f32, color: Rgba, leaf_color: Rgba) -> Self {
        Self {
            final_length,
            current_length: 0.0,
            color,
            leaf_color,
        }
    }

    #[inline]
    pub fn is_grown(&self) -> bool {
        self.current_length >= self.final_length
    }

    /// Extend by `increment`, clamped at the final length
    pub fn grow(&mut self, increment: f32) {
        if !self.is_grown() {
            let grown = self.current_length + increment.max(0.0);
            self.current_length = grown.min(self.final_length);
        }
    }
}

/// Variant-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Generic,
    Bud { color: Rgba },
    Branch(Branch),
}

/// Per-tick inputs shared by every symbol of one L-system
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub params: &'a GrowthParams,
    /// Global age of the L-system (1 + deepest nesting)
    pub system_age: u32,
    /// Animation clock in milliseconds
    pub time: f32,
}

/// One occurrence of a grammar symbol in a sentence
#[derive(Debug, Clone, PartialEq)]
pub struct ActivatedSymbol {
    pub id: SymbolId,
    pub symbol: char,
    /// Borrowed: exit of the predecessor or of the branch-point ancestor
    pub transform_in: TransformId,
    /// Owned exit transform
    pub transform_out: TransformId,
    /// Rotation (radians) applied to the entry direction
    pub rotation: f32,
    /// Bracket depth at which the symbol was activated
    pub age: u32,
    /// Whether the grammar had a rule for `symbol` when it was activated
    pub has_rule: bool,
    pub kind: SymbolKind,
}

impl ActivatedSymbol {
    fn anchored(
        id: SymbolId,
        symbol: char,
        transform_in: TransformId,
        rotation: f32,
        age: u32,
        kind: SymbolKind,
        arena: &mut TransformArena,
    ) -> Self {
        let entry = arena[transform_in];
        let transform_out = arena.alloc(Transform::new(entry.position, entry.direction));
        let activated = Self {
            id,
            symbol,
            transform_in,
            transform_out,
            rotation,
            age,
            has_rule: false,
            kind,
        };
        activated.refresh(arena);
        activated
    }

    /// Record whether the symbol is rewritten on the next generation
    pub fn with_rule(mut self, has_rule: bool) -> Self {
        self.has_rule = has_rule;
        self
    }

    /// Pass-through placeholder
    pub fn generic(
        id: SymbolId,
        symbol: char,
        transform_in: TransformId,
        rotation: f32,
        age: u32,
        arena: &mut TransformArena,
    ) -> Self {
        let kind = SymbolKind::Generic;
        Self::anchored(id, symbol, transform_in, rotation, age, kind, arena)
    }

    pub fn bud(
        id: SymbolId,
        symbol: char,
        transform_in: TransformId,
        rotation: f32,
        age: u32,
        color: Rgba,
        arena: &mut TransformArena,
    ) -> Self {
        let kind = SymbolKind::Bud { color };
        Self::anchored(id, symbol, transform_in, rotation, age, kind, arena)
    }

    pub fn branch(
        id: SymbolId,
        symbol: char,
        transform_in: TransformId,
        rotation: f32,
        age: u32,
        branch: Branch,
        arena: &mut TransformArena,
    ) -> Self {
        let kind = SymbolKind::Branch(branch);
        Self::anchored(id, symbol, transform_in, rotation, age, kind, arena)
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match &self.kind {
            SymbolKind::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Branch> {
        match &mut self.kind {
            SymbolKind::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    /// Recompute the exit transform from the current entry transform
    ///
    /// Entry transforms are shared and may have moved since the last pass, so
    /// this runs before a symbol is used as a rewrite basis and every tick.
    pub fn refresh(&self, arena: &mut TransformArena) {
        let entry = arena[self.transform_in];
        let mut exit = Transform {
            position: entry.position,
            direction: rotate_radians(entry.direction, self.rotation),
            start_growth: entry.start_growth,
            growing_previous: entry.growing_previous,
        };

        if let SymbolKind::Branch(branch) = &self.kind {
            let grown = branch.is_grown();
            exit.position += exit.direction * branch.current_length;
            exit.start_growth = entry.start_growth && grown;
            exit.growing_previous = entry.start_growth && !grown;
        }

        arena[self.transform_out] = exit;
    }

    /// Adopt `target` as the exit transform
    ///
    /// The current exit state is written into `target` first, so anything
    /// already reading `target` sees where this symbol ends.
    pub fn link_transform_out(&mut self, target: TransformId, arena: &mut TransformArena) {
        if target != self.transform_out {
            let exit = arena[self.transform_out];
            arena[target] = exit;
            self.transform_out = target;
        }
    }

    /// True if the growth front has reached this symbol's entry
    pub fn is_reached(&self, arena: &TransformArena) -> bool {
        let entry = arena[self.transform_in];
        entry.growing_previous || entry.start_growth
    }

    /// Advance one animation tick and report what should be drawn
    pub fn tick<R, N>(
        &mut self,
        arena: &mut TransformArena,
        ctx: &TickContext<'_>,
        rng: &mut R,
        noise: &N,
    ) -> Option<Mark>
    where
        R: RandomSource + ?Sized,
        N: NoiseSource + ?Sized,
    {
        let entry = arena[self.transform_in];
        let params = ctx.params;

        match self.kind {
            SymbolKind::Generic => {
                self.refresh(arena);
                return None;
            }
            SymbolKind::Bud { color } => {
                self.refresh(arena);
                return self.is_reached(arena).then(|| {
                    Mark::Dot(Dot {
                        center: entry.position,
                        radius: params.leaf_size / 2.0,
                        color,
                    })
                });
            }
            SymbolKind::Branch(_) => {}
        }

        let Some(branch) = self.as_branch_mut() else {
            return None;
        };
        let growing = !branch.is_grown();
        if entry.start_growth && growing {
            let (lo, hi) = params.growth_jitter;
            branch.grow(params.growth_speed * rng.range(lo, hi));
        }
        let (length, color, leaf_color) = (branch.current_length, branch.color, branch.leaf_color);

        self.refresh(arena);
        if !entry.start_growth {
            return None;
        }

        let mut exit = arena[self.transform_out];
        if let Some(flow) = &params.flow_field {
            let angle = flow.deflection(exit.position, ctx.time, ctx.system_age, self.age, noise);
            exit.direction = rotate_radians(exit.direction, angle);
            exit.position = entry.position + exit.direction * length;
            arena[self.transform_out] = exit;
        }

        let tip = growing.then(|| Dot {
            center: exit.position,
            radius: params.leaf_size / 2.0,
            color: leaf_color,
        });
        Some(Mark::Segment {
            start: entry.position,
            end: exit.position,
            width: params.branch_width * taper(self.age, ctx.system_age),
            color,
            tip,
        })
    }
}

/// Stroke multiplier for a branch of `age` in a system of `system_age`
///
/// The trunk (age 1) is `max(0.7 * system_age, 1)` times thicker than the tips.
pub fn taper(age: u32, system_age: u32) -> f32 {
    let system_age = system_age as f32;
    let base = (0.7 * system_age).max(1.0);
    remap(age as f32, 1.0, system_age, base, 1.0)
}

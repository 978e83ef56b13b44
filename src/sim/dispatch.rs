//! Symbol dispatch: the closed set of actions a grammar character can trigger

use super::grammar::Symbol;
use super::lsystem::GrowthParams;
use super::random::RandomSource;
use super::stack::{TransformFrame, TransformStack};
use super::symbol::{ActivatedSymbol, Branch, SymbolId};
use super::transform::TransformArena;

/// What a grammar character does when executed against a transform stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GrowBud,
    GrowBranch,
    RotatePositive,
    RotateNegative,
    PushFrame,
    PopFrame,
    /// Default for unrecognized characters: a transform-carrying placeholder
    Identity,
}

impl Action {
    /// Case-insensitive character lookup
    pub fn for_symbol(ch: char) -> Self {
        match ch.to_ascii_uppercase() {
            'S' | 'X' | 'A' | 'B' => Action::GrowBud,
            'F' | 'G' => Action::GrowBranch,
            '+' => Action::RotatePositive,
            '-' => Action::RotateNegative,
            '[' => Action::PushFrame,
            ']' => Action::PopFrame,
            _ => Action::Identity,
        }
    }

    /// True for actions that activate a symbol (as opposed to editing the stack)
    pub fn activates(self) -> bool {
        matches!(
            self,
            Action::GrowBud | Action::GrowBranch | Action::Identity
        )
    }
}

/// Everything an action may touch besides the stack
pub struct DispatchContext<'a, R: RandomSource + ?Sized> {
    pub arena: &'a mut TransformArena,
    pub params: &'a GrowthParams,
    /// Global age of the L-system, raised by push-frame
    pub age: &'a mut u32,
    pub next_id: &'a mut u32,
    pub rng: &'a mut R,
}

impl<R: RandomSource + ?Sized> DispatchContext<'_, R> {
    pub(crate) fn allocate_id(&mut self) -> SymbolId {
        let id = SymbolId(*self.next_id);
        *self.next_id += 1;
        id
    }
}

/// Execute one resolved symbol against `stack`
///
/// Stack actions mutate the top frame and return `None`. Growth actions
/// anchor a new symbol at the top frame, replace that frame with the new
/// symbol's exit (zero pending rotation) and return the symbol.
pub fn execute<R: RandomSource + ?Sized>(
    symbol: &Symbol,
    stack: &mut TransformStack,
    ctx: &mut DispatchContext<'_, R>,
) -> Option<ActivatedSymbol> {
    let params = ctx.params;

    match symbol.action {
        Action::RotatePositive => {
            stack.top_mut().rotation += params.angle.to_radians();
            return None;
        }
        Action::RotateNegative => {
            stack.top_mut().rotation -= params.angle.to_radians();
            return None;
        }
        Action::PushFrame => {
            let depth = stack.push();
            *ctx.age = (*ctx.age).max(depth);
            return None;
        }
        Action::PopFrame => {
            if !stack.pop() {
                log::warn!("Unmatched '{}' ignored", symbol.ch);
            }
            return None;
        }
        Action::GrowBud | Action::GrowBranch | Action::Identity => {}
    }

    let frame = *stack.top();
    let id = ctx.allocate_id();
    let (ch, input, depth) = (symbol.ch, frame.transform, frame.depth);

    let activated = match symbol.action {
        Action::GrowBud => {
            let color = params.palette.leaf_color(&mut *ctx.rng);
            ActivatedSymbol::bud(id, ch, input, frame.rotation, depth, color, ctx.arena)
        }
        Action::GrowBranch => {
            // Deeper branches wander more, relative to the current system age
            let relative_depth = frame.depth as f32 / (*ctx.age).max(1) as f32;
            let spread = params.branch_jitter * relative_depth;
            let spread = spread.max(params.min_branch_jitter);
            let rotation = frame.rotation + ctx.rng.spread(spread).to_radians();

            let (lo, hi) = params.length_jitter;
            let final_length = params.length * ctx.rng.range(lo, hi);
            let leaf_color = params.palette.leaf_color(&mut *ctx.rng);
            let branch = Branch::new(final_length, params.palette.branch_color(), leaf_color);

            ActivatedSymbol::branch(id, ch, input, rotation, depth, branch, ctx.arena)
        }
        _ => ActivatedSymbol::generic(id, ch, input, frame.rotation, depth, ctx.arena),
    }
    .with_rule(symbol.has_rule);

    stack.replace_top(TransformFrame {
        transform: activated.transform_out,
        rotation: 0.0,
        depth: activated.age,
    });
    Some(activated)
}

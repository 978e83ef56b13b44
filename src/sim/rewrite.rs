//! One generation step: rewrite every activated symbol through the grammar
//!
//! Each rewritten symbol is replaced by the activated expansion of its rule.
//! The expansion starts from the symbol's entry transform and its last outer
//! (unbracketed) symbol adopts the replaced symbol's exit transform, so
//! whatever followed the replaced symbol stays attached to the new structure
//! without re-walking the sentence.

use super::dispatch::{self, DispatchContext};
use super::grammar::GrammarTable;
use super::random::RandomSource;
use super::sentence::Sentence;
use super::stack::{TransformFrame, TransformStack};
use super::symbol::ActivatedSymbol;
use crate::consts::BRIDGE_SYMBOL;

/// Bookkeeping for one `generate()` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Symbols replaced by a rule expansion
    pub rewritten: usize,
    /// Symbols carried forward unchanged
    pub carried: usize,
    /// Bridge placeholders synthesized to terminate a chain
    pub bridged: usize,
    pub pushes: u32,
    pub pops: u32,
    /// `]` with no matching `[` inside the same expansion
    pub stray_pops: u32,
    /// `[` still open when an expansion ended
    pub unclosed: usize,
}

impl GenerationStats {
    /// True if every expansion of this generation was well-bracketed
    pub fn balanced(&self) -> bool {
        self.pushes == self.pops && self.stray_pops == 0 && self.unclosed == 0
    }
}

/// Rewrite a whole sentence, returning the next generation
pub fn rewrite_sentence<R: RandomSource + ?Sized>(
    sentence: Sentence,
    table: &GrammarTable,
    ctx: &mut DispatchContext<'_, R>,
) -> (Sentence, GenerationStats) {
    let mut stats = GenerationStats::default();
    let mut next = Sentence::with_capacity(sentence.len() * 2);

    for symbol in sentence {
        rewrite_symbol(symbol, table, ctx, &mut next, &mut stats);
    }

    (next, stats)
}

/// Rewrite one activated symbol into `out`
pub fn rewrite_symbol<R: RandomSource + ?Sized>(
    original: ActivatedSymbol,
    table: &GrammarTable,
    ctx: &mut DispatchContext<'_, R>,
    out: &mut Sentence,
    stats: &mut GenerationStats,
) {
    // The entry may have been moved by an earlier rewrite in this pass
    original.refresh(ctx.arena);

    let rule = if original.has_rule {
        table.rule(original.symbol)
    } else {
        None
    };
    let Some(rule) = rule else {
        out.push(original);
        stats.carried += 1;
        return;
    };

    let mut stack = TransformStack::new(TransformFrame {
        transform: original.transform_in,
        rotation: original.rotation,
        depth: original.age,
    });

    let replacement = rule.select(&mut *ctx.rng);

    let mut last_outer: Option<usize> = None;
    for descriptor in replacement {
        if let Some(activated) = dispatch::execute(descriptor, &mut stack, ctx) {
            if stack.is_outer() {
                last_outer = Some(out.len());
            }
            out.push(activated);
        }
    }

    stats.rewritten += 1;
    stats.pushes += stack.pushes();
    stats.pops += stack.pops();
    stats.stray_pops += stack.stray_pops();
    if stack.unclosed() > 0 {
        log::warn!(
            "Expansion of '{}' left {} bracket(s) open",
            original.symbol,
            stack.unclosed()
        );
        stats.unclosed += stack.unclosed();
    }

    let last = *stack.top();
    let terminated = last_outer.is_some_and(|i| i + 1 == out.len());
    if !terminated || last.rotation != 0.0 {
        let bridge = ActivatedSymbol::generic(
            ctx.allocate_id(),
            BRIDGE_SYMBOL,
            last.transform,
            last.rotation,
            last.depth,
            ctx.arena,
        )
        .with_rule(table.has_rule(BRIDGE_SYMBOL));
        out.push(bridge);
        stats.bridged += 1;
    }

    if let Some(terminator) = out.last_mut() {
        terminator.link_transform_out(original.transform_out, ctx.arena);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotate_radians;
    use crate::sim::grammar::RuleSpec;
    use crate::sim::lsystem::GrowthParams;
    use crate::sim::symbol::{SymbolId, SymbolKind};
    use crate::sim::transform::{Transform, TransformArena, TransformId};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        arena: TransformArena,
        params: GrowthParams,
        age: u32,
        next_id: u32,
        rng: Pcg32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                arena: TransformArena::new(),
                params: GrowthParams::default(),
                age: 1,
                next_id: 0,
                rng: Pcg32::seed_from_u64(17),
            }
        }

        fn ctx(&mut self) -> DispatchContext<'_, Pcg32> {
            DispatchContext {
                arena: &mut self.arena,
                params: &self.params,
                age: &mut self.age,
                next_id: &mut self.next_id,
                rng: &mut self.rng,
            }
        }

        /// Sentence holding the single axiom symbol anchored at the origin
        fn axiom(&mut self, table: &GrammarTable, ch: char) -> Sentence {
            let root = self.arena.alloc(Transform::root(Vec2::ZERO));
            let mut stack = TransformStack::new(TransformFrame {
                transform: root,
                rotation: 0.0,
                depth: 0,
            });
            let mut ctx = self.ctx();
            let axiom = dispatch::execute(&table.symbol(ch), &mut stack, &mut ctx).unwrap();
            std::iter::once(axiom).collect()
        }
    }

    fn links(sentence: &Sentence) -> Vec<(SymbolId, TransformId, TransformId)> {
        sentence
            .iter()
            .map(|s| (s.id, s.transform_in, s.transform_out))
            .collect()
    }

    #[test]
    fn test_branching_plant_expansion() {
        let spec = RuleSpec::new().rule('S', "X").rule('X', "F[-X][+X]X");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let sentence = fx.axiom(&table, 'S');

        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "X");
        assert_eq!(stats.rewritten, 1);
        assert_eq!(stats.bridged, 0);

        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "FXXX");
        assert_eq!((stats.pushes, stats.pops), (2, 2));
        assert!(stats.balanced());
        assert_eq!(stats.bridged, 0);
        // One level of nesting below the trunk
        assert_eq!(fx.age, 1);

        // Bracketed buds hang off the branch end; the outer bud continues the chain
        let symbols: Vec<_> = sentence.iter().collect();
        let f = symbols[0];
        for bud in &symbols[1..] {
            assert_eq!(bud.transform_in, f.transform_out);
        }
        assert_eq!(symbols[1].age, 1);
        assert_eq!(symbols[2].age, 1);
        assert_eq!(symbols[3].age, 0);

        // Bracketed buds expand one level deeper
        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert!(stats.balanced());
        assert_eq!(fx.age, 2);
        assert_eq!(sentence.symbols(), "FFXXXFXXXFXXX");
    }

    #[test]
    fn test_unruled_symbol_carried_unchanged() {
        let spec = RuleSpec::new().rule('S', "FQ");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let sentence = fx.axiom(&table, 'S');

        let (sentence, _) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        let before = links(&sentence);

        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(before, links(&sentence));
        assert_eq!(stats.carried, 2);
        assert_eq!(stats.rewritten, 0);
    }

    #[test]
    fn test_carry_forward_follows_rule_flag() {
        let spec = RuleSpec::new().rule('X', "FF");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let root = fx.arena.alloc(Transform::root(Vec2::ZERO));
        let frozen = ActivatedSymbol::generic(SymbolId(99), 'X', root, 0.0, 0, &mut fx.arena);
        assert!(!frozen.has_rule);

        let sentence: Sentence = std::iter::once(frozen.clone()).collect();
        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "X");
        assert_eq!(stats.carried, 1);
        assert_eq!(sentence.iter().next(), Some(&frozen));

        let (sentence, stats) = rewrite_sentence(
            std::iter::once(frozen.with_rule(true)).collect(),
            &table,
            &mut fx.ctx(),
        );
        assert_eq!(sentence.symbols(), "FF");
        assert_eq!(stats.rewritten, 1);
    }

    #[test]
    fn test_carried_symbol_resyncs_with_moved_entry() {
        let spec = RuleSpec::new().rule('S', "XQ").rule('X', "+F");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let sentence = fx.axiom(&table, 'S');
        let (sentence, _) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "XQ");

        // Rewriting X turns its shared exit; Q is carried without a tick in between
        let (sentence, _) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "FQ");
        let symbols: Vec<_> = sentence.iter().collect();
        let (f, q) = (symbols[0], symbols[1]);
        assert_eq!(q.transform_in, f.transform_out);

        let entry = fx.arena[q.transform_in].direction;
        let exit = fx.arena[q.transform_out].direction;
        assert!((entry - Vec2::Y).length() > 1e-3);
        assert!((exit - rotate_radians(entry, q.rotation)).length() < 1e-6);
    }

    #[test]
    fn test_terminator_adopts_replaced_exit() {
        // X sits between two branches; rewriting it must keep the second attached
        let spec = RuleSpec::new().rule('S', "FXF").rule('X', "GG");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let sentence = fx.axiom(&table, 'S');
        let (sentence, _) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        let x_out = sentence.iter().nth(1).unwrap().transform_out;

        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "FGGF");
        assert_eq!(stats.bridged, 0);

        let symbols: Vec<_> = sentence.iter().collect();
        assert_eq!(symbols[2].transform_out, x_out);
        assert_eq!(symbols[3].transform_in, x_out);
        assert_eq!(symbols[2].transform_in, symbols[1].transform_out);
    }

    #[test]
    fn test_bridge_for_rotation_only_tail() {
        let spec = RuleSpec::new().rule('S', "X").rule('X', "F+");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let sentence = fx.axiom(&table, 'S');
        let (sentence, _) = rewrite_sentence(sentence, &table, &mut fx.ctx());

        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "F:");
        assert_eq!(stats.bridged, 1);
        let bridge = sentence.iter().last().unwrap();
        assert_eq!(bridge.kind, SymbolKind::Generic);
        assert!(bridge.rotation > 0.0);
    }

    #[test]
    fn test_bridge_for_bracket_only_tail() {
        let spec = RuleSpec::new().rule('S', "X").rule('X', "F[X]");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let sentence = fx.axiom(&table, 'S');
        let (sentence, _) = rewrite_sentence(sentence, &table, &mut fx.ctx());

        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "FX:");
        assert_eq!(stats.bridged, 1);
        let symbols: Vec<_> = sentence.iter().collect();
        assert_eq!(symbols[2].transform_in, symbols[0].transform_out);
    }

    #[test]
    fn test_empty_and_malformed_expansions_still_link() {
        let spec = RuleSpec::new().rule('S', "XY").rule('X', "").rule('Y', "]F[[");
        let table = GrammarTable::resolve(&spec);
        let mut fx = Fixture::new();
        let sentence = fx.axiom(&table, 'S');
        let (sentence, _) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        assert_eq!(sentence.symbols(), "XY");

        let (sentence, stats) = rewrite_sentence(sentence, &table, &mut fx.ctx());
        // Y's F is still the last outer symbol, so only the empty X needs a bridge
        assert_eq!(sentence.symbols(), ":F");
        assert_eq!(stats.bridged, 1);
        assert_eq!(stats.stray_pops, 1);
        assert_eq!(stats.unclosed, 2);
        assert!(!stats.balanced());
    }
}

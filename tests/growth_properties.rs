//! Property tests for the rewrite engine and the growth state machine.
//!
//! Grammars are generated at random from the symbols the dispatcher knows
//! about. Bracket balance is enforced while generating, so any imbalance seen
//! by the engine is its own doing.

use glam::Vec2;
use grove::sim::{ConstantNoise, GrowthParams, LSystem, RuleSpec, ValueNoise};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const TOKENS: &[char] = &['F', 'G', 'X', 'A', '+', '-', '[', ']', 'f', 'Q'];

/// Turn token picks into a well-bracketed replacement string
fn balanced(picks: &[usize]) -> String {
    let mut out = String::new();
    let mut depth = 0;
    for &pick in picks {
        match TOKENS[pick % TOKENS.len()] {
            '[' => {
                depth += 1;
                out.push('[');
            }
            ']' if depth == 0 => {}
            ']' => {
                depth -= 1;
                out.push(']');
            }
            ch => out.push(ch),
        }
    }
    out.extend(std::iter::repeat_n(']', depth));
    out
}

fn replacement() -> impl Strategy<Value = String> {
    prop::collection::vec(0usize..TOKENS.len(), 0..8).prop_map(|picks| balanced(&picks))
}

fn grammar() -> impl Strategy<Value = RuleSpec> {
    (
        replacement(),
        prop::collection::vec(replacement(), 1..3),
        prop::collection::vec(replacement(), 1..3),
    )
        .prop_map(|(s, x, f)| {
            let mut rules = RuleSpec::new();
            rules.insert('S', s.as_str());
            rules.insert('X', grove::sim::RawRule::Alternatives(x));
            rules.insert('F', grove::sim::RawRule::Alternatives(f));
            rules
        })
}

fn grow(rules: &RuleSpec, seed: u64, generations: u32) -> (LSystem, Pcg32, bool) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let params = GrowthParams {
        growth_speed: 0.7,
        ..Default::default()
    };
    let mut system = LSystem::new('S', rules, params, Vec2::ZERO, &mut rng);
    let mut all_balanced = true;
    for _ in 0..generations {
        all_balanced &= system.generate(&mut rng).balanced();
        if system.sentence().len() > 4_000 {
            break;
        }
    }
    (system, rng, all_balanced)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Balanced grammars never produce stray or unclosed frames, and every
    /// activated symbol ends up linked to live transforms.
    #[test]
    fn balanced_grammars_stay_balanced(rules in grammar(), seed in any::<u64>()) {
        let (system, _, all_balanced) = grow(&rules, seed, 4);
        prop_assert!(all_balanced);

        let symbols = system.sentence().symbols();
        prop_assert!(!symbols.contains(['[', ']', '+', '-']), "stack symbols leaked: {}", symbols);
        for symbol in system.sentence() {
            prop_assert!(system.transform(symbol.transform_in).is_some());
            prop_assert!(system.transform(symbol.transform_out).is_some());
        }
    }

    /// Symbols without a rule survive a generation untouched.
    #[test]
    fn unruled_symbols_carry_forward(tail in "[fgqaQ:]{1,12}", seed in any::<u64>()) {
        let rules = RuleSpec::new().rule('S', format!("F{tail}").as_str());
        let (mut system, mut rng, _) = grow(&rules, seed, 1);
        let before: Vec<_> = system.sentence().iter().cloned().collect();

        let stats = system.generate(&mut rng);
        prop_assert_eq!(stats.rewritten, 0);
        prop_assert_eq!(stats.carried, before.len());
        let after: Vec<_> = system.sentence().iter().cloned().collect();
        prop_assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            prop_assert_eq!(a.id, b.id);
            prop_assert_eq!(a.symbol, b.symbol);
            prop_assert_eq!(a.rotation, b.rotation);
            prop_assert_eq!(a.age, b.age);
        }
    }

    /// Branch lengths never shrink or overshoot, and a finished exit implies
    /// a finished entry.
    #[test]
    fn growth_is_monotone_and_gated(rules in grammar(), seed in any::<u64>()) {
        let (mut system, mut rng, _) = grow(&rules, seed, 3);
        let noise = ValueNoise::new(seed);
        let lengths = |system: &LSystem| -> Vec<Option<f32>> {
            system.sentence().iter().map(|s| s.as_branch().map(|b| b.current_length)).collect()
        };

        let mut previous = lengths(&system);
        for frame in 0..40 {
            system.tick(frame as f32 * 16.0, &mut rng, &noise);

            let current = lengths(&system);
            for (before, after) in previous.iter().zip(&current) {
                if let (Some(before), Some(after)) = (before, after) {
                    prop_assert!(after >= before);
                }
            }
            for symbol in system.sentence() {
                if let Some(branch) = symbol.as_branch() {
                    prop_assert!(branch.current_length <= branch.final_length);
                }
                let entry = system.transform(symbol.transform_in).unwrap();
                let exit = system.transform(symbol.transform_out).unwrap();
                prop_assert!(!exit.start_growth || entry.start_growth);
            }
            previous = current;
        }
    }

    /// Same seed, same plant, same frames.
    #[test]
    fn seeded_runs_are_identical(rules in grammar(), seed in any::<u64>()) {
        let run = || {
            let (mut system, mut rng, _) = grow(&rules, seed, 3);
            let noise = ConstantNoise(0.3);
            let frames: Vec<_> = (0..10)
                .map(|frame| system.tick(frame as f32 * 16.0, &mut rng, &noise))
                .collect();
            (system.sentence().symbols(), frames)
        };
        prop_assert_eq!(run(), run());
    }
}

//! Grammar table: raw rules resolved into dispatchable symbol descriptors
//!
//! Resolution happens once per L-system. A generation can expand thousands of
//! symbols, so the action lookup and the "has a rule" check are precomputed.

use std::collections::BTreeMap;

use super::dispatch::Action;
use super::random::RandomSource;

/// Raw replacement for one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRule {
    /// Always the same replacement
    Fixed(String),
    /// Equally likely alternatives, one chosen per expansion
    Alternatives(Vec<String>),
}

impl From<&str> for RawRule {
    fn from(s: &str) -> Self {
        RawRule::Fixed(s.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for RawRule {
    fn from(alternatives: [&str; N]) -> Self {
        RawRule::Alternatives(alternatives.iter().map(|s| s.to_string()).collect())
    }
}

/// Raw rule specification: symbol -> replacement(s)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSpec {
    rules: BTreeMap<char, RawRule>,
}

impl RuleSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style rule insertion (replaces an existing rule for `symbol`)
    pub fn rule(mut self, symbol: char, rule: impl Into<RawRule>) -> Self {
        self.rules.insert(symbol, rule.into());
        self
    }

    pub fn insert(&mut self, symbol: char, rule: impl Into<RawRule>) {
        self.rules.insert(symbol, rule.into());
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.rules.contains_key(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &RawRule)> {
        self.rules.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A grammar character with its action and rule flag resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub ch: char,
    pub action: Action,
    pub has_rule: bool,
}

/// Resolved replacement(s) for one symbol
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Fixed(Vec<Symbol>),
    Alternatives(Vec<Vec<Symbol>>),
}

impl Rule {
    /// Pick the replacement for one expansion
    ///
    /// Draws from `rng` only when there is a real choice to make.
    pub fn select<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &[Symbol] {
        match self {
            Rule::Fixed(symbols) => symbols.as_slice(),
            Rule::Alternatives(alternatives) => match alternatives.len() {
                0 => &[],
                1 => alternatives[0].as_slice(),
                n => alternatives[rng.index(n)].as_slice(),
            },
        }
    }

    pub fn alternative_count(&self) -> usize {
        match self {
            Rule::Fixed(_) => 1,
            Rule::Alternatives(alternatives) => alternatives.len(),
        }
    }
}

/// Per-L-system table of resolved rules
#[derive(Debug, Clone, Default)]
pub struct GrammarTable {
    rules: BTreeMap<char, Rule>,
}

impl GrammarTable {
    /// Resolve every rule of `spec` into symbol descriptors
    pub fn resolve(spec: &RuleSpec) -> Self {
        let resolve_str =
            |s: &str| -> Vec<Symbol> { s.chars().map(|c| Self::describe(spec, c)).collect() };

        let rules = spec
            .iter()
            .map(|(key, raw)| {
                let rule = match raw {
                    RawRule::Fixed(s) => Rule::Fixed(resolve_str(s.as_str())),
                    RawRule::Alternatives(alts) => {
                        Rule::Alternatives(alts.iter().map(|s| resolve_str(s.as_str())).collect())
                    }
                };
                (key, rule)
            })
            .collect();

        Self { rules }
    }

    fn describe(spec: &RuleSpec, ch: char) -> Symbol {
        Symbol {
            ch,
            action: Action::for_symbol(ch),
            has_rule: spec.contains(ch),
        }
    }

    /// Descriptor for a single character (e.g. the axiom)
    pub fn symbol(&self, ch: char) -> Symbol {
        Symbol {
            ch,
            action: Action::for_symbol(ch),
            has_rule: self.rules.contains_key(&ch),
        }
    }

    pub fn rule(&self, ch: char) -> Option<&Rule> {
        self.rules.get(&ch)
    }

    pub fn has_rule(&self, ch: char) -> bool {
        self.rules.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

//! Deterministic growth simulation
//!
//! All rewrite and growth logic lives here. This module must be pure and
//! deterministic:
//! - Randomness and noise only through the injected `RandomSource` / `NoiseSource`
//! - Stable iteration order (sentence order)
//! - No rendering or platform dependencies

pub mod dispatch;
pub mod flow;
pub mod grammar;
pub mod lsystem;
pub mod mark;
pub mod noise;
pub mod random;
pub mod rewrite;
pub mod sentence;
pub mod stack;
pub mod symbol;
pub mod transform;

pub use dispatch::{Action, DispatchContext, execute};
pub use flow::FlowField;
pub use grammar::{GrammarTable, RawRule, Rule, RuleSpec, Symbol};
pub use lsystem::{GrowthParams, LSystem};
pub use mark::{Dot, Mark};
pub use noise::{ConstantNoise, NoiseSource, ValueNoise};
pub use random::RandomSource;
pub use rewrite::{GenerationStats, rewrite_sentence, rewrite_symbol};
pub use sentence::Sentence;
pub use stack::{TransformFrame, TransformStack};
pub use symbol::{ActivatedSymbol, Branch, SymbolId, SymbolKind, TickContext, taper};
pub use transform::{Transform, TransformArena, TransformId};

// Kulitta PTGG: probabilistic temporal graph grammars.
//
// A PTGG rewrites a tree-shaped sentential form. Each generation pass replaces
// every open non-terminal leaf with the right-hand side of one of its weighted
// rules, chosen by a caller-supplied random draw. Repetition is captured with
// `let x = value in body` terms whose variables are substituted only after
// generation finishes, so a bound phrase is rewritten once and reused.
//
// Architecture:
// - term.rs: `Term` (the sentential form) and `Expanded` (variable-free output)
// - draw.rs: `Draw`, the injected random capability, and stock sources
// - rule.rs: `Rule`, `RuleTable`, and cumulative-probability `select`
// - produce.rs: one parallel production pass, and the iterated driver
// - expand.rs: lexically scoped `Let`/`Var` elimination
// - error.rs: `GrammarError`
//
// The engine is generic over the symbol alphabet `S`, the parameter type `P`
// threaded through rule functions, and the modulation payload `M`. The
// musical alphabet lives in `kulitta_music`.
//
// Everything here is a pure function of its inputs. Given the same rules,
// initial sentence, and draw sequence, generation is reproducible.

pub mod draw;
pub mod error;
pub mod expand;
pub mod produce;
pub mod rule;
pub mod term;

pub use draw::{CycleDraws, Draw, DrawFn};
pub use error::GrammarError;
pub use expand::{Environment, expand, expand_sentence};
pub use produce::{generate, generate_history, produce, produce_term};
pub use rule::{Rule, RuleTable, select};
pub use term::{Expanded, Sentence, Term};

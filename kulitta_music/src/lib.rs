// Kulitta music: a tonal alphabet and stock grammars for the PTGG engine.
//
// Instantiates `kulitta_ptgg` with chord symbols, a music parameter carrying
// duration and tonal context, and scale-degree modulations, then turns the
// engine's expanded output into a timed chord progression.
//
// Architecture:
// - mode.rs: Modes and scale tables, pitch-class spelling
// - param.rs: `MusicParam` (duration, mode, key, onset) and duration constants
// - alphabet.rs: Chord degrees (`CType`) and functional regions (`RTerm`)
// - modifiers.rs: Duration and onset shorthands used on rule right-hand sides
// - modulation.rs: `MType`, key/mode changes to another scale degree
// - grammars.rs: TSD and Roman-numeral rule tables with duration guards
// - resolve.rs: Fold modulations into chords and lay out onsets
// - pipeline.rs: `compose`, generate -> expand -> resolve in one call
// - config.rs: `GenerateConfig`, JSON settings for the `generate` binary
// - error.rs: `ConfigError`
//
// Deterministic given the draw source; the binary seeds `KulittaRng`.

pub mod alphabet;
pub mod config;
pub mod error;
pub mod grammars;
pub mod modifiers;
pub mod mode;
pub mod modulation;
pub mod param;
pub mod pipeline;
pub mod resolve;

use kulitta_ptgg::{Rule, RuleTable, Term};

pub type MusicTerm<S> = Term<S, param::MusicParam, modulation::MType>;
pub type MusicRule<S> = Rule<S, param::MusicParam, modulation::MType>;
pub type MusicRules<S> = RuleTable<S, param::MusicParam, modulation::MType>;

// Generate, expand, resolve.
//
// `compose` is the whole trip from a start symbol to a list of chords. It
// owns no randomness: the caller supplies the draw source.

use crate::modulation::MType;
use crate::param::MusicParam;
use crate::resolve::{Chord, resolve};
use crate::{MusicRules, MusicTerm};
use kulitta_ptgg::{Draw, GrammarError, expand_sentence, generate};
use log::debug;
use std::fmt;

pub fn compose<S, D>(
    rules: &MusicRules<S>,
    draws: &mut D,
    iterations: usize,
    start: S,
    param: MusicParam,
) -> Result<Vec<Chord<S>>, GrammarError>
where
    S: PartialEq + Clone + fmt::Debug,
    D: Draw + ?Sized,
{
    let initial: Vec<MusicTerm<S>> = vec![kulitta_ptgg::Term::nt(start, param)];
    let sentence = generate(rules, draws, iterations, initial);
    let expanded = expand_sentence::<S, MusicParam, MType>(&sentence)?;
    debug!(
        "{} top-level terms expanded to {} chords",
        sentence.len(),
        expanded.len()
    );
    Ok(resolve(&expanded))
}

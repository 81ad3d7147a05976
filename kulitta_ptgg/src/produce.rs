// Parallel production: one generation pass over a sentential form.
//
// A pass walks the form depth-first, left to right, and rewrites every
// non-terminal leaf exactly once. The output of a rule is spliced in place of
// its leaf but is not itself rewritten until the next pass, which is what makes
// the pass "parallel" in the L-system sense.
//
// `Let` values and bodies are rewritten independently. Variables are left
// untouched: substitution happens only in `expand.rs`, after the last pass, so
// a bound value is rewritten once no matter how many times it is referenced.
//
// Each rewritten leaf consumes exactly one draw. Leaves whose symbol has no
// rules consume none and are copied through.

use crate::draw::Draw;
use crate::rule::{RuleTable, select};
use crate::term::{Sentence, Term};
use log::{debug, trace};
use std::fmt;

/// Run one production pass over a whole sentence.
pub fn produce<S, P, M, D>(
    rules: &RuleTable<S, P, M>,
    draws: &mut D,
    sentence: &[Term<S, P, M>],
) -> Sentence<S, P, M>
where
    S: PartialEq + Clone + fmt::Debug,
    P: Clone,
    M: Clone,
    D: Draw + ?Sized,
{
    let mut out = Vec::with_capacity(sentence.len());
    for term in sentence {
        out.extend(produce_term(rules, draws, term));
    }
    out
}

/// Run one production pass over a single term.
///
/// Returns a sentence because a rewritten non-terminal is replaced by its
/// rule's whole right-hand side. Structural nodes come back as a single term.
pub fn produce_term<S, P, M, D>(
    rules: &RuleTable<S, P, M>,
    draws: &mut D,
    term: &Term<S, P, M>,
) -> Sentence<S, P, M>
where
    S: PartialEq + Clone + fmt::Debug,
    P: Clone,
    M: Clone,
    D: Draw + ?Sized,
{
    match term {
        Term::NonTerminal { symbol, param } => {
            let matches = rules.matching(symbol);
            if matches.is_empty() {
                return vec![term.clone()];
            }
            let draw = draws.draw();
            match select(&matches, draw) {
                Some(rule) => {
                    let rewritten = rule.apply(param);
                    trace!(
                        "{symbol:?} (draw {draw:.3}, p={}) -> {} terms",
                        rule.probability(),
                        rewritten.len()
                    );
                    rewritten
                }
                None => vec![term.clone()],
            }
        }
        Term::Sequence(terms) => vec![Term::Sequence(produce(rules, draws, terms))],
        Term::Modulation { modulation, term } => vec![Term::Modulation {
            modulation: modulation.clone(),
            term: Box::new(Term::from_sentence(produce_term(rules, draws, term))),
        }],
        Term::Let { name, value, body } => {
            let value = Term::from_sentence(produce_term(rules, draws, value));
            let body = Term::from_sentence(produce_term(rules, draws, body));
            vec![Term::Let {
                name: name.clone(),
                value: Box::new(value),
                body: Box::new(body),
            }]
        }
        Term::Var(_) => vec![term.clone()],
    }
}

/// Apply `iterations` production passes to `initial`.
///
/// There is no fixpoint detection; passes over a fully terminal form are
/// no-ops. Zero iterations returns `initial` unchanged.
pub fn generate<S, P, M, D>(
    rules: &RuleTable<S, P, M>,
    draws: &mut D,
    iterations: usize,
    initial: Sentence<S, P, M>,
) -> Sentence<S, P, M>
where
    S: PartialEq + Clone + fmt::Debug,
    P: Clone,
    M: Clone,
    D: Draw + ?Sized,
{
    let mut sentence = initial;
    for pass in 1..=iterations {
        sentence = produce(rules, draws, &sentence);
        debug!("pass {pass}/{iterations}: {} terms", sentence.len());
    }
    sentence
}

/// Like `generate`, but keeps every intermediate form: the result holds
/// `initial` followed by the output of each pass (`iterations + 1` entries).
pub fn generate_history<S, P, M, D>(
    rules: &RuleTable<S, P, M>,
    draws: &mut D,
    iterations: usize,
    initial: Sentence<S, P, M>,
) -> Vec<Sentence<S, P, M>>
where
    S: PartialEq + Clone + fmt::Debug,
    P: Clone,
    M: Clone,
    D: Draw + ?Sized,
{
    let mut history = Vec::with_capacity(iterations + 1);
    let mut current = initial;
    for pass in 1..=iterations {
        let next = produce(rules, draws, &current);
        debug!("pass {pass}/{iterations}: {} terms", next.len());
        history.push(current);
        current = next;
    }
    history.push(current);
    history
}

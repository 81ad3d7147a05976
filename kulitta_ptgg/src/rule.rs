// Weighted productions and probability-biased rule selection.
//
// A `Rule` pairs a left-hand symbol and a weight with a right-hand side
// function from the symbol's parameter to a new sentence. A `RuleTable` keeps
// rules in insertion order; the rules matching one symbol, in that order,
// partition [0, 1) into buckets whose widths are their weights. `select` walks
// those buckets with a single draw.
//
// Weights are validated when a rule is built. The weights of one symbol need
// not sum to 1: any draw past their total lands in the last bucket. Callers
// wanting strict normalization can check with `RuleTable::unnormalized`.

use crate::error::GrammarError;
use crate::term::{Sentence, Term};
use std::fmt;
use std::sync::Arc;

/// Right-hand side of a rule.
pub type Production<S, P, M> = Arc<dyn Fn(&P) -> Sentence<S, P, M> + Send + Sync>;

/// One weighted production `symbol -> production(param)`.
pub struct Rule<S, P, M> {
    symbol: S,
    probability: f64,
    production: Production<S, P, M>,
}

impl<S: fmt::Debug, P, M> Rule<S, P, M> {
    /// Build a rule, rejecting a probability outside (0, 1] (NaN included).
    pub fn new<F>(symbol: S, probability: f64, production: F) -> Result<Self, GrammarError>
    where
        F: Fn(&P) -> Sentence<S, P, M> + Send + Sync + 'static,
    {
        if probability == 0.0 || !(0.0..=1.0).contains(&probability) {
            return Err(GrammarError::MalformedRule {
                symbol: format!("{symbol:?}"),
                probability,
            });
        }
        Ok(Rule {
            symbol,
            probability,
            production: Arc::new(production),
        })
    }
}

impl<S, P, M> Rule<S, P, M> {
    pub fn symbol(&self) -> &S {
        &self.symbol
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Run the right-hand side for one parameter.
    pub fn apply(&self, param: &P) -> Sentence<S, P, M> {
        (self.production)(param)
    }
}

impl<S, P, M> Rule<S, P, M>
where
    S: Clone + Send + Sync + 'static,
    P: Clone + 'static,
    M: 'static,
{
    /// Wrap this rule so that it only fires when `accept(param)` holds.
    /// Otherwise the rule rewrites the non-terminal to itself. Symbol and
    /// weight are unchanged, so the bucket layout of the table is too.
    ///
    /// Typical use is a minimum-duration guard that stops a splitting rule
    /// once chords get too short.
    pub fn guarded<A>(self, accept: A) -> Self
    where
        A: Fn(&P) -> bool + Send + Sync + 'static,
    {
        let inner = self.production;
        let symbol = self.symbol.clone();
        Rule {
            symbol: self.symbol,
            probability: self.probability,
            production: Arc::new(move |param: &P| {
                if accept(param) {
                    inner(param)
                } else {
                    vec![Term::nt(symbol.clone(), param.clone())]
                }
            }),
        }
    }
}

impl<S: Clone, P, M> Clone for Rule<S, P, M> {
    fn clone(&self) -> Self {
        Rule {
            symbol: self.symbol.clone(),
            probability: self.probability,
            production: Arc::clone(&self.production),
        }
    }
}

impl<S: fmt::Debug, P, M> fmt::Debug for Rule<S, P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("symbol", &self.symbol)
            .field("probability", &self.probability)
            .finish_non_exhaustive()
    }
}

/// An ordered collection of rules. Read-only once built.
pub struct RuleTable<S, P, M> {
    rules: Vec<Rule<S, P, M>>,
}

impl<S, P, M> RuleTable<S, P, M> {
    pub fn new() -> Self {
        RuleTable { rules: Vec::new() }
    }

    pub fn push(&mut self, rule: Rule<S, P, M>) {
        self.rules.push(rule);
    }

    /// All rules in insertion order.
    pub fn rules(&self) -> &[Rule<S, P, M>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<S: PartialEq, P, M> RuleTable<S, P, M> {
    /// Rules whose left-hand side is `symbol`, in table order. Empty means
    /// the symbol is terminal.
    pub fn matching(&self, symbol: &S) -> Vec<&Rule<S, P, M>> {
        self.rules.iter().filter(|r| &r.symbol == symbol).collect()
    }

    /// Summed weight of the rules for `symbol`.
    pub fn total_probability(&self, symbol: &S) -> f64 {
        self.matching(symbol).iter().map(|r| r.probability).sum()
    }

    /// Symbols whose weights do not sum to 1 within `tolerance`, each listed
    /// once in order of first appearance.
    pub fn unnormalized(&self, tolerance: f64) -> Vec<&S> {
        let mut seen: Vec<&S> = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&&rule.symbol) {
                seen.push(&rule.symbol);
            }
        }
        seen.into_iter()
            .filter(|s| (self.total_probability(s) - 1.0).abs() > tolerance)
            .collect()
    }
}

impl<S, P, M> Default for RuleTable<S, P, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, P, M> Clone for RuleTable<S, P, M> {
    fn clone(&self) -> Self {
        RuleTable {
            rules: self.rules.clone(),
        }
    }
}

impl<S: fmt::Debug, P, M> fmt::Debug for RuleTable<S, P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.rules).finish()
    }
}

impl<S, P, M> FromIterator<Rule<S, P, M>> for RuleTable<S, P, M> {
    fn from_iter<I: IntoIterator<Item = Rule<S, P, M>>>(iter: I) -> Self {
        RuleTable {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<S, P, M> From<Vec<Rule<S, P, M>>> for RuleTable<S, P, M> {
    fn from(rules: Vec<Rule<S, P, M>>) -> Self {
        RuleTable { rules }
    }
}

/// Pick one rule with a draw in [0, 1).
///
/// Rules are taken as consecutive buckets of width `probability`, in slice
/// order; the first whose cumulative upper bound exceeds `draw` wins. A draw
/// at or beyond the total weight falls to the last rule. Returns `None` only
/// for an empty slice.
pub fn select<'r, S, P, M>(rules: &[&'r Rule<S, P, M>], draw: f64) -> Option<&'r Rule<S, P, M>> {
    let mut upper = 0.0;
    for &rule in rules {
        upper += rule.probability;
        if draw < upper {
            return Some(rule);
        }
    }
    rules.last().copied()
}

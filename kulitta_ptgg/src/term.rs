// Sentential forms and their expanded, variable-free counterpart.
//
// `Term` is what the production step rewrites. It can still contain `Let`
// bindings and `Var` references. `Expanded` is what `expand.rs` produces once
// all bindings have been substituted: only non-terminals, possibly wrapped in
// modulations. Keeping them as separate types means an unexpanded form cannot
// reach an interpreter, and an expanded one cannot be fed back into
// production.

use serde::{Deserialize, Serialize};

/// An ordered list of terms. Order is musically significant and preserved by
/// every transform.
pub type Sentence<S, P, M> = Vec<Term<S, P, M>>;

/// A node of the sentential form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term<S, P, M> {
    /// An open leaf: rewritten whenever its symbol has matching rules.
    NonTerminal { symbol: S, param: P },
    /// Juxtaposition of terms.
    Sequence(Vec<Term<S, P, M>>),
    /// A key or context change applied to everything inside `term`.
    Modulation { modulation: M, term: Box<Term<S, P, M>> },
    /// Binds `name` to `value` within `body`.
    Let {
        name: String,
        value: Box<Term<S, P, M>>,
        body: Box<Term<S, P, M>>,
    },
    /// A reference to the innermost enclosing `Let` of the same name.
    Var(String),
}

impl<S, P, M> Term<S, P, M> {
    pub fn nt(symbol: S, param: P) -> Self {
        Term::NonTerminal { symbol, param }
    }

    pub fn seq(terms: Vec<Term<S, P, M>>) -> Self {
        Term::Sequence(terms)
    }

    pub fn modulate(modulation: M, term: Term<S, P, M>) -> Self {
        Term::Modulation {
            modulation,
            term: Box::new(term),
        }
    }

    /// `let name = value in body`.
    pub fn let_in(name: impl Into<String>, value: Term<S, P, M>, body: Term<S, P, M>) -> Self {
        Term::Let {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    /// Collapse a sentence into a single term: a one-element sentence yields
    /// its element, anything else becomes a `Sequence`.
    pub fn from_sentence(sentence: Sentence<S, P, M>) -> Self {
        match <[Term<S, P, M>; 1]>::try_from(sentence) {
            Ok([term]) => term,
            Err(sentence) => Term::Sequence(sentence),
        }
    }

    /// Number of `NonTerminal` leaves anywhere in this term, including inside
    /// let values and bodies.
    pub fn non_terminal_count(&self) -> usize {
        match self {
            Term::NonTerminal { .. } => 1,
            Term::Sequence(terms) => terms.iter().map(Term::non_terminal_count).sum(),
            Term::Modulation { term, .. } => term.non_terminal_count(),
            Term::Let { value, body, .. } => value.non_terminal_count() + body.non_terminal_count(),
            Term::Var(_) => 0,
        }
    }
}

/// A term after `Let`/`Var` elimination. Sequences are flattened away, so a
/// node is either a leaf or a modulation around one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expanded<S, P, M> {
    NonTerminal { symbol: S, param: P },
    Modulation {
        modulation: M,
        term: Box<Expanded<S, P, M>>,
    },
}

impl<S, P, M> Expanded<S, P, M> {
    pub fn nt(symbol: S, param: P) -> Self {
        Expanded::NonTerminal { symbol, param }
    }

    pub fn modulate(modulation: M, term: Expanded<S, P, M>) -> Self {
        Expanded::Modulation {
            modulation,
            term: Box::new(term),
        }
    }

    /// The symbol and parameter at the bottom of any modulation wrappers.
    pub fn leaf(&self) -> (&S, &P) {
        match self {
            Expanded::NonTerminal { symbol, param } => (symbol, param),
            Expanded::Modulation { term, .. } => term.leaf(),
        }
    }

    /// Modulations wrapping the leaf, outermost first.
    pub fn modulations(&self) -> Vec<&M> {
        let mut out = Vec::new();
        let mut node = self;
        while let Expanded::Modulation { modulation, term } = node {
            out.push(modulation);
            node = term;
        }
        out
    }
}

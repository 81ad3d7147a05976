// Expansion: eliminate `Let`/`Var` from a fully generated form.
//
// Runs once, after the last production pass. Bindings are resolved lexically
// through an explicit scope stack: a `Let` expands its value in the enclosing
// scope, pushes `name -> expanded value`, expands its body, then pops. Lookup
// searches from the innermost scope outward, so an inner `Let` shadows an
// outer one of the same name, and names only need to be unique along a path,
// not across the whole tree.
//
// Sequences are flattened and modulations are pushed down onto every element
// of their expanded body, so the output is a flat list of `Expanded` leaves.

use crate::error::GrammarError;
use crate::term::{Expanded, Term};

/// Lexical scopes visible at a point of expansion, innermost last.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment<S, P, M> {
    scopes: Vec<(String, Vec<Expanded<S, P, M>>)>,
}

impl<S, P, M> Environment<S, P, M> {
    pub fn new() -> Self {
        Environment { scopes: Vec::new() }
    }

    /// Open a scope binding `name`, shadowing any outer binding of it.
    pub fn bind(&mut self, name: impl Into<String>, value: Vec<Expanded<S, P, M>>) {
        self.scopes.push((name.into(), value));
    }

    /// Close the innermost scope.
    pub fn unbind(&mut self) {
        self.scopes.pop();
    }

    /// The innermost value bound to `name`.
    pub fn lookup(&self, name: &str) -> Option<&[Expanded<S, P, M>]> {
        self.scopes
            .iter()
            .rev()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value.as_slice())
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl<S, P, M> Default for Environment<S, P, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand one term under `env`.
///
/// `env` is left exactly as it was on entry, whether or not expansion
/// succeeds.
pub fn expand<S, P, M>(
    term: &Term<S, P, M>,
    env: &mut Environment<S, P, M>,
) -> Result<Vec<Expanded<S, P, M>>, GrammarError>
where
    S: Clone,
    P: Clone,
    M: Clone,
{
    match term {
        Term::NonTerminal { symbol, param } => {
            Ok(vec![Expanded::nt(symbol.clone(), param.clone())])
        }
        Term::Sequence(terms) => {
            let mut out = Vec::new();
            for t in terms {
                out.extend(expand(t, env)?);
            }
            Ok(out)
        }
        Term::Modulation { modulation, term } => Ok(expand(term, env)?
            .into_iter()
            .map(|e| Expanded::modulate(modulation.clone(), e))
            .collect()),
        Term::Let { name, value, body } => {
            let bound = expand(value, env)?;
            env.bind(name.clone(), bound);
            let result = expand(body, env);
            env.unbind();
            result
        }
        Term::Var(name) => env
            .lookup(name)
            .map(<[_]>::to_vec)
            .ok_or_else(|| GrammarError::UnboundVariable { name: name.clone() }),
    }
}

/// Expand a whole sentence starting from an empty environment.
pub fn expand_sentence<S, P, M>(
    sentence: &[Term<S, P, M>],
) -> Result<Vec<Expanded<S, P, M>>, GrammarError>
where
    S: Clone,
    P: Clone,
    M: Clone,
{
    let mut env = Environment::new();
    let mut out = Vec::new();
    for term in sentence {
        out.extend(expand(term, &mut env)?);
    }
    Ok(out)
}

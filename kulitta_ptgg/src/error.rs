// Errors raised by the grammar engine.
//
// Both variants are programming errors in the supplied grammar, reported once
// and never retried. Drawing past the total probability of a rule set is not
// an error; see `rule::select`.

/// Failure building rules or expanding a generated term.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrammarError {
    /// A `Var` with no enclosing `Let` of the same name.
    #[error("unbound variable `{name}`: no enclosing let binds it")]
    UnboundVariable { name: String },

    /// A rule weight outside (0, 1]. `symbol` is the symbol's `Debug` text.
    #[error("malformed rule for {symbol}: probability {probability} is outside (0, 1]")]
    MalformedRule { symbol: String, probability: f64 },
}

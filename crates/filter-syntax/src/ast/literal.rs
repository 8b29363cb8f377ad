use std::fmt;

/// Literal values on the right-hand side of a comparison.
///
/// A quoted token is always `Text`; an unquoted numeric-looking token is
/// typed as `Number` eagerly. Equality comparisons consume the literal as
/// given, range comparisons require a numeric reading via [`Literal::as_number`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    /// Numeric reading of the literal. `Text` is re-parsed from its
    /// textual form; `None` means the literal has no numeric reading.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            Literal::Text(s) => s.parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

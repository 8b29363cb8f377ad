use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators.
///
/// Operators partition into equality (`=`, `!=`) and range
/// (`>`, `>=`, `<`, `<=`); the word aliases `eq, ne, gt, ge, lt, le` are
/// case-insensitive synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

impl Comparator {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "=" | "eq" => Some(Comparator::Equal),
            "!=" | "ne" => Some(Comparator::NotEqual),
            ">" | "gt" => Some(Comparator::GreaterThan),
            ">=" | "ge" => Some(Comparator::GreaterOrEqual),
            "<" | "lt" => Some(Comparator::LessThan),
            "<=" | "le" => Some(Comparator::LessOrEqual),
            _ => None,
        }
    }

    pub fn is_equality(self) -> bool {
        matches!(self, Comparator::Equal | Comparator::NotEqual)
    }

    pub fn is_range(self) -> bool {
        !self.is_equality()
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Equal => write!(f, "="),
            Comparator::NotEqual => write!(f, "!="),
            Comparator::GreaterThan => write!(f, ">"),
            Comparator::GreaterOrEqual => write!(f, ">="),
            Comparator::LessThan => write!(f, "<"),
            Comparator::LessOrEqual => write!(f, "<="),
        }
    }
}

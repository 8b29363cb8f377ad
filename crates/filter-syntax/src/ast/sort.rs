use crate::{
    ast::field::{ClauseContext, FieldRef},
    errors::{ParseError, SyntaxError},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `(field, direction)` pair of a sort specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SortClause {
    pub field: FieldRef,
    pub direction: SortDirection,
}

impl SortClause {
    pub fn new(field: FieldRef, direction: SortDirection) -> Self {
        SortClause { field, direction }
    }

    /// Parse a textual clause `"<field> [ASC|DESC]"`. The direction
    /// keyword is case-insensitive and defaults to ascending.
    pub fn parse(clause: &str) -> Result<Self, ParseError> {
        let mut parts = clause.split_whitespace();

        let field_token = parts
            .next()
            .ok_or_else(|| SyntaxError::MalformedSortClause(clause.to_string()))?;
        let field = FieldRef::classify(field_token, ClauseContext::Sort)?;

        let direction = match parts.next() {
            Some(token) => SortDirection::parse(token)
                .ok_or_else(|| SyntaxError::InvalidSortDirection(token.to_string()))?,
            None => SortDirection::default(),
        };

        if parts.next().is_some() {
            return Err(SyntaxError::MalformedSortClause(clause.to_string()).into());
        }

        Ok(SortClause { field, direction })
    }
}

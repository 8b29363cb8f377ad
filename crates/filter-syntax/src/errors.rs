use crate::ast::field::ClauseContext;
use crate::parser::Rule;
use pest::error::Error as PestError;
use thiserror::Error;

/// Malformed token stream, unconsumed trailing input, or a malformed
/// sort clause.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Malformed {
        message: String,
        line: usize,
        column: usize,
        snippet: String,
    },

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("malformed sort clause: '{0}'")]
    MalformedSortClause(String),

    #[error("invalid sort direction '{0}', expected ASC or DESC")]
    InvalidSortDirection(String),
}

impl SyntaxError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        use pest::error::LineColLocation;

        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };

        let message = format!("{}", err.variant);
        let snippet = err.line().to_string();

        SyntaxError::Malformed {
            message,
            line,
            column,
            snippet,
        }
    }

    /// Format with the offending source line and a caret, for display.
    pub fn format_error(&self) -> String {
        match self {
            SyntaxError::Malformed {
                message,
                line,
                column,
                snippet,
            } => {
                format!(
                    "syntax error at line {}, column {}:\n{}\n{}^\n{}",
                    line,
                    column,
                    snippet,
                    " ".repeat(column.saturating_sub(1)),
                    message
                )
            }
            _ => self.to_string(),
        }
    }
}

/// A bare field token outside the top-level allow-list, or a dotted token
/// with an unknown namespace.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown field '{field}' in {context} clause")]
pub struct UnknownFieldError {
    pub field: String,
    pub context: ClauseContext,
}

/// Everything the parser and classifier can reject.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_points_at_column() {
        let err = SyntaxError::Malformed {
            message: "expected comparator".to_string(),
            line: 1,
            column: 8,
            snippet: "status ??".to_string(),
        };
        let rendered = err.format_error();
        assert!(rendered.contains("status ??"));
        assert!(rendered.contains("       ^"));
    }

    #[test]
    fn test_unknown_field_display() {
        let err = UnknownFieldError {
            field: "bogus".to_string(),
            context: ClauseContext::Filter,
        };
        assert_eq!(err.to_string(), "unknown field 'bogus' in filter clause");
    }
}

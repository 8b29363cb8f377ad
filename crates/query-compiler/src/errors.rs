use filter_syntax::ast::operator::Comparator;
use filter_syntax::errors::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("range operator '{operator}' requires a numeric value for field '{field}'")]
    TypeMismatch { field: String, operator: Comparator },

    #[error("operator '{operator}' is not supported here")]
    UnsupportedOperator { operator: Comparator },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

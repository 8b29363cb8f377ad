use crate::ast::{expr::Expression, sort::SortClause, span::Span};

/// A full query string: boolean expression plus the optional
/// `ORDER BY` / `LIMIT` suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub expression: Expression,
    pub order_by: Vec<SortClause>,
    pub limit: Option<u64>,
    pub span: Span,
}

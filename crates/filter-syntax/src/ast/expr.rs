use crate::ast::{field::FieldRef, literal::Literal, operator::Comparator, span::Span};

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Expression { kind, span }
    }
}

/// Boolean filter expression. `And`/`Or` are strictly binary; deeper
/// chains are left-leaning trees built by left-associative folding in the
/// builder.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Comparison {
        field: FieldRef,
        op: Comparator,
        value: Literal,
    },
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
}

//! Backend-neutral boolean query tree produced by lowering a filter AST.

use filter_syntax::ast::operator::Comparator;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    Bool(BoolQuery),
    Term { field: String, value: Value },
    Range { field: String, bound: RangeBound },
    Nested { path: String, query: Box<QueryNode> },
}

impl QueryNode {
    pub fn term(field: impl Into<String>, value: Value) -> Self {
        QueryNode::Term {
            field: field.into(),
            value,
        }
    }

    pub fn nested(path: impl Into<String>, query: QueryNode) -> Self {
        QueryNode::Nested {
            path: path.into(),
            query: Box::new(query),
        }
    }
}

/// A boolean compound. Empty sections are omitted from the rendered
/// document; a non-empty `should` always carries `minimum_should_match`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    pub must: Vec<QueryNode>,
    pub filter: Vec<QueryNode>,
    pub should: Vec<QueryNode>,
    pub must_not: Vec<QueryNode>,
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    pub fn must(clauses: Vec<QueryNode>) -> Self {
        BoolQuery {
            must: clauses,
            ..BoolQuery::default()
        }
    }

    pub fn should(clauses: Vec<QueryNode>) -> Self {
        BoolQuery {
            should: clauses,
            minimum_should_match: Some(1),
            ..BoolQuery::default()
        }
    }

    pub fn must_not(clauses: Vec<QueryNode>) -> Self {
        BoolQuery {
            must_not: clauses,
            ..BoolQuery::default()
        }
    }
}

/// One boundary of a numeric range query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBound {
    pub op: RangeOp,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RangeOp {
    pub fn from_comparator(op: Comparator) -> Option<Self> {
        match op {
            Comparator::GreaterThan => Some(RangeOp::Gt),
            Comparator::GreaterOrEqual => Some(RangeOp::Gte),
            Comparator::LessThan => Some(RangeOp::Lt),
            Comparator::LessOrEqual => Some(RangeOp::Lte),
            Comparator::Equal | Comparator::NotEqual => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RangeOp::Gt => "gt",
            RangeOp::Gte => "gte",
            RangeOp::Lt => "lt",
            RangeOp::Lte => "lte",
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

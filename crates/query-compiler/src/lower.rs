//! Recursive post-order lowering of the filter AST into the query tree.

use crate::{
    errors::CompileError,
    query::{BoolQuery, QueryNode, RangeBound, RangeOp},
};
use filter_syntax::ast::{
    expr::{Expression, ExpressionKind},
    field::{FieldRef, Namespace, TopLevelField},
    literal::Literal,
    operator::Comparator,
};
use serde_json::{Value, json};

/// Parse and lower a filter string in one step.
pub fn compile_filter(input: &str) -> Result<QueryNode, CompileError> {
    let expression = filter_syntax::parse_filter(input)?;
    lower(&expression)
}

/// Lower an AST into the backend-neutral query tree. The result mirrors
/// the AST one-to-one; binary conjunctions and disjunctions are never
/// flattened and double negation is preserved.
pub fn lower(expression: &Expression) -> Result<QueryNode, CompileError> {
    match &expression.kind {
        ExpressionKind::Not(operand) => {
            Ok(QueryNode::Bool(BoolQuery::must_not(vec![lower(operand)?])))
        }
        ExpressionKind::And(left, right) => Ok(QueryNode::Bool(BoolQuery::must(vec![
            lower(left)?,
            lower(right)?,
        ]))),
        ExpressionKind::Or(left, right) => Ok(QueryNode::Bool(BoolQuery::should(vec![
            lower(left)?,
            lower(right)?,
        ]))),
        ExpressionKind::Comparison { field, op, value } => lower_comparison(field, *op, value),
    }
}

fn lower_comparison(
    field: &FieldRef,
    op: Comparator,
    value: &Literal,
) -> Result<QueryNode, CompileError> {
    match field {
        FieldRef::NestedAttribute { namespace, key } => {
            lower_nested(*namespace, key, op, value, field)
        }
        FieldRef::TopLevel(name) => lower_top_level(*name, op, value, field),
    }
}

/// Nested attributes are `{key, value}` entries in a per-document bag, so
/// key match and value test must co-occur inside one nested scope; testing
/// them independently would allow false matches across different entries.
fn lower_nested(
    namespace: Namespace,
    key: &str,
    op: Comparator,
    value: &Literal,
    field: &FieldRef,
) -> Result<QueryNode, CompileError> {
    let path = namespace.as_str();
    let key_term = QueryNode::term(format!("{}.key", path), json!(key));

    let inner = match op {
        Comparator::Equal => {
            let value_term = QueryNode::term(format!("{}.value", path), literal_value(value));
            BoolQuery {
                filter: vec![key_term, value_term],
                ..BoolQuery::default()
            }
        }
        Comparator::NotEqual => {
            // Negation stays inside the nested scope: the entry must exist
            // with this key and a non-matching value.
            let value_term = QueryNode::term(format!("{}.value", path), literal_value(value));
            BoolQuery {
                filter: vec![key_term],
                must_not: vec![value_term],
                ..BoolQuery::default()
            }
        }
        _ => {
            let bound = range_bound(op, value, field)?;
            let range = QueryNode::Range {
                field: format!("{}.value.numeric", path),
                bound,
            };
            BoolQuery {
                filter: vec![key_term, range],
                ..BoolQuery::default()
            }
        }
    };

    Ok(QueryNode::nested(path, QueryNode::Bool(inner)))
}

fn lower_top_level(
    name: TopLevelField,
    op: Comparator,
    value: &Literal,
    field: &FieldRef,
) -> Result<QueryNode, CompileError> {
    match op {
        Comparator::Equal => Ok(QueryNode::term(name.as_str(), literal_value(value))),
        Comparator::NotEqual => Ok(QueryNode::Bool(BoolQuery::must_not(vec![QueryNode::term(
            name.as_str(),
            literal_value(value),
        )]))),
        _ => {
            let bound = range_bound(op, value, field)?;
            Ok(QueryNode::Range {
                field: name.as_str().to_string(),
                bound,
            })
        }
    }
}

/// Range comparisons demand a numeric literal; text literals are re-parsed
/// from their textual form and rejected if that fails.
fn range_bound(op: Comparator, value: &Literal, field: &FieldRef) -> Result<RangeBound, CompileError> {
    let range_op = RangeOp::from_comparator(op).ok_or(CompileError::UnsupportedOperator {
        operator: op,
    })?;

    let number = value.as_number().ok_or_else(|| CompileError::TypeMismatch {
        field: field.to_string(),
        operator: op,
    })?;

    Ok(RangeBound {
        op: range_op,
        value: number,
    })
}

/// Equality passes the literal through as given: a number stays a JSON
/// number, text stays a string. No coercion in either direction.
fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Number(n) => json!(n),
        Literal::Text(s) => json!(s),
    }
}

use crate::{
    ast::{
        expr::{Expression, ExpressionKind},
        field::{ClauseContext, FieldRef},
        literal::Literal,
        operator::Comparator,
        query::ParsedQuery,
        sort::{SortClause, SortDirection},
        span::Span,
    },
    errors::{ParseError, SyntaxError},
    parser::{FilterParser, Rule},
};
use pest::{
    Parser,
    iterators::{Pair, Pairs},
};

pub type BuildResult<T> = Result<T, ParseError>;

/// Parse a bare boolean filter expression. The whole input must be
/// consumed; an `ORDER BY`/`LIMIT` suffix is trailing input here.
pub fn parse_filter(input: &str) -> BuildResult<Expression> {
    let pairs = FilterParser::parse(Rule::filter_program, input)
        .map_err(|e| ParseError::Syntax(SyntaxError::from_pest_error(e)))?;

    let mut expression = None;
    for pair in flatten_program(pairs)? {
        if pair.as_rule() == Rule::expression {
            expression = Some(build_expression(pair)?);
        }
    }

    expression.ok_or_else(|| empty_input_error(input).into())
}

/// Parse a full query string: expression plus optional `ORDER BY` and
/// `LIMIT` suffix.
pub fn parse_query(input: &str) -> BuildResult<ParsedQuery> {
    let pairs = FilterParser::parse(Rule::query_program, input)
        .map_err(|e| ParseError::Syntax(SyntaxError::from_pest_error(e)))?;

    let mut expression = None;
    let mut order_by = Vec::new();
    let mut limit = None;
    let mut span = Span::default();

    for pair in flatten_program(pairs)? {
        match pair.as_rule() {
            Rule::expression => {
                span = pair_to_span(&pair);
                expression = Some(build_expression(pair)?);
            }
            Rule::order_by_clause => {
                order_by = build_order_by(pair)?;
            }
            Rule::limit_clause => {
                limit = Some(build_limit(pair)?);
            }
            _ => {}
        }
    }

    Ok(ParsedQuery {
        expression: expression.ok_or_else(|| ParseError::from(empty_input_error(input)))?,
        order_by,
        limit,
        span,
    })
}

fn flatten_program(mut pairs: Pairs<Rule>) -> BuildResult<Pairs<Rule>> {
    let program = pairs
        .next()
        .ok_or_else(|| ParseError::from(empty_input_error("")))?;
    Ok(program.into_inner())
}

fn empty_input_error(input: &str) -> SyntaxError {
    SyntaxError::Malformed {
        message: "empty filter expression".to_string(),
        line: 1,
        column: 1,
        snippet: input.to_string(),
    }
}

fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let (line, column) = pair.line_col();
    let span = pair.as_span();
    Span::new(span.start(), span.end(), line, column)
}

fn build_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    // expression = and_expr (OR and_expr)*, folded left-associatively.
    let mut expr = build_and_expr(inner.next().unwrap())?;
    for pair in inner {
        if pair.as_rule() == Rule::and_expr {
            let rhs = build_and_expr(pair)?;
            expr = Expression::new(ExpressionKind::Or(Box::new(expr), Box::new(rhs)), span);
        }
    }

    Ok(expr)
}

fn build_and_expr(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let mut expr = build_not_expr(inner.next().unwrap())?;
    for pair in inner {
        if pair.as_rule() == Rule::not_expr {
            let rhs = build_not_expr(pair)?;
            expr = Expression::new(ExpressionKind::And(Box::new(expr), Box::new(rhs)), span);
        }
    }

    Ok(expr)
}

fn build_not_expr(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let first = inner.next().unwrap();
    match first.as_rule() {
        Rule::kw_not => {
            let operand = build_not_expr(inner.next().unwrap())?;
            Ok(Expression::new(
                ExpressionKind::Not(Box::new(operand)),
                span,
            ))
        }
        Rule::comparison => build_comparison(first),
        Rule::lparen => {
            // Grouped sub-expression; grouping does not alter tree shape.
            build_expression(inner.next().unwrap())
        }
        other => Err(unexpected_rule(other, span).into()),
    }
}

fn build_comparison(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut inner = pair.into_inner();

    let field_pair = inner.next().unwrap();
    let field = FieldRef::classify(field_pair.as_str(), ClauseContext::Filter)?;

    let op_pair = inner.next().unwrap();
    let op = Comparator::parse(op_pair.as_str())
        .ok_or_else(|| unexpected_rule(op_pair.as_rule(), span))?;

    let value = build_literal(inner.next().unwrap())?;

    Ok(Expression::new(
        ExpressionKind::Comparison { field, op, value },
        span,
    ))
}

fn build_literal(pair: Pair<Rule>) -> BuildResult<Literal> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::lit_number => {
            let text = inner.as_str();
            let number = text
                .parse::<f64>()
                .map_err(|_| SyntaxError::InvalidNumber(text.to_string()))?;
            Ok(Literal::Number(number))
        }
        Rule::lit_string => Ok(Literal::Text(parse_string_literal(inner.as_str()))),
        Rule::bare_word => Ok(Literal::Text(inner.as_str().to_string())),
        other => Err(unexpected_rule(other, pair_to_span(&inner)).into()),
    }
}

fn build_order_by(pair: Pair<Rule>) -> BuildResult<Vec<SortClause>> {
    let mut clauses = Vec::new();

    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::sort_item {
            clauses.push(build_sort_item(inner)?);
        }
    }

    Ok(clauses)
}

fn build_sort_item(pair: Pair<Rule>) -> BuildResult<SortClause> {
    let mut inner = pair.into_inner();

    let field_pair = inner.next().unwrap();
    let field = FieldRef::classify(field_pair.as_str(), ClauseContext::Sort)?;

    let direction = match inner.next() {
        Some(dir_pair) => SortDirection::parse(dir_pair.as_str())
            .ok_or_else(|| SyntaxError::InvalidSortDirection(dir_pair.as_str().to_string()))?,
        None => SortDirection::default(),
    };

    Ok(SortClause::new(field, direction))
}

fn build_limit(pair: Pair<Rule>) -> BuildResult<u64> {
    let span = pair_to_span(&pair);
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::lit_integer {
            let text = inner.as_str();
            return text
                .parse::<u64>()
                .map_err(|_| SyntaxError::InvalidNumber(text.to_string()).into());
        }
    }
    Err(unexpected_rule(Rule::limit_clause, span).into())
}

fn unexpected_rule(rule: Rule, span: Span) -> SyntaxError {
    SyntaxError::Malformed {
        message: format!("unexpected rule in expression: {:?}", rule),
        line: span.line,
        column: span.column,
        snippet: String::new(),
    }
}

fn parse_string_literal(s: &str) -> String {
    let stripped = if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    };
    stripped.to_string()
}

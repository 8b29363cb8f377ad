//! Assembles the final request descriptor handed to the search backend:
//! scope conjunct, compiled filter, compiled sort, result-size bound.

use crate::errors::RequestError;
use query_compiler::{
    CompileError,
    query::{BoolQuery, QueryNode},
    sort::SortEntry,
};
use serde_json::{Value, json};
use tracing::debug;

const SCOPE_FIELD: &str = "experiment_id";

/// The complete, backend-ready search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub size: u64,
    pub query: QueryNode,
    pub sort: Vec<SortEntry>,
}

impl SearchRequest {
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "size": self.size,
            "query": self.query.to_json(),
        });
        if !self.sort.is_empty() {
            let entries: Vec<Value> = self.sort.iter().map(SortEntry::to_json).collect();
            body["sort"] = Value::Array(entries);
        }
        body
    }
}

/// Compile a request from its parts. The experiment scope is always an
/// exact-match conjunct in the mandatory list; the user filter, when
/// present, is conjoined into the same list.
pub fn compile_search<S: AsRef<str>>(
    scope_id: &str,
    filter: Option<&str>,
    sort: &[S],
    limit: u64,
) -> Result<SearchRequest, RequestError> {
    if scope_id.is_empty() {
        return Err(RequestError::MissingScope);
    }

    let mut must = vec![QueryNode::term(SCOPE_FIELD, json!(scope_id))];
    if let Some(filter) = filter {
        conjoin(&mut must, query_compiler::compile_filter(filter)?);
    }

    let sort = query_compiler::compile_sort_strings(sort)?;

    debug!(
        scope = %scope_id,
        size = limit,
        sort_entries = sort.len(),
        "compiled search request"
    );

    Ok(SearchRequest {
        size: limit,
        query: QueryNode::Bool(BoolQuery::must(must)),
        sort,
    })
}

/// Compile a request from a single query string, the mode where the
/// filter grammar carries its own `ORDER BY` / `LIMIT` suffix. A `LIMIT`
/// suffix overrides `default_limit`.
pub fn compile_query_string(
    scope_id: &str,
    query_string: &str,
    default_limit: u64,
) -> Result<SearchRequest, RequestError> {
    if scope_id.is_empty() {
        return Err(RequestError::MissingScope);
    }

    let parsed = filter_syntax::parse_query(query_string).map_err(CompileError::from)?;
    let compiled = query_compiler::lower(&parsed.expression)?;
    let sort = query_compiler::compile_sort(&parsed.order_by);
    let size = parsed.limit.unwrap_or(default_limit);

    debug!(scope = %scope_id, size, "compiled search request from query string");

    let mut must = vec![QueryNode::term(SCOPE_FIELD, json!(scope_id))];
    conjoin(&mut must, compiled);

    Ok(SearchRequest {
        size,
        query: QueryNode::Bool(BoolQuery::must(must)),
        sort,
    })
}

/// Conjoin a compiled filter into the mandatory list. A pure conjunction
/// contributes its conjuncts directly; any other shape (disjunction,
/// negation, leaf) is added as a single conjunct, untouched.
fn conjoin(must: &mut Vec<QueryNode>, node: QueryNode) {
    match node {
        QueryNode::Bool(inner)
            if inner.should.is_empty()
                && inner.must_not.is_empty()
                && inner.filter.is_empty()
                && inner.minimum_should_match.is_none() =>
        {
            for child in inner.must {
                conjoin(must, child);
            }
        }
        other => must.push(other),
    }
}

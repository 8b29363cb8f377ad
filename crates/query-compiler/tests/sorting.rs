//! Sort compiler tests: entry shapes and input-order preservation.

use filter_syntax::ast::{
    field::{ClauseContext, FieldRef, Namespace},
    sort::{SortClause, SortDirection},
};
use filter_syntax::errors::ParseError;
use query_compiler::{CompileError, compile_sort, compile_sort_strings};
use serde_json::json;

#[test]
fn test_top_level_sort_entry() {
    let entries = compile_sort_strings(&["start_time DESC"]).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].to_json(),
        json!({ "start_time": { "order": "desc" } })
    );
}

#[test]
fn test_nested_sort_entry_filters_on_key() {
    let entries = compile_sort_strings(&["metrics.accuracy DESC"]).unwrap();
    assert_eq!(
        entries[0].to_json(),
        json!({
            "metrics.value": {
                "order": "desc",
                "nested": {
                    "path": "metrics",
                    "filter": { "term": { "metrics.key": "accuracy" } }
                }
            }
        })
    );
}

#[test]
fn test_direction_defaults_to_asc() {
    let entries = compile_sort_strings(&["metrics.loss"]).unwrap();
    assert_eq!(entries[0].direction, SortDirection::Asc);
}

#[test]
fn test_input_order_is_preserved() {
    let entries =
        compile_sort_strings(&["metrics.accuracy DESC", "start_time ASC", "run_id DESC"]).unwrap();
    assert_eq!(entries[0].field, "metrics.value");
    assert_eq!(entries[1].field, "start_time");
    assert_eq!(entries[2].field, "run_id");
}

#[test]
fn test_structured_clauses_compile_identically() {
    let clause = SortClause::new(
        FieldRef::classify("params.learning_rate", ClauseContext::Sort).unwrap(),
        SortDirection::Desc,
    );
    let entries = compile_sort(&[clause]);
    assert_eq!(entries[0].field, "params.value");
    assert_eq!(
        entries[0].nested.as_ref().unwrap().path,
        Namespace::Params.as_str()
    );
    assert_eq!(entries[0].nested.as_ref().unwrap().key, "learning_rate");
}

#[test]
fn test_unknown_sort_field_names_token() {
    match compile_sort_strings(&["bogus_field DESC"]) {
        Err(CompileError::Parse(ParseError::UnknownField(err))) => {
            assert_eq!(err.field, "bogus_field");
            assert_eq!(err.context, ClauseContext::Sort);
        }
        other => panic!("expected unknown field error, got {:?}", other),
    }
}

#[test]
fn test_malformed_direction_is_rejected() {
    assert!(matches!(
        compile_sort_strings(&["start_time UPWARD"]),
        Err(CompileError::Parse(ParseError::Syntax(_)))
    ));
}

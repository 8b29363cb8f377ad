//! Request assembly tests: scope injection, filter/sort composition, and
//! the end-to-end compile-execute-denormalize path.

use async_trait::async_trait;
use search_request::{
    ExecutorError, RequestError, RunSearcher, SearchExecutor, SearchRequest, compile_query_string,
    compile_search,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

const NO_SORT: &[&str] = &[];

#[test]
fn test_scope_is_always_the_first_mandatory_conjunct() {
    let request = compile_search("exp1", None, NO_SORT, 10).unwrap();
    assert_eq!(
        request.to_json(),
        json!({
            "size": 10,
            "query": { "bool": { "must": [ { "term": { "experiment_id": "exp1" } } ] } }
        })
    );
}

#[test]
fn test_empty_scope_is_rejected_before_parsing() {
    match compile_search("", Some("this is not a filter!!"), NO_SORT, 10) {
        Err(RequestError::MissingScope) => {}
        other => panic!("expected missing scope error, got {:?}", other),
    }
}

#[test]
fn test_end_to_end_request_shape() {
    let request = compile_search(
        "exp1",
        Some(r#"params.learning_rate >= 0.01 and params.optimizer = "adam""#),
        &["params.learning_rate DESC"],
        100,
    )
    .unwrap();

    let rendered = request.to_json();
    assert_eq!(rendered["size"], json!(100));

    let must = rendered["query"]["bool"]["must"].as_array().unwrap();
    assert_eq!(must.len(), 3);
    assert_eq!(must[0], json!({ "term": { "experiment_id": "exp1" } }));
    assert_eq!(
        must[1],
        json!({
            "nested": {
                "path": "params",
                "query": {
                    "bool": {
                        "filter": [
                            { "term": { "params.key": "learning_rate" } },
                            { "range": { "params.value.numeric": { "gte": 0.01 } } }
                        ]
                    }
                }
            }
        })
    );
    assert_eq!(
        must[2],
        json!({
            "nested": {
                "path": "params",
                "query": {
                    "bool": {
                        "filter": [
                            { "term": { "params.key": "optimizer" } },
                            { "term": { "params.value": "adam" } }
                        ]
                    }
                }
            }
        })
    );

    assert_eq!(
        rendered["sort"],
        json!([
            {
                "params.value": {
                    "order": "desc",
                    "nested": {
                        "path": "params",
                        "filter": { "term": { "params.key": "learning_rate" } }
                    }
                }
            }
        ])
    );
}

#[test]
fn test_disjunction_filter_stays_one_conjunct() {
    let request = compile_search(
        "exp1",
        Some(r#"status = "FINISHED" OR status = "FAILED""#),
        NO_SORT,
        5,
    )
    .unwrap();

    let rendered = request.to_json();
    let must = rendered["query"]["bool"]["must"].as_array().unwrap();
    assert_eq!(must.len(), 2);
    assert_eq!(must[1]["bool"]["minimum_should_match"], json!(1));
}

#[test]
fn test_sort_key_omitted_when_no_sort_requested() {
    let request = compile_search("exp1", Some(r#"status = "FINISHED""#), NO_SORT, 5).unwrap();
    assert!(request.to_json().get("sort").is_none());
}

#[test]
fn test_compile_errors_propagate() {
    assert!(matches!(
        compile_search("exp1", Some("bogus_field = 1"), NO_SORT, 5),
        Err(RequestError::Compile(_))
    ));
    assert!(matches!(
        compile_search("exp1", None, &["bogus_field DESC"], 5),
        Err(RequestError::Compile(_))
    ));
}

#[test]
fn test_query_string_mode_with_suffix() {
    let request = compile_query_string(
        "exp1",
        "metrics.accuracy >= 0.9 ORDER BY metrics.accuracy DESC LIMIT 10",
        1000,
    )
    .unwrap();

    let rendered = request.to_json();
    assert_eq!(rendered["size"], json!(10));
    assert_eq!(
        rendered["query"]["bool"]["must"].as_array().unwrap().len(),
        2
    );
    assert_eq!(
        rendered["sort"][0]["metrics.value"]["order"],
        json!("desc")
    );
}

#[test]
fn test_query_string_mode_falls_back_to_default_limit() {
    let request = compile_query_string("exp1", r#"status = "FINISHED""#, 1000).unwrap();
    assert_eq!(request.size, 1000);
    assert!(request.sort.is_empty());
}

struct RecordingExecutor {
    seen: Mutex<Vec<Value>>,
    hits: Vec<Value>,
}

#[async_trait]
impl SearchExecutor for RecordingExecutor {
    async fn execute(&self, request: &SearchRequest) -> Result<Vec<Value>, ExecutorError> {
        self.seen.lock().unwrap().push(request.to_json());
        Ok(self.hits.clone())
    }
}

#[tokio::test]
async fn test_searcher_compiles_executes_and_denormalizes() {
    let executor = Arc::new(RecordingExecutor {
        seen: Mutex::new(Vec::new()),
        hits: vec![json!({
            "run_id": "r1",
            "experiment_id": "exp1",
            "status": "FINISHED",
            "metrics": [ { "key": "accuracy", "value": 0.93 } ],
            "params": [ { "key": "model", "value": "resnet" } ]
        })],
    });

    let searcher = RunSearcher::new(executor.clone());
    let records = searcher
        .search("exp1", Some("metrics.accuracy >= 0.9"), NO_SORT, 50)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].run_id, "r1");
    assert_eq!(records[0].metrics["accuracy"], json!(0.93));
    assert_eq!(records[0].params["model"], json!("resnet"));

    let seen = executor.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["size"], json!(50));
}

struct FailingExecutor;

#[async_trait]
impl SearchExecutor for FailingExecutor {
    async fn execute(&self, _request: &SearchRequest) -> Result<Vec<Value>, ExecutorError> {
        Err(ExecutorError::Backend("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_backend_failure_surfaces_to_caller() {
    let searcher = RunSearcher::new(Arc::new(FailingExecutor));
    let err = searcher
        .search("exp1", None, NO_SORT, 10)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("connection refused"));
}

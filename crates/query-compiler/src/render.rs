//! Serializes the query tree into the search backend's JSON document shape.

use crate::query::{BoolQuery, QueryNode};
use serde_json::{Map, Value, json};

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

impl QueryNode {
    pub fn to_json(&self) -> Value {
        match self {
            QueryNode::Bool(bool_query) => bool_query.to_json(),
            QueryNode::Term { field, value } => {
                json!({ "term": single_entry(field, value.clone()) })
            }
            QueryNode::Range { field, bound } => {
                let boundary = single_entry(bound.op.as_str(), json!(bound.value));
                json!({ "range": single_entry(field, boundary) })
            }
            QueryNode::Nested { path, query } => {
                json!({ "nested": { "path": path, "query": query.to_json() } })
            }
        }
    }
}

impl BoolQuery {
    pub fn to_json(&self) -> Value {
        let mut sections = Map::new();

        for (name, clauses) in [
            ("must", &self.must),
            ("filter", &self.filter),
            ("should", &self.should),
            ("must_not", &self.must_not),
        ] {
            if !clauses.is_empty() {
                let rendered: Vec<Value> = clauses.iter().map(QueryNode::to_json).collect();
                sections.insert(name.to_string(), Value::Array(rendered));
            }
        }

        if !self.should.is_empty() {
            if let Some(min) = self.minimum_should_match {
                sections.insert("minimum_should_match".to_string(), json!(min));
            }
        }

        json!({ "bool": sections })
    }
}

//! Compiles `(field, direction)` pairs into backend sort specifications.

use crate::errors::CompileError;
use filter_syntax::ast::{
    field::FieldRef,
    sort::{SortClause, SortDirection},
};
use serde_json::{Map, Value, json};

/// One compiled sort specification. Nested attributes sort on the generic
/// value field, narrowed to the requested key by a nested filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub field: String,
    pub direction: SortDirection,
    pub nested: Option<NestedSortFilter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NestedSortFilter {
    pub path: String,
    pub key: String,
}

impl SortEntry {
    pub fn to_json(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("order".to_string(), json!(self.direction.as_str()));

        if let Some(nested) = &self.nested {
            let mut key_term = Map::new();
            key_term.insert(format!("{}.key", nested.path), json!(nested.key));
            spec.insert(
                "nested".to_string(),
                json!({ "path": nested.path, "filter": { "term": key_term } }),
            );
        }

        let mut entry = Map::new();
        entry.insert(self.field.clone(), Value::Object(spec));
        Value::Object(entry)
    }
}

/// Compile structured sort clauses. Input order is the caller's tie-break
/// chain and is preserved exactly.
pub fn compile_sort(clauses: &[SortClause]) -> Vec<SortEntry> {
    clauses.iter().map(compile_clause).collect()
}

/// Compile textual clauses of the form `"<field> [ASC|DESC]"`.
pub fn compile_sort_strings<S: AsRef<str>>(specs: &[S]) -> Result<Vec<SortEntry>, CompileError> {
    let mut entries = Vec::with_capacity(specs.len());
    for spec in specs {
        let clause = SortClause::parse(spec.as_ref())?;
        entries.push(compile_clause(&clause));
    }
    Ok(entries)
}

fn compile_clause(clause: &SortClause) -> SortEntry {
    match &clause.field {
        FieldRef::NestedAttribute { namespace, key } => SortEntry {
            field: format!("{}.value", namespace.as_str()),
            direction: clause.direction,
            nested: Some(NestedSortFilter {
                path: namespace.as_str().to_string(),
                key: key.clone(),
            }),
        },
        FieldRef::TopLevel(name) => SortEntry {
            field: name.as_str().to_string(),
            direction: clause.direction,
            nested: None,
        },
    }
}

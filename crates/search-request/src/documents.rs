//! Denormalizes raw result documents: the nested `{key, value}` arrays of
//! a stored run become plain maps on the returned record.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct AttributeEntry {
    pub key: String,
    pub value: Value,
}

/// A run document as the backend stores it.
#[derive(Debug, Clone, Deserialize)]
pub struct RunDocument {
    pub run_id: String,
    pub experiment_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub metrics: Vec<AttributeEntry>,
    #[serde(default)]
    pub params: Vec<AttributeEntry>,
    #[serde(default)]
    pub tags: Vec<AttributeEntry>,
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

/// A run with its attribute bags folded into maps. Duplicate keys within
/// one bag resolve last-wins.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub run_id: String,
    pub experiment_id: String,
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub metrics: BTreeMap<String, Value>,
    pub params: BTreeMap<String, Value>,
    pub tags: BTreeMap<String, Value>,
    pub attributes: BTreeMap<String, Value>,
}

impl RunRecord {
    pub fn from_document(document: Value) -> Result<Self, serde_json::Error> {
        let document: RunDocument = serde_json::from_value(document)?;
        Ok(document.into())
    }
}

impl From<RunDocument> for RunRecord {
    fn from(document: RunDocument) -> Self {
        RunRecord {
            run_id: document.run_id,
            experiment_id: document.experiment_id,
            user_id: document.user_id,
            status: document.status,
            start_time: document.start_time,
            end_time: document.end_time,
            metrics: fold_entries(document.metrics),
            params: fold_entries(document.params),
            tags: fold_entries(document.tags),
            attributes: fold_entries(document.attributes),
        }
    }
}

fn fold_entries(entries: Vec<AttributeEntry>) -> BTreeMap<String, Value> {
    entries
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect()
}

use crate::errors::UnknownFieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespaces of the dynamically-keyed attribute bags on a run document.
///
/// The namespace segment matches case-insensitively; the key after it is
/// an opaque, case-sensitive string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Namespace {
    Metrics,
    Params,
    Tags,
    Attributes,
}

impl Namespace {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "metrics" => Some(Namespace::Metrics),
            "params" => Some(Namespace::Params),
            "tags" => Some(Namespace::Tags),
            "attributes" => Some(Namespace::Attributes),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Metrics => "metrics",
            Namespace::Params => "params",
            Namespace::Tags => "tags",
            Namespace::Attributes => "attributes",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed, always-present columns on a run document. Case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopLevelField {
    RunId,
    ExperimentId,
    UserId,
    Status,
    StartTime,
    EndTime,
}

impl TopLevelField {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "run_id" => Some(TopLevelField::RunId),
            "experiment_id" => Some(TopLevelField::ExperimentId),
            "user_id" => Some(TopLevelField::UserId),
            "status" => Some(TopLevelField::Status),
            "start_time" => Some(TopLevelField::StartTime),
            "end_time" => Some(TopLevelField::EndTime),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TopLevelField::RunId => "run_id",
            TopLevelField::ExperimentId => "experiment_id",
            TopLevelField::UserId => "user_id",
            TopLevelField::Status => "status",
            TopLevelField::StartTime => "start_time",
            TopLevelField::EndTime => "end_time",
        }
    }
}

impl fmt::Display for TopLevelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a field token occurred, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseContext {
    Filter,
    Sort,
}

impl fmt::Display for ClauseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseContext::Filter => write!(f, "filter"),
            ClauseContext::Sort => write!(f, "sort"),
        }
    }
}

/// A classified field reference: either a dynamically-keyed nested
/// attribute or one of the fixed top-level columns.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
    NestedAttribute { namespace: Namespace, key: String },
    TopLevel(TopLevelField),
}

impl FieldRef {
    /// Resolve a raw field token. Classification is purely syntactic: a
    /// `namespace.key` pattern with a known namespace becomes a nested
    /// attribute, a bare token must belong to the top-level allow-list.
    pub fn classify(token: &str, context: ClauseContext) -> Result<Self, UnknownFieldError> {
        if let Some((head, key)) = token.split_once('.') {
            if let Some(namespace) = Namespace::parse(head) {
                if !key.is_empty() {
                    return Ok(FieldRef::NestedAttribute {
                        namespace,
                        key: key.to_string(),
                    });
                }
            }
            return Err(UnknownFieldError {
                field: token.to_string(),
                context,
            });
        }

        TopLevelField::parse(token)
            .map(FieldRef::TopLevel)
            .ok_or_else(|| UnknownFieldError {
                field: token.to_string(),
                context,
            })
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::NestedAttribute { namespace, key } => write!(f, "{}.{}", namespace, key),
            FieldRef::TopLevel(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_nested() {
        let field = FieldRef::classify("metrics.accuracy", ClauseContext::Filter).unwrap();
        assert_eq!(
            field,
            FieldRef::NestedAttribute {
                namespace: Namespace::Metrics,
                key: "accuracy".to_string(),
            }
        );
    }

    #[test]
    fn test_namespace_case_insensitive_key_case_sensitive() {
        let field = FieldRef::classify("METRICS.Loss", ClauseContext::Filter).unwrap();
        assert_eq!(
            field,
            FieldRef::NestedAttribute {
                namespace: Namespace::Metrics,
                key: "Loss".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_top_level() {
        let field = FieldRef::classify("status", ClauseContext::Filter).unwrap();
        assert_eq!(field, FieldRef::TopLevel(TopLevelField::Status));
    }

    #[test]
    fn test_unknown_field_names_token_and_context() {
        let err = FieldRef::classify("bogus_field", ClauseContext::Sort).unwrap_err();
        assert_eq!(err.field, "bogus_field");
        assert_eq!(err.context, ClauseContext::Sort);
        assert!(err.to_string().contains("bogus_field"));
        assert!(err.to_string().contains("sort"));
    }

    #[test]
    fn test_unknown_namespace_is_rejected() {
        assert!(FieldRef::classify("settings.depth", ClauseContext::Filter).is_err());
        assert!(FieldRef::classify("metrics.", ClauseContext::Filter).is_err());
    }
}

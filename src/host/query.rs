//! Query results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Result of a host query: data plus any errors the engine reported.
///
/// Errors do not imply missing data; callers decide whether a partial
/// result is usable.
#[derive(Debug, Clone)]
pub struct QueryResponse<T> {
    pub errors: Vec<QueryError>,
    pub data: Option<T>,
}

impl<T> QueryResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            errors: Vec::new(),
            data: Some(data),
        }
    }

    pub fn failed(errors: Vec<QueryError>) -> Self {
        Self { errors, data: None }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryError {
    pub message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Projection of one Markdown node: id and rendered body only.
///
/// Everything else is re-read from the underlying node by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownRecord {
    pub id: NodeId,
    pub html: String,
}

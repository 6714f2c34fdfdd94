//! Page derivation errors.

use thiserror::Error;

use super::conflict::{UrlConflict, format_conflicts};
use crate::host::{HostError, QueryError};
use crate::node::NodeId;

#[derive(Debug, Error)]
pub enum PageError {
    /// The Markdown query reported errors; no page was touched.
    #[error("markdown query failed: {}", join_errors(.0))]
    Query(Vec<QueryError>),

    #[error("queried node `{0}` does not exist")]
    MissingNode(NodeId),

    #[error("node `{0}` is not a Markdown node")]
    NotMarkdown(NodeId),

    #[error("node `{0}` has no derived fields (was it annotated?)")]
    NotAnnotated(NodeId),

    #[error("`{url}` has no template in its frontmatter and no default template is configured")]
    MissingTemplate { url: String },

    #[error("site metadata node `Site` does not exist")]
    MissingSiteNode,

    #[error("several documents derive the same url:\n{}", format_conflicts(.0))]
    UrlConflict(Vec<UrlConflict>),

    #[error(transparent)]
    Host(#[from] HostError),
}

fn join_errors(errors: &[QueryError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

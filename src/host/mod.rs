//! Host capabilities consumed by the hooks.
//!
//! | Trait          | Host operation                               |
//! |----------------|----------------------------------------------|
//! | `NodeLookup`   | `getNode`, `getNodesByType`                  |
//! | `NodeActions`  | `createNodeField`                            |
//! | `PageRegistry` | registered pages, `createPage`, `deletePage` |
//! | `QueryEngine`  | the Markdown `{id, html}` query              |
//!
//! Hooks never hold host state across calls; every read goes through
//! these traits, so tests can substitute [`MemoryHost`] or a fake.

mod error;
mod memory;
mod query;

pub use error::HostError;
pub use memory::{MemoryHost, PageAction};
pub use query::{MarkdownRecord, QueryError, QueryResponse};

use std::future::Future;

use serde_json::Value;

use crate::node::{ContentNode, NodeId, NodeType};
use crate::page::PageSpec;

/// Read access to the content graph.
pub trait NodeLookup {
    fn get_node(&self, id: &NodeId) -> Option<ContentNode>;

    fn get_nodes_by_type(&self, node_type: &NodeType) -> Vec<ContentNode>;
}

/// Field attachment on existing nodes.
pub trait NodeActions {
    /// Attach `value` under `name`. Writing a name twice keeps the last value.
    fn create_node_field(&self, node: &NodeId, name: &str, value: Value) -> Result<(), HostError>;
}

/// The set of registered pages, keyed by path.
pub trait PageRegistry {
    /// Snapshot of the registered pages.
    fn pages(&self) -> Vec<PageSpec>;

    fn create_page(&self, page: PageSpec) -> Result<(), HostError>;

    fn delete_page(&self, page: &PageSpec) -> Result<(), HostError>;
}

/// Declarative queries over the content graph.
pub trait QueryEngine {
    /// Minimal `{id, html}` projection of every Markdown node.
    fn all_markdown(&self) -> impl Future<Output = QueryResponse<Vec<MarkdownRecord>>>;
}

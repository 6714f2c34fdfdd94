//! In-memory host: node store, page registry and query engine.

use std::collections::BTreeMap;
use std::future::{Future, ready};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use serde_json::Value;

use super::{
    HostError, MarkdownRecord, NodeActions, NodeLookup, PageRegistry, QueryEngine, QueryError,
    QueryResponse,
};
use crate::node::{ContentNode, NodeId, NodeType};
use crate::page::PageSpec;

/// A page registry mutation, recorded in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Create(String),
    Delete(String),
}

/// Nodes keyed by id, plus creation order.
///
/// Lookups by type and queries iterate in creation order, so a pass over
/// the same content always visits nodes in the same order.
#[derive(Debug, Default)]
struct NodeTable {
    by_id: FxHashMap<NodeId, ContentNode>,
    order: Vec<NodeId>,
}

/// Host state held in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: RwLock<NodeTable>,
    /// Registered pages keyed by path.
    pages: RwLock<BTreeMap<String, PageSpec>>,
    actions: Mutex<Vec<PageAction>>,
    /// Errors reported by every query until cleared.
    query_errors: RwLock<Vec<QueryError>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node, linking it into its parent's children.
    pub fn create_node(&self, node: ContentNode) -> NodeId {
        let id = node.id.clone();
        let mut table = self.nodes.write();

        if let Some(parent) = node.parent.as_ref().and_then(|p| table.by_id.get_mut(p))
            && !parent.children.contains(&id)
        {
            parent.children.push(id.clone());
        }

        if table.by_id.insert(id.clone(), node).is_none() {
            table.order.push(id.clone());
        }
        id
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> Vec<ContentNode> {
        let table = self.nodes.read();
        table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id).cloned())
            .collect()
    }

    /// Register pages left by an earlier pass, without recording actions.
    pub fn seed_pages(&self, pages: impl IntoIterator<Item = PageSpec>) {
        let mut registry = self.pages.write();
        for page in pages {
            registry.insert(page.path.clone(), page);
        }
    }

    pub fn page(&self, path: &str) -> Option<PageSpec> {
        self.pages.read().get(path).cloned()
    }

    /// Keep only pages matching `keep`.
    pub fn retain_pages(&self, mut keep: impl FnMut(&PageSpec) -> bool) {
        self.pages.write().retain(|_, page| keep(page));
    }

    /// Registry mutations made so far.
    pub fn page_actions(&self) -> Vec<PageAction> {
        self.actions.lock().clone()
    }

    /// Make every following query report `errors`.
    pub fn reject_queries(&self, errors: Vec<QueryError>) {
        *self.query_errors.write() = errors;
    }
}

impl NodeLookup for MemoryHost {
    fn get_node(&self, id: &NodeId) -> Option<ContentNode> {
        self.nodes.read().by_id.get(id).cloned()
    }

    fn get_nodes_by_type(&self, node_type: &NodeType) -> Vec<ContentNode> {
        let table = self.nodes.read();
        table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id))
            .filter(|node| &node.node_type() == node_type)
            .cloned()
            .collect()
    }
}

impl NodeActions for MemoryHost {
    fn create_node_field(&self, node: &NodeId, name: &str, value: Value) -> Result<(), HostError> {
        let mut table = self.nodes.write();
        let node_ref = table
            .by_id
            .get_mut(node)
            .ok_or_else(|| HostError::UnknownNode(node.clone()))?;
        node_ref.fields.set(name, value);
        Ok(())
    }
}

impl PageRegistry for MemoryHost {
    fn pages(&self) -> Vec<PageSpec> {
        self.pages.read().values().cloned().collect()
    }

    fn create_page(&self, page: PageSpec) -> Result<(), HostError> {
        self.actions.lock().push(PageAction::Create(page.path.clone()));
        self.pages.write().insert(page.path.clone(), page);
        Ok(())
    }

    fn delete_page(&self, page: &PageSpec) -> Result<(), HostError> {
        if self.pages.write().remove(&page.path).is_none() {
            return Err(HostError::UnknownPage(page.path.clone()));
        }
        self.actions.lock().push(PageAction::Delete(page.path.clone()));
        Ok(())
    }
}

impl QueryEngine for MemoryHost {
    fn all_markdown(&self) -> impl Future<Output = QueryResponse<Vec<MarkdownRecord>>> {
        let errors = self.query_errors.read().clone();
        let response = if errors.is_empty() {
            let records = self
                .get_nodes_by_type(&NodeType::MarkdownRemark)
                .into_iter()
                .filter_map(|node| {
                    let html = node.as_markdown()?.html.clone();
                    Some(MarkdownRecord { id: node.id, html })
                })
                .collect();
            QueryResponse::ok(records)
        } else {
            QueryResponse::failed(errors)
        };
        ready(response)
    }
}

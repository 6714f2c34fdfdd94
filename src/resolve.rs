//! Ancestor resolution: find the `File` node a content node came from.

use rustc_hash::FxHashSet;

use crate::host::NodeLookup;
use crate::node::{ContentNode, NodeId};
use crate::{debug, log};

/// Outcome of walking a node's parent chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Nearest `File` ancestor (or the node itself).
    Found(ContentNode),
    /// The chain ended without a `File` node. `last` is the final node
    /// reached: it has no parent, or its parent is not in the store.
    Root { last: NodeId },
    /// The chain revisited `at`.
    Cycle { at: NodeId },
}

impl Resolution {
    /// The found `File` node, folding both failure kinds into `None`.
    pub fn into_file(self) -> Option<ContentNode> {
        match self {
            Self::Found(node) => Some(node),
            Self::Root { .. } | Self::Cycle { .. } => None,
        }
    }
}

/// Walk `node`'s parents until a `File` node is reached.
///
/// Every visited id is recorded, so the walk ends after at most one step
/// per node in the store even when parent references form a cycle.
pub fn find_file_node<L>(node: &ContentNode, lookup: &L) -> Resolution
where
    L: NodeLookup + ?Sized,
{
    let mut visited = FxHashSet::default();
    visited.insert(node.id.clone());

    let mut current = node.clone();
    loop {
        if current.is_file() {
            return Resolution::Found(current);
        }

        let Some(parent) = current.parent.as_ref().and_then(|id| lookup.get_node(id)) else {
            debug!("resolve"; "no File ancestor for node {} (chain ends at {})", node.id, current.id);
            return Resolution::Root { last: current.id };
        };

        if !visited.insert(parent.id.clone()) {
            log!("resolve"; "cyclic parent reference at node {} (starting from {})", parent.id, node.id);
            return Resolution::Cycle { at: parent.id };
        }

        current = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::node::FileDescriptor;
    use std::path::Path;

    fn file_node(id: &str) -> ContentNode {
        let file = FileDescriptor::new(Path::new("/site"), Path::new("/site/blog/post.md")).unwrap();
        ContentNode::file(id, file)
    }

    #[test]
    fn test_node_is_its_own_file() {
        let host = MemoryHost::new();
        let node = file_node("f");
        assert_eq!(find_file_node(&node, &host), Resolution::Found(node));
    }

    #[test]
    fn test_long_chain_finds_file() {
        let host = MemoryHost::new();
        host.create_node(file_node("file"));

        let mut parent = "file".to_string();
        for i in 0..200 {
            let id = format!("n{i}");
            host.create_node(ContentNode::other(id.as_str(), "Wrapper").with_parent(parent.as_str()));
            parent = id;
        }

        let leaf = host.get_node(&parent.as_str().into()).unwrap();
        let found = find_file_node(&leaf, &host).into_file().unwrap();
        assert_eq!(found.id, NodeId::from("file"));
    }

    #[test]
    fn test_no_parent_is_root() {
        let host = MemoryHost::new();
        let node = ContentNode::other("lonely", "Wrapper");
        assert_eq!(
            find_file_node(&node, &host),
            Resolution::Root { last: "lonely".into() }
        );
    }

    #[test]
    fn test_dangling_parent_is_root() {
        let host = MemoryHost::new();
        host.create_node(ContentNode::other("a", "Wrapper").with_parent("gone"));
        let node = ContentNode::other("leaf", "Wrapper").with_parent("a");
        assert_eq!(
            find_file_node(&node, &host),
            Resolution::Root { last: "a".into() }
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let host = MemoryHost::new();
        host.create_node(ContentNode::other("a", "Wrapper").with_parent("b"));
        host.create_node(ContentNode::other("b", "Wrapper").with_parent("c"));
        host.create_node(ContentNode::other("c", "Wrapper").with_parent("a"));

        let start = host.get_node(&"a".into()).unwrap();
        let result = find_file_node(&start, &host);
        assert_eq!(result, Resolution::Cycle { at: "a".into() });
        assert!(result.into_file().is_none());
    }

    #[test]
    fn test_self_parent_cycle() {
        let host = MemoryHost::new();
        host.create_node(ContentNode::other("self", "Wrapper").with_parent("self"));
        let node = host.get_node(&"self".into()).unwrap();
        assert_eq!(
            find_file_node(&node, &host),
            Resolution::Cycle { at: "self".into() }
        );
    }

    #[test]
    fn test_cycle_not_containing_start() {
        // leaf -> a -> b -> a
        let host = MemoryHost::new();
        host.create_node(ContentNode::other("a", "Wrapper").with_parent("b"));
        host.create_node(ContentNode::other("b", "Wrapper").with_parent("a"));
        let leaf = ContentNode::other("leaf", "Wrapper").with_parent("a");
        assert_eq!(
            find_file_node(&leaf, &host),
            Resolution::Cycle { at: "a".into() }
        );
    }
}

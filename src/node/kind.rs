//! Node identity and type tags.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque node identifier.
///
/// Cheap to clone; ids are copied into visited sets and child lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    /// Derive a stable id from a namespace and a key (e.g. a source path).
    pub fn hashed(namespace: &str, key: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(namespace.as_bytes());
        hasher.update(&[0]);
        hasher.update(key.as_bytes());
        let digest = hasher.finalize();
        Self::new(&hex::encode(&digest.as_bytes()[..16]))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The `type` tag of a content node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// A literal filesystem file carrying path metadata.
    File,
    /// A Markdown document parsed from a `File`.
    MarkdownRemark,
    /// Site metadata singleton.
    Site,
    /// Optional site data singleton.
    SiteData,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::File => "File",
            Self::MarkdownRemark => "MarkdownRemark",
            Self::Site => "Site",
            Self::SiteData => "SiteData",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for NodeType {
    fn from(name: &str) -> Self {
        match name {
            "File" => Self::File,
            "MarkdownRemark" => Self::MarkdownRemark,
            "Site" => Self::Site,
            "SiteData" => Self::SiteData,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

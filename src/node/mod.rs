//! Content graph model: nodes, their payloads, and derived fields.

mod fields;
mod file;
mod frontmatter;
mod kind;

pub use fields::{DerivedFields, NodeFields};
pub use file::FileDescriptor;
pub use frontmatter::Frontmatter;
pub use kind::{NodeId, NodeType};

pub(crate) use file::split_extension;

use serde::Serialize;

use crate::JsonMap;

/// Well-known id of the site metadata singleton.
pub const SITE_NODE_ID: &str = "Site";

/// Well-known id of the optional site data singleton.
pub const SITE_DATA_NODE_ID: &str = "SiteData";

/// A record in the host's content graph.
///
/// The payload decides the node's type tag, so a `File` node always
/// carries a [`FileDescriptor`] and a `MarkdownRemark` node always
/// carries frontmatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentNode {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
    #[serde(flatten)]
    pub payload: NodePayload,
    #[serde(skip_serializing_if = "NodeFields::is_empty")]
    pub fields: NodeFields,
}

/// Type-specific node content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodePayload {
    File(FileDescriptor),
    #[serde(rename = "MarkdownRemark")]
    Markdown(MarkdownContent),
    Site(SiteNode),
    SiteData {
        data: serde_json::Value,
    },
    Other {
        #[serde(rename = "typeName")]
        type_name: String,
        data: JsonMap,
    },
}

/// A parsed Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownContent {
    pub frontmatter: Frontmatter,
    pub raw_body: String,
    /// Rendered HTML body. Only exposed through the query projection.
    #[serde(skip)]
    pub html: String,
}

/// Site-level metadata singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteNode {
    pub site_metadata: JsonMap,
    pub path_prefix: String,
}

impl ContentNode {
    pub fn new(id: impl Into<NodeId>, payload: NodePayload) -> Self {
        Self {
            id: id.into(),
            parent: None,
            children: Vec::new(),
            payload,
            fields: NodeFields::default(),
        }
    }

    pub fn file(id: impl Into<NodeId>, file: FileDescriptor) -> Self {
        Self::new(id, NodePayload::File(file))
    }

    pub fn markdown(id: impl Into<NodeId>, content: MarkdownContent) -> Self {
        Self::new(id, NodePayload::Markdown(content))
    }

    pub fn other(id: impl Into<NodeId>, type_name: impl Into<String>) -> Self {
        Self::new(
            id,
            NodePayload::Other {
                type_name: type_name.into(),
                data: JsonMap::new(),
            },
        )
    }

    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// The node's type tag.
    pub fn node_type(&self) -> NodeType {
        match &self.payload {
            NodePayload::File(_) => NodeType::File,
            NodePayload::Markdown(_) => NodeType::MarkdownRemark,
            NodePayload::Site(_) => NodeType::Site,
            NodePayload::SiteData { .. } => NodeType::SiteData,
            NodePayload::Other { type_name, .. } => NodeType::Other(type_name.clone()),
        }
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self.payload, NodePayload::File(_))
    }

    pub fn as_file(&self) -> Option<&FileDescriptor> {
        match &self.payload {
            NodePayload::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_markdown(&self) -> Option<&MarkdownContent> {
        match &self.payload {
            NodePayload::Markdown(content) => Some(content),
            _ => None,
        }
    }

    pub fn as_site(&self) -> Option<&SiteNode> {
        match &self.payload {
            NodePayload::Site(site) => Some(site),
            _ => None,
        }
    }

    /// Data carried by a `SiteData` node.
    pub fn site_data(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            NodePayload::SiteData { data } => Some(data),
            _ => None,
        }
    }
}

//! Markdown page creator.
//!
//! Two hooks over a host-owned content graph:
//!
//! - [`annotate::on_create_node`] runs once per created node and attaches
//!   derived URL/path fields to every Markdown node.
//! - [`page::create_pages`] runs once per build pass and registers one page
//!   per Markdown node, carrying the sibling list and site metadata.
//!
//! The host (node store, page registry, query engine) is reached only
//! through the traits in [`host`]. [`host::MemoryHost`] implements all of
//! them in memory; [`source`] fills it from a content directory.

pub mod annotate;
pub mod host;
pub mod logger;
pub mod node;
pub mod options;
pub mod page;
pub mod resolve;
pub mod source;
pub mod utils;

pub use annotate::{FilePathDeriver, PathDeriver, PluginError, on_create_node};
pub use host::{MemoryHost, NodeActions, NodeLookup, PageRegistry, QueryEngine};
pub use node::{ContentNode, DerivedFields, FileDescriptor, Frontmatter, NodeId, NodeType};
pub use options::PluginOptions;
pub use page::{PageError, PageReport, PageSpec, create_pages};
pub use resolve::{Resolution, find_file_node};

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

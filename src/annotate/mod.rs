//! Node-creation hook: attach derived URL/path fields to Markdown nodes.
//!
//! URL policy, first match wins:
//!
//! | Source                     | Example                |
//! |----------------------------|------------------------|
//! | frontmatter `url`          | `/custom/` (verbatim)  |
//! | `ugly-urls = true`         | `blog/post-1.html`     |
//! | canonical path deriver     | `/blog/post-1/`        |

mod canonical;

pub use canonical::{FilePathDeriver, PathDeriver};

use thiserror::Error;

use crate::debug;
use crate::host::{HostError, NodeActions, NodeLookup};
use crate::node::{ContentNode, DerivedFields, FileDescriptor, MarkdownContent, NodeId};
use crate::options::PluginOptions;
use crate::resolve::{Resolution, find_file_node};

/// Fatal errors of the node-creation phase.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A Markdown node without a source file is a corrupt build input.
    #[error("could not find parent File node for MarkdownRemark node `{node}` ({reason})")]
    MissingFileAncestor { node: NodeId, reason: String },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Run for every newly created node. Nodes other than Markdown are ignored.
pub fn on_create_node<H, D>(
    node: &ContentNode,
    host: &H,
    options: &PluginOptions,
    deriver: &D,
) -> Result<(), PluginError>
where
    H: NodeLookup + NodeActions,
    D: PathDeriver + ?Sized,
{
    let Some(markdown) = node.as_markdown() else {
        return Ok(());
    };

    let file_node = match find_file_node(node, host) {
        Resolution::Found(file) => file,
        Resolution::Root { last } => {
            return Err(missing_ancestor(node, format!("chain ends at `{last}`")));
        }
        Resolution::Cycle { at } => {
            return Err(missing_ancestor(node, format!("cyclic reference at `{at}`")));
        }
    };
    let Some(file) = file_node.as_file() else {
        return Err(missing_ancestor(node, "ancestor has no file attributes".into()));
    };

    let url = derive_url(node, markdown, file, host, options, deriver)
        .ok_or_else(|| missing_ancestor(node, "canonical path deriver found no file".into()))?;
    debug!("annotate"; "{} -> {}", file.relative_path, url);

    for (name, value) in DerivedFields::new(url, file).into_entries() {
        host.create_node_field(&node.id, name, value)?;
    }
    Ok(())
}

fn missing_ancestor(node: &ContentNode, reason: String) -> PluginError {
    PluginError::MissingFileAncestor {
        node: node.id.clone(),
        reason,
    }
}

/// Pick the node's URL by policy priority.
fn derive_url<H, D>(
    node: &ContentNode,
    markdown: &MarkdownContent,
    file: &FileDescriptor,
    host: &H,
    options: &PluginOptions,
    deriver: &D,
) -> Option<String>
where
    H: NodeLookup,
    D: PathDeriver + ?Sized,
{
    if let Some(url) = markdown.frontmatter.url() {
        return Some(url.into_owned());
    }
    if options.ugly_urls {
        return Some(ugly_url(&file.relative_directory, &file.name));
    }
    deriver.derive(node, host)
}

/// `<dir>/<name>.html`, or `<name>.html` at the content root.
fn ugly_url(relative_directory: &str, name: &str) -> String {
    let dir = relative_directory.trim_end_matches('/');
    if dir.is_empty() {
        format!("{name}.html")
    } else {
        format!("{dir}/{name}.html")
    }
}

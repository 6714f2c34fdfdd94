//! Content source: turns a directory of Markdown into host nodes.
//!
//! Creates, in order:
//!
//! - the `Site` singleton and the optional `SiteData` node
//! - one `File` node per file under the content root
//! - one `MarkdownRemark` node per Markdown file, parented to its `File`
//!
//! Node ids are stable across runs: they hash the file's relative path.

mod frontmatter;
mod markdown;

pub use frontmatter::extract_frontmatter;
pub use markdown::{MarkdownOptions, render_html};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use serde_json::Value;

use crate::debug;
use crate::host::MemoryHost;
use crate::node::{
    ContentNode, FileDescriptor, MarkdownContent, NodeId, NodePayload, SITE_DATA_NODE_ID,
    SITE_NODE_ID, SiteNode,
};

/// Where content comes from and what site metadata goes with it.
#[derive(Debug, Clone, Default)]
pub struct ContentSource {
    pub root: PathBuf,
    pub site: SiteNode,
    /// Contents of the `SiteData` node; no node is created when `None`.
    pub site_data: Option<Value>,
    pub markdown: MarkdownOptions,
}

/// Scan the content root and create every node in `host`.
///
/// Returns created node ids in creation order.
pub fn scan_content(source: &ContentSource, host: &MemoryHost) -> Result<Vec<NodeId>> {
    if !source.root.is_dir() {
        bail!("content directory `{}` does not exist", source.root.display());
    }

    let mut created = Vec::new();
    created.push(host.create_node(ContentNode::new(
        SITE_NODE_ID,
        NodePayload::Site(source.site.clone()),
    )));
    if let Some(data) = &source.site_data {
        created.push(host.create_node(ContentNode::new(
            SITE_DATA_NODE_ID,
            NodePayload::SiteData { data: data.clone() },
        )));
    }

    let mut documents = Vec::new();
    for path in collect_files(&source.root) {
        let Some(file) = FileDescriptor::new(&source.root, &path) else {
            continue;
        };
        let file_id = host.create_node(ContentNode::file(
            NodeId::hashed("file", &file.relative_path),
            file.clone(),
        ));
        created.push(file_id.clone());
        if file.is_markdown() {
            documents.push((file_id, file));
        }
    }

    for (file_id, file) in documents {
        let node = read_markdown(&file, source.markdown)?.with_parent(file_id);
        debug!("source"; "{} -> {}", file.relative_path, node.id);
        created.push(host.create_node(node));
    }

    Ok(created)
}

fn read_markdown(file: &FileDescriptor, options: MarkdownOptions) -> Result<ContentNode> {
    let content = fs::read_to_string(&file.absolute_path)
        .with_context(|| format!("failed to read {}", file.absolute_path.display()))?;
    let (frontmatter, body) = extract_frontmatter(&content)
        .with_context(|| format!("failed to parse frontmatter of {}", file.relative_path))?;

    Ok(ContentNode::markdown(
        NodeId::hashed("markdown", &file.relative_path),
        MarkdownContent {
            frontmatter,
            html: render_html(body, options),
            raw_body: body.to_owned(),
        },
    ))
}

/// Regular files under `root`, sorted; hidden entries are skipped.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(root)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

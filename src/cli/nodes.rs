//! `nodes` command: print annotated content nodes as JSON.

use anyhow::Result;
use serde_json::Value;
use std::io::{Write, stdout};
use tola_pages::{ContentNode, MemoryHost, NodeLookup, NodeType};

use super::build::annotate_content;
use crate::config::SiteConfig;

/// Annotate content and print the nodes, optionally filtered by type.
///
/// Only JSON goes to stdout; log lines go to stderr.
pub fn print_nodes(config: &SiteConfig, node_type: Option<&str>, pretty: bool) -> Result<()> {
    write_nodes(&mut stdout().lock(), config, node_type, pretty)
}

fn write_nodes(
    out: &mut impl Write,
    config: &SiteConfig,
    node_type: Option<&str>,
    pretty: bool,
) -> Result<()> {
    let output = collect_nodes(config, node_type)?;
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &output)?;
    } else {
        serde_json::to_writer(&mut *out, &output)?;
    }
    writeln!(out)?;
    Ok(())
}

fn collect_nodes(config: &SiteConfig, node_type: Option<&str>) -> Result<Value> {
    let host = MemoryHost::new();
    annotate_content(config, &host)?;

    let nodes: Vec<ContentNode> = match node_type {
        Some(name) => host.get_nodes_by_type(&NodeType::from(name)),
        None => host.nodes(),
    };
    Ok(serde_json::to_value(nodes)?)
}

//! Build orchestration.
//!
//! Phases:
//! - **Seed** - load the previous manifest as the existing page registry
//! - **Annotate** - scan content, run the node hook on every created node
//! - **Derive** - run the page hook once (current-thread tokio runtime)
//! - **Prune** - drop seeded pages the pass did not recreate
//! - **Write** - persist the registry as the new manifest

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use std::{fs, path::Path};
use tola_pages::host::PageAction;
use tola_pages::source::scan_content;
use tola_pages::utils::plural_count;
use tola_pages::{
    FilePathDeriver, MemoryHost, NodeLookup, PageRegistry, PageReport, PageSpec, create_pages,
    debug, log, on_create_node,
};

use crate::config::SiteConfig;

/// Outcome of a full build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub nodes: usize,
    pub pages: PageReport,
    /// Seeded pages with no source left.
    pub stale: usize,
}

/// Scan content into `host` and annotate every created node.
///
/// Returns the number of nodes created.
pub fn annotate_content(config: &SiteConfig, host: &MemoryHost) -> Result<usize> {
    let created = scan_content(&config.content_source(), host)?;
    let deriver = FilePathDeriver::from_options(&config.plugin);

    for id in &created {
        let Some(node) = host.get_node(id) else {
            continue;
        };
        on_create_node(&node, host, &config.plugin, &deriver)
            .with_context(|| format!("failed to annotate node `{id}`"))?;
    }

    debug!("build"; "annotated {}", plural_count(created.len(), "node"));
    Ok(created.len())
}

/// Run both hooks over the content directory and write the page manifest.
pub fn build_site(config: &SiteConfig) -> Result<BuildSummary> {
    let host = MemoryHost::new();
    let manifest = config.build.manifest_path();
    host.seed_pages(read_manifest(&manifest)?);

    let nodes = annotate_content(config, &host)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let pages = runtime.block_on(create_pages(&host, &config.plugin))?;

    let stale = prune_stale_pages(&host);
    write_manifest(&manifest, &host.pages())?;

    let summary = BuildSummary {
        nodes,
        pages,
        stale,
    };
    log_summary(config, &summary);
    Ok(summary)
}

/// Keep only pages created during this pass.
fn prune_stale_pages(host: &MemoryHost) -> usize {
    let created: FxHashSet<String> = host
        .page_actions()
        .into_iter()
        .filter_map(|action| match action {
            PageAction::Create(path) => Some(path),
            PageAction::Delete(_) => None,
        })
        .collect();

    let before = host.pages().len();
    host.retain_pages(|page| {
        let keep = created.contains(&page.path);
        if !keep {
            debug!("build"; "removing stale page {}", page.path);
        }
        keep
    });
    before - host.pages().len()
}

/// Pages from an earlier build; none when the manifest does not exist yet.
fn read_manifest(path: &Path) -> Result<Vec<PageSpec>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse page manifest {}", path.display()))
}

fn write_manifest(path: &Path, pages: &[PageSpec]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(pages)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

fn log_summary(config: &SiteConfig, summary: &BuildSummary) {
    let report = &summary.pages;
    log!(
        "build";
        "{} from {} ({} replaced, {} kept menus)",
        plural_count(report.created, "page"),
        plural_count(summary.nodes, "node"),
        report.replaced,
        report.menus_carried
    );
    if summary.stale > 0 {
        log!("build"; "removed {}", plural_count(summary.stale, "stale page"));
    }
    log!(
        "build";
        "wrote {}",
        config.root_relative(config.build.manifest_path()).display()
    );
}

//! Build-pass hook: one page per Markdown node.
//!
//! The pass suspends once, on the query. Everything after it runs
//! synchronously in two phases:
//!
//! - **Plan** - rehydrate nodes, detect URL conflicts, build contexts.
//!   Any failure here leaves the registry untouched.
//! - **Apply** - replace existing pages path by path. Registry errors are
//!   returned immediately; pages already applied stay registered.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::conflict::{collect_url_sources, detect_conflicts, print_conflicts};
use super::{PageContext, PageError, PageSpec, PageSummary, SiteContext};
use crate::host::{MarkdownRecord, NodeLookup, PageRegistry, QueryEngine};
use crate::node::{DerivedFields, Frontmatter, NodeId, SITE_DATA_NODE_ID, SITE_NODE_ID};
use crate::debug;
use crate::options::PluginOptions;

/// Counts from one derivation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageReport {
    /// Pages registered.
    pub created: usize,
    /// Registered pages that superseded an existing page at the same path.
    pub replaced: usize,
    /// Replacements that kept the previous page's `menus`.
    pub menus_carried: usize,
}

/// Query every Markdown node and register one page for each.
pub async fn create_pages<H>(host: &H, options: &PluginOptions) -> Result<PageReport, PageError>
where
    H: NodeLookup + PageRegistry + QueryEngine,
{
    let response = host.all_markdown().await;
    if response.has_errors() {
        return Err(PageError::Query(response.errors));
    }
    let records = response.data.unwrap_or_default();

    let pages = plan_pages(host, records, options)?;
    apply_pages(host, pages)
}

/// A queried record joined with its underlying node.
struct SourcePage {
    fields: DerivedFields,
    frontmatter: Frontmatter,
    html: String,
}

impl SourcePage {
    /// Re-read the node by id; the query projection only carries `{id, html}`.
    fn rehydrate<L: NodeLookup + ?Sized>(
        lookup: &L,
        record: MarkdownRecord,
    ) -> Result<Self, PageError> {
        let node = lookup
            .get_node(&record.id)
            .ok_or_else(|| PageError::MissingNode(record.id.clone()))?;
        let markdown = node
            .as_markdown()
            .ok_or_else(|| PageError::NotMarkdown(record.id.clone()))?;
        let fields = node
            .fields
            .derived()
            .ok_or_else(|| PageError::NotAnnotated(record.id.clone()))?;

        Ok(Self {
            fields,
            frontmatter: markdown.frontmatter.clone(),
            html: record.html,
        })
    }

    fn summary(&self) -> PageSummary {
        PageSummary::new(&self.fields, &self.frontmatter, &self.html)
    }

    fn page(
        &self,
        pages: &Arc<[PageSummary]>,
        site: &SiteContext,
        options: &PluginOptions,
    ) -> Result<PageSpec, PageError> {
        let url = &self.fields.url;
        let template = self
            .frontmatter
            .template()
            .or(options.default_template.as_deref())
            .ok_or_else(|| PageError::MissingTemplate { url: url.clone() })?;

        Ok(PageSpec {
            path: url.clone(),
            component: options.component(template),
            context: PageContext {
                url: url.clone(),
                relative_path: self.fields.relative_path.clone(),
                relative_dir: self.fields.relative_dir.clone(),
                base: self.fields.base.clone(),
                name: self.fields.name.clone(),
                frontmatter: self.frontmatter.clone(),
                html: self.html.clone(),
                pages: Arc::clone(pages),
                site: site.clone(),
                menus: None,
                extra: Default::default(),
            },
        })
    }
}

/// Compute every page of the pass without touching the registry.
fn plan_pages<L: NodeLookup + ?Sized>(
    lookup: &L,
    records: Vec<MarkdownRecord>,
    options: &PluginOptions,
) -> Result<Vec<PageSpec>, PageError> {
    let site = site_context(lookup)?;
    let sources = records
        .into_iter()
        .map(|record| SourcePage::rehydrate(lookup, record))
        .collect::<Result<Vec<_>, _>>()?;

    let url_sources = collect_url_sources(
        sources
            .iter()
            .map(|s| (s.fields.url.as_str(), s.fields.relative_path.as_str())),
    );
    let conflicts = detect_conflicts(&url_sources);
    if !conflicts.is_empty() {
        print_conflicts(&conflicts);
        return Err(PageError::UrlConflict(conflicts));
    }

    let pages: Arc<[PageSummary]> = sources.iter().map(SourcePage::summary).collect();
    sources
        .iter()
        .map(|source| source.page(&pages, &site, options))
        .collect()
}

/// Site metadata from the `Site` singleton and the optional `SiteData` node.
fn site_context<L: NodeLookup + ?Sized>(lookup: &L) -> Result<SiteContext, PageError> {
    let site_node = lookup
        .get_node(&NodeId::new(SITE_NODE_ID))
        .ok_or(PageError::MissingSiteNode)?;
    let site = site_node.as_site().ok_or(PageError::MissingSiteNode)?;

    let data = lookup
        .get_node(&NodeId::new(SITE_DATA_NODE_ID))
        .and_then(|node| node.site_data().cloned())
        .unwrap_or(Value::Null);

    Ok(SiteContext {
        site_metadata: site.site_metadata.clone(),
        path_prefix: site.path_prefix.clone(),
        data,
    })
}

/// Replace existing pages with the planned ones.
///
/// Existing pages are read once, before the first mutation.
fn apply_pages<R: PageRegistry + ?Sized>(
    registry: &R,
    pages: Vec<PageSpec>,
) -> Result<PageReport, PageError> {
    let existing: FxHashMap<String, PageSpec> = registry
        .pages()
        .into_iter()
        .map(|page| (page.path.clone(), page))
        .collect();

    let mut report = PageReport::default();
    for mut page in pages {
        if let Some(old) = existing.get(&page.path) {
            registry.delete_page(old)?;
            report.replaced += 1;

            if page.context.menus.is_none() && old.context.menus.is_some() {
                page.context.menus = old.context.menus.clone();
                report.menus_carried += 1;
            }
        }

        debug!("page"; "{} -> {}", page.path, page.component.display());
        registry.create_page(page)?;
        report.created += 1;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonMap;
    use crate::annotate::{FilePathDeriver, on_create_node};
    use crate::host::{HostError, MemoryHost, PageAction, QueryError};
    use crate::node::{
        ContentNode, FileDescriptor, MarkdownContent, NodePayload, SiteNode,
    };
    use serde_json::json;
    use std::path::{Path, PathBuf};

    const ROOT: &str = "/site/content";

    fn site_host() -> MemoryHost {
        let host = MemoryHost::new();
        let mut metadata = JsonMap::new();
        metadata.insert("title".into(), json!("My Site"));
        host.create_node(ContentNode::new(
            SITE_NODE_ID,
            NodePayload::Site(SiteNode {
                site_metadata: metadata,
                path_prefix: "/docs".into(),
            }),
        ));
        host
    }

    /// Add a File node and its annotated Markdown child.
    fn add_document(host: &MemoryHost, relative: &str, frontmatter: serde_json::Value) {
        let path = Path::new(ROOT).join(relative);
        let file = FileDescriptor::new(Path::new(ROOT), &path).unwrap();
        let file_id = NodeId::hashed("file", relative);
        host.create_node(ContentNode::file(file_id.clone(), file));

        let markdown = ContentNode::markdown(
            NodeId::hashed("markdown", relative),
            MarkdownContent {
                frontmatter: serde_json::from_value(frontmatter).unwrap(),
                raw_body: String::new(),
                html: format!("<p>{relative}</p>"),
            },
        )
        .with_parent(file_id);
        host.create_node(markdown.clone());
        on_create_node(&markdown, host, &PluginOptions::default(), &FilePathDeriver::default())
            .unwrap();
    }

    fn run(host: &MemoryHost, options: &PluginOptions) -> Result<PageReport, PageError> {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(create_pages(host, options))
    }

    #[tokio::test]
    async fn test_one_page_per_document() {
        let host = site_host();
        add_document(&host, "blog/post-1.md", json!({"template": "post", "title": "One"}));
        add_document(&host, "about.md", json!({"template": "page"}));

        let report = create_pages(&host, &PluginOptions::default()).await.unwrap();
        assert_eq!(report.created, 2);
        assert_eq!(report.replaced, 0);

        let page = host.page("/blog/post-1/").unwrap();
        assert_eq!(page.component, PathBuf::from("src/templates/post.tsx"));
        assert_eq!(page.context.url, "/blog/post-1/");
        assert_eq!(page.context.relative_path, "blog/post-1.md");
        assert_eq!(page.context.relative_dir, "blog");
        assert_eq!(page.context.base, "post-1.md");
        assert_eq!(page.context.name, "post-1");
        assert_eq!(page.context.html, "<p>blog/post-1.md</p>");
        assert_eq!(page.context.frontmatter.title(), Some("One"));
        assert_eq!(page.context.site.site_metadata["title"], "My Site");
        assert_eq!(page.context.site.path_prefix, "/docs");
        assert_eq!(page.context.site.data, Value::Null);
        assert!(page.context.menus.is_none());

        let urls: Vec<_> = page.context.pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, ["/blog/post-1/", "/about/"]);
    }

    #[tokio::test]
    async fn test_sibling_list_is_shared() {
        let host = site_host();
        add_document(&host, "a.md", json!({"template": "page"}));
        add_document(&host, "b.md", json!({"template": "page"}));

        create_pages(&host, &PluginOptions::default()).await.unwrap();
        let a = host.page("/a/").unwrap();
        let b = host.page("/b/").unwrap();
        assert_eq!(a.context.pages, b.context.pages);
        assert_eq!(a.context.pages.len(), 2);
    }

    #[tokio::test]
    async fn test_site_data_is_attached() {
        let host = site_host();
        host.create_node(ContentNode::new(
            SITE_DATA_NODE_ID,
            NodePayload::SiteData {
                data: json!({"social": {"github": "tola-rs"}}),
            },
        ));
        add_document(&host, "a.md", json!({"template": "page"}));

        create_pages(&host, &PluginOptions::default()).await.unwrap();
        let page = host.page("/a/").unwrap();
        assert_eq!(page.context.site.data["social"]["github"], "tola-rs");
    }

    #[tokio::test]
    async fn test_query_errors_touch_nothing() {
        let host = site_host();
        add_document(&host, "a.md", json!({"template": "page"}));
        host.seed_pages([PageSpec {
            path: "/a/".into(),
            ..Default::default()
        }]);
        host.reject_queries(vec![QueryError::new("Cannot query field \"html\"")]);

        let err = create_pages(&host, &PluginOptions::default()).await.unwrap_err();
        assert!(matches!(err, PageError::Query(ref errors) if errors.len() == 1));
        assert!(host.page_actions().is_empty());
        assert_eq!(host.page("/a/").unwrap().component, PathBuf::new());
    }

    #[tokio::test]
    async fn test_existing_page_is_replaced_and_keeps_menus() {
        let host = site_host();
        add_document(&host, "blog/post-1.md", json!({"template": "post"}));

        let menus = json!({"main": [{"title": "Home", "url": "/"}]});
        host.seed_pages([PageSpec {
            path: "/blog/post-1/".into(),
            component: PathBuf::from("old.tsx"),
            context: PageContext {
                menus: Some(menus.clone()),
                ..Default::default()
            },
        }]);

        let report = create_pages(&host, &PluginOptions::default()).await.unwrap();
        assert_eq!(report.replaced, 1);
        assert_eq!(report.menus_carried, 1);
        assert_eq!(
            host.page_actions(),
            [
                PageAction::Delete("/blog/post-1/".into()),
                PageAction::Create("/blog/post-1/".into()),
            ]
        );

        let page = host.page("/blog/post-1/").unwrap();
        assert_eq!(page.component, PathBuf::from("src/templates/post.tsx"));
        assert_eq!(page.context.menus, Some(menus));
    }

    #[tokio::test]
    async fn test_existing_page_without_menus() {
        let host = site_host();
        add_document(&host, "a.md", json!({"template": "page"}));
        host.seed_pages([PageSpec {
            path: "/a/".into(),
            ..Default::default()
        }]);

        let report = create_pages(&host, &PluginOptions::default()).await.unwrap();
        assert_eq!(report.replaced, 1);
        assert_eq!(report.menus_carried, 0);
        assert!(host.page("/a/").unwrap().context.menus.is_none());
    }

    #[test]
    fn test_pass_is_idempotent() {
        let host = site_host();
        add_document(&host, "blog/post-1.md", json!({"template": "post"}));
        add_document(&host, "blog/index.md", json!({"template": "list"}));
        let options = PluginOptions::default();

        run(&host, &options).unwrap();
        let first = host.pages();
        let report = run(&host, &options).unwrap();
        let second = host.pages();

        assert_eq!(report.replaced, 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_url_conflict_touches_nothing() {
        let host = site_host();
        add_document(&host, "a.md", json!({"template": "page", "url": "/same/"}));
        add_document(&host, "b.md", json!({"template": "page", "url": "/same/"}));

        let err = create_pages(&host, &PluginOptions::default()).await.unwrap_err();
        let PageError::UrlConflict(conflicts) = &err else {
            panic!("expected url conflict, got {err}");
        };
        assert_eq!(conflicts[0].url, "/same/");
        assert_eq!(conflicts[0].sources, ["a.md", "b.md"]);
        assert!(host.page_actions().is_empty());
    }

    #[tokio::test]
    async fn test_missing_template_uses_default() {
        let host = site_host();
        add_document(&host, "a.md", json!({}));

        let err = create_pages(&host, &PluginOptions::default()).await.unwrap_err();
        assert!(matches!(err, PageError::MissingTemplate { ref url } if url == "/a/"));
        assert!(host.page_actions().is_empty());

        let options = PluginOptions {
            default_template: Some("page".into()),
            ..Default::default()
        };
        create_pages(&host, &options).await.unwrap();
        assert_eq!(
            host.page("/a/").unwrap().component,
            PathBuf::from("src/templates/page.tsx")
        );
    }

    #[tokio::test]
    async fn test_missing_site_node() {
        let host = MemoryHost::new();
        add_document(&host, "a.md", json!({"template": "page"}));
        let err = create_pages(&host, &PluginOptions::default()).await.unwrap_err();
        assert!(matches!(err, PageError::MissingSiteNode));
    }

    #[tokio::test]
    async fn test_unannotated_node() {
        let host = site_host();
        host.create_node(ContentNode::markdown("raw", MarkdownContent::default()));
        let err = create_pages(&host, &PluginOptions::default()).await.unwrap_err();
        assert!(matches!(err, PageError::NotAnnotated(ref id) if id.as_str() == "raw"));
    }

    /// Registry that rejects one path.
    struct FlakyRegistry {
        inner: MemoryHost,
        reject: &'static str,
    }

    impl NodeLookup for FlakyRegistry {
        fn get_node(&self, id: &NodeId) -> Option<ContentNode> {
            self.inner.get_node(id)
        }

        fn get_nodes_by_type(&self, node_type: &crate::node::NodeType) -> Vec<ContentNode> {
            self.inner.get_nodes_by_type(node_type)
        }
    }

    impl PageRegistry for FlakyRegistry {
        fn pages(&self) -> Vec<PageSpec> {
            self.inner.pages()
        }

        fn create_page(&self, page: PageSpec) -> Result<(), HostError> {
            if page.path == self.reject {
                return Err(HostError::Rejected(format!("cannot create {}", page.path)));
            }
            self.inner.create_page(page)
        }

        fn delete_page(&self, page: &PageSpec) -> Result<(), HostError> {
            self.inner.delete_page(page)
        }
    }

    impl QueryEngine for FlakyRegistry {
        fn all_markdown(
            &self,
        ) -> impl std::future::Future<Output = crate::host::QueryResponse<Vec<MarkdownRecord>>>
        {
            self.inner.all_markdown()
        }
    }

    #[tokio::test]
    async fn test_registry_failure_keeps_earlier_pages() {
        let inner = site_host();
        add_document(&inner, "a.md", json!({"template": "page"}));
        add_document(&inner, "b.md", json!({"template": "page"}));
        add_document(&inner, "c.md", json!({"template": "page"}));
        let host = FlakyRegistry { inner, reject: "/b/" };

        let err = create_pages(&host, &PluginOptions::default()).await.unwrap_err();
        assert!(matches!(err, PageError::Host(HostError::Rejected(_))));
        assert!(host.inner.page("/a/").is_some());
        assert!(host.inner.page("/b/").is_none());
        assert!(host.inner.page("/c/").is_none());
    }
}

//! Page descriptions handed to the page registry.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::JsonMap;
use crate::node::{DerivedFields, Frontmatter};

/// One output page: path, template component and template context.
///
/// `path` is the registry key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub path: String,
    pub component: PathBuf,
    pub context: PageContext,
}

/// Data passed to the page template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub url: String,
    pub relative_path: String,
    pub relative_dir: String,
    pub base: String,
    pub name: String,
    pub frontmatter: Frontmatter,
    pub html: String,
    /// Every Markdown page of the pass, shared by all contexts.
    pub pages: Arc<[PageSummary]>,
    pub site: SiteContext,
    /// Menu data, possibly written by a later build step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menus: Option<Value>,
    /// Keys added by other plugins.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Lightweight sibling entry used for navigation listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub url: String,
    pub relative_path: String,
    pub relative_dir: String,
    pub base: String,
    pub name: String,
    pub frontmatter: Frontmatter,
    pub html: String,
}

impl PageSummary {
    pub fn new(fields: &DerivedFields, frontmatter: &Frontmatter, html: &str) -> Self {
        Self {
            url: fields.url.clone(),
            relative_path: fields.relative_path.clone(),
            relative_dir: fields.relative_dir.clone(),
            base: fields.base.clone(),
            name: fields.name.clone(),
            frontmatter: frontmatter.clone(),
            html: html.to_string(),
        }
    }
}

/// Site metadata exposed to every page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContext {
    pub site_metadata: JsonMap,
    pub path_prefix: String,
    /// Site data node payload, `null` when absent.
    pub data: Value,
}

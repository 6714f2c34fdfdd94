//! Plugin options (`[plugin]` in `pages.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Options passed into both hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PluginOptions {
    /// Derive `<dir>/<name>.html` URLs instead of pretty directory URLs.
    pub ugly_urls: bool,
    /// Prefix stripped from relative paths by the canonical path deriver.
    pub base_path: String,
    /// End canonical URLs with `/`.
    pub trailing_slash: bool,
    /// Directory holding page templates.
    pub templates: PathBuf,
    /// Extension appended to a template name, including the dot.
    pub template_ext: String,
    /// Template used when a document's frontmatter names none.
    pub default_template: Option<String>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            ugly_urls: false,
            base_path: String::new(),
            trailing_slash: true,
            templates: PathBuf::from("src/templates"),
            template_ext: ".tsx".into(),
            default_template: None,
        }
    }
}

impl PluginOptions {
    /// Component path for a template name.
    pub fn component(&self, template: &str) -> PathBuf {
        self.templates
            .join(format!("{template}{}", self.template_ext))
    }

    /// Resolve `templates` against a project root.
    pub fn normalize(&mut self, root: &Path) {
        if self.templates.is_relative() {
            self.templates = root.join(&self.templates);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PluginOptions::default();
        assert!(!options.ugly_urls);
        assert!(options.trailing_slash);
        assert_eq!(
            options.component("post"),
            PathBuf::from("src/templates/post.tsx")
        );
    }

    #[test]
    fn test_parse_kebab_case() {
        let options: PluginOptions =
            toml::from_str("ugly-urls = true\ntemplate-ext = \".html\"").unwrap();
        assert!(options.ugly_urls);
        assert_eq!(options.template_ext, ".html");
        assert!(options.trailing_slash);
    }

    #[test]
    fn test_normalize_relative_templates() {
        let mut options = PluginOptions::default();
        options.normalize(Path::new("/site"));
        assert_eq!(options.templates, PathBuf::from("/site/src/templates"));
    }
}

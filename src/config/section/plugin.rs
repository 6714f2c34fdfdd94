//! `[plugin]` section validation.
//!
//! The section deserializes straight into [`PluginOptions`], so the options
//! the hooks see are exactly what the file says.
//!
//! ```toml
//! [plugin]
//! ugly-urls = false
//! templates = "src/templates"
//! template-ext = ".tsx"
//! default-template = "page"
//! ```

use tola_pages::PluginOptions;

use crate::config::{ConfigDiagnostics, FieldPath};

const TEMPLATE_EXT: FieldPath = FieldPath::new("plugin.template-ext");
const TEMPLATES: FieldPath = FieldPath::new("plugin.templates");
const DEFAULT_TEMPLATE: FieldPath = FieldPath::new("plugin.default-template");

/// Validate plugin options after paths are resolved.
pub fn validate_plugin(options: &PluginOptions, diag: &mut ConfigDiagnostics) {
    if !options.template_ext.starts_with('.') {
        diag.error_with_hint(
            TEMPLATE_EXT,
            format!("`{}` must start with `.`", options.template_ext),
            format!("use \".{}\"", options.template_ext),
        );
    }

    if matches!(options.default_template.as_deref(), Some(name) if name.trim().is_empty()) {
        diag.error(DEFAULT_TEMPLATE, "must not be empty when set");
    }

    if !options.templates.is_dir() {
        diag.warn(
            TEMPLATES,
            format!("template directory `{}` does not exist", options.templates.display()),
        );
    }
}

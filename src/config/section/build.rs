//! `[build]` section: where content is read from and where output goes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Content directory (relative to the config file).
    pub content: PathBuf,

    /// Output directory (relative to the config file).
    pub output: PathBuf,

    /// Page manifest file name, written inside `output`.
    pub manifest: PathBuf,

    /// Derived from `site.info.url` (e.g. "/blog"); empty at the domain root.
    #[serde(skip)]
    pub path_prefix: String,
}

pub struct BuildFields {
    pub content: FieldPath,
    pub manifest: FieldPath,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            manifest: "pages.json".into(),
            path_prefix: String::new(),
        }
    }
}

impl BuildSectionConfig {
    pub const FIELDS: BuildFields = BuildFields {
        content: FieldPath::new("build.content"),
        manifest: FieldPath::new("build.manifest"),
    };

    /// Checks that must run before paths are made absolute.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        if self.manifest.is_absolute() || self.manifest.components().count() != 1 {
            diag.error_with_hint(
                Self::FIELDS.manifest,
                format!("`{}` must be a plain file name", self.manifest.display()),
                "the manifest is always written inside the output directory",
            );
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                Self::FIELDS.content,
                format!("content directory `{}` does not exist", self.content.display()),
                "create it or point `content` at an existing directory",
            );
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output.join(&self.manifest)
    }

    /// Resolve `content` and `output` against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.content = tola_pages::utils::normalize_path(&root.join(&self.content));
        self.output = tola_pages::utils::normalize_path(&root.join(&self.output));
    }
}

//! `[site]` section: `[site.info]` metadata and free-form `[site.data]`.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "My Blog"
//! description = "A personal blog"
//! author = "Alice"
//! url = "https://example.github.io/blog"
//!
//! [site.info.extra]
//! github = "https://github.com/alice"
//!
//! [site.data]
//! nav = ["posts", "about"]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tola_pages::JsonMap;
use tola_pages::utils::toml_to_json;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    pub info: SiteInfoConfig,

    /// Becomes the `SiteData` node when present.
    pub data: Option<toml::Table>,
}

impl SiteSectionConfig {
    /// `[site.data]` as JSON.
    pub fn data_json(&self) -> Option<Value> {
        self.data
            .clone()
            .map(|table| toml_to_json(toml::Value::Table(table)))
    }
}

/// Site metadata exposed to templates as `siteMetadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    pub title: String,
    pub description: String,
    pub author: String,

    /// Site URL; its path is used as the path prefix
    /// (e.g., "https://example.github.io/blog" -> "/blog").
    pub url: Option<String>,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Custom fields, merged into `siteMetadata`.
    pub extra: toml::Table,
}

pub struct SiteInfoFields {
    pub url: FieldPath,
    pub extra: FieldPath,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            url: None,
            language: "en".into(),
            extra: toml::Table::new(),
        }
    }
}

impl SiteInfoConfig {
    pub const FIELDS: SiteInfoFields = SiteInfoFields {
        url: FieldPath::new("site.info.url"),
        extra: FieldPath::new("site.info.extra"),
    };

    const RESERVED: [&'static str; 5] = ["title", "description", "author", "url", "language"];

    /// Build `siteMetadata`: the named fields, then `extra` flattened.
    pub fn to_metadata(&self) -> JsonMap {
        let mut metadata = JsonMap::new();
        metadata.insert("title".into(), Value::String(self.title.clone()));
        metadata.insert("description".into(), Value::String(self.description.clone()));
        metadata.insert("author".into(), Value::String(self.author.clone()));
        if let Some(url) = &self.url {
            metadata.insert("url".into(), Value::String(url.clone()));
        }
        metadata.insert("language".into(), Value::String(self.language.clone()));

        for (key, value) in &self.extra {
            if !Self::RESERVED.contains(&key.as_str()) {
                metadata.insert(key.clone(), toml_to_json(value.clone()));
            }
        }
        metadata
    }

    /// Validate site information.
    ///
    /// - `url` must be http(s) with a host
    /// - `extra` keys must not shadow the named fields
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::FIELDS.url,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        for key in self.extra.keys() {
            if Self::RESERVED.contains(&key.as_str()) {
                diag.warn(
                    Self::FIELDS.extra,
                    format!("`{key}` shadows a [site.info] field and is ignored"),
                );
            }
        }
    }
}

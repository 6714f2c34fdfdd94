//! Frontmatter of a Markdown document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

use crate::JsonMap;

/// Structured metadata from the head of a Markdown document.
///
/// Kept as raw JSON so templates receive every key the author wrote.
/// Keys this crate interprets:
///
/// | Key        | Meaning                                   |
/// |------------|-------------------------------------------|
/// | `url`      | Explicit page URL, used verbatim          |
/// | `template` | Template name resolved to a component     |
/// | `title`    | Page title                                |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter(JsonMap);

impl Frontmatter {
    pub fn new(map: JsonMap) -> Self {
        Self(map)
    }

    /// Explicit URL override.
    ///
    /// YAML reads `url: 2024` as a number, so non-zero numbers are taken in
    /// their written form. Empty strings, zero, booleans, null and
    /// collections count as unset.
    pub fn url(&self) -> Option<Cow<'_, str>> {
        match self.0.get("url")? {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s)),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }

    /// Template name.
    pub fn template(&self) -> Option<&str> {
        self.non_empty_str("template")
    }

    pub fn title(&self) -> Option<&str> {
        self.non_empty_str("title")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &JsonMap {
        &self.0
    }

    fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl From<JsonMap> for Frontmatter {
    fn from(map: JsonMap) -> Self {
        Self(map)
    }
}

//! Field bag attached to nodes by plugins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FileDescriptor;
use crate::JsonMap;

/// Named fields attached through `create_node_field`.
///
/// Writing a name twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeFields(JsonMap);

impl NodeFields {
    pub fn set(&mut self, name: &str, value: Value) {
        self.0.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read back the derived URL/path fields.
    ///
    /// Returns `None` until every derived field has been attached.
    pub fn derived(&self) -> Option<DerivedFields> {
        serde_json::from_value(Value::Object(self.0.clone())).ok()
    }
}

/// URL and source-path fields attached to every Markdown node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    pub url: String,
    pub absolute_path: String,
    pub absolute_dir: String,
    pub relative_path: String,
    pub relative_dir: String,
    pub base: String,
    pub ext: String,
    pub name: String,
}

impl DerivedFields {
    /// Combine a derived URL with the source file's attributes.
    ///
    /// `relativeDir` comes from the file's `relativeDirectory`.
    pub fn new(url: String, file: &FileDescriptor) -> Self {
        Self {
            url,
            absolute_path: file.absolute_path.to_string_lossy().into_owned(),
            absolute_dir: file.dir.to_string_lossy().into_owned(),
            relative_path: file.relative_path.clone(),
            relative_dir: file.relative_directory.clone(),
            base: file.base.clone(),
            ext: file.ext.clone(),
            name: file.name.clone(),
        }
    }

    /// Field name/value pairs in attachment order.
    pub fn into_entries(self) -> [(&'static str, Value); 8] {
        [
            ("url", Value::String(self.url)),
            ("absolutePath", Value::String(self.absolute_path)),
            ("absoluteDir", Value::String(self.absolute_dir)),
            ("relativePath", Value::String(self.relative_path)),
            ("relativeDir", Value::String(self.relative_dir)),
            ("base", Value::String(self.base)),
            ("ext", Value::String(self.ext)),
            ("name", Value::String(self.name)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_entries_read_back() {
        let file =
            FileDescriptor::new(Path::new("/site"), Path::new("/site/blog/post-1.md")).unwrap();
        let derived = DerivedFields::new("/blog/post-1/".into(), &file);

        let mut fields = NodeFields::default();
        assert!(fields.derived().is_none());
        for (name, value) in derived.clone().into_entries() {
            fields.set(name, value);
        }
        assert_eq!(fields.derived(), Some(derived));
        assert_eq!(fields.get("relativeDir"), Some(&Value::from("blog")));
    }

    #[test]
    fn test_partial_fields_are_not_derived() {
        let mut fields = NodeFields::default();
        fields.set("url", Value::from("/a/"));
        assert!(fields.derived().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut fields = NodeFields::default();
        fields.set("url", Value::from("/a/"));
        fields.set("url", Value::from("/b/"));
        assert_eq!(fields.get("url"), Some(&Value::from("/b/")));
    }
}

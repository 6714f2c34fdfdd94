//! Small helpers shared by the library and the CLI.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Return "s" suffix for plural counts
///
/// - `plural_s(0)` -> `"s"` (0 pages)
/// - `plural_s(1)` -> `""` (1 page)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization (`"3 pages"`).
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first; falls back to joining relative paths
/// onto the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Convert a TOML value to JSON; datetimes become their RFC 3339 string.
pub fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural_count(0, "page"), "0 pages");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(5, "conflict"), "5 conflicts");
    }

    #[test]
    fn test_toml_to_json() {
        let table: toml::Table =
            toml::from_str("n = 1\nwhen = 2024-05-01T10:00:00Z\n[nested]\nlist = [true, 1.5]").unwrap();
        let json = toml_to_json(toml::Value::Table(table));
        assert_eq!(
            json,
            serde_json::json!({
                "n": 1,
                "when": "2024-05-01T10:00:00Z",
                "nested": {"list": [true, 1.5]}
            })
        );
    }

    #[test]
    fn test_normalize_path_is_absolute() {
        assert!(normalize_path(Path::new("relative/dir")).is_absolute());
        assert_eq!(
            normalize_path(Path::new("/does/not/exist")),
            PathBuf::from("/does/not/exist")
        );
    }
}

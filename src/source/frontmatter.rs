//! Frontmatter extraction from YAML (`---`) or TOML (`+++`) blocks.

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::JsonMap;
use crate::node::Frontmatter;
use crate::utils::toml_to_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

/// Split a document into frontmatter and body.
///
/// Documents without a frontmatter block get an empty one.
pub fn extract_frontmatter(content: &str) -> Result<(Frontmatter, &str)> {
    match detect_frontmatter(content) {
        Some((fm, body, Format::Yaml)) => Ok((parse_yaml(fm)?.into(), body)),
        Some((fm, body, Format::Toml)) => Ok((parse_toml(fm)?.into(), body)),
        None => Ok((Frontmatter::default(), content)),
    }
}

/// Detect and extract a frontmatter block.
/// Returns `(frontmatter, body, format)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, Format)> {
    let trimmed = content.trim_start();

    for (fence, format) in [("---", Format::Yaml), ("+++", Format::Toml)] {
        if trimmed.starts_with(fence)
            && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches(['\r', '\n']);
            return Some((fm, body, format));
        }
    }

    None
}

fn parse_yaml(content: &str) -> Result<JsonMap> {
    let value: Value =
        serde_yaml_ng::from_str(content).context("invalid YAML frontmatter")?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonMap::new()),
        other => bail!("frontmatter must be a mapping, found {}", kind_of(&other)),
    }
}

fn parse_toml(content: &str) -> Result<JsonMap> {
    let table: toml::Table = toml::from_str(content).context("invalid TOML frontmatter")?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ntemplate: post\nmenus:\n  main:\n    - title: Home\n---\n\n# Body";
        let (fm, body) = extract_frontmatter(content).unwrap();
        assert_eq!(fm.title(), Some("Hello"));
        assert_eq!(fm.template(), Some("post"));
        assert_eq!(fm.get("menus"), Some(&json!({"main": [{"title": "Home"}]})));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndate = 2024-01-01\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (fm, body) = extract_frontmatter(content).unwrap();
        assert_eq!(fm.title(), Some("Hello"));
        assert_eq!(fm.get("date"), Some(&json!("2024-01-01")));
        assert_eq!(fm.get("tags"), Some(&json!(["a", "b"])));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = extract_frontmatter("# Just content").unwrap();
        assert!(fm.as_map().is_empty());
        assert_eq!(body, "# Just content");
    }

    #[test]
    fn test_empty_yaml_block() {
        let (fm, body) = extract_frontmatter("---\n---\nText").unwrap();
        assert!(fm.as_map().is_empty());
        assert_eq!(body, "Text");
    }

    #[test]
    fn test_scalar_yaml_is_rejected() {
        assert!(extract_frontmatter("---\njust a string\n---\n").is_err());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(extract_frontmatter("+++\ntitle = \n+++\n").is_err());
    }
}

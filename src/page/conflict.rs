//! URL conflict detection across Markdown sources.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::log;
use crate::utils::plural_s;

/// URL sources map: URL -> relative paths of documents deriving it.
pub type UrlSourceMap = FxHashMap<String, Vec<String>>;

/// Multiple documents derive the same page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlConflict {
    pub url: String,
    /// Relative source paths, in query order.
    pub sources: Vec<String>,
}

/// Gather `(url, relative path)` pairs into a map.
pub fn collect_url_sources<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> UrlSourceMap {
    let mut url_sources = UrlSourceMap::default();
    for (url, source) in pairs {
        url_sources
            .entry(url.to_string())
            .or_default()
            .push(source.to_string());
    }
    url_sources
}

/// URLs claimed by more than one source, sorted by URL.
pub fn detect_conflicts(url_sources: &UrlSourceMap) -> Vec<UrlConflict> {
    let mut conflicts: Vec<_> = url_sources
        .iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(url, sources)| UrlConflict {
            url: url.clone(),
            sources: sources.clone(),
        })
        .collect();
    conflicts.sort_by(|a, b| a.url.cmp(&b.url));
    conflicts
}

/// Print conflicts using the standard log format.
///
/// ```text
/// [error] url conflicts (1 url, 2 sources)
/// [url] /blog/post/ (2 sources)
///   - blog/post.md
///   - blog/post/index.md
/// ```
pub fn print_conflicts(conflicts: &[UrlConflict]) {
    if conflicts.is_empty() {
        return;
    }

    let total_sources: usize = conflicts.iter().map(|c| c.sources.len()).sum();
    log!("error"; "url conflicts ({} url{}, {} source{})",
        conflicts.len(), plural_s(conflicts.len()),
        total_sources, plural_s(total_sources));

    for conflict in conflicts {
        eprintln!();
        log!("url"; "{} ({} source{})", conflict.url, conflict.sources.len(), plural_s(conflict.sources.len()));
        for source in &conflict.sources {
            eprintln!("  - {source}");
        }
    }
}

/// Format conflicts as a string (for error messages).
pub fn format_conflicts(conflicts: &[UrlConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for UrlConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.url, self.sources.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conflicts() {
        let sources = collect_url_sources([("/a/", "a.md"), ("/b/", "b.md")]);
        assert!(detect_conflicts(&sources).is_empty());
    }

    #[test]
    fn test_detect_conflicts_sorted() {
        let sources = collect_url_sources([
            ("/z/", "z.md"),
            ("/z/", "z/index.md"),
            ("/a/", "a.md"),
            ("/a/", "other.md"),
            ("/ok/", "ok.md"),
        ]);
        let conflicts = detect_conflicts(&sources);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].url, "/a/");
        assert_eq!(conflicts[0].sources, ["a.md", "other.md"]);
        assert_eq!(conflicts[1].url, "/z/");
    }

    #[test]
    fn test_format_conflicts() {
        let conflicts = vec![UrlConflict {
            url: "/a/".into(),
            sources: vec!["a.md".into(), "b.md".into()],
        }];
        assert_eq!(format_conflicts(&conflicts), "/a/ <- a.md, b.md");
    }
}

//! Canonical (pretty) URL derivation from a node's source file.

use crate::host::NodeLookup;
use crate::node::{ContentNode, split_extension};
use crate::options::PluginOptions;
use crate::resolve::find_file_node;

/// Host convention for turning a node into a directory-style URL.
pub trait PathDeriver {
    /// `None` when the node has no `File` ancestor.
    fn derive(&self, node: &ContentNode, lookup: &dyn NodeLookup) -> Option<String>;
}

/// Derive `/<dir>/<name>/` from the `File` ancestor's relative path.
///
/// ```text
/// blog/post-1.md      -> /blog/post-1/
/// blog/index.md       -> /blog/
/// index.md            -> /
/// pages/about.md      -> /about/      (base_path = "pages")
/// ```
#[derive(Debug, Clone)]
pub struct FilePathDeriver {
    base_path: String,
    trailing_slash: bool,
}

impl Default for FilePathDeriver {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            trailing_slash: true,
        }
    }
}

impl FilePathDeriver {
    pub fn new(base_path: impl Into<String>, trailing_slash: bool) -> Self {
        Self {
            base_path: base_path.into(),
            trailing_slash,
        }
    }

    pub fn from_options(options: &PluginOptions) -> Self {
        Self::new(options.base_path.clone(), options.trailing_slash)
    }

    /// URL for a `/`-separated path relative to the content root.
    pub fn file_path(&self, relative_path: &str) -> String {
        let relative = relative_to(&self.base_path, relative_path);
        let Some((last, dirs)) = relative.split_last() else {
            return "/".to_string();
        };

        let (name, _) = split_extension(last);
        let mut segments: Vec<&str> = dirs.to_vec();
        if name != "index" {
            segments.push(name);
        }

        let mut url = String::from("/");
        url.push_str(&normalize(&segments).join("/"));
        if self.trailing_slash && url.len() > 1 {
            url.push('/');
        }
        url
    }
}

impl PathDeriver for FilePathDeriver {
    fn derive(&self, node: &ContentNode, lookup: &dyn NodeLookup) -> Option<String> {
        let file = find_file_node(node, lookup).into_file()?;
        let relative_path = &file.as_file()?.relative_path;
        Some(self.file_path(relative_path))
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Segments of `path` relative to `base`, using `..` to climb out.
fn relative_to<'a>(base: &'a str, path: &'a str) -> Vec<&'a str> {
    let base = normalize(&segments(base));
    let path = normalize(&segments(path));

    let common = base
        .iter()
        .zip(&path)
        .take_while(|(a, b)| a == b)
        .count();

    std::iter::repeat_n("..", base.len() - common)
        .chain(path[common..].iter().copied())
        .collect()
}

/// Resolve `..` segments against the root; climbing above it stays at the root.
fn normalize<'a>(segments: &[&'a str]) -> Vec<&'a str> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        match *segment {
            ".." => {
                out.pop();
            }
            "." | "" => {}
            s => out.push(s),
        }
    }
    out
}

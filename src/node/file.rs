//! Filesystem attributes of a `File` node.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Path metadata of a source file, relative to the content root.
///
/// Relative fields always use `/` separators, independent of platform.
///
/// ```text
/// root:              /site/content
/// absolutePath:      /site/content/blog/post-1.md
/// dir:               /site/content/blog
/// relativePath:      blog/post-1.md
/// relativeDirectory: blog
/// base:              post-1.md
/// ext:               .md
/// name:              post-1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub absolute_path: PathBuf,
    pub relative_path: String,
    pub relative_directory: String,
    pub dir: PathBuf,
    pub base: String,
    pub ext: String,
    pub name: String,
}

impl FileDescriptor {
    /// Describe `path` relative to `root`.
    ///
    /// Returns `None` if `path` is not inside `root` or has no file name.
    pub fn new(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        let base = path.file_name()?.to_string_lossy().into_owned();
        let (name, ext) = split_extension(&base);

        let relative_path = to_posix(relative);
        let relative_directory = relative.parent().map(to_posix).unwrap_or_default();

        Some(Self {
            absolute_path: path.to_path_buf(),
            relative_path,
            relative_directory,
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            base: base.clone(),
            ext: ext.to_string(),
            name: name.to_string(),
        })
    }

    /// Whether the file extension marks a Markdown document.
    pub fn is_markdown(&self) -> bool {
        matches!(
            self.ext.to_ascii_lowercase().as_str(),
            ".md" | ".markdown"
        )
    }
}

/// Split a base name into `(name, ext)`, keeping the dot on `ext`.
///
/// A leading dot does not start an extension (`.env` has none).
pub(crate) fn split_extension(base: &str) -> (&str, &str) {
    match base.rfind('.') {
        Some(0) | None => (base, ""),
        Some(dot) => (&base[..dot], &base[dot..]),
    }
}

/// Join normal path components with `/`.
fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_nested() {
        let root = Path::new("/site/content");
        let file = FileDescriptor::new(root, Path::new("/site/content/blog/post-1.md")).unwrap();
        assert_eq!(file.relative_path, "blog/post-1.md");
        assert_eq!(file.relative_directory, "blog");
        assert_eq!(file.dir, PathBuf::from("/site/content/blog"));
        assert_eq!(file.base, "post-1.md");
        assert_eq!(file.ext, ".md");
        assert_eq!(file.name, "post-1");
        assert!(file.is_markdown());
    }

    #[test]
    fn test_descriptor_at_root() {
        let root = Path::new("/site/content");
        let file = FileDescriptor::new(root, Path::new("/site/content/about.markdown")).unwrap();
        assert_eq!(file.relative_path, "about.markdown");
        assert_eq!(file.relative_directory, "");
        assert!(file.is_markdown());
    }

    #[test]
    fn test_descriptor_outside_root() {
        let root = Path::new("/site/content");
        assert!(FileDescriptor::new(root, Path::new("/elsewhere/post.md")).is_none());
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("post.md"), ("post", ".md"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension(".env"), (".env", ""));
        assert_eq!(split_extension("README"), ("README", ""));
    }
}

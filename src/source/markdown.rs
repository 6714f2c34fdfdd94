//! Markdown to HTML rendering using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Options for markdown rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    fn to_pulldown_options(self) -> Options {
        let mut opts = Options::empty();
        opts.set(Options::ENABLE_TABLES, self.tables);
        opts.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        opts.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        opts.set(Options::ENABLE_TASKLISTS, self.task_lists);
        opts.set(Options::ENABLE_HEADING_ATTRIBUTES, self.heading_attributes);
        opts
    }
}

/// Render a Markdown body to an HTML fragment.
pub fn render_html(body: &str, options: MarkdownOptions) -> String {
    let parser = Parser::new_ext(body, options.to_pulldown_options());
    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_paragraph() {
        let html = render_html("# Title\n\nSome *text*.", MarkdownOptions::all());
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Some <em>text</em>.</p>"));
    }

    #[test]
    fn test_render_table_only_when_enabled() {
        let source = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert!(render_html(source, MarkdownOptions::all()).contains("<table>"));
        assert!(!render_html(source, MarkdownOptions::default()).contains("<table>"));
    }

    #[test]
    fn test_render_heading_id() {
        let html = render_html("## Intro {#intro}", MarkdownOptions::all());
        assert!(html.contains(r#"<h2 id="intro">Intro</h2>"#));
    }
}

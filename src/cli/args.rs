//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Markdown page creator: annotate content and derive one page per document
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: pages.toml)
    #[arg(short = 'C', long, default_value = "pages.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Annotate content, derive pages and write the page manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Annotate content and print the resulting nodes as JSON
    #[command(visible_alias = "n")]
    Nodes {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Only print nodes of this type (e.g. File, MarkdownRemark)
        #[arg(short = 't', long = "type")]
        node_type: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Arguments shared by every command that runs the annotation phase
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Derive `<dir>/<name>.html` URLs instead of directory URLs
    #[arg(short = 'u', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub ugly_urls: Option<bool>,

    /// Override site URL; its path becomes the path prefix.
    ///
    /// Example: tola-pages build --site-url "https://example.github.io/blog"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Commands::Build { build_args } | Commands::Nodes { build_args, .. } => build_args,
        }
    }
}

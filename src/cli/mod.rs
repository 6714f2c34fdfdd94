//! Command-line interface module.

mod args;
pub mod build;
pub mod nodes;

pub use args::{BuildArgs, Cli, Commands};

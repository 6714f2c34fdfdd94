//! Page types, derivation, and registry reconciliation.

mod conflict;
mod create;
mod error;
mod spec;

pub use conflict::{UrlConflict, UrlSourceMap, collect_url_sources, detect_conflicts};
pub use create::{PageReport, create_pages};
pub use error::PageError;
pub use spec::{PageContext, PageSpec, PageSummary, SiteContext};

//! Configuration section definitions.
//!
//! | Section       | Purpose                                 |
//! |---------------|-----------------------------------------|
//! | `[site.info]` | Site metadata (`siteMetadata`)          |
//! | `[site.data]` | Free-form data (`SiteData` node)        |
//! | `[build]`     | Content, output and manifest paths      |
//! | `[plugin]`    | URL policy and page templates           |

mod build;
mod plugin;
mod site;

pub use build::BuildSectionConfig;
pub use plugin::validate_plugin;
pub use site::SiteSectionConfig;

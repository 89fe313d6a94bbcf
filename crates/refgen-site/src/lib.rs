//! Static reference-site generator pipeline.
//!
//! Builds a reference site from a JSON page list and a shared template:
//! clean, copy assets, copy data files, render one document per page record.

pub mod assets;
pub mod builder;
pub mod config;
pub mod renderer;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use config::{load_pages, ConfigError, PageConfig};
pub use renderer::{PageRenderer, RenderError, RenderedPage};

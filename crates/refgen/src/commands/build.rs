//! Site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use refgen_site::SiteBuilder;

use super::settings::load_config;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
    strict: bool,
) -> Result<()> {
    tracing::info!("Building reference site...");

    let mut config = load_config(config_path)?.into_build_config();

    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }
    if strict {
        config.strict_fields = true;
    }

    let result = SiteBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages and {} asset files in {}ms",
        result.pages,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

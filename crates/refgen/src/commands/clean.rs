//! Output directory cleanup command.

use std::path::Path;

use anyhow::Result;
use refgen_site::SiteBuilder;

use super::settings::load_config;

/// Run the clean command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?.into_build_config();
    let output_dir = config.output_dir.clone();

    SiteBuilder::new(config).clean()?;

    tracing::info!("Cleaned {}", output_dir.display());

    Ok(())
}

//! Shared refgen.toml parsing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use refgen_site::BuildConfig;
use serde::Deserialize;

/// Configuration file structure (refgen.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    assets: AssetsConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    #[serde(default = "default_pages")]
    pages: String,
    #[serde(default = "default_template")]
    template: String,
    #[serde(default = "default_output")]
    output: String,
}

#[derive(Debug, Deserialize)]
struct AssetsConfig {
    #[serde(default = "default_images")]
    images: String,
    #[serde(default = "default_styles")]
    styles: String,
    #[serde(default = "default_scripts")]
    scripts: String,
    #[serde(default = "default_data")]
    data: String,
    /// Image file names to leave out of the bundle
    #[serde(default)]
    exclude_images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BuildSettings {
    #[serde(default = "default_minify")]
    minify: bool,
    #[serde(default)]
    strict_fields: bool,
}

fn default_pages() -> String {
    "config/pages.json".to_string()
}
fn default_template() -> String {
    "templates/page.html".to_string()
}
fn default_output() -> String {
    "build".to_string()
}
fn default_images() -> String {
    "assets/images".to_string()
}
fn default_styles() -> String {
    "assets/styles".to_string()
}
fn default_scripts() -> String {
    "assets/scripts".to_string()
}
fn default_data() -> String {
    "yaml".to_string()
}
fn default_minify() -> bool {
    true
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            template: default_template(),
            output: default_output(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            images: default_images(),
            styles: default_styles(),
            scripts: default_scripts(),
            data: default_data(),
            exclude_images: vec![],
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
            strict_fields: false,
        }
    }
}

impl ConfigFile {
    /// Map onto the library's build configuration.
    pub fn into_build_config(self) -> BuildConfig {
        BuildConfig {
            pages_file: PathBuf::from(self.site.pages),
            template_file: PathBuf::from(self.site.template),
            output_dir: PathBuf::from(self.site.output),
            images_dir: PathBuf::from(self.assets.images),
            styles_dir: PathBuf::from(self.assets.styles),
            scripts_dir: PathBuf::from(self.assets.scripts),
            data_dir: PathBuf::from(self.assets.data),
            exclude_images: self.assets.exclude_images,
            minify: self.build.minify,
            strict_fields: self.build.strict_fields,
        }
    }
}

/// Load configuration from refgen.toml if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

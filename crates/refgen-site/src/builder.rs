//! Site builder: clean, assets, data, render.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use crate::assets::{AssetError, AssetPipeline};
use crate::config::{load_pages, ConfigError};
use crate::renderer::{PageRenderer, RenderError};

/// Configuration for building a reference site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// JSON page list
    pub pages_file: PathBuf,

    /// Shared page template
    pub template_file: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Source images directory
    pub images_dir: PathBuf,

    /// Source stylesheets directory
    pub styles_dir: PathBuf,

    /// Source scripts directory
    pub scripts_dir: PathBuf,

    /// Source YAML data directory
    pub data_dir: PathBuf,

    /// Image file names to leave out of the bundle
    pub exclude_images: Vec<String>,

    /// Minify CSS output
    pub minify: bool,

    /// Fail the build when a page lacks a referenced template field
    pub strict_fields: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            pages_file: PathBuf::from("config/pages.json"),
            template_file: PathBuf::from("templates/page.html"),
            output_dir: PathBuf::from("build"),
            images_dir: PathBuf::from("assets/images"),
            styles_dir: PathBuf::from("assets/styles"),
            scripts_dir: PathBuf::from("assets/scripts"),
            data_dir: PathBuf::from("yaml"),
            exclude_images: vec![],
            minify: true,
            strict_fields: false,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages rendered
    pub pages: usize,

    /// Number of asset and data files bundled
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read template {path}: {message}")]
    TemplateRead { path: String, message: String },

    #[error("Failed to write output {path}: {message}")]
    Write { path: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Reference site builder.
///
/// One build is an explicit sequence: clean the output directory, bundle
/// assets and data files, then render and write every page. Each step hands
/// its results to the next; nothing goes through shared working state.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.clean()?;

        fs::create_dir_all(&self.config.output_dir).map_err(|e| BuildError::Write {
            path: self.config.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let assets = self.bundle_assets()?;
        let pages = self.render_pages()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages,
            assets,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Remove the output directory and everything under it.
    pub fn clean(&self) -> Result<(), BuildError> {
        match fs::remove_dir_all(&self.config.output_dir) {
            Ok(()) => {
                tracing::info!("Removed {}", self.config.output_dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BuildError::Write {
                path: self.config.output_dir.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Copy images, styles, scripts and data files into the output directory.
    fn bundle_assets(&self) -> Result<usize, BuildError> {
        let out = &self.config.output_dir;

        let images = AssetPipeline::copy_images(
            &self.config.images_dir,
            &out.join("assets/images"),
            &self.config.exclude_images,
        )?;

        let styles = AssetPipeline::process_styles(
            &self.config.styles_dir,
            &out.join("assets/styles"),
            self.config.minify,
        )?;

        let scripts =
            AssetPipeline::copy_scripts(&self.config.scripts_dir, &out.join("assets/scripts"))?;

        let data = AssetPipeline::copy_data(&self.config.data_dir, &out.join("yaml"))?;

        tracing::info!(
            "Bundled {} images, {} stylesheets, {} scripts, {} data files",
            images,
            styles,
            scripts,
            data
        );

        Ok(images + styles + scripts + data)
    }

    /// Render every page through the shared template and write the results.
    fn render_pages(&self) -> Result<usize, BuildError> {
        let template_path = &self.config.template_file;
        let source = fs::read_to_string(template_path).map_err(|e| BuildError::TemplateRead {
            path: template_path.display().to_string(),
            message: e.to_string(),
        })?;

        let name = template_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("page.html");

        let renderer = PageRenderer::new(name, &source, self.config.strict_fields)?;
        let pages = load_pages(&self.config.pages_file)?;
        let rendered = renderer.render_all(&pages)?;

        for page in &rendered {
            let target = self.config.output_dir.join(&page.slug);

            // Slugs may carry subdirectories
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::Write {
                    path: parent.display().to_string(),
                    message: e.to_string(),
                })?;
            }

            fs::write(&target, &page.body).map_err(|e| BuildError::Write {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(rendered.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn scaffold(root: &std::path::Path) -> BuildConfig {
        let pages_file = root.join("pages.json");
        let template_file = root.join("page.html");

        fs::write(
            &pages_file,
            r#"[
                {"slug": "index.html", "title": "Home", "body": "Welcome"},
                {"slug": "about.html", "title": "About", "body": "Us"}
            ]"#,
        )
        .unwrap();
        fs::write(&template_file, "<h1>{{ title }}</h1><p>{{ body }}</p>").unwrap();

        BuildConfig {
            pages_file,
            template_file,
            output_dir: root.join("build"),
            images_dir: root.join("images"),
            styles_dir: root.join("styles"),
            scripts_dir: root.join("scripts"),
            data_dir: root.join("yaml"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_pages_from_list() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(
            fs::read_to_string(out.join("index.html")).unwrap(),
            "<h1>Home</h1><p>Welcome</p>"
        );
        assert_eq!(
            fs::read_to_string(out.join("about.html")).unwrap(),
            "<h1>About</h1><p>Us</p>"
        );
    }

    #[tokio::test]
    async fn bundles_assets_and_data() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        let out = config.output_dir.clone();

        fs::create_dir_all(&config.images_dir).unwrap();
        fs::write(config.images_dir.join("logo.png"), b"png").unwrap();
        fs::create_dir_all(&config.styles_dir).unwrap();
        fs::write(config.styles_dir.join("main.css"), "body { color: red; }").unwrap();
        fs::create_dir_all(&config.scripts_dir).unwrap();
        fs::write(config.scripts_dir.join("main.js"), "console.log(1)").unwrap();
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(config.data_dir.join("api.yaml"), "openapi: 3.0.0").unwrap();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.assets, 4);
        assert!(out.join("assets/images/logo.png").exists());
        assert!(out.join("assets/styles/main.css").exists());
        assert!(out.join("assets/scripts/main.js").exists());
        assert!(out.join("yaml/api.yaml").exists());
    }

    #[tokio::test]
    async fn clean_removes_previous_output() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        let out = config.output_dir.clone();

        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.html"), "old").unwrap();

        SiteBuilder::new(config).build().await.unwrap();

        assert!(!out.join("stale.html").exists());
        assert!(out.join("index.html").exists());
    }

    #[test]
    fn clean_tolerates_missing_output() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());

        assert!(SiteBuilder::new(config).clean().is_ok());
    }

    #[tokio::test]
    async fn missing_template_aborts_build() {
        let temp = tempdir().unwrap();
        let mut config = scaffold(temp.path());
        config.template_file = temp.path().join("nope.html");

        let result = SiteBuilder::new(config).build().await;

        assert!(matches!(result, Err(BuildError::TemplateRead { .. })));
    }

    #[tokio::test]
    async fn strict_fields_fail_the_build() {
        let temp = tempdir().unwrap();
        let mut config = scaffold(temp.path());
        fs::write(
            &config.pages_file,
            r#"[{"slug": "index.html", "title": "Home"}]"#,
        )
        .unwrap();
        config.strict_fields = true;

        let result = SiteBuilder::new(config).build().await;

        assert!(matches!(
            result,
            Err(BuildError::Render(RenderError::MissingFields { .. }))
        ));
    }

    #[tokio::test]
    async fn duplicate_slug_keeps_later_page() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        let out = config.output_dir.clone();

        fs::write(
            &config.pages_file,
            r#"[
                {"slug": "a.html", "title": "X", "body": ""},
                {"slug": "a.html", "title": "Y", "body": ""}
            ]"#,
        )
        .unwrap();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(
            fs::read_to_string(out.join("a.html")).unwrap(),
            "<h1>Y</h1><p></p>"
        );
    }
}

//! Asset pipeline: image copying, CSS minification, script and data copying.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Errors that can occur in the asset pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to read asset {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write asset {path}: {message}")]
    Write { path: String, message: String },
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Copy every file under `src` into `dst`, skipping excluded file names.
    ///
    /// A missing source directory copies nothing; reference sites without
    /// images are legal.
    pub fn copy_images(src: &Path, dst: &Path, exclude: &[String]) -> Result<usize, AssetError> {
        Self::copy_tree(src, dst, |path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if exclude.iter().any(|e| e == name) {
                tracing::debug!("Skipping excluded image {}", path.display());
                return false;
            }
            true
        })
    }

    /// Minify each `*.css` under `src` into `dst`.
    ///
    /// A stylesheet lightningcss cannot parse is copied verbatim with a
    /// warning rather than failing the build.
    pub fn process_styles(src: &Path, dst: &Path, minify: bool) -> Result<usize, AssetError> {
        if !src.exists() {
            tracing::warn!("Styles directory not found: {}", src.display());
            return Ok(0);
        }

        let mut count = 0;

        for entry in Self::files_under(src) {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("css") {
                continue;
            }

            let css = fs::read_to_string(path).map_err(|e| AssetError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let output = if minify {
                match Self::minify_css(&css) {
                    Ok(minified) => minified,
                    Err(e) => {
                        tracing::warn!("Could not minify {}: {}; copying as-is", path.display(), e);
                        css
                    }
                }
            } else {
                css
            };

            let target = Self::target_path(src, dst, path)?;
            fs::write(&target, output).map_err(|e| AssetError::Write {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
            count += 1;
        }

        Ok(count)
    }

    /// Copy each `*.js` under `src` into `dst`.
    pub fn copy_scripts(src: &Path, dst: &Path) -> Result<usize, AssetError> {
        Self::copy_tree(src, dst, |path| {
            path.extension().and_then(|e| e.to_str()) == Some("js")
        })
    }

    /// Copy each `*.yaml` / `*.yml` data file under `src` into `dst`.
    ///
    /// Data files are bundled opaquely; their content is never parsed.
    pub fn copy_data(src: &Path, dst: &Path) -> Result<usize, AssetError> {
        Self::copy_tree(src, dst, |path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            )
        })
    }

    /// Copy files under `src` into `dst`, keeping relative structure.
    fn copy_tree(
        src: &Path,
        dst: &Path,
        keep: impl Fn(&Path) -> bool,
    ) -> Result<usize, AssetError> {
        if !src.exists() {
            tracing::warn!("Asset directory not found: {}", src.display());
            return Ok(0);
        }

        let mut count = 0;

        for entry in Self::files_under(src) {
            let path = entry.path();
            if !keep(path) {
                continue;
            }

            let target = Self::target_path(src, dst, path)?;
            fs::copy(path, &target).map_err(|e| AssetError::Write {
                path: target.display().to_string(),
                message: e.to_string(),
            })?;
            count += 1;
        }

        Ok(count)
    }

    fn files_under(src: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
        WalkDir::new(src)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
    }

    /// Destination for one source file, with parent directories created.
    fn target_path(src: &Path, dst: &Path, path: &Path) -> Result<std::path::PathBuf, AssetError> {
        let relative = path.strip_prefix(src).unwrap_or(path);
        let target = dst.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| AssetError::Write {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(target)
    }
}

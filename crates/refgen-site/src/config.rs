//! Page list loading and validation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One record of the page list, describing a single output document.
///
/// Only `slug` is required; every other field is passed through to the
/// template untouched, so a page list can carry whatever names its template
/// consumes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PageConfig {
    /// Destination file name inside the output directory
    pub slug: String,

    /// Open set of template fields
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl PageConfig {
    /// Whether a template field of this name resolves against the record.
    ///
    /// The slug is addressable from templates like any other field.
    pub fn has_field(&self, name: &str) -> bool {
        name == "slug" || self.fields.contains_key(name)
    }
}

/// Errors that can occur when loading the page list.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read page list {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse page list {path}: {message}")]
    Parse { path: String, message: String },
}

/// Load the ordered page list from a JSON file.
///
/// Pages render in list order. Duplicate slugs are legal but suspicious
/// (the later page overwrites the earlier one at the destination), so each
/// duplicate is reported once.
pub fn load_pages(path: &Path) -> Result<Vec<PageConfig>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let pages: Vec<PageConfig> = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut seen: HashSet<&str> = HashSet::new();
    for page in &pages {
        if !seen.insert(page.slug.as_str()) {
            tracing::warn!(
                "Duplicate slug '{}' in {}: the later page will overwrite the earlier one",
                page.slug,
                path.display()
            );
        }
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_list() {
        let json = r#"[
            {"slug": "index.html", "title": "Home", "body": "Welcome"},
            {"slug": "about.html", "title": "About"}
        ]"#;

        let pages: Vec<PageConfig> = serde_json::from_str(json).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].slug, "index.html");
        assert_eq!(pages[0].fields["title"], "Home");
        assert_eq!(pages[1].slug, "about.html");
        assert!(!pages[1].fields.contains_key("body"));
    }

    #[test]
    fn slug_is_required() {
        let json = r#"[{"title": "No slug here"}]"#;

        let result: Result<Vec<PageConfig>, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[test]
    fn slug_resolves_as_field() {
        let json = r#"[{"slug": "a.html", "title": "A"}]"#;
        let pages: Vec<PageConfig> = serde_json::from_str(json).unwrap();

        assert!(pages[0].has_field("slug"));
        assert!(pages[0].has_field("title"));
        assert!(!pages[0].has_field("missing"));
    }

    #[test]
    fn loads_pages_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("pages.json");
        fs::write(&path, r#"[{"slug": "a.html"}, {"slug": "a.html"}]"#).unwrap();

        let pages = load_pages(&path).unwrap();

        // Both duplicates survive loading; collision handling is the writer's problem
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].slug, pages[1].slug);
    }

    #[test]
    fn read_error_for_missing_file() {
        let result = load_pages(Path::new("/nonexistent/pages.json"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn parse_error_for_invalid_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("pages.json");
        fs::write(&path, "not json").unwrap();

        let result = load_pages(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}

//! Document renderer: one output document per page record.

use std::collections::HashSet;

use minijinja::{Environment, UndefinedBehavior};
use rayon::prelude::*;

use crate::config::PageConfig;

/// A rendered document paired with its destination name.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Destination file name (the record's slug, verbatim)
    pub slug: String,

    /// Rendered document body
    pub body: String,
}

/// Errors that can occur during rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to parse template {name}: {message}")]
    TemplateParse { name: String, message: String },

    #[error("Failed to render page {slug}: {message}")]
    Render { slug: String, message: String },

    #[error("Page {slug} is missing template fields: {}", fields.join(", "))]
    MissingFields { slug: String, fields: Vec<String> },
}

/// Renders page records through a single shared template.
///
/// The template is parsed once at construction; a malformed template fails
/// the whole run before any record renders. Rendering itself is a pure
/// mapping from record to document, so records never observe one another.
pub struct PageRenderer {
    env: Environment<'static>,
    template_name: String,
    placeholders: HashSet<String>,
    strict_fields: bool,
}

impl PageRenderer {
    /// Create a renderer for one template body.
    ///
    /// With `strict_fields` a record that lacks a referenced field fails the
    /// run; otherwise the placeholder renders empty and a warning is logged,
    /// matching the permissive behavior reference sites historically relied
    /// on.
    pub fn new(name: &str, source: &str, strict_fields: bool) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Lenient);

        env.add_template_owned(name.to_string(), source.to_string())
            .map_err(|e| RenderError::TemplateParse {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        let placeholders = env
            .get_template(name)
            .map_err(|e| RenderError::TemplateParse {
                name: name.to_string(),
                message: e.to_string(),
            })?
            .undeclared_variables(false);

        Ok(Self {
            env,
            template_name: name.to_string(),
            placeholders,
            strict_fields,
        })
    }

    /// Render every record, in input order.
    ///
    /// Records are independent, so the pass runs in parallel; results are
    /// still assembled in the order the records arrived.
    pub fn render_all(&self, pages: &[PageConfig]) -> Result<Vec<RenderedPage>, RenderError> {
        pages
            .par_iter()
            .map(|page| self.render_one(page))
            .collect()
    }

    /// Render a single record.
    pub fn render_one(&self, page: &PageConfig) -> Result<RenderedPage, RenderError> {
        let mut missing: Vec<String> = self
            .placeholders
            .iter()
            .filter(|name| !page.has_field(name))
            .cloned()
            .collect();
        missing.sort();

        if !missing.is_empty() {
            if self.strict_fields {
                return Err(RenderError::MissingFields {
                    slug: page.slug.clone(),
                    fields: missing,
                });
            }
            for name in &missing {
                tracing::warn!(
                    "Page '{}' has no field '{}'; placeholder renders empty",
                    page.slug,
                    name
                );
            }
        }

        let tmpl = self
            .env
            .get_template(&self.template_name)
            .map_err(|e| RenderError::Render {
                slug: page.slug.clone(),
                message: e.to_string(),
            })?;

        let body = tmpl.render(page).map_err(|e| RenderError::Render {
            slug: page.slug.clone(),
            message: e.to_string(),
        })?;

        Ok(RenderedPage {
            slug: page.slug.clone(),
            body,
        })
    }
}

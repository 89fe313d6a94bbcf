//! Initialize a reference site in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing refgen...");

    // Create default config
    let config_path = Path::new("refgen.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write refgen.toml")?;
        tracing::info!("Created refgen.toml");
    } else {
        tracing::warn!("refgen.toml already exists. Use --yes to overwrite.");
    }

    // Create page list
    let config_dir = Path::new("config");
    fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    let pages_path = config_dir.join("pages.json");
    if !pages_path.exists() || yes {
        fs::write(&pages_path, DEFAULT_PAGES).context("Failed to write config/pages.json")?;
        tracing::info!("Created config/pages.json");
    }

    // Create page template
    let templates_dir = Path::new("templates");
    fs::create_dir_all(templates_dir).context("Failed to create templates directory")?;
    let template_path = templates_dir.join("page.html");
    if !template_path.exists() || yes {
        fs::write(&template_path, DEFAULT_TEMPLATE)
            .context("Failed to write templates/page.html")?;
        tracing::info!("Created templates/page.html");
    }

    // Create asset directories with starter files
    fs::create_dir_all("assets/images").context("Failed to create assets/images")?;
    fs::create_dir_all("assets/styles").context("Failed to create assets/styles")?;
    fs::create_dir_all("assets/scripts").context("Failed to create assets/scripts")?;

    let css_path = Path::new("assets/styles/main.css");
    if !css_path.exists() || yes {
        fs::write(css_path, DEFAULT_CSS).context("Failed to write assets/styles/main.css")?;
        tracing::info!("Created assets/styles/main.css");
    }

    let js_path = Path::new("assets/scripts/main.js");
    if !js_path.exists() || yes {
        fs::write(js_path, DEFAULT_JS).context("Failed to write assets/scripts/main.js")?;
        tracing::info!("Created assets/scripts/main.js");
    }

    // Create data directory with a sample spec
    let data_dir = Path::new("yaml");
    fs::create_dir_all(data_dir).context("Failed to create yaml directory")?;
    let sample_path = data_dir.join("example.yaml");
    if !sample_path.exists() || yes {
        fs::write(&sample_path, DEFAULT_YAML).context("Failed to write yaml/example.yaml")?;
        tracing::info!("Created yaml/example.yaml");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'refgen build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Refgen Configuration

[site]
# JSON list of pages to render
pages = "config/pages.json"

# Shared page template
template = "templates/page.html"

# Output directory
output = "build"

[assets]
# Source directories bundled into the output
images = "assets/images"
styles = "assets/styles"
scripts = "assets/scripts"
data = "yaml"

# Image file names to leave out of the bundle
exclude_images = []

[build]
# Minify CSS
minify = true

# Fail the build when a page lacks a referenced template field
strict_fields = false
"#;

const DEFAULT_PAGES: &str = r#"[
  {
    "slug": "index.html",
    "title": "API Reference",
    "description": "Generated reference documentation",
    "body": "Welcome to your reference site. Each entry in config/pages.json becomes one page.",
    "spec_file": "example.yaml"
  }
]
"#;

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <link rel="stylesheet" href="assets/styles/main.css">
</head>
<body>
  <header>
    <h1>{{ title }}</h1>
    <p>{{ description }}</p>
  </header>
  <main>
    <section>
      <h2>Overview</h2>
      <p>{{ body }}</p>
    </section>
    <section>
      <h2>Specification</h2>
      <p>Source: <a href="yaml/{{ spec_file }}">{{ spec_file }}</a></p>
    </section>
  </main>
  <script src="assets/scripts/main.js"></script>
</body>
</html>
"#;

const DEFAULT_CSS: &str = r#"* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.6;
  max-width: 800px;
  margin: 0 auto;
  padding: 2rem;
}

header {
  border-bottom: 1px solid #ddd;
  margin-bottom: 2rem;
  padding-bottom: 1rem;
}

section {
  margin-bottom: 2rem;
}

a {
  color: #0366d6;
}
"#;

const DEFAULT_JS: &str = r#"// Reference site runtime
(function () {
  'use strict';

  // Mark external links
  document.querySelectorAll('a[href^="http"]').forEach(function (link) {
    link.setAttribute('rel', 'noopener');
    link.setAttribute('target', '_blank');
  });
})();
"#;

const DEFAULT_YAML: &str = r#"openapi: 3.0.0
info:
  title: Example API
  version: 1.0.0
paths: {}
"#;

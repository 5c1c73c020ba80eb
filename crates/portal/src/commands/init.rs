//! Scaffold a portal config and documentation folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing portal...");
    let root = std::env::current_dir().context("Failed to resolve working directory")?;
    scaffold(config_path, &root, yes)?;
    tracing::info!("Run 'portal serve' to start the server.");
    Ok(())
}

/// Write the config file, then seed the docs directory it points at.
fn scaffold(config_path: &Path, root: &Path, yes: bool) -> Result<PathBuf> {
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::info!("Using existing {}", config_path.display());
    }

    let docs_dir = config::load_config(config_path)?
        .into_server_config(root)
        .docs_dir;
    fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;

    for (name, content) in [("index.md", DEFAULT_INDEX), ("score.md", DEFAULT_SCORE_DOC)] {
        let path = docs_dir.join(name);
        if path.exists() && !yes {
            tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
            continue;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", name))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(docs_dir)
}

const DEFAULT_CONFIG: &str = r#"# Portal Configuration

[server]
host = "127.0.0.1"
port = 3000

# Static assets; documentation is read from <public_dir>/docs
public_dir = "public"

[site]
title = "Genomics Portal"

# Search API consumed by the data tables (PORTAL_API_URL)
api_url = "http://localhost:5050"

# Document type and index (PORTAL_DOCUMENT_TYPE, PORTAL_INDEX_NAME)
document_type = "file"
index_name = "file_centric"

# Header home link (PORTAL_HOME_LINK)
home_link = "/home"

# Banners shown on the home page
# [[site.alerts]]
# level = "warning"
# title = "Scheduled maintenance"
# message = "Search will be unavailable on Saturday."
"#;

const DEFAULT_INDEX: &str = r#"# Portal Documentation

Files in this folder are listed at `/api/docs` and rendered at
`/api/docs/<name>.md`.
"#;

const DEFAULT_SCORE_DOC: &str = r#"# Score API

Score handles object storage for submitted files.

| Method | Path | Description |
|--------|------|-------------|
| GET | `/download/{objectId}` | Get a presigned download URL |
| POST | `/upload/{objectId}/uploads` | Initialize an upload |
"#;

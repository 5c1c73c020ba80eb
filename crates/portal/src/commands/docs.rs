//! Documentation listing command.

use anyhow::{Context, Result};
use portal_server::{list_docs, FsDocs, PortalServerConfig};

/// Print the same listing `GET /api/docs` would return.
pub fn run(config: PortalServerConfig) -> Result<()> {
    let docs = FsDocs::new(&config.docs_dir);

    let names = list_docs(&docs)
        .with_context(|| format!("Failed to list {}", config.docs_dir.display()))?;

    println!("{}", serde_json::to_string_pretty(&names)?);

    Ok(())
}

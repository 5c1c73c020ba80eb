//! Portal server command.

use anyhow::Result;
use portal_server::{PortalServer, PortalServerConfig};

/// Run the serve command. Flags override values from the config file.
pub async fn run(
    mut config: PortalServerConfig,
    port: Option<u16>,
    host: Option<String>,
    open: bool,
) -> Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }
    config.open = open;

    tracing::info!(
        "Serving {} (docs from {})",
        config.public_dir.display(),
        config.docs_dir.display()
    );

    PortalServer::new(config).start().await?;

    Ok(())
}

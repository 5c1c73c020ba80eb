//! Portal server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{response::Redirect, routing::get, Router};
use portal_pages::{Layout, RouteError, RouteTable, SiteConfig};
use tower_http::services::ServeDir;

use crate::docs::{self, DocsSource, FsDocs};
use crate::pages;

/// Landing page for `/`.
const HOME_PATH: &str = "/home";

/// Configuration for the portal server.
#[derive(Debug, Clone)]
pub struct PortalServerConfig {
    /// Directory served as static assets
    pub public_dir: PathBuf,

    /// Directory listed by the documentation API
    pub docs_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site values handed to the layout and client bundle
    pub site: SiteConfig,
}

impl Default for PortalServerConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            docs_dir: PathBuf::from("public/docs"),
            port: 3000,
            host: "127.0.0.1".to_string(),
            open: false,
            site: SiteConfig::default(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server error: {0}")]
    ServeError(String),

    #[error("Invalid route table: {0}")]
    RouteError(#[from] RouteError),

    #[error("Failed to load layout templates: {0}")]
    LayoutError(#[from] minijinja::Error),
}

/// Shared, read-only server state.
pub struct AppState {
    pub routes: RouteTable,
    pub layout: Layout,
    pub docs: Arc<dyn DocsSource>,
}

impl AppState {
    pub fn new(routes: RouteTable, layout: Layout, docs: Arc<dyn DocsSource>) -> Self {
        Self {
            routes,
            layout,
            docs,
        }
    }

    /// Portal routes and default site values over the given docs source.
    pub fn with_docs(docs: Arc<dyn DocsSource>) -> Result<Self, ServerError> {
        Ok(Self::new(
            RouteTable::portal()?,
            Layout::new(SiteConfig::default())?,
            docs,
        ))
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>, public_dir: &Path) -> Router {
    let page_paths: Vec<String> = state.routes.paths().map(str::to_string).collect();

    let mut router = Router::new()
        .route("/", get(|| async { Redirect::to(HOME_PATH) }))
        .route("/api/docs", get(docs::list_handler))
        .route("/api/docs/{name}", get(docs::content_handler));

    for path in &page_paths {
        router = router.route(path, get(pages::page_handler));
    }

    router
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
}

/// The portal server.
pub struct PortalServer {
    config: PortalServerConfig,
}

impl PortalServer {
    /// Create a new portal server.
    pub fn new(config: PortalServerConfig) -> Self {
        Self { config }
    }

    /// Build the router with the portal route table and configured directories.
    pub fn router(&self) -> Result<Router, ServerError> {
        let state = AppState::new(
            RouteTable::portal()?,
            Layout::new(self.config.site.clone())?,
            Arc::new(FsDocs::new(&self.config.docs_dir)),
        );

        tracing::debug!(
            "Mounted {} page routes, docs at {}",
            state.routes.len(),
            self.config.docs_dir.display()
        );

        Ok(build_router(Arc::new(state), &self.config.public_dir))
    }

    /// Start the portal server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let app = self.router()?;

        if !self.config.docs_dir.exists() {
            tracing::warn!(
                "Documentation directory {} does not exist",
                self.config.docs_dir.display()
            );
        }

        tracing::info!("Starting portal at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}{}", addr, HOME_PATH);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        Ok(())
    }
}

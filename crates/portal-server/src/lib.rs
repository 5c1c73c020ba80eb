//! HTTP server for the genomics portal.
//!
//! Serves the route pages, the documentation API and the static `public/`
//! assets.

pub mod docs;
pub mod pages;
pub mod server;

pub use docs::{list_docs, DocContent, DocsError, DocsSource, FsDocs};
pub use pages::ego_jwt_from_headers;
pub use server::{build_router, AppState, PortalServer, PortalServerConfig, ServerError};

//! Documentation API.
//!
//! `GET /api/docs` lists the Markdown files in the docs directory;
//! `GET /api/docs/{name}` renders one of them. Both read the filesystem fresh
//! on every request.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

/// Errors returned by the documentation API.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("Documentation directory not found")]
    DirectoryNotFound,

    #[error("No documentation files found")]
    NoFiles,

    #[error("Invalid documentation file name: {0}")]
    InvalidName(String),

    #[error("Documentation file not found: {0}")]
    FileNotFound(String),

    #[error("Unable to read documentation files: {0}")]
    Io(#[from] io::Error),
}

impl DocsError {
    pub fn status(&self) -> StatusCode {
        match self {
            DocsError::DirectoryNotFound | DocsError::NoFiles | DocsError::FileNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DocsError::InvalidName(_) => StatusCode::BAD_REQUEST,
            DocsError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to clients. I/O details stay in the server log.
    pub fn client_message(&self) -> &'static str {
        match self {
            DocsError::DirectoryNotFound => "Documentation directory not found",
            DocsError::NoFiles => "No documentation files found",
            DocsError::InvalidName(_) => "Invalid documentation file name",
            DocsError::FileNotFound(_) => "Documentation file not found",
            DocsError::Io(_) => "Unable to read documentation files",
        }
    }
}

impl IntoResponse for DocsError {
    fn into_response(self) -> Response {
        if let DocsError::Io(e) = &self {
            tracing::error!("Failed to read documentation files: {}", e);
        }

        let body = serde_json::json!({ "error": self.client_message() });
        (self.status(), Json(body)).into_response()
    }
}

/// Read access to the documentation directory.
pub trait DocsSource: Send + Sync {
    /// Whether the directory exists.
    fn exists(&self) -> bool;

    /// Names of all entries in the directory, unfiltered and unsorted.
    fn file_names(&self) -> io::Result<Vec<String>>;

    /// Contents of one file in the directory.
    fn read(&self, name: &str) -> io::Result<String>;
}

/// Documentation directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsDocs {
    dir: PathBuf,
}

impl FsDocs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocsSource for FsDocs {
    fn exists(&self) -> bool {
        self.dir.exists()
    }

    fn file_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.dir.join(name))
    }
}

/// List `.md` files in the docs directory, sorted ascending.
pub fn list_docs(source: &dyn DocsSource) -> Result<Vec<String>, DocsError> {
    if !source.exists() {
        return Err(DocsError::DirectoryNotFound);
    }

    let mut names: Vec<String> = source
        .file_names()?
        .into_iter()
        .filter(|name| name.ends_with(".md"))
        .collect();

    if names.is_empty() {
        return Err(DocsError::NoFiles);
    }

    names.sort();
    Ok(names)
}

/// A rendered documentation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocContent {
    pub name: String,
    pub html: String,
}

/// Read one documentation file and render it to HTML.
pub fn read_doc(source: &dyn DocsSource, name: &str) -> Result<DocContent, DocsError> {
    if !is_doc_name(name) {
        return Err(DocsError::InvalidName(name.to_string()));
    }

    let markdown = source.read(name).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DocsError::FileNotFound(name.to_string()),
        _ => DocsError::Io(e),
    })?;

    Ok(DocContent {
        name: name.to_string(),
        html: render_markdown(&markdown),
    })
}

/// A single `.md` path component, the same shape `list_docs` returns.
fn is_doc_name(name: &str) -> bool {
    name.ends_with(".md") && Path::new(name).file_name() == Some(OsStr::new(name))
}

/// Markdown to HTML with tables and strikethrough.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Handler for `GET /api/docs`.
pub async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, DocsError> {
    list_docs(state.docs.as_ref()).map(Json)
}

/// Handler for `GET /api/docs/{name}`.
pub async fn content_handler(
    State(state): State<Arc<AppState>>,
    UrlPath(name): UrlPath<String>,
) -> Result<Json<DocContent>, DocsError> {
    read_doc(state.docs.as_ref(), &name).map(Json)
}

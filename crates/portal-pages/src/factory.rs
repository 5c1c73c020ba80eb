//! The page factory.
//!
//! Every route page is produced by [`create_page`], which wraps a props fetcher
//! and a render function with the cross-cutting concerns: auth gating, props
//! validation and the layout chrome. A navigation moves from idle to fetching
//! to rendered; each step is logged at debug level.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::context::PageContext;
use crate::templates::{Chrome, Layout};

/// Props handed to a render function. Always a JSON object.
pub type Props = serde_json::Map<String, Value>;

type FetchFn =
    Arc<dyn Fn(PageContext) -> BoxFuture<'static, Result<Value, PageError>> + Send + Sync>;
type RenderFn = Arc<dyn Fn(&Props) -> Result<String, PageError> + Send + Sync>;

/// Errors that can occur while serving a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Authentication required for {0}")]
    Unauthorized(String),

    #[error("Failed to fetch props: {0}")]
    Fetch(String),

    #[error("Props must be a JSON object, got {0}")]
    InvalidProps(&'static str),

    #[error("Failed to render view: {0}")]
    Render(String),

    #[error("Layout error: {0}")]
    Layout(#[from] minijinja::Error),
}

/// Where a single navigation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationState {
    Idle,
    Fetching,
    Rendered,
}

/// Configuration for [`create_page`].
#[derive(Clone)]
pub struct PageConfig {
    fetch_props: FetchFn,
    is_public: bool,
    title: String,
    show_alerts: bool,
}

impl PageConfig {
    /// Create a config around an async props fetcher.
    ///
    /// Pages are private until [`PageConfig::public`] is called.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(PageContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, PageError>> + Send + 'static,
    {
        Self {
            fetch_props: Arc::new(move |ctx| fetch(ctx).boxed()),
            is_public: false,
            title: String::new(),
            show_alerts: false,
        }
    }

    /// Skip authentication enforcement for this page.
    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Mount the system-alerts banner above the view.
    pub fn with_alerts(mut self) -> Self {
        self.show_alerts = true;
        self
    }
}

impl fmt::Debug for PageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageConfig")
            .field("is_public", &self.is_public)
            .field("title", &self.title)
            .field("show_alerts", &self.show_alerts)
            .finish_non_exhaustive()
    }
}

/// Wrap a render function with the page's fetch and gating behavior.
pub fn create_page<R>(config: PageConfig, render: R) -> Page
where
    R: Fn(&Props) -> Result<String, PageError> + Send + Sync + 'static,
{
    Page {
        config,
        render: Arc::new(render),
    }
}

/// Result of a completed navigation.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Props resolved by the fetcher
    pub props: Props,

    /// Full HTML document
    pub html: String,
}

/// A mountable page built by [`create_page`].
#[derive(Clone)]
pub struct Page {
    config: PageConfig,
    render: RenderFn,
}

impl Page {
    pub fn is_public(&self) -> bool {
        self.config.is_public
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn shows_alerts(&self) -> bool {
        self.config.show_alerts
    }

    /// Gate on auth, then resolve the page's props.
    pub async fn fetch_props(&self, ctx: PageContext) -> Result<Props, PageError> {
        if !self.config.is_public && ctx.ego_jwt.is_none() {
            return Err(PageError::Unauthorized(ctx.path));
        }

        match (self.config.fetch_props)(ctx).await? {
            Value::Object(props) => Ok(props),
            other => Err(PageError::InvalidProps(json_kind(&other))),
        }
    }

    /// Render the view with exactly the given props and wrap it in the layout.
    pub fn render(&self, props: &Props, layout: &Layout) -> Result<String, PageError> {
        let body = (self.render)(props)?;

        let html = layout.render_page(&Chrome {
            title: &self.config.title,
            body: &body,
            show_alerts: self.config.show_alerts,
        })?;

        Ok(html)
    }

    /// Run one navigation: fetch props, then render.
    pub async fn navigate(
        &self,
        ctx: PageContext,
        layout: &Layout,
    ) -> Result<RenderedPage, PageError> {
        let path = ctx.path.clone();
        let mut state = NavigationState::Idle;

        advance(&path, &mut state, NavigationState::Fetching);
        let props = self.fetch_props(ctx).await?;

        let html = self.render(&props, layout)?;
        advance(&path, &mut state, NavigationState::Rendered);

        Ok(RenderedPage { props, html })
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn advance(path: &str, state: &mut NavigationState, next: NavigationState) {
    tracing::debug!("{}: {:?} -> {:?}", path, state, next);
    *state = next;
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Props fetcher that passes the query and auth token straight through.
///
/// Resolves to `{ "query": ..., "egoJwt": ... }`; `egoJwt` is omitted when the
/// request carried no token.
pub async fn pass_through(ctx: PageContext) -> Result<Value, PageError> {
    let mut props = query_props(&ctx)?;
    if let Some(token) = ctx.ego_jwt {
        props.insert("egoJwt".to_string(), Value::String(token));
    }
    Ok(Value::Object(props))
}

/// Props fetcher that passes only the query, never the auth token.
pub async fn query_only(ctx: PageContext) -> Result<Value, PageError> {
    Ok(Value::Object(query_props(&ctx)?))
}

fn query_props(ctx: &PageContext) -> Result<Props, PageError> {
    let query = serde_json::to_value(&ctx.query).map_err(|e| PageError::Fetch(e.to_string()))?;
    let mut props = Props::new();
    props.insert("query".to_string(), query);
    Ok(props)
}

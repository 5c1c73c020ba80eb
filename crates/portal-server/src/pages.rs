//! Route page handler.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Query, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap, StatusCode,
    },
    response::{Html, IntoResponse, Response},
};
use portal_pages::{Layout, PageContext, PageError, Query as PageQuery};

use crate::server::AppState;

/// Cookie carrying the ego auth token.
pub const EGO_JWT_COOKIE: &str = "EGO_JWT";

/// Handler for every path in the route table.
pub async fn page_handler(
    State(state): State<Arc<AppState>>,
    matched: MatchedPath,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let path = matched.as_str();

    let Some(page) = state.routes.resolve(path) else {
        return error_page(&state.layout, StatusCode::NOT_FOUND, "Page not found");
    };

    let ctx = PageContext {
        path: path.to_string(),
        query: PageQuery::from_pairs(pairs),
        ego_jwt: ego_jwt_from_headers(&headers),
    };

    match page.navigate(ctx, &state.layout).await {
        Ok(rendered) => Html(rendered.html).into_response(),
        Err(e) => page_error_response(&state.layout, path, e),
    }
}

/// Extract the auth token from a bearer `Authorization` header or the
/// `EGO_JWT` cookie, in that order.
pub fn ego_jwt_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == EGO_JWT_COOKIE)
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn page_error_response(layout: &Layout, path: &str, err: PageError) -> Response {
    match err {
        PageError::Unauthorized(_) => error_page(
            layout,
            StatusCode::UNAUTHORIZED,
            "You must be logged in to view this page",
        ),
        err => {
            tracing::error!("Failed to load page {}: {}", path, err);
            error_page(
                layout,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong loading this page",
            )
        }
    }
}

fn error_page(layout: &Layout, status: StatusCode, message: &str) -> Response {
    match layout.render_error(status.as_u16(), message) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (status, message.to_string()).into_response()
        }
    }
}

//! services/api/src/web/middleware.rs
//!
//! Access checks for the API routes: the editor bearer token and the
//! double-submit CSRF token.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::web::state::AppState;

/// Name of the cookie holding the CSRF token.
pub const CSRF_COOKIE: &str = "csrf";
/// Header the client must copy the CSRF cookie into.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Middleware that checks the `Authorization: Bearer <token>` header against
/// the configured editor token.
///
/// When no token is configured every request is let through.
pub async fn require_editor(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = state.config.editor_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    if presented != Some(expected) {
        warn!("Rejected request to {} without a valid editor token", req.uri().path());
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}

/// Middleware that rejects mutating requests whose `x-csrf-token` header does
/// not match the `csrf` cookie.
pub async fn verify_csrf(req: Request, next: Next) -> Result<Response, StatusCode> {
    let method = req.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let headers = req.headers();
    let submitted = headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok());
    let matches = match (csrf_cookie(headers), submitted) {
        (Some(cookie), Some(submitted)) => !cookie.is_empty() && cookie == submitted,
        _ => false,
    };

    if !matches {
        warn!("CSRF check failed for {} {}", req.method(), req.uri().path());
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}

fn csrf_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            c.trim()
                .strip_prefix(CSRF_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_the_csrf_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; csrf=abc123; csrftoken=nope"),
        );
        assert_eq!(csrf_cookie(&headers), Some("abc123"));
    }

    #[test]
    fn similarly_named_cookies_do_not_match() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("csrftoken=nope"));
        assert_eq!(csrf_cookie(&headers), None);
    }
}

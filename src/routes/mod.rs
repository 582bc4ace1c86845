//! Route tables and the assembled application router.

pub mod common;
pub mod record;

pub use common::common_routes_with_ready;
pub use record::record_routes;

use crate::config::HttpConfig;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, Uri};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Fallback for a known path without a handler for the request method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}

/// Record and common routes with body limit and request tracing. Unmatched paths and
/// methods answer with a JSON error like every other route.
pub fn app(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(record_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(http.body_limit))
        .layer(TraceLayer::new_for_http())
}

use crate::handlers::record::{count, create, delete as delete_handler, list, reject_count_id, update};
use crate::routes::method_not_allowed;
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

/// `/records/count` sits in the `/records/:id` namespace, so PUT and DELETE on it are
/// answered as an invalid id.
pub fn record_routes(state: AppState) -> Router {
    Router::new()
        .route("/records", get(list).post(create).fallback(method_not_allowed))
        .route(
            "/records/count",
            get(count)
                .put(reject_count_id)
                .delete(reject_count_id)
                .fallback(method_not_allowed),
        )
        .route(
            "/records/:id",
            put(update).delete(delete_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}

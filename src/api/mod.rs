pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use self::handlers::*;
use crate::http::server::AppState;

/// Member group routes, relative to the configured base path.
pub fn member_group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_groups).post(post_save))
        .route("/empty", get(get_empty))
        .route("/by-ids", get(get_by_ids))
        .route("/{id}", get(get_by_id).delete(delete_by_id))
        .route("/{id}/delete", post(delete_by_id))
}

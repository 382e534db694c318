//! Spacecraft CRUD routes under /v1/spacecrafts.

use crate::handlers::spacecraft::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn spacecraft_routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/spacecrafts", post(create).get(list))
        .route("/v1/spacecrafts/", get(list))
        .route(
            "/v1/spacecrafts/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}

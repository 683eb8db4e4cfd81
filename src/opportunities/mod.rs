use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get", get(handlers::list_public))
        .route("/post", post(handlers::post_opportunity))
        .route("/getadminopportunities", get(handlers::list_admin))
        .route("/get/:id", get(handlers::get_public))
        .route("/admin/:id", get(handlers::get_admin))
        .route("/update/:id", put(handlers::update_opportunity))
        .route("/:id", delete(handlers::delete_opportunity))
}

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
        .route("/register", post(handlers::register_center))
        .route("/get", get(handlers::list_my_centers))
        .route("/get/:id", get(handlers::get_center))
        .route("/update/:id", put(handlers::update_center))
        .route("/:id", delete(handlers::delete_center))
}

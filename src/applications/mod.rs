use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/apply/:id", get(handlers::apply))
        .route("/get", get(handlers::my_applications))
        .route("/:id/applicants", get(handlers::applicants))
        .route("/status/:id/update", post(handlers::update_status))
}

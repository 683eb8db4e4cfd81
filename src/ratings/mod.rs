use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit/:id", post(handlers::submit_rating))
        .route("/center/:id", get(handlers::center_ratings))
        .route("/tutor/:id", get(handlers::my_rating))
        .route("/rateable", get(handlers::rateable_centers))
}

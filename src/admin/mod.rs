use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::super_admin_login))
        .route("/pending-users", get(handlers::pending_users))
        .route("/users", get(handlers::list_users))
        .route("/approve-user/:id", put(handlers::approve_user))
        .route("/reject-user/:id", put(handlers::reject_user))
        .route("/stats", get(handlers::user_stats))
}

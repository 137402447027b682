use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod session;


/// Routes mounted under `/user`.
pub fn router(state: AppState) -> Router<AppState> {
    handlers::user_routes(state)
}

pub mod dto;
pub mod handlers;
pub mod normalize;
pub mod plan;
pub mod prompts;
pub mod reconcile;
pub mod repo;
pub mod skeleton;
pub mod week;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}

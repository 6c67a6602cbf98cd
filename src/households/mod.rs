mod dto;
pub mod handlers;
pub mod repo;

use axum::http::StatusCode;
use axum::Router;
use sqlx::PgPool;
use tracing::{error, warn};
use uuid::Uuid;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}

/// Resolves the caller's household or fails the request. Every feature
/// behind onboarding goes through this.
pub(crate) async fn household_for_user(
    db: &PgPool,
    user_id: Uuid,
) -> Result<Uuid, (StatusCode, String)> {
    match repo::Household::for_user(db, user_id).await {
        Ok(Some(id)) => Ok(id),
        Ok(None) => {
            warn!(user_id = %user_id, "user has no household");
            Err((StatusCode::NOT_FOUND, "No household found".into()))
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "household lookup failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

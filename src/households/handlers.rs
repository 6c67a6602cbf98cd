use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::auth::AuthUser;
use crate::households::dto::{SettingsResponse, UpdateSettingsRequest};
use crate::households::repo::{Household, HouseholdSettings};
use crate::households::household_for_user;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/households", post(create_household))
        .route(
            "/households/settings",
            get(get_settings).put(put_settings),
        )
}

fn settings_response(s: HouseholdSettings) -> SettingsResponse {
    SettingsResponse {
        household_id: s.household_id,
        risk_level: s.risk_level,
        prep_time_preference: s.prep_time_preference,
        kids_appetite: s.kids_appetite,
        onboarding_step: s.onboarding_step,
    }
}

/// Idempotent per user: a second call returns the existing household's
/// settings instead of creating another one.
#[instrument(skip(state))]
pub async fn create_household(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SettingsResponse>, (StatusCode, String)> {
    if let Ok(Some(household_id)) = Household::for_user(&state.db, user_id).await {
        let settings = HouseholdSettings::get(&state.db, household_id)
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
            .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "Settings missing".to_string()))?;
        return Ok(Json(settings_response(settings)));
    }

    let settings = Household::create_for_user(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "create household failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(user_id = %user_id, household_id = %settings.household_id, "household created");
    Ok(Json(settings_response(settings)))
}

#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SettingsResponse>, (StatusCode, String)> {
    let household_id = household_for_user(&state.db, user_id).await?;

    let settings = HouseholdSettings::get(&state.db, household_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Settings not found".to_string()))?;

    Ok(Json(settings_response(settings)))
}

#[instrument(skip(state, payload))]
pub async fn put_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, (StatusCode, String)> {
    payload
        .validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    let household_id = household_for_user(&state.db, user_id).await?;

    let settings = HouseholdSettings::update(
        &state.db,
        household_id,
        payload.risk_level,
        &payload.prep_time_preference,
        &payload.kids_appetite,
        payload.onboarding_step,
    )
    .await
    .map_err(|e| {
        error!(error = %e, household_id = %household_id, "update settings failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(settings_response(settings)))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use time::Date;
use tracing::{error, info, instrument};

use crate::auth::AuthUser;
use crate::households::household_for_user;
use crate::plans::normalize::parse_model_json;
use crate::plans::repo::WeeklyPlan;
use crate::plans::week::{current_week_start, format_date, parse_date};
use crate::shopping::dto::{
    GenerateShoppingListRequest, ShoppingList, ShoppingListResponse, ToggleItemRequest,
};
use crate::shopping::repo::StoredShoppingList;
use crate::shopping::services::{shopping_list_from_value, shopping_list_prompt};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-lists/generate", post(generate_shopping_list))
        .route("/shopping-lists/:week_start", get(get_shopping_list))
        .route("/shopping-lists/:week_start/items", patch(toggle_item))
}

fn list_response(week_start: Date, items: ShoppingList) -> ShoppingListResponse {
    ShoppingListResponse {
        week_start: format_date(week_start),
        items,
    }
}

fn load_stored_list(items_json: serde_json::Value) -> Result<ShoppingList, (StatusCode, String)> {
    serde_json::from_value(items_json).map_err(|e| {
        error!(error = %e, "stored shopping list does not match the expected shape");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Stored shopping list is corrupt".to_string(),
        )
    })
}

#[instrument(skip(state, payload))]
pub async fn generate_shopping_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GenerateShoppingListRequest>,
) -> Result<Json<ShoppingListResponse>, (StatusCode, String)> {
    let week_start = match payload.week_start.as_deref() {
        Some(s) => parse_date(s).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => current_week_start(),
    };
    let household_id = household_for_user(&state.db, user_id).await?;

    let plan_json = WeeklyPlan::get(&state.db, household_id, week_start)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            StatusCode::BAD_REQUEST,
            "No plan found for this week".to_string(),
        ))?;

    let plan_pretty = serde_json::to_string_pretty(&plan_json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let prompt = shopping_list_prompt(&plan_pretty);

    let raw = state.ai.complete(&prompt).await.map_err(|e| {
        error!(error = %e, household_id = %household_id, "shopping list call failed");
        (
            StatusCode::BAD_GATEWAY,
            "Failed to generate shopping list".into(),
        )
    })?;

    let parsed = parse_model_json(&raw).map_err(|e| {
        error!(error = %e, raw = %raw, "AI returned invalid JSON");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI returned invalid JSON".to_string(),
        )
    })?;

    let items = shopping_list_from_value(parsed).map_err(|e| {
        error!(error = %e, raw = %raw, "AI shopping list has the wrong shape");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI returned invalid JSON".to_string(),
        )
    })?;

    let items_json = serde_json::to_value(&items)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    StoredShoppingList::upsert(&state.db, household_id, week_start, &items_json)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "save shopping list failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save shopping list".into(),
            )
        })?;

    info!(
        household_id = %household_id,
        week_start = %week_start,
        sections = items.len(),
        "shopping list generated"
    );
    Ok(Json(list_response(week_start, items)))
}

#[instrument(skip(state))]
pub async fn get_shopping_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(week_start): Path<String>,
) -> Result<Json<ShoppingListResponse>, (StatusCode, String)> {
    let week_start =
        parse_date(&week_start).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let household_id = household_for_user(&state.db, user_id).await?;

    let stored = StoredShoppingList::get(&state.db, household_id, week_start)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            StatusCode::NOT_FOUND,
            "No shopping list for this week".to_string(),
        ))?;

    Ok(Json(list_response(week_start, load_stored_list(stored)?)))
}

#[instrument(skip(state, payload))]
pub async fn toggle_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(week_start): Path<String>,
    Json(payload): Json<ToggleItemRequest>,
) -> Result<Json<ShoppingListResponse>, (StatusCode, String)> {
    let week_start =
        parse_date(&week_start).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let household_id = household_for_user(&state.db, user_id).await?;

    let stored = StoredShoppingList::get(&state.db, household_id, week_start)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            StatusCode::NOT_FOUND,
            "No shopping list for this week".to_string(),
        ))?;
    let mut items = load_stored_list(stored)?;

    let entry = items
        .get_mut(&payload.category)
        .and_then(|section| section.iter_mut().find(|i| i.name == payload.name))
        .ok_or((StatusCode::NOT_FOUND, "Item not found".to_string()))?;
    entry.checked = payload.checked;

    let items_json = serde_json::to_value(&items)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    StoredShoppingList::upsert(&state.db, household_id, week_start, &items_json)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "save shopping list failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save shopping list".into(),
            )
        })?;

    Ok(Json(list_response(week_start, items)))
}

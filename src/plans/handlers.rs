use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::Date;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::households::household_for_user;
use crate::households::repo::HouseholdSettings;
use crate::items::repo::RatedItem;
use crate::items::services::{apply_rejection_downgrade, classify_names, RatedNames};
use crate::plans::dto::{
    CopyLastWeekRequest, GeneratePlanRequest, PlanResponse, ReshuffleRequest, ReshuffleResponse,
    UpdatePlanRequest,
};
use crate::plans::normalize::{extract_plan_object, parse_model_json};
use crate::plans::plan::WeekPlan;
use crate::plans::prompts::{full_plan_prompt, slot_prompt, PromptContext};
use crate::plans::reconcile::reconcile;
use crate::plans::repo::WeeklyPlan;
use crate::plans::skeleton::{build_skeleton, has_any_selection};
use crate::plans::week::{current_week_start, format_date, parse_date, previous_week};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/plans/generate", post(generate_plan))
        .route("/plans/reshuffle", post(reshuffle_slot))
        .route("/plans/copy-last-week", post(copy_last_week))
        .route(
            "/plans/:week_start",
            get(get_plan).put(put_plan).delete(delete_plan),
        )
}

fn resolve_week_start(raw: Option<&str>) -> Result<Date, (StatusCode, String)> {
    match raw {
        Some(s) => parse_date(s).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string())),
        None => Ok(current_week_start()),
    }
}

/// Settings plus classified item names, shared by both generation paths.
async fn plan_inputs(
    state: &AppState,
    household_id: Uuid,
) -> Result<(HouseholdSettings, RatedNames), (StatusCode, String)> {
    let settings = HouseholdSettings::get(&state.db, household_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Settings not found".to_string()))?;

    let items = RatedItem::list_for_household(&state.db, household_id, None)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((settings, classify_names(&items)))
}

fn plan_response(week_start: Date, plan: WeekPlan) -> PlanResponse {
    PlanResponse {
        week_start: format_date(week_start),
        plan,
    }
}

fn load_stored_plan(plan_json: serde_json::Value) -> Result<WeekPlan, (StatusCode, String)> {
    serde_json::from_value(plan_json).map_err(|e| {
        error!(error = %e, "stored plan does not match the expected shape");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Stored plan is corrupt".to_string(),
        )
    })
}

#[instrument(skip(state, payload))]
pub async fn generate_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GeneratePlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let week_start = resolve_week_start(payload.week_start.as_deref())?;

    if !has_any_selection(&payload.days) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please select at least one meal".into(),
        ));
    }

    let household_id = household_for_user(&state.db, user_id).await?;
    let (settings, names) = plan_inputs(&state, household_id).await?;

    // Nothing green to plan from; refuse before any generation call.
    if names.green.is_empty() {
        warn!(household_id = %household_id, "no green items, refusing to generate");
        return Err((
            StatusCode::BAD_REQUEST,
            "No green-rated items to plan from".into(),
        ));
    }

    let skeleton = build_skeleton(&payload.days);
    let ctx = PromptContext {
        green: &names.green,
        amber: &names.amber,
        red: &names.red,
        risk_level: settings.risk_level,
        prep_time: &settings.prep_time_preference,
        appetite: &settings.kids_appetite,
    };
    let prompt = full_plan_prompt(&ctx, &skeleton);

    let raw = state.ai.complete(&prompt).await.map_err(|e| {
        error!(error = %e, household_id = %household_id, "generation call failed");
        (StatusCode::BAD_GATEWAY, "Failed to generate plan".into())
    })?;

    let parsed = parse_model_json(&raw).map_err(|e| {
        // Raw output stays in the logs for diagnosis, not in the response.
        error!(error = %e, raw = %raw, "AI returned invalid JSON");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI returned invalid JSON".to_string(),
        )
    })?;

    let merged = reconcile(&skeleton, extract_plan_object(&parsed));

    let plan_json = serde_json::to_value(&merged)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    WeeklyPlan::upsert(&state.db, household_id, week_start, &plan_json)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "save plan failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save plan".into())
        })?;

    info!(
        household_id = %household_id,
        week_start = %week_start,
        days = merged.len(),
        "plan generated"
    );
    Ok(Json(plan_response(week_start, merged)))
}

#[instrument(skip(state, payload))]
pub async fn reshuffle_slot(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ReshuffleRequest>,
) -> Result<Json<ReshuffleResponse>, (StatusCode, String)> {
    let week_start = resolve_week_start(payload.week_start.as_deref())?;

    let existing_meal = payload.existing_meal.trim();
    if existing_meal.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "existing_meal is required".into()));
    }

    let household_id = household_for_user(&state.db, user_id).await?;

    let stored = WeeklyPlan::get(&state.db, household_id, week_start)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            StatusCode::NOT_FOUND,
            "No plan found for this week".to_string(),
        ))?;
    let mut plan = load_stored_plan(stored)?;

    let (settings, names) = plan_inputs(&state, household_id).await?;
    let ctx = PromptContext {
        green: &names.green,
        amber: &names.amber,
        red: &names.red,
        risk_level: settings.risk_level,
        prep_time: &settings.prep_time_preference,
        appetite: &settings.kids_appetite,
    };
    let prompt = slot_prompt(&ctx, existing_meal);

    let raw = state.ai.complete(&prompt).await.map_err(|e| {
        error!(error = %e, household_id = %household_id, "reshuffle call failed");
        (StatusCode::BAD_GATEWAY, "Failed to reshuffle meal".into())
    })?;

    let parsed = parse_model_json(&raw).map_err(|e| {
        error!(error = %e, raw = %raw, "AI returned invalid JSON");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI returned invalid JSON".to_string(),
        )
    })?;

    let meal = parsed
        .get("meal")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            error!(raw = %raw, "AI response is missing the meal field");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI did not return a meal".to_string(),
            )
        })?
        .to_string();

    // Rejecting a meal is a signal about the foods inside it.
    apply_rejection_downgrade(&state.db, household_id, existing_meal)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "rejection downgrade failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    plan.entry(payload.day)
        .or_default()
        .set_slot(payload.slot, meal.clone());

    let plan_json = serde_json::to_value(&plan)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    WeeklyPlan::upsert(&state.db, household_id, week_start, &plan_json)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "save plan failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save plan".into())
        })?;

    info!(
        household_id = %household_id,
        day = %payload.day,
        slot = payload.slot.as_str(),
        "slot reshuffled"
    );
    Ok(Json(ReshuffleResponse { meal }))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(week_start): Path<String>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let week_start =
        parse_date(&week_start).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let household_id = household_for_user(&state.db, user_id).await?;

    let stored = WeeklyPlan::get(&state.db, household_id, week_start)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            StatusCode::NOT_FOUND,
            "No plan found for this week".to_string(),
        ))?;

    Ok(Json(plan_response(week_start, load_stored_plan(stored)?)))
}

#[instrument(skip(state, payload))]
pub async fn put_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(week_start): Path<String>,
    Json(payload): Json<UpdatePlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let week_start =
        parse_date(&week_start).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let household_id = household_for_user(&state.db, user_id).await?;

    let plan_json = serde_json::to_value(&payload.plan)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    WeeklyPlan::upsert(&state.db, household_id, week_start, &plan_json)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "save plan failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save plan".into())
        })?;

    Ok(Json(plan_response(week_start, payload.plan)))
}

#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(week_start): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let week_start =
        parse_date(&week_start).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let household_id = household_for_user(&state.db, user_id).await?;

    let deleted = WeeklyPlan::delete(&state.db, household_id, week_start)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "delete plan failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete plan".into())
        })?;

    if !deleted {
        return Err((
            StatusCode::NOT_FOUND,
            "No plan found for this week".into(),
        ));
    }

    info!(household_id = %household_id, week_start = %week_start, "plan deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, payload))]
pub async fn copy_last_week(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CopyLastWeekRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let week_start = resolve_week_start(payload.week_start.as_deref())?;
    let household_id = household_for_user(&state.db, user_id).await?;

    let existing = WeeklyPlan::get(&state.db, household_id, week_start)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            "This week already has a plan".into(),
        ));
    }

    let previous = WeeklyPlan::get(&state.db, household_id, previous_week(week_start))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            StatusCode::NOT_FOUND,
            "No plan found for last week".to_string(),
        ))?;

    let plan = load_stored_plan(previous)?;

    let plan_json = serde_json::to_value(&plan)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    WeeklyPlan::upsert(&state.db, household_id, week_start, &plan_json)
        .await
        .map_err(|e| {
            error!(error = %e, household_id = %household_id, "save plan failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save plan".into())
        })?;

    info!(household_id = %household_id, week_start = %week_start, "copied last week's plan");
    Ok(Json(plan_response(week_start, plan)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiProvider, FakeAi};
    use crate::plans::plan::Day;
    use crate::plans::skeleton::{DaySelection, SelectionMap};

    fn selection(days: &[(Day, bool, bool)]) -> SelectionMap {
        days.iter()
            .map(|(day, lunch, dinner)| {
                (
                    *day,
                    DaySelection {
                        lunch: *lunch,
                        dinner: *dinner,
                    },
                )
            })
            .collect()
    }

    // Skeleton -> prompt -> provider -> normalize -> reconcile, without a
    // database. The fake stands in for the generation endpoint.
    #[tokio::test]
    async fn generation_pipeline_with_fake_provider() {
        let selection = selection(&[(Day::Monday, true, false), (Day::Wednesday, false, true)]);
        let skeleton = build_skeleton(&selection);

        let green = vec!["Chicken".to_string(), "Rice".to_string()];
        let ctx = PromptContext {
            green: &green,
            amber: &[],
            red: &[],
            risk_level: 5,
            prep_time: "standard",
            appetite: "medium",
        };
        let prompt = full_plan_prompt(&ctx, &skeleton);

        let fake = FakeAi::with_response(
            "family meal planner",
            r#"```json
{"mealPlan": {"Monday": {"lunch": "Chicken and rice"}, "Tuesday": {"dinner": "Soup"}}}
```"#,
        );
        let raw = fake.complete(&prompt).await.expect("fake responds");

        let parsed = parse_model_json(&raw).expect("model output parses");
        let merged = reconcile(&skeleton, extract_plan_object(&parsed));

        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.get(&Day::Monday).unwrap().lunch.as_deref(),
            Some("Chicken and rice")
        );
        // Wednesday was requested but never filled; Tuesday was invented.
        assert_eq!(
            merged.get(&Day::Wednesday).unwrap().dinner.as_deref(),
            Some("TBD")
        );
        assert!(!merged.contains_key(&Day::Tuesday));
    }

    #[tokio::test]
    async fn pipeline_fails_on_commentary_instead_of_json() {
        let fake = FakeAi::new().with_default_response("Sorry, I can't plan meals today.");
        let raw = fake.complete("anything").await.unwrap();
        assert!(parse_model_json(&raw).is_err());
    }

    #[test]
    fn week_start_falls_back_to_current_monday() {
        let resolved = resolve_week_start(None).expect("current week resolves");
        assert_eq!(resolved, current_week_start());
        let explicit = resolve_week_start(Some("2024-01-08")).expect("explicit date resolves");
        assert_eq!(format_date(explicit), "2024-01-08");
        assert!(resolve_week_start(Some("not-a-date")).is_err());
    }
}

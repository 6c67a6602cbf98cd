use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::households::household_for_user;
use crate::items::dto::{
    BulkCreateRequest, BulkCreateResponse, CreateItemRequest, GroupedItemsResponse, ItemDto,
    ItemKind, ListItemsQuery, Rating, UpdateItemRequest,
};
use crate::items::repo::RatedItem;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/bulk", post(bulk_create_items))
        .route("/items/favourites", get(list_favourites))
        .route("/items/:id", patch(update_item).delete(delete_item))
}

/// Confidence a brand-new food starts with.
const NEW_FOOD_CONFIDENCE: i32 = 7;

/// Onboarding requires a minimum seed so generation has something to work with.
const MIN_BULK_ITEMS: usize = 3;

fn to_dto(item: RatedItem) -> ItemDto {
    ItemDto {
        id: item.item_id,
        name: item.name,
        kind: item.kind,
        category: item.category,
        rating: item.rating,
        confidence_score: item.confidence_score,
        is_favourite: item.is_favourite,
    }
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<GroupedItemsResponse>, (StatusCode, String)> {
    let kind = match query.kind.as_deref() {
        Some(raw) => Some(
            raw.parse::<ItemKind>()
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        ),
        None => None,
    };

    let household_id = household_for_user(&state.db, user_id).await?;

    let items =
        RatedItem::list_for_household(&state.db, household_id, kind.map(|k| k.as_str()))
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let mut grouped = GroupedItemsResponse {
        green: Vec::new(),
        amber: Vec::new(),
        red: Vec::new(),
    };
    for item in items {
        match item.rating.parse::<Rating>() {
            Ok(Rating::Green) => grouped.green.push(to_dto(item)),
            Ok(Rating::Amber) => grouped.amber.push(to_dto(item)),
            Ok(Rating::Red) => grouped.red.push(to_dto(item)),
            Err(_) => {
                warn!(item_id = %item.item_id, rating = %item.rating, "skipping unknown rating");
            }
        }
    }

    Ok(Json(grouped))
}

#[instrument(skip(state))]
pub async fn list_favourites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ItemDto>>, (StatusCode, String)> {
    let household_id = household_for_user(&state.db, user_id).await?;

    let items = RatedItem::favourites(&state.db, household_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(items.into_iter().map(to_dto).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateItemRequest>,
) -> Result<Json<ItemDto>, (StatusCode, String)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }

    let household_id = household_for_user(&state.db, user_id).await?;

    // New items land on the green list; foods start with a confidence score.
    let confidence = match payload.kind {
        ItemKind::Food => Some(NEW_FOOD_CONFIDENCE),
        ItemKind::Meal => None,
    };

    let item = RatedItem::create(
        &state.db,
        household_id,
        user_id,
        name,
        payload.kind.as_str(),
        payload.category.as_deref(),
        Rating::Green.as_str(),
        confidence,
    )
    .await
    .map_err(|e| {
        error!(error = %e, household_id = %household_id, "create item failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(item_id = %item.item_id, name = %item.name, "item created");
    Ok(Json(to_dto(item)))
}

#[instrument(skip(state, payload))]
pub async fn bulk_create_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<BulkCreateRequest>,
) -> Result<Json<BulkCreateResponse>, (StatusCode, String)> {
    let entries: Vec<_> = payload
        .items
        .into_iter()
        .filter(|e| !e.name.trim().is_empty())
        .collect();

    if entries.len() < MIN_BULK_ITEMS {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please add at least 3 meals or foods".into(),
        ));
    }

    let household_id = household_for_user(&state.db, user_id).await?;

    let mut created = 0;
    for entry in entries {
        let confidence = match entry.kind {
            ItemKind::Food => Some(NEW_FOOD_CONFIDENCE),
            ItemKind::Meal => None,
        };
        RatedItem::create(
            &state.db,
            household_id,
            user_id,
            entry.name.trim(),
            entry.kind.as_str(),
            None,
            Rating::Green.as_str(),
            confidence,
        )
        .await
        .map_err(|e| {
            error!(error = %e, name = %entry.name, "bulk create item failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
        created += 1;
    }

    info!(household_id = %household_id, created, "items seeded");
    Ok(Json(BulkCreateResponse { created }))
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ItemDto>, (StatusCode, String)> {
    if let Some(score) = payload.confidence_score {
        if !(0..=10).contains(&score) {
            return Err((
                StatusCode::BAD_REQUEST,
                "confidence_score must be between 0 and 10".into(),
            ));
        }
    }

    let household_id = household_for_user(&state.db, user_id).await?;

    // An explicit rating wins; a confidence-only update re-derives the band.
    let rating = match (payload.rating, payload.confidence_score) {
        (Some(rating), _) => Some(rating),
        (None, Some(score)) => Some(Rating::from_confidence(score)),
        (None, None) => None,
    };

    let updated = RatedItem::update_link(
        &state.db,
        household_id,
        item_id,
        rating.map(|r| r.as_str()),
        payload.confidence_score,
        payload.is_favourite,
    )
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    if !updated {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    }

    let item = RatedItem::get(&state.db, household_id, item_id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Item not found".to_string()))?;

    Ok(Json(to_dto(item)))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let household_id = household_for_user(&state.db, user_id).await?;

    let deleted = RatedItem::delete(&state.db, household_id, item_id)
        .await
        .map_err(|e| {
            error!(error = %e, item_id = %item_id, "delete item failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

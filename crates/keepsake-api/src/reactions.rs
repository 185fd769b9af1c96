use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use keepsake_types::api::{PhotoReactionsResponse, ToggleReactionRequest, ToggleReactionResponse};
use keepsake_types::models::{Emoji, ReactionCounts};

use crate::error::ApiError;
use crate::state::{AppState, with_db};

/// Toggle the requesting device's reaction on a photo.
pub async fn toggle(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    Json(req): Json<ToggleReactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = photo_id.clone();
    let known = with_db(&state, move |db| db.get_photo(&id))
        .await?
        .is_some_and(|p| p.event_id == req.event_id);
    if !known {
        return Err(ApiError::NotFound("photo not found".into()));
    }

    let action = with_db(&state, move |db| {
        db.toggle_reaction(
            &photo_id,
            &req.event_id,
            &req.device_id,
            req.emoji.as_str(),
        )
    })
    .await?;

    Ok(Json(ToggleReactionResponse { action }))
}

#[derive(Debug, Deserialize)]
pub struct ReactionQuery {
    pub device_id: Option<String>,
}

pub async fn get_by_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    Query(query): Query<ReactionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = with_db(&state, move |db| db.get_photo_reactions(&photo_id)).await?;

    let mut counts = ReactionCounts::default();
    let mut user_emoji = None;
    for row in &rows {
        if let Some(emoji) = Emoji::parse(&row.emoji) {
            counts.add(emoji);
            if query.device_id.as_deref() == Some(row.device_id.as_str()) {
                user_emoji = Some(emoji);
            }
        }
    }

    Ok(Json(PhotoReactionsResponse { counts, user_emoji }))
}

/// Reaction tallies for a whole event keyed by photo id, for gallery badges.
pub async fn get_counts_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let counts: HashMap<String, ReactionCounts> =
        with_db(&state, move |db| db.get_event_reaction_counts(&event_id)).await?;

    Ok(Json(counts))
}

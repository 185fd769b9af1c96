use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use keepsake_types::api::{CreateGuestRequest, GuestResponse, GuestSummary, GuestWithActivity};

use crate::error::ApiError;
use crate::state::{AppState, with_db};

#[derive(Debug, Deserialize)]
pub struct GuestListQuery {
    pub couple_secret: String,
}

/// Organizer-only: guests annotated with upload activity.
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<GuestListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = event_id.clone();
    let valid = with_db(&state, move |db| {
        db.verify_couple_secret(&id, &query.couple_secret)
    })
    .await?;
    if !valid {
        return Err(ApiError::Forbidden("invalid couple secret".into()));
    }

    let rows = with_db(&state, move |db| db.get_guests_with_photo_counts(&event_id)).await?;

    let guests: Vec<GuestWithActivity> = rows
        .into_iter()
        .map(|row| GuestWithActivity {
            id: row.id,
            name: row.name,
            device_id: row.device_id,
            created_at: row.created_at,
            photo_count: row.photo_count,
            latest_photo_at: row.latest_photo_at,
        })
        .collect();

    Ok(Json(guests))
}

pub async fn get_by_device(
    State(state): State<AppState>,
    Path((event_id, device_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let guest = with_db(&state, move |db| {
        db.get_guest_by_device(&event_id, &device_id)
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("guest not found".into()))?;

    Ok(Json(GuestResponse {
        id: guest.id,
        event_id: guest.event_id,
        name: guest.name,
        device_id: guest.device_id,
        created_at: guest.created_at,
    }))
}

/// Name lookup for photo attribution. The guest must belong to the event in
/// the path; a guest id from another event reads as absent.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((event_id, guest_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let guest = with_db(&state, move |db| db.get_guest(&guest_id))
        .await?
        .filter(|g| g.event_id == event_id)
        .ok_or_else(|| ApiError::NotFound("guest not found".into()))?;

    Ok(Json(GuestSummary {
        id: guest.id,
        name: guest.name,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<CreateGuestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = with_db(&state, move |db| {
        db.create_guest(&event_id, &req.name, &req.device_id)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id })),
    ))
}

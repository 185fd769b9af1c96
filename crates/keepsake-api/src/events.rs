use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use futures_util::future::join_all;

use keepsake_db::models::EventRow;
use keepsake_types::api::{
    CreateEventRequest, CreateEventResponse, DeleteEventRequest, EventPublic, OgDataResponse,
    RemoveCoverRequest, SetCoverRequest, UpdateEventRequest, VerifySecretRequest,
    VerifySecretResponse,
};

use crate::error::ApiError;
use crate::state::{AppState, with_db};
use crate::uploads::{upload_url, validate_storage_id};

fn to_public(event: EventRow) -> EventPublic {
    EventPublic {
        cover_url: event.cover_photo_id.as_deref().map(upload_url),
        id: event.id,
        name: event.name,
        slug: event.slug,
        date: event.date,
        created_at: event.created_at,
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = with_db(&state, move |db| {
        db.create_event(
            &req.name,
            req.date,
            req.slug.as_deref(),
            req.couple_secret.as_deref(),
        )
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            id: created.id,
            slug: created.slug,
            couple_secret: created.couple_secret,
        }),
    ))
}

pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event = with_db(&state, move |db| db.get_event_by_slug(&slug))
        .await?
        .ok_or_else(|| ApiError::NotFound("event not found".into()))?;

    Ok(Json(to_public(event)))
}

pub async fn og_data(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event = with_db(&state, move |db| db.get_event_by_slug(&slug))
        .await?
        .ok_or_else(|| ApiError::NotFound("event not found".into()))?;

    let event_id = event.id.clone();
    let (photo_count, guest_count) = with_db(&state, move |db| {
        Ok((
            db.count_public_event_photos(&event_id)?,
            db.guest_count(&event_id)?,
        ))
    })
    .await?;

    Ok(Json(OgDataResponse {
        name: event.name,
        date: event.date,
        cover_url: event.cover_photo_id.as_deref().map(upload_url),
        photo_count,
        guest_count,
    }))
}

pub async fn verify_secret(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<VerifySecretRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let valid = with_db(&state, move |db| {
        db.verify_couple_secret(&event_id, &req.couple_secret)
    })
    .await?;

    Ok(Json(VerifySecretResponse { valid }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    with_db(&state, move |db| {
        db.update_event(
            &event_id,
            &req.couple_secret,
            req.name.as_deref(),
            req.date,
        )
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_cover(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<SetCoverRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_storage_id(&req.storage_id)?;

    let previous = with_db(&state, move |db| {
        db.set_cover_photo(&event_id, &req.couple_secret, &req.storage_id)
    })
    .await?;

    if let Some(old) = previous {
        state.storage.discard(&old).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_cover(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<RemoveCoverRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let previous = with_db(&state, move |db| {
        db.remove_cover_photo(&event_id, &req.couple_secret)
    })
    .await?;

    if let Some(old) = previous {
        state.storage.discard(&old).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an event and everything it owns. Binaries go first (best-effort,
/// in parallel), then the record cascade runs in one transaction.
pub async fn remove(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<DeleteEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = event_id.clone();
    let secret = req.couple_secret.clone();
    let valid = with_db(&state, move |db| db.verify_couple_secret(&id, &secret)).await?;
    if !valid {
        return Err(ApiError::Forbidden("invalid couple secret".into()));
    }

    let id = event_id.clone();
    let storage_ids = with_db(&state, move |db| db.event_storage_ids(&id)).await?;
    join_all(storage_ids.iter().map(|sid| state.storage.discard(sid))).await;

    with_db(&state, move |db| {
        db.delete_event(&event_id, &req.couple_secret)
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

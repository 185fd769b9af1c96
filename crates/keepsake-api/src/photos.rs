use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use keepsake_db::models::PhotoRow;
use keepsake_types::api::{
    CreatePhotoRequest, DeletePhotoRequest, PhotoResponse, ToggleVisibilityRequest,
    ToggleVisibilityResponse, UpdateCaptionRequest,
};

use crate::error::ApiError;
use crate::state::{AppState, with_db};
use crate::uploads::{upload_url, validate_storage_id};

const MAX_CAPTION_CHARS: usize = 200;

fn to_response(photo: PhotoRow) -> PhotoResponse {
    PhotoResponse {
        url: upload_url(&photo.storage_id),
        id: photo.id,
        event_id: photo.event_id,
        guest_id: photo.guest_id,
        storage_id: photo.storage_id,
        is_public: photo.is_public,
        caption: photo.caption,
        created_at: photo.created_at,
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePhotoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_storage_id(&req.storage_id)?;

    let id = with_db(&state, move |db| {
        db.create_photo(&req.event_id, req.guest_id.as_deref(), &req.storage_id)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct PhotoListQuery {
    pub couple_secret: Option<String>,
}

/// Gallery listing. A valid couple secret widens the listing to hidden
/// photos; anything else sees the public set. This is the only
/// authorization gate on read access.
pub async fn get_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<PhotoListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let photos = with_db(&state, move |db| {
        if let Some(secret) = &query.couple_secret {
            if db.verify_couple_secret(&event_id, secret)? {
                return db.get_event_photos(&event_id);
            }
        }
        db.get_public_event_photos(&event_id)
    })
    .await?;

    let photos: Vec<PhotoResponse> = photos.into_iter().map(to_response).collect();
    Ok(Json(photos))
}

/// Delete a photo. The organizer (valid couple secret) may delete any photo
/// in the event; a guest may delete only their own; no credentials is
/// Forbidden.
pub async fn remove(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    Json(req): Json<DeletePhotoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = photo_id.clone();
    let photo = with_db(&state, move |db| db.get_photo(&id))
        .await?
        .filter(|p| p.event_id == req.event_id)
        .ok_or_else(|| ApiError::NotFound("photo not found".into()))?;

    let organizer = match &req.couple_secret {
        Some(secret) => {
            let event_id = req.event_id.clone();
            let secret = secret.clone();
            with_db(&state, move |db| db.verify_couple_secret(&event_id, &secret)).await?
        }
        None => false,
    };

    if !organizer {
        let Some(device_id) = req.device_id.clone() else {
            return Err(ApiError::Forbidden("no valid credentials provided".into()));
        };
        let event_id = req.event_id.clone();
        let guest = with_db(&state, move |db| db.get_guest_by_device(&event_id, &device_id))
            .await?
            .ok_or_else(|| ApiError::Forbidden("guest not found for this device".into()))?;

        if photo.guest_id.as_deref() != Some(guest.id.as_str()) {
            return Err(ApiError::Forbidden(
                "you can only delete your own photos".into(),
            ));
        }
    }

    state.storage.discard(&photo.storage_id).await;
    with_db(&state, move |db| db.delete_photo(&photo_id, &req.event_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Caption a photo. Only the guest who uploaded it may do so, resolved via
/// their device id.
pub async fn update_caption(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    Json(req): Json<UpdateCaptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = req.event_id.clone();
    let device_id = req.device_id.clone();
    let guest = with_db(&state, move |db| db.get_guest_by_device(&event_id, &device_id))
        .await?
        .ok_or_else(|| ApiError::Forbidden("guest not found for this device".into()))?;

    let id = photo_id.clone();
    let photo = with_db(&state, move |db| db.get_photo(&id))
        .await?
        .filter(|p| p.event_id == req.event_id)
        .ok_or_else(|| ApiError::NotFound("photo not found".into()))?;

    if photo.guest_id.as_deref() != Some(guest.id.as_str()) {
        return Err(ApiError::Forbidden(
            "you can only caption your own photos".into(),
        ));
    }

    if let Some(caption) = &req.caption {
        if caption.chars().count() > MAX_CAPTION_CHARS {
            return Err(ApiError::BadRequest(format!(
                "caption must be {MAX_CAPTION_CHARS} characters or less"
            )));
        }
    }

    with_db(&state, move |db| {
        db.update_photo_caption(&photo_id, req.caption.as_deref())
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Organizer moderation: flip a photo between public and hidden.
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
    Json(req): Json<ToggleVisibilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let valid = with_db(&state, move |db| {
        db.verify_couple_secret(&req.event_id, &req.couple_secret)
    })
    .await?;
    if !valid {
        return Err(ApiError::Forbidden("invalid couple secret".into()));
    }

    let is_public = with_db(&state, move |db| db.toggle_photo_visibility(&photo_id)).await?;
    Ok(Json(ToggleVisibilityResponse { is_public }))
}

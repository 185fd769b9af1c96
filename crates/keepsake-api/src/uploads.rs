use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use uuid::Uuid;

use keepsake_types::api::UploadResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// 10 MB cap per photo upload.
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Public URL for a stored binary.
pub fn upload_url(storage_id: &str) -> String {
    format!("/api/uploads/{storage_id}")
}

/// Storage ids are UUIDs minted at upload time; anything else is rejected
/// before it can reach the filesystem (path traversal).
pub(crate) fn validate_storage_id(storage_id: &str) -> Result<(), ApiError> {
    storage_id
        .parse::<Uuid>()
        .map(|_| ())
        .map_err(|_| ApiError::BadRequest("invalid storage id".into()))
}

/// POST /api/uploads — accepts raw bytes (application/octet-stream), saves
/// to the upload directory, returns `{storage_id, size}`.
pub async fn upload(
    State(state): State<AppState>,
    bytes: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("upload is empty".into()));
    }
    if bytes.len() > MAX_UPLOAD_SIZE {
        return Err(ApiError::BadRequest(format!(
            "upload exceeds the {MAX_UPLOAD_SIZE} byte limit"
        )));
    }

    let storage_id = Uuid::new_v4().to_string();
    state.storage.save(&storage_id, &bytes).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            storage_id,
            size: bytes.len() as u64,
        }),
    ))
}

/// GET /api/uploads/{storage_id} — serves the stored binary back.
pub async fn download(
    State(state): State<AppState>,
    Path(storage_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_storage_id(&storage_id)?;

    let bytes = state
        .storage
        .read(&storage_id)
        .await
        .map_err(|_| ApiError::NotFound("upload not found".into()))?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    ))
}

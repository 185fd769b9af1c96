pub mod error;
pub mod events;
pub mod guests;
pub mod photos;
pub mod reactions;
pub mod state;
pub mod storage;
pub mod uploads;

use axum::extract::DefaultBodyLimit;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};

use crate::state::AppState;

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        // Events
        .route("/api/events", post(events::create))
        .route("/api/events/by-slug/{slug}", get(events::get_by_slug))
        .route("/api/events/by-slug/{slug}/og", get(events::og_data))
        .route(
            "/api/events/{event_id}",
            patch(events::update).delete(events::remove),
        )
        .route(
            "/api/events/{event_id}/verify-secret",
            post(events::verify_secret),
        )
        .route(
            "/api/events/{event_id}/cover",
            put(events::set_cover).delete(events::remove_cover),
        )
        // Guests
        .route(
            "/api/events/{event_id}/guests",
            get(guests::list_by_event).post(guests::create),
        )
        .route(
            "/api/events/{event_id}/guests/by-device/{device_id}",
            get(guests::get_by_device),
        )
        .route(
            "/api/events/{event_id}/guests/{guest_id}",
            get(guests::get_by_id),
        )
        // Photos
        .route("/api/events/{event_id}/photos", get(photos::get_by_event))
        .route("/api/photos", post(photos::create))
        .route("/api/photos/{photo_id}", delete(photos::remove))
        .route("/api/photos/{photo_id}/caption", patch(photos::update_caption))
        .route(
            "/api/photos/{photo_id}/visibility",
            post(photos::toggle_visibility),
        )
        // Reactions
        .route(
            "/api/photos/{photo_id}/reactions",
            post(reactions::toggle).get(reactions::get_by_photo),
        )
        .route(
            "/api/events/{event_id}/reactions",
            get(reactions::get_counts_by_event),
        )
        // Uploads
        .route(
            "/api/uploads",
            post(uploads::upload)
                .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_SIZE + 1024)),
        )
        .route("/api/uploads/{storage_id}", get(uploads::download))
        .with_state(state)
}

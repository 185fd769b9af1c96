use serde::{Deserialize, Serialize};

use crate::models::{Emoji, ReactionCounts, ToggleAction};

// -- Events --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEventRequest {
    pub name: String,
    /// Event date as Unix milliseconds.
    pub date: Option<i64>,
    /// Custom slug; generated when absent.
    pub slug: Option<String>,
    /// Custom couple secret; generated when absent.
    pub couple_secret: Option<String>,
}

/// The couple secret is returned exactly once, here. It is never
/// re-displayed, so the caller must persist it.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub id: String,
    pub slug: String,
    pub couple_secret: String,
}

/// Event shape safe to show anyone who has the link. Never carries the
/// couple secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventPublic {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub date: Option<i64>,
    pub cover_url: Option<String>,
    pub created_at: i64,
}

/// Data for link-preview rendering of an event page.
#[derive(Debug, Serialize, Deserialize)]
pub struct OgDataResponse {
    pub name: String,
    pub date: Option<i64>,
    pub cover_url: Option<String>,
    pub photo_count: i64,
    pub guest_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifySecretRequest {
    pub couple_secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifySecretResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventRequest {
    pub couple_secret: String,
    pub name: Option<String>,
    pub date: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteEventRequest {
    pub couple_secret: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetCoverRequest {
    pub couple_secret: String,
    pub storage_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveCoverRequest {
    pub couple_secret: String,
}

// -- Guests --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGuestRequest {
    pub name: String,
    pub device_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuestResponse {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub device_id: String,
    pub created_at: i64,
}

/// Minimal guest shape used for photo attribution.
#[derive(Debug, Serialize, Deserialize)]
pub struct GuestSummary {
    pub id: String,
    pub name: String,
}

/// Guest entry in the organizer dashboard, annotated with upload activity.
#[derive(Debug, Serialize, Deserialize)]
pub struct GuestWithActivity {
    pub id: String,
    pub name: String,
    pub device_id: String,
    pub created_at: i64,
    pub photo_count: i64,
    pub latest_photo_at: Option<i64>,
}

// -- Photos --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePhotoRequest {
    pub event_id: String,
    pub guest_id: Option<String>,
    pub storage_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: String,
    pub event_id: String,
    pub guest_id: Option<String>,
    pub storage_id: String,
    pub is_public: bool,
    pub caption: Option<String>,
    pub created_at: i64,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeletePhotoRequest {
    pub event_id: String,
    pub couple_secret: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCaptionRequest {
    pub event_id: String,
    pub device_id: String,
    pub caption: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleVisibilityRequest {
    pub event_id: String,
    pub couple_secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleVisibilityResponse {
    pub is_public: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub storage_id: String,
    pub size: u64,
}

// -- Reactions --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleReactionRequest {
    pub event_id: String,
    pub device_id: String,
    pub emoji: Emoji,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleReactionResponse {
    pub action: ToggleAction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoReactionsResponse {
    pub counts: ReactionCounts,
    /// The requesting device's current reaction, when a device id was given.
    pub user_emoji: Option<Emoji>,
}

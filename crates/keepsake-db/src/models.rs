#[derive(Debug, Clone)]
pub struct EventRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub date: Option<i64>,
    pub couple_secret: String,
    pub cover_photo_id: Option<String>,
    pub created_at: i64,
}

/// Returned once at event creation; the secret is never re-displayed.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub id: String,
    pub slug: String,
    pub couple_secret: String,
}

#[derive(Debug, Clone)]
pub struct GuestRow {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub device_id: String,
    pub created_at: i64,
}

/// Guest joined with upload activity for the organizer dashboard.
#[derive(Debug, Clone)]
pub struct GuestActivityRow {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub device_id: String,
    pub created_at: i64,
    pub photo_count: i64,
    pub latest_photo_at: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct PhotoRow {
    pub id: String,
    pub event_id: String,
    pub guest_id: Option<String>,
    pub storage_id: String,
    pub is_public: bool,
    pub caption: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct ReactionRow {
    pub id: String,
    pub photo_id: String,
    pub event_id: String,
    pub device_id: String,
    pub emoji: String,
    pub created_at: i64,
}

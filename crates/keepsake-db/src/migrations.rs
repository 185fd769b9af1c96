use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS events (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            slug            TEXT NOT NULL UNIQUE,
            date            INTEGER,
            couple_secret   TEXT NOT NULL,
            cover_photo_id  TEXT,
            created_at      INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS guests (
            id          TEXT PRIMARY KEY,
            event_id    TEXT NOT NULL REFERENCES events(id),
            name        TEXT NOT NULL,
            device_id   TEXT NOT NULL,
            created_at  INTEGER NOT NULL,
            UNIQUE(event_id, device_id)
        );

        CREATE INDEX IF NOT EXISTS idx_guests_event
            ON guests(event_id);

        CREATE TABLE IF NOT EXISTS photos (
            id          TEXT PRIMARY KEY,
            event_id    TEXT NOT NULL REFERENCES events(id),
            guest_id    TEXT REFERENCES guests(id),
            storage_id  TEXT NOT NULL,
            is_public   INTEGER NOT NULL DEFAULT 1,
            caption     TEXT,
            created_at  INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_photos_event
            ON photos(event_id, created_at);

        CREATE INDEX IF NOT EXISTS idx_photos_event_public
            ON photos(event_id, is_public);

        CREATE INDEX IF NOT EXISTS idx_photos_guest
            ON photos(guest_id);

        CREATE TABLE IF NOT EXISTS reactions (
            id          TEXT PRIMARY KEY,
            photo_id    TEXT NOT NULL REFERENCES photos(id),
            event_id    TEXT NOT NULL REFERENCES events(id),
            device_id   TEXT NOT NULL,
            emoji       TEXT NOT NULL,
            created_at  INTEGER NOT NULL,
            UNIQUE(photo_id, device_id)
        );

        CREATE INDEX IF NOT EXISTS idx_reactions_event
            ON reactions(event_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}

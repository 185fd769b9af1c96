use rusqlite::{OptionalExtension, params};

use crate::events::event_exists;
use crate::models::{GuestActivityRow, GuestRow};
use crate::{Database, Result, StoreError, new_id, now_ms};

impl Database {
    pub fn get_guest_by_device(
        &self,
        event_id: &str,
        device_id: &str,
    ) -> Result<Option<GuestRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, event_id, name, device_id, created_at
                     FROM guests WHERE event_id = ?1 AND device_id = ?2",
                    params![event_id, device_id],
                    row_to_guest,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn get_guest(&self, guest_id: &str) -> Result<Option<GuestRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, event_id, name, device_id, created_at
                     FROM guests WHERE id = ?1",
                    [guest_id],
                    row_to_guest,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Register a device as a guest of an event. The (event, device) pair is
    /// unique at the schema level, so concurrent first uploads from the same
    /// device converge on one record: a conflicting insert is a no-op and
    /// the existing guest's id is returned.
    pub fn create_guest(&self, event_id: &str, name: &str, device_id: &str) -> Result<String> {
        self.with_conn(|conn| {
            if !event_exists(conn, event_id)? {
                return Err(StoreError::NotFound("event"));
            }

            conn.execute(
                "INSERT INTO guests (id, event_id, name, device_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(event_id, device_id) DO NOTHING",
                params![new_id(), event_id, name, device_id, now_ms()],
            )?;

            let id = conn.query_row(
                "SELECT id FROM guests WHERE event_id = ?1 AND device_id = ?2",
                params![event_id, device_id],
                |row| row.get(0),
            )?;
            Ok(id)
        })
    }

    pub fn guest_count(&self, event_id: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM guests WHERE event_id = ?1",
                [event_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    /// Guest list for the organizer dashboard: photo count and most recent
    /// upload per guest, active uploaders first (latest photo desc), then
    /// photoless guests by join time desc. One joined query, no N+1.
    pub fn get_guests_with_photo_counts(&self, event_id: &str) -> Result<Vec<GuestActivityRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT g.id, g.event_id, g.name, g.device_id, g.created_at,
                        COUNT(p.id) AS photo_count,
                        MAX(p.created_at) AS latest_photo_at
                 FROM guests g
                 LEFT JOIN photos p ON p.guest_id = g.id
                 WHERE g.event_id = ?1
                 GROUP BY g.id
                 ORDER BY (latest_photo_at IS NULL) ASC,
                          latest_photo_at DESC,
                          g.created_at DESC,
                          g.rowid DESC",
            )?;

            let rows = stmt
                .query_map([event_id], |row| {
                    Ok(GuestActivityRow {
                        id: row.get(0)?,
                        event_id: row.get(1)?,
                        name: row.get(2)?,
                        device_id: row.get(3)?,
                        created_at: row.get(4)?,
                        photo_count: row.get(5)?,
                        latest_photo_at: row.get(6)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn row_to_guest(row: &rusqlite::Row) -> rusqlite::Result<GuestRow> {
    Ok(GuestRow {
        id: row.get(0)?,
        event_id: row.get(1)?,
        name: row.get(2)?,
        device_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

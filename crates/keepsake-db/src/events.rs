use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{CreatedEvent, EventRow};
use crate::reactions::delete_event_reactions;
use crate::{Database, Result, StoreError, new_id, now_ms, slug};

impl Database {
    /// Insert a new event. Slug and couple secret are resolved (validated or
    /// generated) before the insert; the secret is returned exactly once.
    pub fn create_event(
        &self,
        name: &str,
        date: Option<i64>,
        custom_slug: Option<&str>,
        custom_secret: Option<&str>,
    ) -> Result<CreatedEvent> {
        self.with_conn(|conn| {
            let slug = slug::resolve_slug(conn, custom_slug)?;
            let couple_secret = slug::resolve_couple_secret(custom_secret)?;
            let id = new_id();

            conn.execute(
                "INSERT INTO events (id, name, slug, date, couple_secret, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, name, slug, date, couple_secret, now_ms()],
            )?;

            Ok(CreatedEvent {
                id,
                slug,
                couple_secret,
            })
        })
    }

    pub fn get_event(&self, event_id: &str) -> Result<Option<EventRow>> {
        self.with_conn(|conn| fetch_event(conn, event_id))
    }

    pub fn get_event_by_slug(&self, slug: &str) -> Result<Option<EventRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, slug, date, couple_secret, cover_photo_id, created_at
                     FROM events WHERE slug = ?1",
                    [slug],
                    row_to_event,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Plain equality against the stored secret. The secret is a shareable
    /// link capability, not a password, so no hashing or constant-time
    /// comparison applies here.
    pub fn verify_couple_secret(&self, event_id: &str, secret: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let event =
                fetch_event(conn, event_id)?.ok_or(StoreError::NotFound("event"))?;
            Ok(event.couple_secret == secret)
        })
    }

    /// Patch name and/or date; fields left as `None` keep their value.
    pub fn update_event(
        &self,
        event_id: &str,
        secret: &str,
        name: Option<&str>,
        date: Option<i64>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            authorize(conn, event_id, secret)?;
            conn.execute(
                "UPDATE events
                 SET name = COALESCE(?2, name), date = COALESCE(?3, date)
                 WHERE id = ?1",
                params![event_id, name, date],
            )?;
            Ok(())
        })
    }

    /// Point the event at a new cover binary. Returns the previous cover's
    /// storage id so the caller can discard the old binary.
    pub fn set_cover_photo(
        &self,
        event_id: &str,
        secret: &str,
        storage_id: &str,
    ) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let event = authorize(conn, event_id, secret)?;
            conn.execute(
                "UPDATE events SET cover_photo_id = ?2 WHERE id = ?1",
                params![event_id, storage_id],
            )?;
            Ok(event.cover_photo_id)
        })
    }

    pub fn remove_cover_photo(&self, event_id: &str, secret: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let event = authorize(conn, event_id, secret)?;
            conn.execute(
                "UPDATE events SET cover_photo_id = NULL WHERE id = ?1",
                [event_id],
            )?;
            Ok(event.cover_photo_id)
        })
    }

    /// Every storage id referenced by the event: all photo binaries plus the
    /// cover, for binary cleanup ahead of deletion.
    pub fn event_storage_ids(&self, event_id: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT storage_id FROM photos WHERE event_id = ?1")?;
            let mut ids = stmt
                .query_map([event_id], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let cover: Option<String> = conn
                .query_row(
                    "SELECT cover_photo_id FROM events WHERE id = ?1",
                    [event_id],
                    |row| row.get(0),
                )
                .optional()?
                .flatten();
            ids.extend(cover);

            Ok(ids)
        })
    }

    /// Delete the event and everything it owns. The record cascade runs in a
    /// single transaction so an interrupted delete cannot leave a partially
    /// cascaded database.
    pub fn delete_event(&self, event_id: &str, secret: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            authorize(conn, event_id, secret)?;

            let tx = conn.transaction()?;
            delete_event_reactions(&tx, event_id)?;
            tx.execute("DELETE FROM photos WHERE event_id = ?1", [event_id])?;
            tx.execute("DELETE FROM guests WHERE event_id = ?1", [event_id])?;
            tx.execute("DELETE FROM events WHERE id = ?1", [event_id])?;
            tx.commit()?;
            Ok(())
        })
    }
}

pub(crate) fn event_exists(conn: &Connection, event_id: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM events WHERE id = ?1", [event_id], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn fetch_event(conn: &Connection, event_id: &str) -> Result<Option<EventRow>> {
    let row = conn
        .query_row(
            "SELECT id, name, slug, date, couple_secret, cover_photo_id, created_at
             FROM events WHERE id = ?1",
            [event_id],
            row_to_event,
        )
        .optional()?;
    Ok(row)
}

/// Fetch the event and require a matching couple secret.
fn authorize(conn: &Connection, event_id: &str, secret: &str) -> Result<EventRow> {
    let event = fetch_event(conn, event_id)?.ok_or(StoreError::NotFound("event"))?;
    if event.couple_secret != secret {
        return Err(StoreError::Forbidden("invalid couple secret"));
    }
    Ok(event)
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        date: row.get(3)?,
        couple_secret: row.get(4)?,
        cover_photo_id: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::test_db;
    use crate::{StoreError, slug};

    #[test]
    fn create_returns_generated_slug_and_secret() {
        let db = test_db();
        let created = db.create_event("Sam & Lee", None, None, None).unwrap();

        assert_eq!(created.slug.len(), slug::SLUG_LEN);
        assert_eq!(created.couple_secret.len(), slug::SECRET_LEN);
        assert_ne!(created.slug, created.couple_secret);

        let event = db.get_event_by_slug(&created.slug).unwrap().unwrap();
        assert_eq!(event.id, created.id);
        assert_eq!(event.name, "Sam & Lee");
        assert!(event.date.is_none());
    }

    #[test]
    fn custom_slug_conflict_is_rejected() {
        let db = test_db();
        db.create_event("First", None, Some("our-wedding"), None)
            .unwrap();
        let err = db
            .create_event("Second", None, Some("our-wedding"), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken));
    }

    #[test]
    fn malformed_custom_slug_is_rejected() {
        let db = test_db();
        let err = db
            .create_event("Event", None, Some("-bad-"), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidSlug(_)));
    }

    #[test]
    fn verify_couple_secret_is_exact_match() {
        let db = test_db();
        let a = db.create_event("A", None, None, None).unwrap();
        let b = db.create_event("B", None, None, None).unwrap();

        assert!(db.verify_couple_secret(&a.id, &a.couple_secret).unwrap());
        assert!(!db.verify_couple_secret(&a.id, &b.couple_secret).unwrap());
        assert!(!db.verify_couple_secret(&a.id, "wrong").unwrap());
        assert!(matches!(
            db.verify_couple_secret("missing", &a.couple_secret),
            Err(StoreError::NotFound("event"))
        ));
    }

    #[test]
    fn update_patches_only_provided_fields() {
        let db = test_db();
        let created = db.create_event("Old name", Some(1000), None, None).unwrap();

        db.update_event(&created.id, &created.couple_secret, Some("New name"), None)
            .unwrap();
        let event = db.get_event(&created.id).unwrap().unwrap();
        assert_eq!(event.name, "New name");
        assert_eq!(event.date, Some(1000));

        let err = db
            .update_event(&created.id, "wrong", Some("Hijacked"), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));
    }

    #[test]
    fn cover_photo_swap_reports_previous_binary() {
        let db = test_db();
        let created = db.create_event("Event", None, None, None).unwrap();

        let old = db
            .set_cover_photo(&created.id, &created.couple_secret, "blob-1")
            .unwrap();
        assert_eq!(old, None);

        let old = db
            .set_cover_photo(&created.id, &created.couple_secret, "blob-2")
            .unwrap();
        assert_eq!(old.as_deref(), Some("blob-1"));

        let old = db
            .remove_cover_photo(&created.id, &created.couple_secret)
            .unwrap();
        assert_eq!(old.as_deref(), Some("blob-2"));
        assert!(
            db.get_event(&created.id)
                .unwrap()
                .unwrap()
                .cover_photo_id
                .is_none()
        );
    }

    #[test]
    fn delete_event_cascades_to_all_children() {
        let db = test_db();
        let created = db.create_event("Event", None, None, None).unwrap();
        let guest_id = db.create_guest(&created.id, "Alex", "device-1").unwrap();
        let photo_id = db
            .create_photo(&created.id, Some(&guest_id), "blob-1")
            .unwrap();
        db.toggle_reaction(&photo_id, &created.id, "device-1", "heart")
            .unwrap();

        let err = db.delete_event(&created.id, "wrong").unwrap_err();
        assert!(matches!(err, StoreError::Forbidden(_)));

        db.delete_event(&created.id, &created.couple_secret).unwrap();

        assert!(db.get_event(&created.id).unwrap().is_none());
        assert!(db.get_event_photos(&created.id).unwrap().is_empty());
        assert!(
            db.get_guests_with_photo_counts(&created.id)
                .unwrap()
                .is_empty()
        );
        assert!(
            db.get_event_reaction_counts(&created.id)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn storage_ids_include_photos_and_cover() {
        let db = test_db();
        let created = db.create_event("Event", None, None, None).unwrap();
        db.create_photo(&created.id, None, "blob-a").unwrap();
        db.create_photo(&created.id, None, "blob-b").unwrap();
        db.set_cover_photo(&created.id, &created.couple_secret, "blob-cover")
            .unwrap();

        let mut ids = db.event_storage_ids(&created.id).unwrap();
        ids.sort();
        assert_eq!(ids, ["blob-a", "blob-b", "blob-cover"]);
    }
}

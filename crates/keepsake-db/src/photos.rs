use rusqlite::{Connection, OptionalExtension, params};

use crate::events::event_exists;
use crate::models::PhotoRow;
use crate::reactions::delete_photo_reactions;
use crate::{Database, Result, StoreError, new_id, now_ms};

impl Database {
    /// Insert a photo record for a completed upload. Photos start public;
    /// hiding them is an organizer moderation action.
    pub fn create_photo(
        &self,
        event_id: &str,
        guest_id: Option<&str>,
        storage_id: &str,
    ) -> Result<String> {
        self.with_conn(|conn| {
            if !event_exists(conn, event_id)? {
                return Err(StoreError::NotFound("event"));
            }

            let id = new_id();
            conn.execute(
                "INSERT INTO photos (id, event_id, guest_id, storage_id, is_public, created_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5)",
                params![id, event_id, guest_id, storage_id, now_ms()],
            )?;
            Ok(id)
        })
    }

    pub fn get_photo(&self, photo_id: &str) -> Result<Option<PhotoRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, event_id, guest_id, storage_id, is_public, caption, created_at
                     FROM photos WHERE id = ?1",
                    [photo_id],
                    row_to_photo,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Organizer view: every photo in the event, hidden ones included.
    pub fn get_event_photos(&self, event_id: &str) -> Result<Vec<PhotoRow>> {
        self.with_conn(|conn| query_photos(conn, event_id, false))
    }

    /// Guest/public view: only photos still marked public.
    pub fn get_public_event_photos(&self, event_id: &str) -> Result<Vec<PhotoRow>> {
        self.with_conn(|conn| query_photos(conn, event_id, true))
    }

    pub fn count_public_event_photos(&self, event_id: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM photos WHERE event_id = ?1 AND is_public = 1",
                [event_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    /// Delete a photo record and its reactions in one transaction. The
    /// event id must match; a photo id recycled from another event is
    /// treated as absent.
    pub fn delete_photo(&self, photo_id: &str, event_id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            delete_photo_reactions(&tx, photo_id)?;
            let deleted = tx.execute(
                "DELETE FROM photos WHERE id = ?1 AND event_id = ?2",
                params![photo_id, event_id],
            )?;
            if deleted == 0 {
                return Err(StoreError::NotFound("photo"));
            }
            tx.commit()?;
            Ok(())
        })
    }

    /// Flip the photo's visibility and return the new value.
    pub fn toggle_photo_visibility(&self, photo_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let current: bool = conn
                .query_row(
                    "SELECT is_public FROM photos WHERE id = ?1",
                    [photo_id],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or(StoreError::NotFound("photo"))?;

            let next = !current;
            conn.execute(
                "UPDATE photos SET is_public = ?2 WHERE id = ?1",
                params![photo_id, next],
            )?;
            Ok(next)
        })
    }

    /// Set or clear a caption; an empty string clears it.
    pub fn update_photo_caption(&self, photo_id: &str, caption: Option<&str>) -> Result<()> {
        let caption = caption.filter(|c| !c.is_empty());
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE photos SET caption = ?2 WHERE id = ?1",
                params![photo_id, caption],
            )?;
            if updated == 0 {
                return Err(StoreError::NotFound("photo"));
            }
            Ok(())
        })
    }
}

fn query_photos(conn: &Connection, event_id: &str, public_only: bool) -> Result<Vec<PhotoRow>> {
    let sql = if public_only {
        "SELECT id, event_id, guest_id, storage_id, is_public, caption, created_at
         FROM photos WHERE event_id = ?1 AND is_public = 1
         ORDER BY created_at DESC, rowid DESC"
    } else {
        "SELECT id, event_id, guest_id, storage_id, is_public, caption, created_at
         FROM photos WHERE event_id = ?1
         ORDER BY created_at DESC, rowid DESC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([event_id], row_to_photo)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn row_to_photo(row: &rusqlite::Row) -> rusqlite::Result<PhotoRow> {
    Ok(PhotoRow {
        id: row.get(0)?,
        event_id: row.get(1)?,
        guest_id: row.get(2)?,
        storage_id: row.get(3)?,
        is_public: row.get(4)?,
        caption: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::test_db;
    use crate::{Database, StoreError};

    fn event(db: &Database) -> String {
        db.create_event("Event", None, None, None).unwrap().id
    }

    #[test]
    fn new_photos_are_public_by_default() {
        let db = test_db();
        let event_id = event(&db);
        let photo_id = db.create_photo(&event_id, None, "blob-1").unwrap();

        let photo = db.get_photo(&photo_id).unwrap().unwrap();
        assert!(photo.is_public);
        assert!(photo.guest_id.is_none());
        assert!(photo.caption.is_none());

        let public = db.get_public_event_photos(&event_id).unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, photo_id);
    }

    #[test]
    fn visibility_toggle_hides_from_public_listing_only() {
        let db = test_db();
        let event_id = event(&db);
        let photo_id = db.create_photo(&event_id, None, "blob-1").unwrap();

        assert!(!db.toggle_photo_visibility(&photo_id).unwrap());
        assert!(db.get_public_event_photos(&event_id).unwrap().is_empty());
        assert_eq!(db.get_event_photos(&event_id).unwrap().len(), 1);
        assert_eq!(db.count_public_event_photos(&event_id).unwrap(), 0);

        assert!(db.toggle_photo_visibility(&photo_id).unwrap());
        assert_eq!(db.get_public_event_photos(&event_id).unwrap().len(), 1);
    }

    #[test]
    fn caption_empty_string_clears() {
        let db = test_db();
        let event_id = event(&db);
        let photo_id = db.create_photo(&event_id, None, "blob-1").unwrap();

        db.update_photo_caption(&photo_id, Some("First dance")).unwrap();
        assert_eq!(
            db.get_photo(&photo_id).unwrap().unwrap().caption.as_deref(),
            Some("First dance")
        );

        db.update_photo_caption(&photo_id, Some("")).unwrap();
        assert!(db.get_photo(&photo_id).unwrap().unwrap().caption.is_none());

        assert!(matches!(
            db.update_photo_caption("missing", Some("x")),
            Err(StoreError::NotFound("photo"))
        ));
    }

    #[test]
    fn delete_requires_matching_event() {
        let db = test_db();
        let event_a = event(&db);
        let event_b = event(&db);
        let photo_id = db.create_photo(&event_a, None, "blob-1").unwrap();

        let err = db.delete_photo(&photo_id, &event_b).unwrap_err();
        assert!(matches!(err, StoreError::NotFound("photo")));
        assert!(db.get_photo(&photo_id).unwrap().is_some());

        db.delete_photo(&photo_id, &event_a).unwrap();
        assert!(db.get_photo(&photo_id).unwrap().is_none());
    }

    #[test]
    fn delete_removes_the_photos_reactions() {
        let db = test_db();
        let event_id = event(&db);
        let photo_id = db.create_photo(&event_id, None, "blob-1").unwrap();
        db.toggle_reaction(&photo_id, &event_id, "d1", "heart").unwrap();
        db.toggle_reaction(&photo_id, &event_id, "d2", "clap").unwrap();

        db.delete_photo(&photo_id, &event_id).unwrap();
        assert!(db.get_photo_reactions(&photo_id).unwrap().is_empty());
        assert!(db.get_event_reaction_counts(&event_id).unwrap().is_empty());
    }

    #[test]
    fn listings_are_newest_first() {
        let db = test_db();
        let event_id = event(&db);
        let p1 = db.create_photo(&event_id, None, "blob-1").unwrap();
        let p2 = db.create_photo(&event_id, None, "blob-2").unwrap();
        let p3 = db.create_photo(&event_id, None, "blob-3").unwrap();

        let ids: Vec<String> = db
            .get_event_photos(&event_id)
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, [p3, p2, p1]);
    }
}

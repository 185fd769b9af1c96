use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, params};

use keepsake_types::models::{Emoji, ReactionCounts, ToggleAction};

use crate::models::ReactionRow;
use crate::{Database, Result, new_id, now_ms};

impl Database {
    /// Three-way toggle for the one reaction a device may leave per photo:
    /// no existing reaction inserts, the same emoji removes, a different
    /// emoji re-points the existing row.
    pub fn toggle_reaction(
        &self,
        photo_id: &str,
        event_id: &str,
        device_id: &str,
        emoji: &str,
    ) -> Result<ToggleAction> {
        self.with_conn(|conn| {
            let existing: Option<(String, String)> = conn
                .query_row(
                    "SELECT id, emoji FROM reactions WHERE photo_id = ?1 AND device_id = ?2",
                    params![photo_id, device_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            match existing {
                Some((id, current)) if current == emoji => {
                    conn.execute("DELETE FROM reactions WHERE id = ?1", [&id])?;
                    Ok(ToggleAction::Removed)
                }
                Some((id, _)) => {
                    conn.execute(
                        "UPDATE reactions SET emoji = ?2 WHERE id = ?1",
                        params![id, emoji],
                    )?;
                    Ok(ToggleAction::Changed)
                }
                None => {
                    conn.execute(
                        "INSERT INTO reactions (id, photo_id, event_id, device_id, emoji, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![new_id(), photo_id, event_id, device_id, emoji, now_ms()],
                    )?;
                    Ok(ToggleAction::Added)
                }
            }
        })
    }

    pub fn get_photo_reactions(&self, photo_id: &str) -> Result<Vec<ReactionRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, photo_id, event_id, device_id, emoji, created_at
                 FROM reactions WHERE photo_id = ?1",
            )?;
            let rows = stmt
                .query_map([photo_id], row_to_reaction)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Per-photo reaction tallies for a whole event in one pass, so a
    /// gallery can render badges without a query per photo.
    pub fn get_event_reaction_counts(
        &self,
        event_id: &str,
    ) -> Result<HashMap<String, ReactionCounts>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT photo_id, emoji FROM reactions WHERE event_id = ?1")?;
            let rows = stmt
                .query_map([event_id], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let mut counts: HashMap<String, ReactionCounts> = HashMap::new();
            for (photo_id, emoji) in rows {
                if let Some(emoji) = Emoji::parse(&emoji) {
                    counts.entry(photo_id).or_default().add(emoji);
                }
            }
            Ok(counts)
        })
    }
}

pub(crate) fn delete_photo_reactions(conn: &Connection, photo_id: &str) -> Result<()> {
    conn.execute("DELETE FROM reactions WHERE photo_id = ?1", [photo_id])?;
    Ok(())
}

pub(crate) fn delete_event_reactions(conn: &Connection, event_id: &str) -> Result<()> {
    conn.execute("DELETE FROM reactions WHERE event_id = ?1", [event_id])?;
    Ok(())
}

fn row_to_reaction(row: &rusqlite::Row) -> rusqlite::Result<ReactionRow> {
    Ok(ReactionRow {
        id: row.get(0)?,
        photo_id: row.get(1)?,
        event_id: row.get(2)?,
        device_id: row.get(3)?,
        emoji: row.get(4)?,
        created_at: row.get(5)?,
    })
}

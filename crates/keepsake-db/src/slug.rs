//! Random identifiers for event URLs and organizer secrets.
//!
//! Slugs are short (10 chars) because they live in shared links; couple
//! secrets are long (32 chars) because they only need to be unguessable,
//! not globally unique.

use rand::Rng;
use rusqlite::{Connection, OptionalExtension};

use crate::{Result, StoreError};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub const SLUG_LEN: usize = 10;
pub const SECRET_LEN: usize = 32;
const MAX_SLUG_ATTEMPTS: usize = 5;
const MIN_CUSTOM_LEN: usize = 3;
const MAX_CUSTOM_LEN: usize = 40;

pub fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

pub(crate) fn slug_exists(conn: &Connection, slug: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM events WHERE slug = ?1", [slug], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

/// Draw random slugs until one is unused. Collisions are astronomically
/// unlikely; the retry cap is a safety net, not a contention path.
pub(crate) fn generate_unique_slug(conn: &Connection) -> Result<String> {
    for _ in 0..MAX_SLUG_ATTEMPTS {
        let slug = random_token(SLUG_LEN);
        if !slug_exists(conn, &slug)? {
            return Ok(slug);
        }
    }
    Err(StoreError::SlugGeneration)
}

pub fn generate_couple_secret() -> String {
    random_token(SECRET_LEN)
}

/// Normalize and validate a custom slug or secret: trimmed, lowercased,
/// 3-40 chars, lowercase alphanumeric with inner hyphens only.
fn validate_token(raw: &str, what: &str) -> std::result::Result<String, String> {
    let token = raw.trim().to_lowercase();
    if token.len() < MIN_CUSTOM_LEN || token.len() > MAX_CUSTOM_LEN {
        return Err(format!(
            "{what} must be between {MIN_CUSTOM_LEN} and {MAX_CUSTOM_LEN} characters"
        ));
    }
    let bytes = token.as_bytes();
    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    let inner_ok = bytes
        .iter()
        .all(|&b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !inner_ok || !edge_ok(bytes[0]) || !edge_ok(bytes[bytes.len() - 1]) {
        return Err(format!(
            "{what} may only contain lowercase letters, digits, and non-edge hyphens"
        ));
    }
    Ok(token)
}

pub(crate) fn resolve_slug(conn: &Connection, custom: Option<&str>) -> Result<String> {
    match custom {
        None => generate_unique_slug(conn),
        Some(raw) => {
            let slug = validate_token(raw, "slug").map_err(StoreError::InvalidSlug)?;
            if slug_exists(conn, &slug)? {
                return Err(StoreError::SlugTaken);
            }
            Ok(slug)
        }
    }
}

pub(crate) fn resolve_couple_secret(custom: Option<&str>) -> Result<String> {
    match custom {
        None => Ok(generate_couple_secret()),
        Some(raw) => validate_token(raw, "couple secret").map_err(StoreError::InvalidSecret),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tokens_use_the_slug_alphabet() {
        let token = random_token(SLUG_LEN);
        assert_eq!(token.len(), SLUG_LEN);
        assert!(token.bytes().all(|b| ALPHABET.contains(&b)));

        let secret = generate_couple_secret();
        assert_eq!(secret.len(), SECRET_LEN);
        assert!(secret.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn valid_custom_tokens_are_normalized() {
        assert_eq!(validate_token("  Sam-And-Lee  ", "slug").unwrap(), "sam-and-lee");
        assert_eq!(validate_token("abc", "slug").unwrap(), "abc");
        assert_eq!(validate_token("a2c", "slug").unwrap(), "a2c");
        assert_eq!(validate_token(&"a".repeat(40), "slug").unwrap(), "a".repeat(40));
    }

    #[test]
    fn invalid_custom_tokens_are_rejected() {
        let too_long = "a".repeat(41);
        for bad in [
            "",
            "ab",       // too short
            too_long.as_str(), // too long
            "-abc",     // leading hyphen
            "abc-",     // trailing hyphen
            "ab cd",    // whitespace inside
            "sam&lee",  // punctuation
            "naïve",    // non-ascii
        ] {
            assert!(validate_token(bad, "slug").is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn generated_slug_avoids_existing_rows() {
        let db = crate::test_db();
        db.with_conn(|conn| {
            let slug = generate_unique_slug(conn)?;
            assert_eq!(slug.len(), SLUG_LEN);
            assert!(!slug_exists(conn, &slug)?);
            Ok(())
        })
        .unwrap();
    }
}

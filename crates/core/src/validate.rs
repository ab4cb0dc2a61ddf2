use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::GalleryError;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static pattern"))
}

/// Validate an album date before it is sent anywhere.
///
/// The backend accepts `YYYY-MM-DD` only; anything else is rejected here so
/// the request never reaches the network layer. The pattern check is followed
/// by a calendar check, so `2024-02-30` fails too.
pub fn validate_album_date(date: &str) -> Result<(), GalleryError> {
    if !date_pattern().is_match(date) {
        return Err(GalleryError::validation(format!(
            "album date must be YYYY-MM-DD, got {date:?}"
        )));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        GalleryError::validation(format!("album date {date:?} is not a real calendar date"))
    })?;
    Ok(())
}

/// Validate an album title for create/rename.
pub fn validate_album_title(title: &str) -> Result<(), GalleryError> {
    if title.trim().is_empty() {
        return Err(GalleryError::validation("album title must not be empty"));
    }
    Ok(())
}

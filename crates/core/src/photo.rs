use serde::{Deserialize, Serialize};

/// A single photo or video reference as known to the client.
///
/// Identity is `id`, unique per principal. A `PhotoRef` is immutable once
/// fetched: containers add and remove whole values, they never patch fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub id: String,
    /// Server-assigned date bucket this photo was returned under.
    pub captured_group_key: String,
    pub is_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

impl PhotoRef {
    pub fn image(id: impl Into<String>, group_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            captured_group_key: group_key.into(),
            is_video: false,
            duration_seconds: None,
        }
    }

    pub fn video(
        id: impl Into<String>,
        group_key: impl Into<String>,
        duration_seconds: f64,
    ) -> Self {
        Self {
            id: id.into(),
            captured_group_key: group_key.into(),
            is_video: true,
            duration_seconds: Some(duration_seconds),
        }
    }
}

/// A server-defined bucket of photos sharing a date label.
///
/// Photo order within a group and group order across a listing are both
/// server-defined and preserved verbatim. The client never re-sorts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroup {
    pub key: String,
    pub photos: Vec<PhotoRef>,
}

impl DateGroup {
    pub fn new(key: impl Into<String>, photos: Vec<PhotoRef>) -> Self {
        Self {
            key: key.into(),
            photos,
        }
    }
}

/// Flatten a group sequence into a single ordered photo list.
pub fn flatten_photos(groups: &[DateGroup]) -> Vec<PhotoRef> {
    groups
        .iter()
        .flat_map(|group| group.photos.iter().cloned())
        .collect()
}

/// Position of `photo_id` within an ordered photo list.
pub fn position_of(photos: &[PhotoRef], photo_id: &str) -> Option<usize> {
    photos.iter().position(|photo| photo.id == photo_id)
}

/// Total photo count across a group sequence.
pub fn photo_count(groups: &[DateGroup]) -> usize {
    groups.iter().map(|group| group.photos.len()).sum()
}

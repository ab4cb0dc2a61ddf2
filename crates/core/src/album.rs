use serde::{Deserialize, Serialize};

use crate::photo::DateGroup;

/// One album as it appears in the album grid.
///
/// `id` is assigned by the backend; the client never invents one. During the
/// create workflow the id is unknown until resolution against a fresh listing
/// completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

/// An album plus its grouped contents.
///
/// Fetched on demand and replaced wholesale after every membership mutation;
/// the contents are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub summary: AlbumSummary,
    pub groups: Vec<DateGroup>,
}

impl AlbumDetail {
    /// Member photo ids in listing order.
    pub fn photo_ids(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|group| group.photos.iter().map(|photo| photo.id.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AlbumDetail, AlbumSummary};
    use crate::photo::{DateGroup, PhotoRef};

    #[test]
    fn photo_ids_follow_listing_order() {
        let detail = AlbumDetail {
            summary: AlbumSummary {
                id: "alb-1".to_string(),
                title: "Trip".to_string(),
                cover_photo_id: Some("a".to_string()),
                start_date: Some("2024-05-01".to_string()),
            },
            groups: vec![
                DateGroup::new("2024-05-02", vec![PhotoRef::image("b", "2024-05-02")]),
                DateGroup::new("2024-05-01", vec![PhotoRef::image("a", "2024-05-01")]),
            ],
        };

        assert_eq!(detail.photo_ids(), ["b", "a"]);
    }
}

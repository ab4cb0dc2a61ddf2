use picfolio_core::{AlbumSummary, DateGroup, PhotoRef};
use serde::{Deserialize, Serialize};

/// One row of the album listing: `[id, title, coverId, startDate]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRow(
    pub String,
    pub String,
    pub Option<String>,
    pub Option<String>,
);

impl AlbumRow {
    pub fn into_summary(self) -> AlbumSummary {
        AlbumSummary {
            id: self.0,
            title: self.1,
            cover_photo_id: self.2,
            start_date: self.3,
        }
    }
}

/// One entry of a photo page: `(id, reserved, durationOrNull)`.
///
/// The middle element is reserved by the backend and ignored here. A present
/// duration marks the asset as a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoTuple(pub String, pub serde_json::Value, pub Option<f64>);

impl PhotoTuple {
    pub fn into_photo(self, group_key: &str) -> PhotoRef {
        PhotoRef {
            id: self.0,
            captured_group_key: group_key.to_string(),
            is_video: self.2.is_some(),
            duration_seconds: self.2,
        }
    }
}

/// One group of a photo page: `[groupKey, [photoTuple, …]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGroup(pub String, pub Vec<PhotoTuple>);

impl PageGroup {
    pub fn into_group(self) -> DateGroup {
        let key = self.0;
        let photos = self
            .1
            .into_iter()
            .map(|tuple| tuple.into_photo(&key))
            .collect();
        DateGroup { key, photos }
    }
}

/// A full page of the photo listing, in server order.
pub type PageListing = Vec<PageGroup>;

/// Convert a page listing into domain groups, preserving server order.
pub fn groups_from_listing(listing: PageListing) -> Vec<DateGroup> {
    listing.into_iter().map(PageGroup::into_group).collect()
}

/// One group of the favorites listing: `[groupKey, [photoId, …]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteGroup(pub String, pub Vec<String>);

/// The grouped favorites listing, in server order.
pub type FavoritesListing = Vec<FavoriteGroup>;

/// Flatten a favorites listing into the id set's insertion order.
pub fn favorite_ids(listing: FavoritesListing) -> Vec<String> {
    listing.into_iter().flat_map(|group| group.1).collect()
}

use async_trait::async_trait;
use picfolio_core::GalleryError;

use crate::wire::{AlbumRow, FavoritesListing, PageListing};

/// Named remote operations the sync core depends on.
///
/// Every call is scoped to a principal; the backend has no cross-user
/// listings. Mutating album operations return the raw acknowledgment body so
/// callers can enforce the success-string contract (see [`crate::ack`]);
/// the transport layer does not interpret it.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Grouped listing of the principal's favorited photo ids.
    async fn list_favorites(&self, principal: &str) -> Result<FavoritesListing, GalleryError>;

    /// Flip the favorite state of one photo. The backend offers a single
    /// flip operation; there is no separate set/unset call.
    async fn toggle_favorite(&self, principal: &str, photo_id: &str)
        -> Result<(), GalleryError>;

    async fn list_albums(&self, principal: &str) -> Result<Vec<AlbumRow>, GalleryError>;

    /// Create an album. The response carries only an acknowledgment string;
    /// the new album's id is not returned.
    async fn create_album(&self, principal: &str, title: &str) -> Result<String, GalleryError>;

    async fn rename_album(
        &self,
        principal: &str,
        album_id: &str,
        title: &str,
    ) -> Result<String, GalleryError>;

    async fn redate_album(
        &self,
        principal: &str,
        album_id: &str,
        date: &str,
    ) -> Result<String, GalleryError>;

    async fn delete_album(&self, principal: &str, album_id: &str)
        -> Result<String, GalleryError>;

    /// Attach photos to an album. `joined_ids` is the delimited transport
    /// form produced by `picfolio_core::ids::join_ids`.
    async fn add_album_assets(
        &self,
        principal: &str,
        album_id: &str,
        joined_ids: &str,
    ) -> Result<String, GalleryError>;

    async fn remove_album_assets(
        &self,
        principal: &str,
        album_id: &str,
        joined_ids: &str,
    ) -> Result<String, GalleryError>;

    /// One page of the date-grouped photo listing.
    async fn list_photos(
        &self,
        principal: &str,
        page_index: u32,
    ) -> Result<PageListing, GalleryError>;

    /// Grouped contents of one album, same shape as the photo listing.
    async fn list_album_contents(
        &self,
        principal: &str,
        album_id: &str,
    ) -> Result<PageListing, GalleryError>;
}

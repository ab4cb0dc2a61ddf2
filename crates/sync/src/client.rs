use std::sync::Arc;

use tracing::debug;

use picfolio_api::RemoteGateway;
use picfolio_core::GalleryError;
use picfolio_local_store::LocalStore;

use crate::albums::AlbumsRegistry;
use crate::favorites::FavoritesCache;
use crate::feed::PaginatedFeed;
use crate::identity::IdentityScope;

/// Wires the caches to one identity scope and drives bootstrap.
///
/// Binding a principal clears whatever the previous principal left behind,
/// seeds favorites and albums from the persisted blobs, then refreshes all
/// three collections from the backend. In-flight responses for the previous
/// principal are discarded by the components' own staleness checks.
pub struct GalleryClient {
    scope: Arc<IdentityScope>,
    favorites: Arc<FavoritesCache>,
    albums: Arc<AlbumsRegistry>,
    feed: Arc<PaginatedFeed>,
}

impl GalleryClient {
    pub fn new(gateway: Arc<dyn RemoteGateway>, store: Option<Arc<LocalStore>>) -> Self {
        let scope = Arc::new(IdentityScope::new());
        let favorites = Arc::new(FavoritesCache::new(
            scope.clone(),
            gateway.clone(),
            store.clone(),
        ));
        let albums = Arc::new(AlbumsRegistry::new(
            scope.clone(),
            gateway.clone(),
            store.clone(),
        ));
        let feed = Arc::new(PaginatedFeed::new(scope.clone(), gateway));
        Self {
            scope,
            favorites,
            albums,
            feed,
        }
    }

    pub fn scope(&self) -> &Arc<IdentityScope> {
        &self.scope
    }

    pub fn favorites(&self) -> &Arc<FavoritesCache> {
        &self.favorites
    }

    pub fn albums(&self) -> &Arc<AlbumsRegistry> {
        &self.albums
    }

    pub fn feed(&self) -> &Arc<PaginatedFeed> {
        &self.feed
    }

    /// Bind `principal` and run the bootstrap sequence: clear the previous
    /// principal's state, seed from the persisted blobs, then refresh
    /// favorites, albums and the first feed page from the backend.
    ///
    /// Refresh failures do not abort the remaining steps, so an offline
    /// start keeps the locally seeded state; the first error is still
    /// surfaced for the UI to report.
    pub async fn bind_principal(&self, principal: &str) -> Result<(), GalleryError> {
        debug!("binding principal {principal}");
        self.scope.bind(principal);
        self.favorites.clear();
        self.albums.clear();
        self.feed.reset();

        self.favorites.bootstrap();
        self.albums.bootstrap();

        let mut first_error = None;
        if let Err(e) = self.favorites.resync().await {
            first_error.get_or_insert(e);
        }
        if let Err(e) = self.albums.list().await {
            first_error.get_or_insert(e);
        }
        if let Err(e) = self.feed.load_page(0).await {
            first_error.get_or_insert(e);
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Log out: clear the scope and every cache.
    pub fn clear_principal(&self) {
        debug!("clearing principal");
        self.scope.clear();
        self.favorites.clear();
        self.albums.clear();
        self.feed.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use picfolio_api::wire::{AlbumRow, FavoriteGroup, PageGroup, PhotoTuple};
    use picfolio_core::GalleryError;
    use picfolio_local_store::LocalStore;

    use super::GalleryClient;
    use crate::testing::MockGateway;

    fn favorites(ids: &[&str]) -> Vec<FavoriteGroup> {
        vec![FavoriteGroup(
            "Today".to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        )]
    }

    fn photo_page(ids: &[&str]) -> Vec<PageGroup> {
        vec![PageGroup(
            "Today".to_string(),
            ids.iter()
                .map(|id| PhotoTuple(id.to_string(), serde_json::Value::Null, None))
                .collect(),
        )]
    }

    #[tokio::test]
    async fn binding_runs_the_full_bootstrap_sequence() {
        let gateway = MockGateway::new();
        gateway.enqueue_favorites(Ok(favorites(&["f1"])));
        gateway.enqueue_album_list(Ok(vec![AlbumRow(
            "alb-1".to_string(),
            "Trip".to_string(),
            None,
            None,
        )]));
        gateway.enqueue_photo_page(Ok(photo_page(&["p1", "p2"])));

        let client = GalleryClient::new(gateway.clone(), None);
        client.bind_principal("anna").await.unwrap();

        assert!(client.favorites().is_favorite("f1"));
        assert_eq!(client.albums().albums().len(), 1);
        assert_eq!(client.feed().all_photos().len(), 2);
        assert_eq!(gateway.calls_to("list_favorites"), 1);
        assert_eq!(gateway.calls_to("list_albums"), 1);
        assert_eq!(gateway.calls_to("list_photos"), 1);
    }

    #[tokio::test]
    async fn switching_principals_replaces_all_cached_state() {
        let gateway = MockGateway::new();
        gateway.enqueue_favorites(Ok(favorites(&["anna-fav"])));
        gateway.enqueue_photo_page(Ok(photo_page(&["anna-photo"])));

        let client = GalleryClient::new(gateway.clone(), None);
        client.bind_principal("anna").await.unwrap();

        gateway.enqueue_favorites(Ok(favorites(&["ben-fav"])));
        gateway.enqueue_photo_page(Ok(photo_page(&["ben-photo"])));
        client.bind_principal("ben").await.unwrap();

        assert!(client.favorites().is_favorite("ben-fav"));
        assert!(!client.favorites().is_favorite("anna-fav"));
        let photo_ids: Vec<String> = client
            .feed()
            .all_photos()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(photo_ids, ["ben-photo"]);
    }

    #[tokio::test]
    async fn offline_bootstrap_keeps_the_persisted_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalStore::new(dir.path()));
        store.save_favorites("anna", &["seed".to_string()]).unwrap();

        let gateway = MockGateway::new();
        gateway.enqueue_favorites(Err(GalleryError::transport("offline")));
        gateway.enqueue_album_list(Err(GalleryError::transport("offline")));
        gateway.enqueue_photo_page(Err(GalleryError::transport("offline")));

        let client = GalleryClient::new(gateway, Some(store));
        let err = client.bind_principal("anna").await.unwrap_err();
        assert!(matches!(err, GalleryError::Transport { .. }));

        // The seed survives the failed refresh.
        assert!(client.favorites().is_favorite("seed"));
    }

    #[tokio::test]
    async fn clearing_the_principal_empties_everything() {
        let gateway = MockGateway::new();
        gateway.enqueue_favorites(Ok(favorites(&["f1"])));
        gateway.enqueue_photo_page(Ok(photo_page(&["p1"])));

        let client = GalleryClient::new(gateway.clone(), None);
        client.bind_principal("anna").await.unwrap();
        client.clear_principal();

        assert!(client.scope().current().is_none());
        assert!(client.favorites().is_empty());
        assert!(client.albums().albums().is_empty());
        assert!(client.feed().groups().is_empty());

        // The core is inert again.
        assert!(client.favorites().resync().await.unwrap_err().is_validation());
    }
}

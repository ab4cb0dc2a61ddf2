//! Scriptable in-memory gateway for tests.
//!
//! Responses are queued per operation and popped in call order; an empty
//! queue yields a benign default (empty listings, the correct
//! acknowledgment literal). Every call is recorded so tests can assert what
//! did (or did not) reach the transport. An operation can be gated so a
//! test holds its response open while changing state (e.g. switching
//! principals mid-flight).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use picfolio_api::wire::{AlbumRow, FavoritesListing, PageListing};
use picfolio_api::{ack, RemoteGateway};
use picfolio_core::GalleryError;

type Queue<T> = Mutex<VecDeque<Result<T, GalleryError>>>;

#[derive(Default)]
pub struct MockGateway {
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    favorites: Queue<FavoritesListing>,
    toggles: Queue<()>,
    album_lists: Queue<Vec<AlbumRow>>,
    creates: Queue<String>,
    renames: Queue<String>,
    redates: Queue<String>,
    deletes: Queue<String>,
    asset_adds: Queue<String>,
    asset_removes: Queue<String>,
    photo_pages: Queue<PageListing>,
    album_contents: Queue<PageListing>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ── Scripting ─────────────────────────────────────────────────────────

    pub fn enqueue_favorites(&self, result: Result<FavoritesListing, GalleryError>) {
        self.favorites.lock().unwrap().push_back(result);
    }

    pub fn enqueue_toggle(&self, result: Result<(), GalleryError>) {
        self.toggles.lock().unwrap().push_back(result);
    }

    pub fn enqueue_album_list(&self, result: Result<Vec<AlbumRow>, GalleryError>) {
        self.album_lists.lock().unwrap().push_back(result);
    }

    pub fn enqueue_create(&self, result: Result<String, GalleryError>) {
        self.creates.lock().unwrap().push_back(result);
    }

    pub fn enqueue_rename(&self, result: Result<String, GalleryError>) {
        self.renames.lock().unwrap().push_back(result);
    }

    pub fn enqueue_redate(&self, result: Result<String, GalleryError>) {
        self.redates.lock().unwrap().push_back(result);
    }

    pub fn enqueue_delete(&self, result: Result<String, GalleryError>) {
        self.deletes.lock().unwrap().push_back(result);
    }

    pub fn enqueue_add_assets(&self, result: Result<String, GalleryError>) {
        self.asset_adds.lock().unwrap().push_back(result);
    }

    pub fn enqueue_remove_assets(&self, result: Result<String, GalleryError>) {
        self.asset_removes.lock().unwrap().push_back(result);
    }

    pub fn enqueue_photo_page(&self, result: Result<PageListing, GalleryError>) {
        self.photo_pages.lock().unwrap().push_back(result);
    }

    pub fn enqueue_album_contents(&self, result: Result<PageListing, GalleryError>) {
        self.album_contents.lock().unwrap().push_back(result);
    }

    /// Hold the next call to `operation` open until the returned handle is
    /// notified. The response is chosen when the call starts; the gate only
    /// delays its delivery.
    pub fn gate(&self, operation: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(operation.to_string(), notify.clone());
        notify
    }

    // ── Assertions ────────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(operation))
            .count()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    async fn call<T>(
        &self,
        call: String,
        queue: &Queue<T>,
        default: impl FnOnce() -> T,
    ) -> Result<T, GalleryError> {
        let operation = call
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        self.calls.lock().unwrap().push(call);
        let result = queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(default()));
        let gate = self.gates.lock().unwrap().remove(&operation);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }
}

#[async_trait]
impl RemoteGateway for MockGateway {
    async fn list_favorites(&self, principal: &str) -> Result<FavoritesListing, GalleryError> {
        self.call(format!("list_favorites {principal}"), &self.favorites, Vec::new)
            .await
    }

    async fn toggle_favorite(
        &self,
        principal: &str,
        photo_id: &str,
    ) -> Result<(), GalleryError> {
        self.call(
            format!("toggle_favorite {principal} {photo_id}"),
            &self.toggles,
            || (),
        )
        .await
    }

    async fn list_albums(&self, principal: &str) -> Result<Vec<AlbumRow>, GalleryError> {
        self.call(format!("list_albums {principal}"), &self.album_lists, Vec::new)
            .await
    }

    async fn create_album(&self, principal: &str, title: &str) -> Result<String, GalleryError> {
        self.call(format!("create_album {principal} {title}"), &self.creates, || {
            ack::ALBUM_CREATED.to_string()
        })
        .await
    }

    async fn rename_album(
        &self,
        principal: &str,
        album_id: &str,
        title: &str,
    ) -> Result<String, GalleryError> {
        self.call(
            format!("rename_album {principal} {album_id} {title}"),
            &self.renames,
            || ack::ALBUM_RENAMED.to_string(),
        )
        .await
    }

    async fn redate_album(
        &self,
        principal: &str,
        album_id: &str,
        date: &str,
    ) -> Result<String, GalleryError> {
        self.call(
            format!("redate_album {principal} {album_id} {date}"),
            &self.redates,
            || ack::ALBUM_REDATED.to_string(),
        )
        .await
    }

    async fn delete_album(
        &self,
        principal: &str,
        album_id: &str,
    ) -> Result<String, GalleryError> {
        self.call(
            format!("delete_album {principal} {album_id}"),
            &self.deletes,
            || ack::ALBUM_DELETED.to_string(),
        )
        .await
    }

    async fn add_album_assets(
        &self,
        principal: &str,
        album_id: &str,
        joined_ids: &str,
    ) -> Result<String, GalleryError> {
        self.call(
            format!("add_album_assets {principal} {album_id} {joined_ids}"),
            &self.asset_adds,
            || ack::ASSETS_ADDED.to_string(),
        )
        .await
    }

    async fn remove_album_assets(
        &self,
        principal: &str,
        album_id: &str,
        joined_ids: &str,
    ) -> Result<String, GalleryError> {
        self.call(
            format!("remove_album_assets {principal} {album_id} {joined_ids}"),
            &self.asset_removes,
            || ack::ASSETS_REMOVED.to_string(),
        )
        .await
    }

    async fn list_photos(
        &self,
        principal: &str,
        page_index: u32,
    ) -> Result<PageListing, GalleryError> {
        self.call(
            format!("list_photos {principal} {page_index}"),
            &self.photo_pages,
            Vec::new,
        )
        .await
    }

    async fn list_album_contents(
        &self,
        principal: &str,
        album_id: &str,
    ) -> Result<PageListing, GalleryError> {
        self.call(
            format!("list_album_contents {principal} {album_id}"),
            &self.album_contents,
            Vec::new,
        )
        .await
    }
}

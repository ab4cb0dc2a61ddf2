use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use picfolio_api::{groups_from_listing, RemoteGateway};
use picfolio_core::photo::flatten_photos;
use picfolio_core::{DateGroup, FeedCursor, GalleryError, PhotoRef};

use crate::identity::IdentityScope;

struct Inner {
    groups: Vec<DateGroup>,
    cursor: FeedCursor,
}

/// The date-grouped photo feed, accumulated page by page.
///
/// Page zero replaces the sequence; later pages append their groups at the
/// end. Groups are never merged or re-sorted: a group key recurring across a
/// page boundary (which a correct backend does not produce) yields two
/// adjacent entries, deliberately left visible rather than special-cased.
pub struct PaginatedFeed {
    scope: Arc<IdentityScope>,
    gateway: Arc<dyn RemoteGateway>,
    inner: Mutex<Inner>,
}

impl PaginatedFeed {
    pub fn new(scope: Arc<IdentityScope>, gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            scope,
            gateway,
            inner: Mutex::new(Inner {
                groups: Vec::new(),
                cursor: FeedCursor::default(),
            }),
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn groups(&self) -> Vec<DateGroup> {
        self.lock().groups.clone()
    }

    pub fn cursor(&self) -> FeedCursor {
        self.lock().cursor
    }

    /// All accumulated photos in feed order.
    pub fn all_photos(&self) -> Vec<PhotoRef> {
        flatten_photos(&self.lock().groups)
    }

    /// Pure projection of the current groups through a photo predicate.
    /// Groups left empty by the predicate are dropped from the projection.
    /// Never touches the cursor or the accumulated groups.
    pub fn filtered<F>(&self, predicate: F) -> Vec<DateGroup>
    where
        F: Fn(&PhotoRef) -> bool,
    {
        self.lock()
            .groups
            .iter()
            .filter_map(|group| {
                let photos: Vec<PhotoRef> = group
                    .photos
                    .iter()
                    .filter(|photo| predicate(photo))
                    .cloned()
                    .collect();
                if photos.is_empty() {
                    None
                } else {
                    Some(DateGroup::new(group.key.clone(), photos))
                }
            })
            .collect()
    }

    /// Case-insensitive id-substring search, as a convenience projection.
    pub fn matching(&self, query: &str) -> Vec<DateGroup> {
        let query = query.to_lowercase();
        self.filtered(|photo| photo.id.to_lowercase().contains(&query))
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Drop all groups and rewind the cursor. Called on principal change.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.groups.clear();
        inner.cursor.reset();
    }

    // ── Remote operations ─────────────────────────────────────────────────

    /// Fetch one page. Page zero is a fresh load (replaces everything and
    /// rewinds the cursor); later pages append. An empty page marks the
    /// cursor exhausted. Stale responses (principal changed mid-flight) are
    /// discarded.
    pub async fn load_page(&self, page_index: u32) -> Result<(), GalleryError> {
        let (principal, token) = self.scope.bound()?;
        let listing = self.gateway.list_photos(&principal, page_index).await?;
        if !self.scope.is_current(token) {
            warn!("discarding stale photo page {page_index} for {principal}");
            return Ok(());
        }

        let fetched = groups_from_listing(listing);
        debug!("page {page_index}: {} groups", fetched.len());
        let empty = fetched.is_empty();

        let mut inner = self.lock();
        if page_index == 0 {
            inner.cursor.reset();
            inner.groups = fetched;
        } else {
            inner.groups.extend(fetched);
        }

        if empty {
            inner.cursor.mark_exhausted();
        } else {
            inner.cursor.next_page_index = page_index;
            inner.cursor.advance();
        }
        Ok(())
    }

    /// Load the next page per the cursor. No-op once exhausted.
    pub async fn load_more(&self) -> Result<(), GalleryError> {
        let cursor = self.cursor();
        if cursor.exhausted {
            debug!("load_more ignored: feed exhausted");
            return Ok(());
        }
        self.load_page(cursor.next_page_index).await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("feed mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use picfolio_api::wire::{PageGroup, PhotoTuple};
    use picfolio_core::GalleryError;

    use super::PaginatedFeed;
    use crate::identity::IdentityScope;
    use crate::testing::MockGateway;

    fn setup() -> (Arc<IdentityScope>, Arc<MockGateway>, Arc<PaginatedFeed>) {
        let scope = Arc::new(IdentityScope::new());
        scope.bind("anna");
        let gateway = MockGateway::new();
        let feed = Arc::new(PaginatedFeed::new(scope.clone(), gateway.clone()));
        (scope, gateway, feed)
    }

    fn page(groups: &[(&str, &[&str])]) -> Vec<PageGroup> {
        groups
            .iter()
            .map(|(key, ids)| {
                PageGroup(
                    key.to_string(),
                    ids.iter()
                        .map(|id| PhotoTuple(id.to_string(), serde_json::Value::Null, None))
                        .collect(),
                )
            })
            .collect()
    }

    fn keys(feed: &PaginatedFeed) -> Vec<String> {
        feed.groups().into_iter().map(|group| group.key).collect()
    }

    #[tokio::test]
    async fn pages_append_in_order_without_reordering() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[("Today", &["a"]), ("Yesterday", &["b"])])));
        gateway.enqueue_photo_page(Ok(page(&[("Last Week", &["c"])])));

        feed.load_page(0).await.unwrap();
        feed.load_page(1).await.unwrap();

        assert_eq!(keys(&feed), ["Today", "Yesterday", "Last Week"]);
        let photo_ids: Vec<String> = feed.all_photos().into_iter().map(|p| p.id).collect();
        assert_eq!(photo_ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn a_recurring_group_key_yields_adjacent_entries_not_a_merge() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[("Today", &["a"])])));
        gateway.enqueue_photo_page(Ok(page(&[("Today", &["b"])])));

        feed.load_page(0).await.unwrap();
        feed.load_page(1).await.unwrap();

        assert_eq!(keys(&feed), ["Today", "Today"]);
        assert_eq!(feed.groups()[0].photos[0].id, "a");
        assert_eq!(feed.groups()[1].photos[0].id, "b");
    }

    #[tokio::test]
    async fn page_zero_replaces_the_accumulated_sequence() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[("Today", &["a"])])));
        gateway.enqueue_photo_page(Ok(page(&[("Yesterday", &["b"])])));
        gateway.enqueue_photo_page(Ok(page(&[("Fresh", &["z"])])));

        feed.load_page(0).await.unwrap();
        feed.load_page(1).await.unwrap();
        feed.load_page(0).await.unwrap();

        assert_eq!(keys(&feed), ["Fresh"]);
        assert_eq!(feed.cursor().next_page_index, 1);
    }

    #[tokio::test]
    async fn load_more_follows_the_cursor_until_exhausted() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[("Today", &["a"])])));
        gateway.enqueue_photo_page(Ok(page(&[("Yesterday", &["b"])])));
        gateway.enqueue_photo_page(Ok(Vec::new()));

        feed.load_page(0).await.unwrap();
        feed.load_more().await.unwrap();
        assert_eq!(feed.cursor().next_page_index, 2);

        feed.load_more().await.unwrap();
        assert!(feed.cursor().exhausted);
        assert_eq!(gateway.calls_to("list_photos"), 3);

        // Exhausted: no further network traffic.
        feed.load_more().await.unwrap();
        assert_eq!(gateway.calls_to("list_photos"), 3);
        assert_eq!(keys(&feed), ["Today", "Yesterday"]);
    }

    #[tokio::test]
    async fn reset_clears_groups_and_cursor() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[("Today", &["a"])])));
        feed.load_page(0).await.unwrap();

        feed.reset();
        assert!(feed.groups().is_empty());
        assert_eq!(feed.cursor().next_page_index, 0);
        assert!(!feed.cursor().exhausted);
    }

    #[tokio::test]
    async fn filtering_is_a_pure_projection() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[
            ("Today", &["sunset-1", "beach-2"]),
            ("Yesterday", &["sunset-3"]),
        ])));
        feed.load_page(0).await.unwrap();
        let cursor_before = feed.cursor();

        let hits = feed.matching("SUNSET");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].photos[0].id, "sunset-1");
        assert_eq!(hits[1].photos[0].id, "sunset-3");

        // Groups emptied by the predicate are dropped from the projection.
        let none = feed.matching("nothing");
        assert!(none.is_empty());

        // The projection leaves the feed untouched.
        assert_eq!(feed.cursor(), cursor_before);
        assert_eq!(keys(&feed), ["Today", "Yesterday"]);
    }

    #[tokio::test]
    async fn empty_first_page_marks_exhaustion() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(Vec::new()));
        feed.load_page(0).await.unwrap();
        assert!(feed.cursor().exhausted);
        assert!(feed.groups().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_leaves_the_feed_untouched() {
        let (_scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[("Today", &["a"])])));
        feed.load_page(0).await.unwrap();

        gateway.enqueue_photo_page(Err(GalleryError::transport("504")));
        feed.load_more().await.unwrap_err();

        assert_eq!(keys(&feed), ["Today"]);
        assert_eq!(feed.cursor().next_page_index, 1);
        assert!(!feed.cursor().exhausted);
    }

    #[tokio::test]
    async fn stale_page_for_a_previous_principal_is_discarded() {
        let (scope, gateway, feed) = setup();
        gateway.enqueue_photo_page(Ok(page(&[("Anna", &["a"])])));

        let gate = gateway.gate("list_photos");
        let stale = tokio::spawn({
            let feed = feed.clone();
            async move { feed.load_page(0).await }
        });
        tokio::task::yield_now().await;

        scope.bind("ben");
        feed.reset();
        gateway.enqueue_photo_page(Ok(page(&[("Ben", &["b"])])));
        feed.load_page(0).await.unwrap();

        gate.notify_one();
        stale.await.unwrap().unwrap();
        assert_eq!(keys(&feed), ["Ben"]);
    }
}

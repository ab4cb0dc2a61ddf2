use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use picfolio_api::{favorite_ids, RemoteGateway};
use picfolio_core::ids::dedupe_preserving_order;
use picfolio_core::GalleryError;
use picfolio_local_store::LocalStore;

use crate::identity::{IdentityScope, ScopeToken};

struct Inner {
    /// Favorited ids in insertion order. Order is not contractual; it is
    /// kept stable so the persisted blob does not churn between runs.
    ids: Vec<String>,
    /// Token of the resync currently in flight, if any. A stale token does
    /// not absorb new requests: after a principal switch the old resync is
    /// doomed to be discarded, so the new principal's resync must proceed.
    resync_in_flight: Option<ScopeToken>,
}

/// The set of favorited photo ids, with optimistic toggle and rollback.
///
/// Membership reflects backend state with best-effort freshness: it may be
/// transiently wrong while a toggle is in flight, never for longer than one
/// round-trip plus rollback. Two overlapping toggles on the same id are
/// deliberately not serialized: each flips the id's current local value and
/// races its own network call, so rapid double-toggles can leave local state
/// inconsistent with the server until the next [`resync`](Self::resync). The
/// backend's toggle is a pure flip with no idempotency token, so the client
/// cannot do better without a per-id queue it has no mandate to add.
pub struct FavoritesCache {
    scope: Arc<IdentityScope>,
    gateway: Arc<dyn RemoteGateway>,
    store: Option<Arc<LocalStore>>,
    inner: Mutex<Inner>,
}

impl FavoritesCache {
    pub fn new(
        scope: Arc<IdentityScope>,
        gateway: Arc<dyn RemoteGateway>,
        store: Option<Arc<LocalStore>>,
    ) -> Self {
        Self {
            scope,
            gateway,
            store,
            inner: Mutex::new(Inner {
                ids: Vec::new(),
                resync_in_flight: None,
            }),
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn is_favorite(&self, photo_id: &str) -> bool {
        self.lock().ids.iter().any(|id| id == photo_id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.lock().ids.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().ids.is_empty()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Seed the set from the persisted blob before the first round-trip.
    /// Best-effort: a missing or unreadable blob just means an empty seed.
    pub fn bootstrap(&self) {
        let Some(store) = &self.store else { return };
        let Some(principal) = self.scope.current() else {
            return;
        };
        match store.load_favorites(&principal) {
            Ok(ids) => {
                debug!("seeded {} favorites from local store", ids.len());
                self.lock().ids = dedupe_preserving_order(ids);
            }
            Err(e) => warn!("favorites bootstrap skipped: {e}"),
        }
    }

    /// Drop all local state. Called on principal change before the new
    /// principal's bootstrap.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.ids.clear();
    }

    // ── Remote operations ─────────────────────────────────────────────────

    /// Replace the set wholesale from the authoritative listing.
    ///
    /// Coalesced: a resync issued while another is in flight is absorbed and
    /// returns immediately. A response that arrives after the principal has
    /// changed is discarded.
    pub async fn resync(&self) -> Result<(), GalleryError> {
        let (principal, token) = self.scope.bound()?;
        {
            let mut inner = self.lock();
            if inner
                .resync_in_flight
                .is_some_and(|in_flight| self.scope.is_current(in_flight))
            {
                debug!("resync absorbed: one already in flight");
                return Ok(());
            }
            inner.resync_in_flight = Some(token);
        }

        let result = self.gateway.list_favorites(&principal).await;
        {
            let mut inner = self.lock();
            if inner.resync_in_flight == Some(token) {
                inner.resync_in_flight = None;
            }
        }

        let listing = result?;
        if !self.scope.is_current(token) {
            warn!("discarding stale favorites resync for {principal}");
            return Ok(());
        }

        let ids = dedupe_preserving_order(favorite_ids(listing));
        debug!("favorites resynced: {} ids", ids.len());
        self.lock().ids = ids;
        self.persist(&principal);
        Ok(())
    }

    /// Optimistically flip membership, then confirm with the backend.
    ///
    /// Returns the new local membership on success. On failure the set is
    /// restored to its pre-call value and the error is surfaced.
    pub async fn toggle(&self, photo_id: &str) -> Result<bool, GalleryError> {
        let (principal, token) = self.scope.bound()?;

        // Capture the pre-image, then apply the optimistic flip.
        let was_favorite = {
            let mut inner = self.lock();
            let was = inner.ids.iter().any(|id| id == photo_id);
            if was {
                inner.ids.retain(|id| id != photo_id);
            } else {
                inner.ids.push(photo_id.to_string());
            }
            was
        };
        self.persist(&principal);

        match self.gateway.toggle_favorite(&principal, photo_id).await {
            // Remote toggle is a true flip, so local state is already right.
            Ok(()) => Ok(!was_favorite),
            Err(e) => {
                if self.scope.is_current(token) {
                    warn!("favorite toggle failed for {photo_id}, rolling back: {e}");
                    self.set_membership(photo_id, was_favorite);
                    self.persist(&principal);
                } else {
                    debug!("favorite toggle failed after principal change; no rollback");
                }
                Err(e)
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("favorites mutex poisoned")
    }

    /// Restore membership to an exact value (the rollback inverse of the
    /// optimistic flip in [`toggle`](Self::toggle)).
    fn set_membership(&self, photo_id: &str, present: bool) {
        let mut inner = self.lock();
        let contains = inner.ids.iter().any(|id| id == photo_id);
        match (contains, present) {
            (false, true) => inner.ids.push(photo_id.to_string()),
            (true, false) => inner.ids.retain(|id| id != photo_id),
            _ => {}
        }
    }

    fn persist(&self, principal: &str) {
        let Some(store) = &self.store else { return };
        let ids = self.lock().ids.clone();
        if let Err(e) = store.save_favorites(principal, &ids) {
            warn!("failed to persist favorites: {e}");
        }
    }
}

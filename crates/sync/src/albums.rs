use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use picfolio_api::ack;
use picfolio_api::wire::AlbumRow;
use picfolio_api::{groups_from_listing, RemoteGateway};
use picfolio_core::ids::{dedupe_preserving_order, join_ids};
use picfolio_core::validate::{validate_album_date, validate_album_title};
use picfolio_core::{AlbumDetail, AlbumSummary, GalleryError};
use picfolio_local_store::{LocalStore, PersistedAlbum};

use crate::identity::{IdentityScope, ScopeToken};

/// Phases of the create workflow. The backend has no atomic
/// create-with-contents operation, so creation is choreographed client-side:
/// create by title, resolve the new id from a fresh listing, then attach the
/// initial photos. `Failed` and `PartialSuccess` are the two distinguished
/// non-happy terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePhase {
    Idle,
    Creating,
    Resolving,
    Attaching,
    Done,
    Failed,
    PartialSuccess,
}

/// Terminal outcome of [`AlbumsRegistry::create`].
///
/// The partial variants are successes, not errors: the album exists on the
/// backend. Callers must present them as "created, with a caveat", never as
/// a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Created, resolved, and (when photos were given) fully attached.
    Created(AlbumSummary),
    /// The album exists but the initial photos could not be attached.
    PhotosNotAttached {
        album: AlbumSummary,
        error: GalleryError,
    },
    /// The create was acknowledged but no entry with the submitted title
    /// appeared in the refreshed listing (eventual-consistency lag, or the
    /// listing itself failed). Nothing was attached.
    Unresolved { title: String },
}

impl CreateOutcome {
    pub fn is_partial(&self) -> bool {
        !matches!(self, Self::Created(_))
    }

    pub fn album(&self) -> Option<&AlbumSummary> {
        match self {
            Self::Created(album) | Self::PhotosNotAttached { album, .. } => Some(album),
            Self::Unresolved { .. } => None,
        }
    }
}

struct Inner {
    albums: Vec<AlbumSummary>,
    /// Member ids per album, as last seen in a detail fetch. Feeds the
    /// persisted blob; not authoritative.
    members: HashMap<String, Vec<String>>,
    open_detail: Option<AlbumDetail>,
    create_phase: CreatePhase,
}

/// The album collection and its mutating workflows.
///
/// Every mutation talks to the backend first and only then updates local
/// state; the one multi-step workflow (`create`) is compensating rather than
/// transactional. Mutations that can change membership or cover photos never
/// patch local data — they refetch.
pub struct AlbumsRegistry {
    scope: Arc<IdentityScope>,
    gateway: Arc<dyn RemoteGateway>,
    store: Option<Arc<LocalStore>>,
    inner: Mutex<Inner>,
}

impl AlbumsRegistry {
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
                albums: Vec::new(),
                members: HashMap::new(),
                open_detail: None,
                create_phase: CreatePhase::Idle,
            }),
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn albums(&self) -> Vec<AlbumSummary> {
        self.lock().albums.clone()
    }

    pub fn album_by_id(&self, album_id: &str) -> Option<AlbumSummary> {
        self.lock()
            .albums
            .iter()
            .find(|album| album.id == album_id)
            .cloned()
    }

    pub fn open_detail(&self) -> Option<AlbumDetail> {
        self.lock().open_detail.clone()
    }

    pub fn create_phase(&self) -> CreatePhase {
        self.lock().create_phase
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Seed summaries and member lists from the persisted blob.
    pub fn bootstrap(&self) {
        let Some(store) = &self.store else { return };
        let Some(principal) = self.scope.current() else {
            return;
        };
        match store.load_albums(&principal) {
            Ok(persisted) => {
                debug!("seeded {} albums from local store", persisted.len());
                let mut inner = self.lock();
                inner.members = persisted
                    .iter()
                    .filter(|album| !album.member_photo_ids.is_empty())
                    .map(|album| (album.id.clone(), album.member_photo_ids.clone()))
                    .collect();
                inner.albums = persisted
                    .into_iter()
                    .map(PersistedAlbum::into_summary)
                    .collect();
            }
            Err(e) => warn!("albums bootstrap skipped: {e}"),
        }
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.albums.clear();
        inner.members.clear();
        inner.open_detail = None;
        inner.create_phase = CreatePhase::Idle;
    }

    pub fn close_detail(&self) {
        self.lock().open_detail = None;
    }

    // ── Remote operations ─────────────────────────────────────────────────

    /// Fetch the authoritative listing and replace the local collection.
    pub async fn list(&self) -> Result<Vec<AlbumSummary>, GalleryError> {
        let (principal, token) = self.scope.bound()?;
        let rows = self.gateway.list_albums(&principal).await?;
        self.apply_rows(&principal, token, rows);
        Ok(self.albums())
    }

    /// Create an album, resolve its backend-assigned id, attach the initial
    /// photos. Three phases, compensating (see [`CreatePhase`]).
    pub async fn create(
        &self,
        title: &str,
        initial_photo_ids: &[String],
    ) -> Result<CreateOutcome, GalleryError> {
        validate_album_title(title)?;
        let (principal, token) = self.scope.bound()?;

        // Phase 1: create. A failure here aborts with no local change.
        self.set_phase(CreatePhase::Creating);
        let body = match self.gateway.create_album(&principal, title).await {
            Ok(body) => body,
            Err(e) => {
                self.set_phase(CreatePhase::Failed);
                return Err(e);
            }
        };
        if let Err(e) = ack::expect_ack("create album", ack::ALBUM_CREATED, &body) {
            self.set_phase(CreatePhase::Failed);
            return Err(e);
        }

        // Phase 2: resolve the new id. The create response carries no id, so
        // the only handle is the just-submitted title in a fresh listing.
        self.set_phase(CreatePhase::Resolving);
        let rows = match self.gateway.list_albums(&principal).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("album {title:?} created but listing failed during resolution: {e}");
                self.set_phase(CreatePhase::PartialSuccess);
                return Ok(CreateOutcome::Unresolved {
                    title: title.to_string(),
                });
            }
        };
        self.apply_rows(&principal, token, rows);

        let matches: Vec<AlbumSummary> = self
            .lock()
            .albums
            .iter()
            .filter(|album| album.title == title)
            .cloned()
            .collect();
        let album = match matches.first() {
            Some(album) => {
                // Duplicate titles are not prevented by the backend, so this
                // resolution is a best-effort heuristic: first match wins.
                if matches.len() > 1 {
                    warn!(
                        "{} albums share the title {title:?}; resolving to the first match ({})",
                        matches.len(),
                        album.id
                    );
                }
                album.clone()
            }
            None => {
                warn!("album {title:?} created but absent from the refreshed listing");
                self.set_phase(CreatePhase::PartialSuccess);
                return Ok(CreateOutcome::Unresolved {
                    title: title.to_string(),
                });
            }
        };

        if initial_photo_ids.is_empty() {
            self.set_phase(CreatePhase::Done);
            return Ok(CreateOutcome::Created(album));
        }

        // Phase 3: attach the initial photos. A failure here is a partial
        // success — the album exists and is not rolled back.
        self.set_phase(CreatePhase::Attaching);
        let joined = join_ids(&dedupe_preserving_order(initial_photo_ids.to_vec()));
        let attach = self
            .gateway
            .add_album_assets(&principal, &album.id, &joined)
            .await
            .and_then(|body| ack::expect_ack("add assets", ack::ASSETS_ADDED, &body));
        match attach {
            Ok(()) => {
                self.set_phase(CreatePhase::Done);
                // Attaching can change the cover; refresh the listing.
                if let Err(e) = self.refresh_albums(&principal, token).await {
                    warn!("album list refresh after create failed: {e}");
                }
                let album = self.album_by_id(&album.id).unwrap_or(album);
                Ok(CreateOutcome::Created(album))
            }
            Err(error) => {
                warn!("album {title:?} created, photos not attached: {error}");
                self.set_phase(CreatePhase::PartialSuccess);
                Ok(CreateOutcome::PhotosNotAttached { album, error })
            }
        }
    }

    /// Rename an album. Single call, success-string contract.
    pub async fn rename(&self, album_id: &str, new_title: &str) -> Result<(), GalleryError> {
        validate_album_title(new_title)?;
        let (principal, token) = self.scope.bound()?;
        let body = self
            .gateway
            .rename_album(&principal, album_id, new_title)
            .await?;
        ack::expect_ack("rename album", ack::ALBUM_RENAMED, &body)?;
        if let Err(e) = self.refresh_albums(&principal, token).await {
            warn!("album list refresh after rename failed: {e}");
        }
        Ok(())
    }

    /// Change an album's date. The date is validated client-side before any
    /// network traffic; a malformed date never leaves the process.
    pub async fn redate(&self, album_id: &str, new_date: &str) -> Result<(), GalleryError> {
        validate_album_date(new_date)?;
        let (principal, token) = self.scope.bound()?;
        let body = self
            .gateway
            .redate_album(&principal, album_id, new_date)
            .await?;
        ack::expect_ack("redate album", ack::ALBUM_REDATED, &body)?;
        if let Err(e) = self.refresh_albums(&principal, token).await {
            warn!("album list refresh after redate failed: {e}");
        }
        Ok(())
    }

    /// Delete an album. On success the summary is removed locally.
    pub async fn delete(&self, album_id: &str) -> Result<(), GalleryError> {
        let (principal, token) = self.scope.bound()?;
        let body = self.gateway.delete_album(&principal, album_id).await?;
        ack::expect_ack("delete album", ack::ALBUM_DELETED, &body)?;
        if !self.scope.is_current(token) {
            warn!("discarding local removal after principal change");
            return Ok(());
        }
        {
            let mut inner = self.lock();
            inner.albums.retain(|album| album.id != album_id);
            inner.members.remove(album_id);
            if inner
                .open_detail
                .as_ref()
                .is_some_and(|detail| detail.summary.id == album_id)
            {
                inner.open_detail = None;
            }
        }
        self.persist(&principal);
        Ok(())
    }

    /// Attach photos to an album, then refetch the summary collection and
    /// the open detail — membership changes can move the cover photo, and
    /// the registry never infers that locally.
    pub async fn add_assets(
        &self,
        album_id: &str,
        photo_ids: &[String],
    ) -> Result<(), GalleryError> {
        self.mutate_assets(album_id, photo_ids, false).await
    }

    /// Remove photos from an album. Same refetch contract as
    /// [`add_assets`](Self::add_assets).
    pub async fn remove_assets(
        &self,
        album_id: &str,
        photo_ids: &[String],
    ) -> Result<(), GalleryError> {
        self.mutate_assets(album_id, photo_ids, true).await
    }

    /// Fetch an album's grouped contents and hold them as the open detail.
    pub async fn open_detail_for(&self, album_id: &str) -> Result<AlbumDetail, GalleryError> {
        let (principal, token) = self.scope.bound()?;

        // The summary comes from the local collection; refresh once if the
        // id is not known yet (e.g. deep link before the first listing).
        let summary = match self.album_by_id(album_id) {
            Some(summary) => summary,
            None => {
                self.refresh_albums(&principal, token).await?;
                self.album_by_id(album_id).ok_or_else(|| {
                    GalleryError::validation(format!("unknown album id {album_id:?}"))
                })?
            }
        };

        let listing = self
            .gateway
            .list_album_contents(&principal, album_id)
            .await?;
        if !self.scope.is_current(token) {
            warn!("discarding stale album contents for {album_id}");
            return Err(GalleryError::validation("principal changed during fetch"));
        }

        let detail = AlbumDetail {
            summary,
            groups: groups_from_listing(listing),
        };
        {
            let mut inner = self.lock();
            inner
                .members
                .insert(album_id.to_string(), detail.photo_ids());
            inner.open_detail = Some(detail.clone());
        }
        self.persist(&principal);
        Ok(detail)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    async fn mutate_assets(
        &self,
        album_id: &str,
        photo_ids: &[String],
        remove: bool,
    ) -> Result<(), GalleryError> {
        if photo_ids.is_empty() {
            debug!("asset mutation with no ids is a no-op");
            return Ok(());
        }
        let (principal, token) = self.scope.bound()?;
        let joined = join_ids(&dedupe_preserving_order(photo_ids.to_vec()));

        let (body, expected, operation) = if remove {
            let body = self
                .gateway
                .remove_album_assets(&principal, album_id, &joined)
                .await?;
            (body, ack::ASSETS_REMOVED, "remove assets")
        } else {
            let body = self
                .gateway
                .add_album_assets(&principal, album_id, &joined)
                .await?;
            (body, ack::ASSETS_ADDED, "add assets")
        };
        ack::expect_ack(operation, expected, &body)?;

        if let Err(e) = self.refresh_albums(&principal, token).await {
            warn!("album list refresh after {operation} failed: {e}");
        }
        let detail_open = self
            .lock()
            .open_detail
            .as_ref()
            .is_some_and(|detail| detail.summary.id == album_id);
        if detail_open {
            if let Err(e) = self.open_detail_for(album_id).await {
                warn!("album detail refresh after {operation} failed: {e}");
            }
        }
        Ok(())
    }

    async fn refresh_albums(
        &self,
        principal: &str,
        token: ScopeToken,
    ) -> Result<(), GalleryError> {
        let rows = self.gateway.list_albums(principal).await?;
        self.apply_rows(principal, token, rows);
        Ok(())
    }

    /// Replace the local collection from listing rows, unless the response
    /// is stale. Member lists for vanished albums are pruned.
    fn apply_rows(&self, principal: &str, token: ScopeToken, rows: Vec<AlbumRow>) {
        if !self.scope.is_current(token) {
            warn!("discarding stale album listing for {principal}");
            return;
        }
        {
            let mut inner = self.lock();
            inner.albums = rows.into_iter().map(AlbumRow::into_summary).collect();
            let known: std::collections::HashSet<String> =
                inner.albums.iter().map(|album| album.id.clone()).collect();
            inner.members.retain(|id, _| known.contains(id));
        }
        self.persist(principal);
    }

    fn set_phase(&self, phase: CreatePhase) {
        debug!("create workflow: {phase:?}");
        self.lock().create_phase = phase;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("albums mutex poisoned")
    }

    fn persist(&self, principal: &str) {
        let Some(store) = &self.store else { return };
        let persisted: Vec<PersistedAlbum> = {
            let inner = self.lock();
            inner
                .albums
                .iter()
                .map(|album| {
                    PersistedAlbum::from_summary(
                        album,
                        inner.members.get(&album.id).cloned().unwrap_or_default(),
                    )
                })
                .collect()
        };
        if let Err(e) = store.save_albums(principal, &persisted) {
            warn!("failed to persist albums: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use picfolio_api::wire::{AlbumRow, PageGroup, PhotoTuple};
    use picfolio_core::GalleryError;

    use super::{AlbumsRegistry, CreateOutcome, CreatePhase};
    use crate::identity::IdentityScope;
    use crate::testing::MockGateway;

    fn setup() -> (Arc<IdentityScope>, Arc<MockGateway>, AlbumsRegistry) {
        let scope = Arc::new(IdentityScope::new());
        scope.bind("anna");
        let gateway = MockGateway::new();
        let registry = AlbumsRegistry::new(scope.clone(), gateway.clone(), None);
        (scope, gateway, registry)
    }

    fn row(id: &str, title: &str) -> AlbumRow {
        AlbumRow(id.to_string(), title.to_string(), None, None)
    }

    fn contents(key: &str, ids: &[&str]) -> Vec<PageGroup> {
        vec![PageGroup(
            key.to_string(),
            ids.iter()
                .map(|id| PhotoTuple(id.to_string(), serde_json::Value::Null, None))
                .collect(),
        )]
    }

    #[tokio::test]
    async fn list_replaces_the_local_collection() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Trip"), row("alb-2", "Pets")]));

        let albums = registry.list().await.unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(registry.album_by_id("alb-2").unwrap().title, "Pets");

        gateway.enqueue_album_list(Ok(vec![row("alb-2", "Pets")]));
        registry.list().await.unwrap();
        assert!(registry.album_by_id("alb-1").is_none());
    }

    #[tokio::test]
    async fn create_with_unique_title_resolves_the_backend_id() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Old"), row("alb-9", "Trip")]));

        let outcome = registry.create("Trip", &[]).await.unwrap();
        match outcome {
            CreateOutcome::Created(album) => assert_eq!(album.id, "alb-9"),
            other => panic!("expected Created, got {other:?}"),
        }
        assert_eq!(registry.create_phase(), CreatePhase::Done);
        assert_eq!(gateway.calls_to("add_album_assets"), 0);
    }

    #[tokio::test]
    async fn create_attaches_initial_photos_deduplicated() {
        let (_scope, gateway, registry) = setup();
        // One listing for resolution, one for the post-attach refresh.
        gateway.enqueue_album_list(Ok(vec![row("alb-9", "Trip")]));
        gateway.enqueue_album_list(Ok(vec![row("alb-9", "Trip")]));

        let ids = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let outcome = registry.create("Trip", &ids).await.unwrap();
        assert!(!outcome.is_partial());

        let calls = gateway.calls();
        assert!(
            calls.contains(&"add_album_assets anna alb-9 a,b".to_string()),
            "unexpected transport payload: {calls:?}"
        );
    }

    #[tokio::test]
    async fn create_attach_failure_is_a_partial_success() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-9", "Trip")]));
        gateway.enqueue_add_assets(Err(GalleryError::transport("500")));

        let ids = vec!["a".to_string()];
        let outcome = registry.create("Trip", &ids).await.unwrap();
        match &outcome {
            CreateOutcome::PhotosNotAttached { album, error } => {
                assert_eq!(album.id, "alb-9");
                assert!(matches!(error, GalleryError::Transport { .. }));
            }
            other => panic!("expected PhotosNotAttached, got {other:?}"),
        }
        assert!(outcome.is_partial());
        assert_eq!(registry.create_phase(), CreatePhase::PartialSuccess);

        // The album is not rolled back.
        assert!(registry.album_by_id("alb-9").is_some());
        assert_eq!(gateway.calls_to("delete_album"), 0);
    }

    #[tokio::test]
    async fn create_failure_aborts_before_resolution() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_create(Err(GalleryError::transport("unreachable")));

        let err = registry.create("Trip", &[]).await.unwrap_err();
        assert!(matches!(err, GalleryError::Transport { .. }));
        assert_eq!(registry.create_phase(), CreatePhase::Failed);
        assert_eq!(gateway.calls_to("list_albums"), 0);
        assert!(registry.albums().is_empty());
    }

    #[tokio::test]
    async fn create_ack_mismatch_is_a_contract_violation() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_create(Ok("created!".to_string()));

        let err = registry.create("Trip", &[]).await.unwrap_err();
        assert!(matches!(err, GalleryError::Contract { .. }));
        assert_eq!(registry.create_phase(), CreatePhase::Failed);
    }

    #[tokio::test]
    async fn create_unresolved_when_the_title_never_appears() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Something Else")]));

        let ids = vec!["a".to_string()];
        let outcome = registry.create("Trip", &ids).await.unwrap();
        assert_eq!(
            outcome,
            CreateOutcome::Unresolved {
                title: "Trip".to_string()
            }
        );
        assert_eq!(registry.create_phase(), CreatePhase::PartialSuccess);
        // Attaching is skipped without a resolved id.
        assert_eq!(gateway.calls_to("add_album_assets"), 0);
    }

    #[tokio::test]
    async fn create_with_duplicate_titles_takes_the_first_match() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![
            row("alb-3", "Trip"),
            row("alb-7", "Trip"),
        ]));

        let outcome = registry.create("Trip", &[]).await.unwrap();
        assert_eq!(outcome.album().unwrap().id, "alb-3");
    }

    #[tokio::test]
    async fn create_rejects_blank_titles_without_network() {
        let (_scope, gateway, registry) = setup();
        let err = registry.create("   ", &[]).await.unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn redate_rejects_malformed_dates_without_network() {
        let (_scope, gateway, registry) = setup();

        let err = registry.redate("alb-1", "13/01/2024").await.unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn redate_refreshes_the_summary_on_success() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Trip")]));
        registry.list().await.unwrap();

        gateway.enqueue_album_list(Ok(vec![AlbumRow(
            "alb-1".to_string(),
            "Trip".to_string(),
            None,
            Some("2024-01-13".to_string()),
        )]));
        registry.redate("alb-1", "2024-01-13").await.unwrap();

        assert_eq!(
            registry.album_by_id("alb-1").unwrap().start_date.as_deref(),
            Some("2024-01-13")
        );
    }

    #[tokio::test]
    async fn rename_ack_mismatch_leaves_local_state_alone() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Trip")]));
        registry.list().await.unwrap();

        gateway.enqueue_rename(Ok("Renamed".to_string()));
        let err = registry.rename("alb-1", "Holiday").await.unwrap_err();
        assert!(matches!(err, GalleryError::Contract { .. }));

        assert_eq!(registry.album_by_id("alb-1").unwrap().title, "Trip");
        // No refresh is attempted after a failed mutation.
        assert_eq!(gateway.calls_to("list_albums"), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_summary_locally() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Trip"), row("alb-2", "Pets")]));
        registry.list().await.unwrap();

        registry.delete("alb-1").await.unwrap();
        assert!(registry.album_by_id("alb-1").is_none());
        assert_eq!(registry.albums().len(), 1);
    }

    #[tokio::test]
    async fn open_detail_builds_grouped_contents() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Trip")]));
        registry.list().await.unwrap();

        gateway.enqueue_album_contents(Ok(contents("2024-05-01", &["a", "b"])));
        let detail = registry.open_detail_for("alb-1").await.unwrap();
        assert_eq!(detail.summary.id, "alb-1");
        assert_eq!(detail.photo_ids(), ["a", "b"]);
        assert_eq!(registry.open_detail().unwrap(), detail);
    }

    #[tokio::test]
    async fn open_detail_for_an_unknown_id_fails_after_one_refresh() {
        let (_scope, gateway, registry) = setup();

        let err = registry.open_detail_for("ghost").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(gateway.calls_to("list_albums"), 1);
        assert_eq!(gateway.calls_to("list_album_contents"), 0);
    }

    #[tokio::test]
    async fn add_assets_joins_ids_and_refetches_detail_and_summary() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Trip")]));
        registry.list().await.unwrap();

        gateway.enqueue_album_contents(Ok(contents("2024-05-01", &["a"])));
        registry.open_detail_for("alb-1").await.unwrap();

        // Cover photo changes server-side as a membership side effect.
        gateway.enqueue_album_list(Ok(vec![AlbumRow(
            "alb-1".to_string(),
            "Trip".to_string(),
            Some("b".to_string()),
            None,
        )]));
        gateway.enqueue_album_contents(Ok(contents("2024-05-01", &["a", "b"])));

        let ids = vec!["b".to_string()];
        registry.add_assets("alb-1", &ids).await.unwrap();

        assert!(gateway
            .calls()
            .contains(&"add_album_assets anna alb-1 b".to_string()));
        assert_eq!(
            registry.album_by_id("alb-1").unwrap().cover_photo_id.as_deref(),
            Some("b")
        );
        assert_eq!(registry.open_detail().unwrap().photo_ids(), ["a", "b"]);
    }

    #[tokio::test]
    async fn remove_assets_uses_its_own_ack() {
        let (_scope, gateway, registry) = setup();
        gateway.enqueue_album_list(Ok(vec![row("alb-1", "Trip")]));
        registry.list().await.unwrap();

        gateway.enqueue_remove_assets(Ok("Assets removed successfully".to_string()));
        let ids = vec!["a".to_string(), "b".to_string()];
        registry.remove_assets("alb-1", &ids).await.unwrap();
        assert!(gateway
            .calls()
            .contains(&"remove_album_assets anna alb-1 a,b".to_string()));
    }

    #[tokio::test]
    async fn empty_asset_mutations_are_no_ops() {
        let (_scope, gateway, registry) = setup();
        registry.add_assets("alb-1", &[]).await.unwrap();
        registry.remove_assets("alb-1", &[]).await.unwrap();
        assert!(gateway.calls().is_empty());
    }
}

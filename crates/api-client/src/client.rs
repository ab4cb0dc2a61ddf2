use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use urlencoding::encode;

use picfolio_api::wire::{AlbumRow, FavoritesListing, PageListing};
use picfolio_api::RemoteGateway;
use picfolio_core::GalleryError;

/// Typed HTTP client for the picfolio backend.
///
/// Implements [`RemoteGateway`] against the path-scoped endpoint catalog
/// (every route carries the principal). Responses are parsed here; the
/// success-string contract on mutating album endpoints is enforced by the
/// caller, which receives the raw acknowledgment body.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GalleryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GalleryError::transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GalleryError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GalleryError::transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GalleryError::transport(format!("{status}: {body}")));
        }
        resp.json()
            .await
            .map_err(|e| GalleryError::contract(format!("malformed response body: {e}")))
    }

    /// POST returning the raw body text on 2xx. Used for the endpoints that
    /// acknowledge with a literal success string.
    async fn post_text(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, GalleryError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let mut req = self.client.post(&url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| GalleryError::transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(GalleryError::transport(format!("{status}: {text}")));
        }
        Ok(text)
    }
}

#[async_trait]
impl RemoteGateway for ApiClient {
    async fn list_favorites(&self, principal: &str) -> Result<FavoritesListing, GalleryError> {
        self.get_json(&format!("/list/liked/{}", encode(principal)))
            .await
    }

    async fn toggle_favorite(
        &self,
        principal: &str,
        photo_id: &str,
    ) -> Result<(), GalleryError> {
        self.post_text(
            &format!("/like/{}/{}", encode(principal), encode(photo_id)),
            None,
        )
        .await
        .map(|_| ())
    }

    async fn list_albums(&self, principal: &str) -> Result<Vec<AlbumRow>, GalleryError> {
        self.get_json(&format!("/list/albums/{}", encode(principal)))
            .await
    }

    async fn create_album(&self, principal: &str, title: &str) -> Result<String, GalleryError> {
        self.post_text(
            &format!("/album/create/{}", encode(principal)),
            Some(serde_json::json!({ "title": title })),
        )
        .await
    }

    async fn rename_album(
        &self,
        principal: &str,
        album_id: &str,
        title: &str,
    ) -> Result<String, GalleryError> {
        self.post_text(
            &format!("/album/rename/{}/{}", encode(principal), encode(album_id)),
            Some(serde_json::json!({ "title": title })),
        )
        .await
    }

    async fn redate_album(
        &self,
        principal: &str,
        album_id: &str,
        date: &str,
    ) -> Result<String, GalleryError> {
        self.post_text(
            &format!("/album/redate/{}/{}", encode(principal), encode(album_id)),
            Some(serde_json::json!({ "date": date })),
        )
        .await
    }

    async fn delete_album(
        &self,
        principal: &str,
        album_id: &str,
    ) -> Result<String, GalleryError> {
        self.post_text(
            &format!("/album/delete/{}/{}", encode(principal), encode(album_id)),
            None,
        )
        .await
    }

    async fn add_album_assets(
        &self,
        principal: &str,
        album_id: &str,
        joined_ids: &str,
    ) -> Result<String, GalleryError> {
        self.post_text(
            &format!("/album/assets/add/{}/{}", encode(principal), encode(album_id)),
            Some(serde_json::json!({ "ids": joined_ids })),
        )
        .await
    }

    async fn remove_album_assets(
        &self,
        principal: &str,
        album_id: &str,
        joined_ids: &str,
    ) -> Result<String, GalleryError> {
        self.post_text(
            &format!(
                "/album/assets/remove/{}/{}",
                encode(principal),
                encode(album_id)
            ),
            Some(serde_json::json!({ "ids": joined_ids })),
        )
        .await
    }

    async fn list_photos(
        &self,
        principal: &str,
        page_index: u32,
    ) -> Result<PageListing, GalleryError> {
        self.get_json(&format!(
            "/list/general/{}?page={page_index}",
            encode(principal)
        ))
        .await
    }

    async fn list_album_contents(
        &self,
        principal: &str,
        album_id: &str,
    ) -> Result<PageListing, GalleryError> {
        self.get_json(&format!(
            "/list/album/{}/{}",
            encode(principal),
            encode(album_id)
        ))
        .await
    }
}

//! OneDrive client — the source side of the reconciliation.
//!
//! Lists the configured folder via the Graph children endpoint, following
//! `@odata.nextLink` cursors, with an optional local snapshot so repeated
//! runs don't re-enumerate a large folder. Also opens streaming requests
//! against the per-item content endpoint for the download phase.

pub mod cache;
pub mod types;

use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::transport::{StreamingResponse, Transport};

use cache::SnapshotCache;
use types::{ChildrenPage, DriveItem};

pub struct DriveClient {
    config: GraphConfig,
    session: Box<dyn Transport>,
    cache: Option<SnapshotCache>,
}

impl DriveClient {
    pub fn new(config: GraphConfig) -> Self {
        Self::with_transport(config, Box::new(reqwest::Client::new()))
    }

    pub fn with_transport(config: GraphConfig, session: Box<dyn Transport>) -> Self {
        let cache = config
            .use_cache
            .then(|| SnapshotCache::new(config.cache_file.clone()));
        Self {
            config,
            session,
            cache,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.access_token)
    }

    fn children_url(&self) -> String {
        format!(
            "{}/me/drive/root:/{}:/children",
            self.config.base_url, self.config.drive_folder
        )
    }

    fn content_url(&self, item: &DriveItem) -> String {
        format!("{}/me/drive/items/{}/content", self.config.base_url, item.id)
    }

    /// List the files in the configured folder, folders excluded.
    ///
    /// Serves the snapshot when caching is enabled, `force_refresh` is
    /// false and the snapshot is readable; any snapshot problem degrades
    /// to a live fetch with a warning.
    pub async fn list_files(&self, force_refresh: bool) -> Result<Vec<DriveItem>> {
        if !force_refresh {
            if let Some(cache) = &self.cache {
                if cache.exists() {
                    match cache.load().await {
                        Ok(items) => {
                            tracing::info!(
                                path = %cache.path().display(),
                                "loaded OneDrive listing from snapshot"
                            );
                            return Ok(items.into_iter().filter(DriveItem::is_file).collect());
                        }
                        Err(e) => {
                            tracing::warn!("snapshot unreadable ({e:#}), refetching from OneDrive")
                        }
                    }
                }
            }
        }

        tracing::info!("fetching OneDrive listing from the Graph API");
        let items = self.fetch_all_pages().await?;

        if let Some(cache) = &self.cache {
            match cache.store(&items).await {
                Ok(()) => tracing::info!(
                    path = %cache.path().display(),
                    count = items.len(),
                    "snapshot written"
                ),
                Err(e) => tracing::warn!("could not write snapshot ({e:#})"),
            }
        }

        Ok(items.into_iter().filter(DriveItem::is_file).collect())
    }

    async fn fetch_all_pages(&self) -> Result<Vec<DriveItem>> {
        let auth = self.auth_header();
        let mut items = Vec::new();
        let mut url = Some(self.children_url());

        while let Some(next) = url {
            let response = self
                .session
                .get(&next, &[("Authorization", auth.as_str())])
                .await?;
            if response.status != 200 {
                return Err(Error::Api {
                    service: "OneDrive",
                    status: response.status,
                    body: response.body,
                });
            }
            let page: ChildrenPage = serde_json::from_str(&response.body)?;
            items.extend(page.value);
            url = page.next_link;
        }

        Ok(items)
    }

    /// Open a streaming request against the per-item content endpoint.
    /// Redirects are followed by the transport; the caller still checks
    /// the terminal status.
    pub async fn fetch_content(&self, item: &DriveItem) -> Result<StreamingResponse> {
        let auth = self.auth_header();
        let response = self
            .session
            .get_stream(&self.content_url(item), &[("Authorization", auth.as_str())])
            .await?;
        Ok(response)
    }
}

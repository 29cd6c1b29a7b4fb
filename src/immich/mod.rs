//! Immich client — the target side of the reconciliation.
//!
//! Drives the metadata search endpoint page by page until the server
//! stops returning items or a next-page token.

pub mod types;

use serde_json::json;

use crate::config::ImmichConfig;
use crate::error::{Error, Result};
use crate::transport::Transport;

use types::{ImmichAsset, SearchResponse};

pub struct ImmichClient {
    config: ImmichConfig,
    session: Box<dyn Transport>,
}

impl ImmichClient {
    pub fn new(config: ImmichConfig) -> Self {
        Self::with_transport(config, Box::new(reqwest::Client::new()))
    }

    pub fn with_transport(config: ImmichConfig, session: Box<dyn Transport>) -> Self {
        Self { config, session }
    }

    fn search_url(&self) -> String {
        format!("{}/api/search/metadata", self.config.base_url)
    }

    /// Fetch every asset the search endpoint will return, in arrival
    /// order. The server is trusted not to repeat items across pages.
    pub async fn list_assets(&self) -> Result<Vec<ImmichAsset>> {
        let url = self.search_url();
        let mut assets = Vec::new();
        let mut page: u64 = 1;

        loop {
            let body = json!({"size": self.config.page_size, "page": page});
            let response = self
                .session
                .post(&url, &body, &[("x-api-key", self.config.api_key.as_str())])
                .await?;
            if response.status != 200 {
                return Err(Error::Api {
                    service: "Immich",
                    status: response.status,
                    body: response.body,
                });
            }

            let parsed: SearchResponse = serde_json::from_str(&response.body)?;
            let block = parsed.assets;
            if block.items.is_empty() {
                break;
            }
            tracing::debug!(page, count = block.items.len(), "fetched Immich page");
            let has_next = block.has_next();
            let next_page_number = block.next_page_number();
            assets.extend(block.items);

            if !has_next {
                break;
            }
            // A token that isn't an integer still advances the scan.
            page = next_page_number.unwrap_or(page + 1);
        }

        Ok(assets)
    }
}

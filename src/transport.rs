//! Minimal async HTTP seam shared by both API clients.
//!
//! The concrete implementation is `reqwest::Client`; tests substitute
//! fabricated transports so pagination and download logic can be exercised
//! without a network.

use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt, TryStreamExt};
use serde_json::Value;

/// A buffered API response: HTTP status plus full body text.
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Response body chunks as delivered by the HTTP stack.
pub type ByteStream = Pin<Box<dyn Stream<Item = anyhow::Result<Bytes>> + Send>>;

/// A response whose body is consumed incrementally.
pub struct StreamingResponse {
    pub status: u16,
    pub body: ByteStream,
}

impl StreamingResponse {
    /// Drain the body into text, used to surface rejected responses.
    pub async fn text(self) -> String {
        let mut buf = Vec::new();
        let mut body = self.body;
        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => buf.extend_from_slice(&bytes),
                Err(_) => break,
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<ApiResponse>;

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> anyhow::Result<ApiResponse>;

    async fn get_stream(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> anyhow::Result<StreamingResponse>;
}

#[async_trait::async_trait]
impl Transport for reqwest::Client {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> anyhow::Result<ApiResponse> {
        let mut builder = reqwest::Client::get(self, url);
        for &(k, v) in headers {
            builder = builder.header(k, v);
        }
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(ApiResponse { status, body })
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> anyhow::Result<ApiResponse> {
        let mut builder = reqwest::Client::post(self, url).json(body);
        for &(k, v) in headers {
            builder = builder.header(k, v);
        }
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(ApiResponse { status, body })
    }

    async fn get_stream(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> anyhow::Result<StreamingResponse> {
        let mut builder = reqwest::Client::get(self, url);
        for &(k, v) in headers {
            builder = builder.header(k, v);
        }
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes_stream().map_err(anyhow::Error::from).boxed();
        Ok(StreamingResponse { status, body })
    }
}

//! AnalyticsClient - HTTP implementation of the analytics service seam.
//!
//! Talks to the `/api/chat/` and `/api/download/` endpoints. Every transport
//! error, non-success status and undecodable body is collapsed into the
//! endpoint's single error kind; the server's message is kept for logging.

use async_trait::async_trait;
use estate_core::EstateError;
use estate_core::analytics::{AnalyticsApi, ChatReply, ChatRequest, DownloadRequest};
use estate_core::config::{CHAT_ENDPOINT, ClientConfig, DOWNLOAD_ENDPOINT};
use estate_core::error::Result;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

/// Client for the analytics service.
#[derive(Clone)]
pub struct AnalyticsClient {
    client: Client,
    chat_url: String,
    download_url: String,
}

impl AnalyticsClient {
    /// Creates a client for the given base URL with transport defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        let config = ClientConfig {
            api_base_url: base_url.into(),
            ..Default::default()
        };
        Self::with_client(Client::new(), &config)
    }

    /// Creates a client from configuration, applying the optional timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EstateError::config(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self::with_client(client, config))
    }

    fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            chat_url: config.endpoint(CHAT_ENDPOINT),
            download_url: config.endpoint(DOWNLOAD_ENDPOINT),
        }
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> std::result::Result<Response, String> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| format!("request to {url} failed: {err}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(describe_http_error(status, &body_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl AnalyticsApi for AnalyticsClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        info!(url = %self.chat_url, "Sending chat request");

        let response = self
            .post(&self.chat_url, request)
            .await
            .map_err(EstateError::chat_failed)?;

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|err| EstateError::chat_failed(format!("Failed to parse chat reply: {err}")))?;

        debug!(
            has_chart = reply.chart.is_some(),
            table_rows = reply.table.as_ref().map_or(0, Vec::len),
            has_growth = reply.growth.is_some(),
            "Chat reply received"
        );
        Ok(reply)
    }

    async fn download(&self, request: &DownloadRequest) -> Result<Vec<u8>> {
        info!(url = %self.download_url, areas = ?request.areas, "Requesting report download");

        let response = self
            .post(&self.download_url, request)
            .await
            .map_err(EstateError::download_failed)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|err| EstateError::download_failed(format!("Failed to read report body: {err}")))?;

        debug!(bytes = bytes.len(), "Report received");
        Ok(bytes.to_vec())
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

fn describe_http_error(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error)
        .unwrap_or_else(|_| body.to_string());

    format!("HTTP {}: {}", status.as_u16(), message)
}

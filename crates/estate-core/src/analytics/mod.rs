//! The analytics service seam.
//!
//! The conversation layer only talks to the service through [`AnalyticsApi`],
//! so tests can substitute an in-memory double for the HTTP client.

mod model;

pub use model::{ChatContext, ChatReply, ChatRequest, DownloadRequest, ReplyContext};

use async_trait::async_trait;

use crate::error::Result;

/// Chat and download operations offered by the analytics service.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Sends one chat message. Any failure is a `ChatRequestFailed` error.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// Fetches the CSV export for the given areas. Any failure is a
    /// `DownloadFailed` error.
    async fn download(&self, request: &DownloadRequest) -> Result<Vec<u8>>;
}

//! Request and reply payloads of the analytics service.

use serde::{Deserialize, Serialize};

use crate::view::{Chart, Growth, Row, null_as_default};

/// Locations a chat request is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub areas: Vec<String>,
}

/// Body of `POST /api/chat/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, areas: Vec<String>) -> Self {
        Self {
            message: message.into(),
            context: Some(ChatContext { areas }),
        }
    }
}

/// Context echoed back by the service. `areas` is absent when the service
/// could not resolve any location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyContext {
    #[serde(default)]
    pub areas: Option<Vec<String>>,
}

/// Reply of `POST /api/chat/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub chart: Option<Chart>,
    #[serde(default)]
    pub table: Option<Vec<Row>>,
    #[serde(default)]
    pub growth: Option<Growth>,
    #[serde(default)]
    pub context: Option<ReplyContext>,
}

impl ChatReply {
    /// Updated active areas carried by this reply, if any.
    pub fn updated_areas(&self) -> Option<&[String]> {
        self.context.as_ref()?.areas.as_deref()
    }
}

/// Body of `POST /api/download/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub areas: Vec<String>,
}

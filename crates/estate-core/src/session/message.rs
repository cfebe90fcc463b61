//! Conversation message types.

use serde::{Deserialize, Serialize};

use crate::analytics::ChatReply;
use crate::view::{Chart, Growth, Row};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single entry of the conversation log.
///
/// Bot messages may carry chart, table and growth attachments; user messages
/// never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<Chart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<Growth>,
    /// Timestamp when the message was created (RFC 3339 format).
    pub timestamp: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::plain(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::plain(Sender::Bot, text)
    }

    /// Builds the bot message for a chat reply.
    pub fn from_reply(reply: ChatReply) -> Self {
        Self {
            sender: Sender::Bot,
            text: reply.summary,
            chart: reply.chart,
            table: reply.table,
            growth: reply.growth,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    fn plain(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            chart: None,
            table: None,
            growth: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

//! Core domain for the Estate assistant.
//!
//! Holds the conversation state container, the payloads exchanged with the
//! analytics service and the pure mappings that turn replies into
//! displayable charts, growth callouts and grouped tables. Nothing in this
//! crate performs I/O; the HTTP client and the file sink live in
//! `estate-interaction`.

pub mod analytics;
pub mod config;
pub mod error;
pub mod quick_action;
pub mod report;
pub mod session;
pub mod view;

// Re-export common error type
pub use error::EstateError;

pub use analytics::{AnalyticsApi, ChatContext, ChatReply, ChatRequest, DownloadRequest, ReplyContext};
pub use report::{DownloadOutcome, ReportSink};
pub use session::{AppMode, ConversationView, Message, Sender, SendAction};

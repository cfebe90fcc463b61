//! Conversation session module.
//!
//! # Module Structure
//!
//! - `manager`: The conversation state container (`ConversationView`)
//! - `message`: Conversation log entries (`Sender`, `Message`)
//! - `app_mode`: Idle/Loading state (`AppMode`)
//! - `user_input`: Input classification (`UserInput`)
//!
//! # Usage
//!
//! ```ignore
//! use estate_core::session::{ConversationView, SendAction};
//!
//! let mut view = ConversationView::new();
//! if let SendAction::Chat(pending) = view.begin_send("Compare Wakad and Aundh") {
//!     let result = api.chat(&pending.request).await;
//!     view.settle_chat(pending.ticket, result);
//! }
//! ```

mod app_mode;
mod manager;
mod message;
mod user_input;

#[cfg(test)]
mod manager_test;

// Re-export public API
pub use app_mode::AppMode;
pub use manager::{
    ConversationView, FALLBACK_REPLY, GREETING, PendingChat, RequestTicket, SendAction,
    SendOutcome,
};
pub use message::{Message, Sender};
pub use user_input::{UserInput, mentions_download};

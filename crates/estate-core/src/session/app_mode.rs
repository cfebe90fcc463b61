//! Application mode types for conversation state.

use serde::{Deserialize, Serialize};

/// Represents the current interaction mode of the conversation.
///
/// `Loading` is held while at least one chat request is outstanding. Downloads
/// never enter it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AppMode {
    /// Waiting for user input.
    #[default]
    Idle,
    /// A chat reply is pending.
    Loading,
}

//! Quick action shortcuts.

mod model;

pub use model::{DEFAULT_SUGGESTIONS, QuickAction, QuickActionConfig};

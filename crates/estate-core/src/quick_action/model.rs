//! Quick action domain models.

use serde::{Deserialize, Serialize};

use crate::session::mentions_download;

/// Prompts offered as one-tap shortcuts.
pub const DEFAULT_SUGGESTIONS: [&str; 4] = [
    "Compare Wakad and Aundh",
    "Analyze all locations",
    "Best buy in Pune",
    "Download data",
];

/// A single quick action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    /// 1-based position shown to the user.
    pub slot: usize,
    /// Text sent as if the user had typed it.
    pub prompt: String,
}

impl QuickAction {
    pub fn new(slot: usize, prompt: impl Into<String>) -> Self {
        Self {
            slot,
            prompt: prompt.into(),
        }
    }

    /// True when sending this prompt triggers a download instead of a chat.
    pub fn is_download(&self) -> bool {
        mentions_download(&self.prompt)
    }
}

/// The set of quick actions available in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickActionConfig {
    pub actions: Vec<QuickAction>,
}

impl Default for QuickActionConfig {
    fn default() -> Self {
        Self {
            actions: DEFAULT_SUGGESTIONS
                .iter()
                .enumerate()
                .map(|(i, &prompt)| QuickAction::new(i + 1, prompt))
                .collect(),
        }
    }
}

impl QuickActionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an action by its 1-based slot.
    pub fn get(&self, slot: usize) -> Option<&QuickAction> {
        self.actions.iter().find(|a| a.slot == slot)
    }

    /// Chat prompts, shown as the regular chip row.
    pub fn chips(&self) -> Vec<&QuickAction> {
        self.actions.iter().filter(|a| !a.is_download()).collect()
    }

    /// Download shortcuts, shown apart from the chips.
    pub fn downloads(&self) -> Vec<&QuickAction> {
        self.actions.iter().filter(|a| a.is_download()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuickActionConfig::default();
        assert_eq!(config.actions.len(), 4);
        assert_eq!(config.get(1).unwrap().prompt, "Compare Wakad and Aundh");
        assert!(config.get(0).is_none());
        assert!(config.get(5).is_none());
    }

    #[test]
    fn test_download_action_is_split_from_chips() {
        let config = QuickActionConfig::default();

        let chips: Vec<&str> = config.chips().iter().map(|a| a.prompt.as_str()).collect();
        assert_eq!(
            chips,
            vec!["Compare Wakad and Aundh", "Analyze all locations", "Best buy in Pune"]
        );

        let downloads = config.downloads();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].slot, 4);
    }
}

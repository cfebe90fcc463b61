//! User input classification.

/// Represents user input to the conversation.
///
/// Anything mentioning "download" is a local command; everything else is
/// dialogue for the analytics service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Export the report for the active areas.
    Download(String),
    /// Natural language message for the analytics service.
    Dialogue(String),
}

impl UserInput {
    /// Trims and classifies raw input. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        if mentions_download(text) {
            Some(Self::Download(text.to_string()))
        } else {
            Some(Self::Dialogue(text.to_string()))
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Download(text) | Self::Dialogue(text) => text,
        }
    }
}

/// Case-insensitive substring test for "download".
pub fn mentions_download(text: &str) -> bool {
    text.to_lowercase().contains("download")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_in_any_case_or_position() {
        for text in ["download", "Download data", "please DOWNLOAD it", "redownloading"] {
            assert!(matches!(UserInput::parse(text), Some(UserInput::Download(_))), "{text}");
        }
    }

    #[test]
    fn test_dialogue_is_trimmed() {
        assert_eq!(
            UserInput::parse("  Compare Wakad and Aundh \n"),
            Some(UserInput::Dialogue("Compare Wakad and Aundh".to_string()))
        );
    }

    #[test]
    fn test_blank_input_is_none() {
        assert_eq!(UserInput::parse(""), None);
        assert_eq!(UserInput::parse(" \t\n "), None);
    }
}

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

pub const CHAT_ENDPOINT: &str = "/api/chat/";
pub const DOWNLOAD_ENDPOINT: &str = "/api/download/";

/// Client settings, as stored in `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Where downloaded reports are written; current directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    /// Per-request timeout. Unset leaves the transport default in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            download_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Full URL of an endpoint path such as [`CHAT_ENDPOINT`].
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let config = ClientConfig {
            api_base_url: "http://example.test:8000/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint(CHAT_ENDPOINT), "http://example.test:8000/api/chat/");
        assert_eq!(
            ClientConfig::default().endpoint(DOWNLOAD_ENDPOINT),
            "http://127.0.0.1:8000/api/download/"
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_toml_fields() {
        let config: ClientConfig = toml::from_str(
            "api_base_url = \"https://estate.example\"\ndownload_dir = \"/tmp/reports\"\nrequest_timeout_secs = 45\n",
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://estate.example");
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/reports"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(45)));
    }
}

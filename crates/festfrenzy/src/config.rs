//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use festfrenzy_pages::PageConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::FestfrenzyError;

/// How to reach the backend and where to keep the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL the API paths are joined onto.
    ///
    /// Default: `http://localhost:8000`
    pub api_url: String,

    /// Per-request timeout.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,

    /// Directory holding the credential file.
    ///
    /// Default: `.festfrenzy`
    pub state_dir: PathBuf,

    /// Display and reconciliation settings for pages.
    pub pages: PageConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(10),
            state_dir: PathBuf::from(".festfrenzy"),
            pages: PageConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parses [`api_url`](Self::api_url).
    ///
    /// # Errors
    /// Returns [`FestfrenzyError::Config`] if it isn't an absolute
    /// `http`/`https` URL.
    pub fn base_url(&self) -> Result<Url, FestfrenzyError> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| FestfrenzyError::Config(format!("api url {:?}: {e}", self.api_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FestfrenzyError::Config(format!(
                "api url must be http or https, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();

        let url = config.base_url().expect("default url parses");
        assert_eq!(url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.pages.utc_offset_minutes, 330);
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        let config = ClientConfig {
            api_url: "not a url".into(),
            ..ClientConfig::default()
        };

        assert!(matches!(config.base_url(), Err(FestfrenzyError::Config(_))));
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        let config = ClientConfig {
            api_url: "ftp://files.college.edu".into(),
            ..ClientConfig::default()
        };

        let err = config.base_url().expect_err("should fail");
        assert!(err.to_string().contains("ftp"));
    }
}

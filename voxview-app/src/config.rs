//! Runtime configuration.

use crate::constants::{
    DEFAULT_SERVER_URL, DEFAULT_SNIFF_TIMEOUT, IMAGE_DOWNLOAD_PATH, VOX_DOWNLOAD_PATH,
};
use crate::errors::ConfigError;
use reqwest::Url;
use std::time::Duration;

/// Where assets are downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_url: String,
    pub sniff_timeout: Duration,
}

impl ServerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_sniff_timeout(mut self, timeout: Duration) -> Self {
        self.sniff_timeout = timeout;
        self
    }

    /// URL of the container payload for `name`.
    pub fn vox_url(&self, name: &str) -> Result<String, ConfigError> {
        self.join(VOX_DOWNLOAD_PATH, name)
    }

    /// Display URL of the image `name`.
    pub fn image_url(&self, name: &str) -> Result<String, ConfigError> {
        self.join(IMAGE_DOWNLOAD_PATH, name)
    }

    /// Append `route` and `name` to the base URL. `name` is one opaque,
    /// percent-encoded path segment.
    fn join(&self, route: &str, name: &str) -> Result<String, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidServerUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(route.split('/'))
            .push(name);
        Ok(url.to_string())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            sniff_timeout: DEFAULT_SNIFF_TIMEOUT,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub enable_tracy: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_tracy: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_urls() {
        let server = ServerConfig::new("http://assets.local:9000/");
        assert_eq!(
            server.vox_url("model.pb").unwrap(),
            "http://assets.local:9000/download/vox/model.pb"
        );
        assert_eq!(
            server.image_url("photo.png").unwrap(),
            "http://assets.local:9000/download/image/photo.png"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let server = ServerConfig::new("http://srv/assets");
        assert_eq!(
            server.vox_url("a.pb").unwrap(),
            "http://srv/assets/download/vox/a.pb"
        );
    }

    #[test]
    fn test_name_is_one_encoded_segment() {
        let server = ServerConfig::new("http://srv");
        let url = server.vox_url("scan#2.pb").unwrap();
        assert_eq!(url, "http://srv/download/vox/scan%232.pb");
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.path(), "/download/vox/scan%232.pb");
        assert_eq!(parsed.fragment(), None);

        assert_eq!(
            server.image_url("my photo.png").unwrap(),
            "http://srv/download/image/my%20photo.png"
        );
        assert_eq!(
            server.vox_url("a?b/c%d.pb").unwrap(),
            "http://srv/download/vox/a%3Fb%2Fc%25d.pb"
        );
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let err = ServerConfig::new("").image_url("a.jpg").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidServerUrl { .. }));
    }
}

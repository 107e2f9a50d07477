//! Handle on the remote dashboard API.
//!
//! The HTTP layer lives outside this crate; commands only ever see the
//! resolved endpoint and credentials.

use std::fmt;

use crate::config::ApiConfig;

/// Endpoint and credentials handed to every command handler.
#[derive(Clone, PartialEq, Eq)]
pub struct Client {
    url: String,
    key: String,
}

impl Client {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_owned(),
            key: key.into(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// API key, empty for anonymous access.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl From<&ApiConfig> for Client {
    fn from(cfg: &ApiConfig) -> Self {
        Self::new(cfg.url.clone(), cfg.key.clone())
    }
}

// Never print the key, even at debug level.
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("key", &if self.key.is_empty() { "<none>" } else { "<redacted>" })
            .finish()
    }
}

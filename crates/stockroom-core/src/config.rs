// ── Runtime client configuration ──
//
// Describes *where* the items API lives and how long to wait for it.
// Never touches disk: the CLI/TUI resolves a `ClientConfig` from its own
// config layer and hands it in.

use std::time::Duration;

use url::Url;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Fully resolved API base, e.g. `http://localhost:8000/api`.
    pub api_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed TLS certificates.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }

    /// Build the HTTP client this configuration describes.
    pub fn build_client(&self) -> Result<stockroom_api::ItemsClient, CoreError> {
        let transport = stockroom_api::TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        };
        Ok(stockroom_api::ItemsClient::new(
            self.api_url.as_str(),
            &transport,
        )?)
    }
}

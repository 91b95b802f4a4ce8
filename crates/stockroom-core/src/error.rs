// ── Core error types ──
//
// User-facing errors from stockroom-core. The `From<stockroom_api::Error>`
// impl folds transport-layer failures into the three kinds the item
// manager distinguishes: validation, network and server.

use thiserror::Error;

use crate::validate::ValidationError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Client-side ──────────────────────────────────────────────────
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ── Transport ────────────────────────────────────────────────────
    #[error("Cannot reach item server: {reason}")]
    Network { reason: String },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Item not found: {message}")]
    NotFound { message: String },

    /// Non-success response. `message` is the trimmed response body and
    /// may be empty.
    #[error("Server rejected request (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from server: {message}")]
    Decode { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Text for an error toast: the server's message if it sent one,
    /// the validation message for client-side failures, `fallback`
    /// for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(v) => v.to_string(),
            Self::Server { message, .. } | Self::NotFound { message } if !message.is_empty() => {
                message.clone()
            }
            _ => fallback.to_owned(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<stockroom_api::Error> for CoreError {
    fn from(err: stockroom_api::Error) -> Self {
        match err {
            stockroom_api::Error::Transport(ref e) => {
                if let Some(status) = e.status() {
                    CoreError::Server {
                        status: status.as_u16(),
                        message: String::new(),
                    }
                } else {
                    let url = e
                        .url()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "<unknown>".into());
                    CoreError::Network {
                        reason: format!("{url}: {e}"),
                    }
                }
            }
            stockroom_api::Error::Tls(msg) => CoreError::Network {
                reason: format!("TLS error: {msg}"),
            },
            stockroom_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            stockroom_api::Error::Status { status: 404, body } => {
                CoreError::NotFound { message: body }
            }
            stockroom_api::Error::Status { status, body } => CoreError::Server {
                status,
                message: body,
            },
            stockroom_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}

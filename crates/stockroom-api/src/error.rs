use thiserror::Error;

/// Top-level error type for the `stockroom-api` crate.
///
/// Covers transport failures, non-success HTTP statuses, and response
/// bodies that do not match the expected shape. `stockroom-core` maps
/// these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or client-builder failure.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-success HTTP status. `body` is the trimmed response text,
    /// which the items API uses as its error message.
    #[error("Server error (HTTP {status}): {}", display_body(.body))]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn display_body(body: &str) -> &str {
    if body.is_empty() { "<empty body>" } else { body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_body_is_labelled() {
        let err = Error::Status {
            status: 400,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Server error (HTTP 400): <empty body>");

        let err = Error::Status {
            status: 409,
            body: "duplicate name".into(),
        };
        assert_eq!(err.to_string(), "Server error (HTTP 409): duplicate name");
    }
}

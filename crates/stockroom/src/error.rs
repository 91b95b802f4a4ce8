//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use stockroom_config::ConfigError;
use stockroom_core::{CoreError, ValidationError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the item server")]
    #[diagnostic(
        code(stockroom::connection_failed),
        help(
            "Check that the server is running and the URL is right.\n\
             {reason}\n\
             Try: stockroom --server http://localhost:8000 health"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Item '{identifier}' not found")]
    #[diagnostic(
        code(stockroom::not_found),
        help("Run: stockroom items list to see available items")
    )]
    NotFound { identifier: String },

    #[error("{message}")]
    #[diagnostic(code(stockroom::conflict))]
    Conflict { message: String },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Server error (HTTP {status}): {message}")]
    #[diagnostic(code(stockroom::server_error))]
    Server { status: u16, message: String },

    #[error("Unexpected response from server: {message}")]
    #[diagnostic(
        code(stockroom::bad_response),
        help("Is --api-url pointing at the items API and not a web page?")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(stockroom::validation))]
    InvalidItem(#[from] ValidationError),

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(stockroom::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(stockroom::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: stockroom config init --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(stockroom::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(stockroom::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::InvalidItem(_)
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the requested id to a not-found error.
    pub fn for_item(self, id: &str) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                identifier: id.to_owned(),
            },
            other => other,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => CliError::InvalidItem(v),

            CoreError::Network { reason } => CliError::ConnectionFailed { reason },

            CoreError::NotFound { message } => CliError::NotFound {
                identifier: message,
            },

            CoreError::Server { status: 409, message } => CliError::Conflict { message },

            CoreError::Server { status, message } => CliError::Server {
                status,
                message: if message.is_empty() {
                    "no details from server".into()
                } else {
                    message
                },
            },

            CoreError::Decode { message } => CliError::BadResponse { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProfile { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_usage_errors() {
        let err = CliError::from(CoreError::Validation(ValidationError::InvalidPrice));
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert_eq!(err.to_string(), "Price must be a non-negative number");
    }

    #[test]
    fn conflict_keeps_server_message() {
        let err = CliError::from(CoreError::Server {
            status: 409,
            message: "duplicate name".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
        assert_eq!(err.to_string(), "duplicate name");
    }

    #[test]
    fn not_found_reports_requested_id() {
        let err = CliError::from(CoreError::NotFound {
            message: "Item not found".into(),
        })
        .for_item("abc");
        assert_eq!(err.to_string(), "Item 'abc' not found");
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }
}

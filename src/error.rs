//! Error handling for attune.
//!
//! The playback engine itself never returns errors: configuration problems
//! (unresolved ids, zero frequencies) and lifecycle misuse (double stop,
//! control ops with no item loaded) are defensive no-ops. Errors exist only
//! at the edges: catalog loading, preference files, and the remote service.

use thiserror::Error;

/// Result type alias for attune operations
pub type Result<T> = std::result::Result<T, AttuneError>;

#[derive(Error, Debug)]
pub enum AttuneError {
    #[error("catalog error: {reason}")]
    Catalog { reason: String },

    /// Error surfaced by the remote AI service. The message is user-visible
    /// text extracted from the response body, or a generic status fallback.
    #[error("{message}")]
    Remote { message: String },

    #[error("remote transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_message_is_the_display_text() {
        let err = AttuneError::Remote {
            message: "server error: 503".to_string(),
        };
        assert_eq!(err.to_string(), "server error: 503");
    }

    #[test]
    fn catalog_error_names_the_reason() {
        let err = AttuneError::Catalog {
            reason: "unknown frequency id 'nope'".to_string(),
        };
        assert!(err.to_string().contains("unknown frequency id"));
    }
}

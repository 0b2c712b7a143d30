//! Error types for the sessdir storage layer.
//!
//! Provides [`StorageError`], shared by the local and remote backends. It is
//! non-exhaustive so new failure shapes can be added without breaking
//! downstream matches.
//!
//! An absent property or an absent session id is never an error: those are
//! successful outcomes carrying an empty value or `false`.

use thiserror::Error;

/// Top-level error type for session storage.
///
/// Variants are grouped by where the failure originated: the local medium
/// (disk), the remote medium (transport, protocol, authority), or
/// construction-time setup (identity, configuration).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StorageError {
    // ── Local medium ─────────────────────────────────────────────────

    /// Underlying I/O error (disk unreadable or unwritable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // ── Remote medium ────────────────────────────────────────────────

    /// The request invoker itself failed; no response was received.
    #[error("transport error: {message}")]
    Transport {
        /// What the transport reported.
        message: String,
    },

    /// A response arrived but was malformed or of an unexpected shape.
    #[error("protocol error: {reason}")]
    Protocol {
        /// What was wrong with the response.
        reason: String,
    },

    /// The authority answered with an explicit error object.
    #[error("authority error {code}: {message}")]
    Authority {
        /// Error code supplied by the authority.
        code: i32,
        /// Error message supplied by the authority.
        message: String,
    },

    // ── Setup ────────────────────────────────────────────────────────

    /// The identity of the current process user could not be resolved.
    #[error("cannot resolve current user: {reason}")]
    UserResolution {
        /// Why resolution failed.
        reason: String,
    },

    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl StorageError {
    /// Whether retrying the same operation later could plausibly succeed.
    ///
    /// Protocol and authority errors describe a well-formed exchange that
    /// went wrong, so repeating it is not expected to help.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Io(_))
    }

    /// Build a [`StorageError::Protocol`] from any displayable reason.
    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StorageError>;

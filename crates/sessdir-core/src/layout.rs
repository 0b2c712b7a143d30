//! On-disk layout of the local backend.
//!
//! ```text
//! <scratch>/sessions/active/          active-sessions root
//!     session-<id>/                   one directory per session
//!         properites/                 one file per property
//!             last-used               contents = raw value
//! ```

use std::path::{Path, PathBuf};

/// Prefix of every session directory name.
pub const SESSION_DIR_PREFIX: &str = "session-";

/// Name of the per-session properties directory. The spelling matches
/// existing on-disk layouts and must not be corrected.
pub const PROPERTIES_DIR_NAME: &str = "properites";

/// Active-sessions root beneath a user scratch path.
pub fn active_sessions_path(scratch: &Path) -> PathBuf {
    scratch.join("sessions").join("active")
}

/// Directory holding session `id` beneath the active-sessions root.
pub fn session_dir(root: &Path, id: &str) -> PathBuf {
    root.join(format!("{SESSION_DIR_PREFIX}{id}"))
}

/// Recover a session id from a directory name, if it carries the prefix.
pub fn session_id_from_dir_name(name: &str) -> Option<&str> {
    name.strip_prefix(SESSION_DIR_PREFIX)
}

//! Resolved identity of the user a backend acts for.

use serde::{Deserialize, Serialize};

/// A resolved operating-system user.
///
/// The remote backend scopes every request by [`SystemUser::user_id`]; the
/// username only appears in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemUser {
    /// Numeric user id.
    pub user_id: u32,
    /// Login name.
    pub username: String,
}

impl SystemUser {
    /// Create a user from its numeric id and login name.
    pub fn new(user_id: u32, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

impl std::fmt::Display for SystemUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.username, self.user_id)
    }
}

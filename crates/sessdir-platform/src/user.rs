//! Current-user resolution.
//!
//! The remote backend is meaningless without a resolved identity, so the
//! factory asks the platform for the user that owns this process. On unix
//! the native resolver looks the process uid up in the passwd database via
//! `nix`; it falls back to `$USER` / `$LOGNAME` when the uid has no passwd
//! entry (common inside minimal containers).

use sessdir_types::SystemUser;

/// Resolves the identity of the user running this process.
pub trait UserResolver: Send + Sync {
    /// Return the current user, or an error if it cannot be determined.
    fn current_user(&self) -> std::io::Result<SystemUser>;
}

/// Native resolver backed by the passwd database.
#[cfg(feature = "native")]
pub struct NativeUserResolver;

#[cfg(all(feature = "native", unix))]
impl UserResolver for NativeUserResolver {
    fn current_user(&self) -> std::io::Result<SystemUser> {
        let uid = nix::unistd::Uid::current();
        match nix::unistd::User::from_uid(uid).map_err(std::io::Error::from)? {
            Some(user) => Ok(SystemUser::new(uid.as_raw(), user.name)),
            None => {
                let uid = uid.as_raw();
                let name = std::env::var("USER")
                    .or_else(|_| std::env::var("LOGNAME"))
                    .map_err(|_| {
                        std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            format!("no passwd entry for uid {uid} and USER is unset"),
                        )
                    })?;
                tracing::debug!(uid, username = %name, "no passwd entry; using USER");
                Ok(SystemUser::new(uid, name))
            }
        }
    }
}

#[cfg(all(feature = "native", not(unix)))]
impl UserResolver for NativeUserResolver {
    fn current_user(&self) -> std::io::Result<SystemUser> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "user resolution requires a unix target",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_current_user_matches_uid() {
        let user = NativeUserResolver.current_user();
        // The uid is always known; the name may legitimately be missing in
        // stripped-down sandboxes without passwd or USER.
        if let Ok(user) = user {
            assert_eq!(user.user_id, nix::unistd::Uid::current().as_raw());
            assert!(!user.username.is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_current_user_name_matches_passwd() {
        let uid = nix::unistd::Uid::current();
        if let Ok(Some(entry)) = nix::unistd::User::from_uid(uid) {
            let user = NativeUserResolver.current_user().unwrap();
            assert_eq!(user.username, entry.name);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_root_has_passwd_entry() {
        // uid 0 is present in every passwd database we run tests against.
        if let Ok(Some(root)) = nix::unistd::User::from_uid(nix::unistd::Uid::from_raw(0)) {
            assert_eq!(root.name, "root");
        }
    }
}

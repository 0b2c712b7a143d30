//! Platform abstraction layer for sessdir.
//!
//! Provides traits for the platform-dependent operations the storage layer
//! needs (filesystem, environment, current-user lookup) so the backends can
//! be exercised against in-memory or failure-injecting implementations.
//!
//! # Architecture
//!
//! The [`Platform`] trait bundles all platform capabilities via accessor
//! methods. Each sub-capability has its own trait ([`fs::FileSystem`],
//! [`env::Environment`], [`user::UserResolver`]) with a corresponding native
//! implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use sessdir_platform::{Platform, NativePlatform};
//!
//! # async fn example() {
//! let platform = NativePlatform::new();
//! let user = platform.user().current_user().unwrap();
//! println!("running as {user}");
//! # }
//! ```

pub mod config_loader;
pub mod env;
pub mod fs;
pub mod user;

use async_trait::async_trait;

/// Bundle of all platform capabilities.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Filesystem operations.
    fn fs(&self) -> &dyn fs::FileSystem;

    /// Environment variable access.
    fn env(&self) -> &dyn env::Environment;

    /// Current-user resolution.
    fn user(&self) -> &dyn user::UserResolver;
}

/// Native platform implementation using tokio::fs, std::env and nix.
#[cfg(feature = "native")]
pub struct NativePlatform {
    fs: fs::NativeFileSystem,
    env: env::NativeEnvironment,
    user: user::NativeUserResolver,
}

#[cfg(feature = "native")]
impl NativePlatform {
    /// Create a new native platform.
    pub fn new() -> Self {
        Self {
            fs: fs::NativeFileSystem,
            env: env::NativeEnvironment,
            user: user::NativeUserResolver,
        }
    }
}

#[cfg(feature = "native")]
impl Default for NativePlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "native")]
#[async_trait]
impl Platform for NativePlatform {
    fn fs(&self) -> &dyn fs::FileSystem {
        &self.fs
    }

    fn env(&self) -> &dyn env::Environment {
        &self.env
    }

    fn user(&self) -> &dyn user::UserResolver {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_platform_creation() {
        let platform = NativePlatform::default();
        let _fs = platform.fs();
        let _env = platform.env();
        let _user = platform.user();
    }

    #[test]
    fn test_platform_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NativePlatform>();
    }
}

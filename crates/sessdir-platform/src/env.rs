//! Environment variable abstraction and native implementation.
//!
//! Provides a read-only [`Environment`] trait over environment-style
//! key-value configuration. The native implementation delegates to
//! [`std::env`]; tests use in-memory maps.

/// Platform-agnostic environment variable access.
pub trait Environment: Send + Sync {
    /// Get the value of an environment variable, or `None` if it is not set.
    fn get_var(&self, name: &str) -> Option<String>;
}

/// Native environment implementation using [`std::env`].
#[cfg(feature = "native")]
pub struct NativeEnvironment;

#[cfg(feature = "native")]
impl Environment for NativeEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

//! # sessdir-core
//!
//! Active-session storage for multi-user application servers.
//!
//! Contains the session directory backends (local directory and remote
//! authority), per-session property stores, the legacy property-name map,
//! and the factory that selects a backend from configuration.

pub mod directory;
pub mod factory;
pub mod layout;
pub mod legacy;
pub mod legacy_storage;
pub mod property;

pub use directory::{FileSessionDirectory, RpcSessionDirectory, SessionDirectory};
pub use factory::DirectoryFactory;
pub use legacy_storage::LegacySessionStorage;
pub use property::{FilePropertyStore, PropertyStore, RpcPropertyStore};

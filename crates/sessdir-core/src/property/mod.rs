//! Per-session property stores.
//!
//! A [`PropertyStore`] is bound to exactly one session id when it is
//! created and reads/writes that session's named string properties. It
//! caches nothing: every call round-trips to the backing medium, so a
//! store is cheap to create and discard.
//!
//! A property that was never written reads as an empty string. Reads fail
//! only when the medium itself fails or answers with something malformed.

mod file;
mod rpc;

pub use file::FilePropertyStore;
pub use rpc::RpcPropertyStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use sessdir_types::Result;

/// Read/write access to the named properties of one session.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// The session id this store is bound to.
    fn session_id(&self) -> &str;

    /// Read one property; empty if it was never written.
    async fn read_property(&self, name: &str) -> Result<String>;

    /// Create or overwrite one property.
    async fn write_property(&self, name: &str, value: &str) -> Result<()>;

    /// Read several properties. Unset properties map to empty strings.
    async fn read_properties(&self, names: &[&str]) -> Result<BTreeMap<String, String>> {
        let mut values = BTreeMap::new();
        for name in names {
            values.insert((*name).to_string(), self.read_property(name).await?);
        }
        Ok(values)
    }

    /// Write several properties. Stops at the first failure.
    async fn write_properties(&self, values: &BTreeMap<String, String>) -> Result<()> {
        for (name, value) in values {
            self.write_property(name, value).await?;
        }
        Ok(())
    }

    /// Read every property that has been written, keyed by canonical name.
    async fn read_all_properties(&self) -> Result<BTreeMap<String, String>>;

    /// Remove the session and all of its properties.
    ///
    /// Removing a session that does not exist succeeds.
    async fn destroy(&self) -> Result<()>;
}

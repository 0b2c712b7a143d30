//! Session directories: which sessions exist for this user.
//!
//! A [`SessionDirectory`] answers existence, listing and counting queries
//! and hands out a [`PropertyStore`] per session id. Two variants exist:
//! [`FileSessionDirectory`] scans a local directory, [`RpcSessionDirectory`]
//! asks the remote authority.
//!
//! Error policy differs per operation. Listing and counting are inventory
//! queries: on failure they log and degrade to empty / zero. The existence
//! check gates session creation, so it propagates failures instead of
//! answering `false`.

mod file;
mod rpc;

pub use file::FileSessionDirectory;
pub use rpc::RpcSessionDirectory;

use async_trait::async_trait;
use sessdir_types::Result;

use crate::property::PropertyStore;

/// Capability set shared by every directory backend.
#[async_trait]
pub trait SessionDirectory: Send + Sync {
    /// Whether a session with `id` exists.
    async fn has_session_id(&self, id: &str) -> Result<bool>;

    /// Ids of every session, in no particular order. Empty on failure.
    async fn list_session_ids(&self) -> Vec<String>;

    /// Number of sessions. Zero on failure.
    async fn session_count(&self) -> usize;

    /// Property store bound to `id`. Never fails and performs no existence
    /// check.
    fn session_storage(&self, id: &str) -> Box<dyn PropertyStore>;

    /// Short name of the backend, for diagnostics.
    fn backend_name(&self) -> &'static str;
}

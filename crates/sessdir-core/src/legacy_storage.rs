//! Property access addressed by session id on every call.
//!
//! Older callers hold one store for the whole active-sessions root and name
//! the session per call instead of binding a store to it. This wraps the
//! local layout for them; property names go through the same legacy
//! translation as [`FilePropertyStore`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sessdir_platform::Platform;
use sessdir_types::Result;

use crate::layout::session_dir;
use crate::property::{FilePropertyStore, PropertyStore};

/// Store rooted at the active-sessions directory, taking the id per call.
pub struct LegacySessionStorage<P: Platform> {
    root: PathBuf,
    platform: Arc<P>,
}

impl<P: Platform + 'static> LegacySessionStorage<P> {
    /// Create a store over the active-sessions directory `root`.
    pub fn new(platform: Arc<P>, root: PathBuf) -> Self {
        Self { root, platform }
    }

    /// The active-sessions directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn store(&self, id: &str) -> FilePropertyStore<P> {
        FilePropertyStore::new(Arc::clone(&self.platform), id, session_dir(&self.root, id))
    }

    /// Read property `name` of session `id`; empty if never written.
    pub async fn read_property(&self, id: &str, name: &str) -> Result<String> {
        self.store(id).read_property(name).await
    }

    /// Create or overwrite property `name` of session `id`.
    pub async fn write_property(&self, id: &str, name: &str, value: &str) -> Result<()> {
        self.store(id).write_property(name, value).await
    }
}

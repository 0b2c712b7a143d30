//! Directory backend that scans a local directory of session folders.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use sessdir_platform::Platform;
use sessdir_types::Result;
use tracing::{debug, error};

use super::SessionDirectory;
use crate::layout::{session_dir, session_id_from_dir_name};
use crate::property::{FilePropertyStore, PropertyStore};

/// Local backend: one `session-<id>` subdirectory per session under a root.
///
/// Visible only to this node and consistent with the filesystem at the
/// moment of each scan.
pub struct FileSessionDirectory<P: Platform> {
    root: PathBuf,
    platform: Arc<P>,
}

impl<P: Platform> FileSessionDirectory<P> {
    /// Create a backend rooted at `root`, creating the directory if needed.
    ///
    /// Failing to create the root is logged, not returned: every later
    /// operation reports its own failure if the directory is unusable.
    pub async fn new(platform: Arc<P>, root: PathBuf) -> Self {
        if let Err(e) = platform.fs().create_dir_all(&root).await {
            error!(
                path = %root.display(),
                error = %e,
                "failed to create active sessions directory"
            );
        }
        Self { root, platform }
    }

    /// The directory scanned for sessions.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl<P: Platform + 'static> SessionDirectory for FileSessionDirectory<P> {
    async fn has_session_id(&self, id: &str) -> Result<bool> {
        let dir = session_dir(&self.root, id);
        Ok(self.platform.fs().try_exists(&dir).await?)
    }

    async fn list_session_ids(&self) -> Vec<String> {
        let children = match self.platform.fs().list_dir(&self.root).await {
            Ok(children) => children,
            Err(e) => {
                error!(
                    path = %self.root.display(),
                    error = %e,
                    "failed to list active sessions directory"
                );
                return Vec::new();
            }
        };

        let ids: Vec<String> = children
            .iter()
            .filter_map(|child| child.file_name().and_then(|n| n.to_str()))
            .filter_map(session_id_from_dir_name)
            .map(str::to_string)
            .collect();

        debug!(path = %self.root.display(), count = ids.len(), "listed local sessions");
        ids
    }

    async fn session_count(&self) -> usize {
        self.list_session_ids().await.len()
    }

    fn session_storage(&self, id: &str) -> Box<dyn PropertyStore> {
        Box::new(FilePropertyStore::new(
            Arc::clone(&self.platform),
            id,
            session_dir(&self.root, id),
        ))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

//! Property store backed by one file per property.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use sessdir_platform::Platform;
use sessdir_types::Result;
use tracing::debug;

use super::PropertyStore;
use crate::layout::PROPERTIES_DIR_NAME;
use crate::legacy::{canonical_name, legacy_name};

/// Property store rooted at one session directory.
///
/// Each property lives in `<session_dir>/properites/<physical name>`, where
/// the physical name is the legacy alias when one exists. Creating the
/// store touches nothing on disk; the first write creates the directories.
pub struct FilePropertyStore<P: Platform> {
    id: String,
    session_dir: PathBuf,
    platform: Arc<P>,
}

impl<P: Platform> FilePropertyStore<P> {
    /// Create a store for session `id` rooted at `session_dir`.
    pub fn new(platform: Arc<P>, id: impl Into<String>, session_dir: PathBuf) -> Self {
        Self {
            id: id.into(),
            session_dir,
            platform,
        }
    }

    /// The session directory this store is rooted at.
    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    fn properties_dir(&self) -> PathBuf {
        self.session_dir.join(PROPERTIES_DIR_NAME)
    }

    /// Physical path of property `name`.
    pub fn property_path(&self, name: &str) -> PathBuf {
        self.properties_dir().join(legacy_name(name))
    }
}

#[async_trait]
impl<P: Platform + 'static> PropertyStore for FilePropertyStore<P> {
    fn session_id(&self) -> &str {
        &self.id
    }

    async fn read_property(&self, name: &str) -> Result<String> {
        let path = self.property_path(name);
        match self.platform.fs().read_to_string(&path).await {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_property(&self, name: &str, value: &str) -> Result<()> {
        let path = self.property_path(name);
        self.platform.fs().write_string(&path, value).await?;
        debug!(session_id = %self.id, property = name, "wrote session property");
        Ok(())
    }

    async fn read_all_properties(&self) -> Result<BTreeMap<String, String>> {
        let dir = self.properties_dir();
        let entries = match self.platform.fs().list_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let mut values = BTreeMap::new();
        for path in entries {
            let Some(physical) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let name = canonical_name(physical).to_string();
            match self.platform.fs().read_to_string(&path).await {
                Ok(value) => {
                    values.insert(name, value);
                }
                // Removed between listing and reading.
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(values)
    }

    async fn destroy(&self) -> Result<()> {
        match self.platform.fs().remove_dir_all(&self.session_dir).await {
            Ok(()) => {
                debug!(session_id = %self.id, "removed session directory");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

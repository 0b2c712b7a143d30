//! Backend selection.
//!
//! [`DirectoryFactory`] reads the storage flag once and returns the
//! directory backend every later query goes through.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sessdir_core::factory::DirectoryFactory;
//! use sessdir_platform::NativePlatform;
//! use sessdir_types::config::Config;
//!
//! let factory = DirectoryFactory::new(Arc::new(NativePlatform::new()));
//! let directory = factory.build(&Config::default()).await?;
//! for id in directory.list_session_ids().await {
//!     println!("{id}");
//! }
//! ```

use std::sync::Arc;

use sessdir_platform::Platform;
use sessdir_rpc::{HttpRpcInvoker, RpcInvoker};
use sessdir_types::config::Config;
use sessdir_types::{Result, StorageError};
use tracing::{debug, info};

use crate::directory::{FileSessionDirectory, RpcSessionDirectory, SessionDirectory};
use crate::layout::active_sessions_path;
use crate::legacy_storage::LegacySessionStorage;

/// Builds the directory backend selected by configuration.
pub struct DirectoryFactory<P: Platform> {
    platform: Arc<P>,
    invoker: Option<Arc<dyn RpcInvoker>>,
}

impl<P: Platform + 'static> DirectoryFactory<P> {
    /// Create a factory that reaches the authority over HTTP when the
    /// remote backend is selected.
    pub fn new(platform: Arc<P>) -> Self {
        Self {
            platform,
            invoker: None,
        }
    }

    /// Use `invoker` instead of an HTTP invoker built from configuration.
    pub fn with_invoker(mut self, invoker: Arc<dyn RpcInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// Select and construct the directory backend.
    ///
    /// # Errors
    ///
    /// In remote mode, returns [`StorageError::UserResolution`] if the
    /// current user cannot be resolved, or a transport error if the HTTP
    /// invoker cannot be built. Local mode never fails; an unusable root is
    /// logged and surfaces on later operations.
    pub async fn build(&self, config: &Config) -> Result<Arc<dyn SessionDirectory>> {
        if config.storage.session_use_file_storage {
            let root = active_sessions_path(&config.storage.scratch_path());
            info!(path = %root.display(), "using local session storage");
            let directory = FileSessionDirectory::new(Arc::clone(&self.platform), root).await;
            return Ok(Arc::new(directory));
        }

        let user = self
            .platform
            .user()
            .current_user()
            .map_err(|e| StorageError::UserResolution {
                reason: e.to_string(),
            })?;

        let invoker = match &self.invoker {
            Some(invoker) => Arc::clone(invoker),
            None => {
                let http = HttpRpcInvoker::from_config(&config.rpc)?;
                debug!(endpoint = http.endpoint(), "built HTTP invoker");
                Arc::new(http) as Arc<dyn RpcInvoker>
            }
        };

        info!(user = %user, "using remote session storage");
        Ok(Arc::new(RpcSessionDirectory::new(user, invoker)))
    }

    /// Per-call-id store over the local active-sessions directory.
    pub fn legacy_storage(&self, config: &Config) -> LegacySessionStorage<P> {
        LegacySessionStorage::new(
            Arc::clone(&self.platform),
            active_sessions_path(&config.storage.scratch_path()),
        )
    }
}

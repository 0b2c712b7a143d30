//! CLI command implementations for `sessdir`.
//!
//! - [`inventory`] -- Listing, counting and existence checks.
//! - [`properties`] -- Reading, writing, showing and removing one session.

pub mod inventory;
pub mod properties;

use std::path::Path;
use std::sync::Arc;

use sessdir_core::{DirectoryFactory, SessionDirectory};
use sessdir_platform::Platform;
use sessdir_types::StorageError;
use sessdir_types::config::Config;

/// Load configuration from the given path override or via auto-discovery.
///
/// If `config_override` is provided, loads from that path. Otherwise,
/// uses the platform's config discovery chain:
/// 1. `SESSDIR_CONFIG` env var
/// 2. `~/.sessdir/config.json`
/// 3. `/etc/sessdir/config.json`
///
/// Returns a default `Config` if no config file is found. `SESSDIR_*`
/// overrides apply in every case.
pub async fn load_config<P: Platform>(
    platform: &P,
    config_override: Option<&str>,
) -> anyhow::Result<Config> {
    let config = sessdir_platform::config_loader::load_config(
        platform.fs(),
        platform.env(),
        config_override.map(Path::new),
    )
    .await
    .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    Ok(config)
}

/// Build the directory backend selected by `config`.
pub async fn open_directory<P: Platform + 'static>(
    platform: Arc<P>,
    config: &Config,
) -> anyhow::Result<Arc<dyn SessionDirectory>> {
    let directory = DirectoryFactory::new(platform)
        .build(config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to open session storage: {e}"))?;
    tracing::debug!(backend = directory.backend_name(), "session storage ready");
    Ok(directory)
}

/// Wrap a storage failure for the operator, flagging ones worth retrying.
pub fn storage_failure(context: &str, err: StorageError) -> anyhow::Error {
    if err.is_transient() {
        anyhow::anyhow!("{context}: {err} (storage may be temporarily unavailable; try again)")
    } else {
        anyhow::anyhow!("{context}: {err}")
    }
}

/// Render a property value for display; unset values show as `-`.
pub fn display_value(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

//! Configuration schema types.
//!
//! All structs accept both `snake_case` and `camelCase` field names in JSON
//! via `#[serde(alias)]`. Unknown fields are silently ignored for forward
//! compatibility, and every field has a default so an empty object is a
//! valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable that forces local (`1`/`true`) or remote
/// (`0`/`false`) storage mode.
pub const ENV_USE_FILE_STORAGE: &str = "SESSDIR_USE_FILE_STORAGE";

/// Environment variable overriding [`StorageConfig::user_scratch_path`].
pub const ENV_SCRATCH_PATH: &str = "SESSDIR_SCRATCH_PATH";

/// Environment variable overriding [`RpcConfig::endpoint`].
pub const ENV_RPC_ENDPOINT: &str = "SESSDIR_RPC_ENDPOINT";

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration consumed by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend selection and local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Settings for reaching the remote authority.
    #[serde(default)]
    pub rpc: RpcConfig,
}

impl Config {
    /// Apply environment-style overrides on top of the loaded file.
    ///
    /// `lookup` returns the value of a variable, or `None` when unset. Values
    /// that cannot be interpreted are ignored and the file value is kept.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(flag) = lookup(ENV_USE_FILE_STORAGE).as_deref().and_then(parse_flag) {
            self.storage.session_use_file_storage = flag;
        }
        if let Some(path) = lookup(ENV_SCRATCH_PATH).filter(|p| !p.is_empty()) {
            self.storage.user_scratch_path = path;
        }
        if let Some(endpoint) = lookup(ENV_RPC_ENDPOINT).filter(|e| !e.is_empty()) {
            self.rpc.endpoint = endpoint;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ── Storage ──────────────────────────────────────────────────────────────

/// Backend selection and local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `true` selects the local filesystem backend; `false` selects the
    /// remote authority.
    #[serde(default = "default_use_file_storage", alias = "sessionUseFileStorage")]
    pub session_use_file_storage: bool,

    /// Per-user scratch root. Active sessions live under
    /// `<scratch>/sessions/active`.
    #[serde(default = "default_scratch_path", alias = "userScratchPath")]
    pub user_scratch_path: String,
}

fn default_use_file_storage() -> bool {
    true
}
fn default_scratch_path() -> String {
    "~/.local/share/sessdir".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_use_file_storage: default_use_file_storage(),
            user_scratch_path: default_scratch_path(),
        }
    }
}

impl StorageConfig {
    /// Get the scratch path with a leading `~/` expanded.
    #[cfg(feature = "native")]
    pub fn scratch_path(&self) -> PathBuf {
        let raw = &self.user_scratch_path;
        if let Some(rest) = raw.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(raw)
    }

    /// Get the scratch path verbatim (no home directory on this target).
    #[cfg(not(feature = "native"))]
    pub fn scratch_path(&self) -> PathBuf {
        PathBuf::from(&self.user_scratch_path)
    }
}

// ── RPC ──────────────────────────────────────────────────────────────────

/// Settings for reaching the remote authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// URL the JSON-RPC requests are posted to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout applied by the HTTP transport.
    #[serde(default = "default_timeout_secs", alias = "timeoutSecs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8787/rpc".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

//! Configuration file discovery and loading.
//!
//! The discovery order is:
//! 1. `SESSDIR_CONFIG` environment variable (absolute path).
//! 2. `~/.sessdir/config.json`
//! 3. `/etc/sessdir/config.json` (system-wide fallback).
//! 4. If none found, return an empty JSON object (`{}`).
//!
//! JSON keys are normalized from camelCase to snake_case before
//! deserializing, and `SESSDIR_*` environment overrides are applied last.

use std::path::{Path, PathBuf};

use serde_json::Value;
use sessdir_types::config::Config;
use sessdir_types::{Result, StorageError};

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "SESSDIR_CONFIG";

/// System-wide config location consulted after the per-user one.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sessdir/config.json";

/// Discover the config file path using the fallback chain.
///
/// Returns `None` if no config file exists at any of the candidate
/// locations. An explicit `SESSDIR_CONFIG` is returned without an
/// existence check; the loader reports it if it is missing.
pub fn discover_config_path(
    env: &dyn super::env::Environment,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(env_path) = env.get_var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir {
        let user_path = home.join(".sessdir").join("config.json");
        if user_path.exists() {
            return Some(user_path);
        }
    }

    let system_path = PathBuf::from(SYSTEM_CONFIG_PATH);
    if system_path.exists() {
        return Some(system_path);
    }

    None
}

/// Load raw JSON configuration using the discovery algorithm.
///
/// Returns the parsed and key-normalized JSON value. If no config file is
/// found, or the discovered path does not exist, returns an empty object.
pub async fn load_config_raw(
    fs: &dyn super::fs::FileSystem,
    env: &dyn super::env::Environment,
) -> Result<Value> {
    let home = fs.home_dir();
    let Some(path) = discover_config_path(env, home) else {
        tracing::info!("no config file found, using defaults");
        return Ok(Value::Object(serde_json::Map::new()));
    };

    if !fs.exists(&path).await {
        tracing::warn!(
            path = %path.display(),
            "config path does not exist, using defaults"
        );
        return Ok(Value::Object(serde_json::Map::new()));
    }

    read_config_file(fs, &path).await
}

/// Read and key-normalize one config file.
pub async fn read_config_file(fs: &dyn super::fs::FileSystem, path: &Path) -> Result<Value> {
    tracing::debug!(path = %path.display(), "loading config file");
    let contents = fs
        .read_to_string(path)
        .await
        .map_err(|e| StorageError::ConfigInvalid {
            reason: format!("failed to read config file {}: {e}", path.display()),
        })?;

    let value: Value =
        serde_json::from_str(&contents).map_err(|e| StorageError::ConfigInvalid {
            reason: format!("failed to parse config file {}: {e}", path.display()),
        })?;

    Ok(normalize_keys(value))
}

/// Load the typed configuration and apply environment overrides.
///
/// `explicit` bypasses discovery; unlike a discovered path it must exist.
pub async fn load_config(
    fs: &dyn super::fs::FileSystem,
    env: &dyn super::env::Environment,
    explicit: Option<&Path>,
) -> Result<Config> {
    let raw = match explicit {
        Some(path) => {
            if !fs.exists(path).await {
                return Err(StorageError::ConfigInvalid {
                    reason: format!("config file not found: {}", path.display()),
                });
            }
            read_config_file(fs, path).await?
        }
        None => load_config_raw(fs, env).await?,
    };

    let mut config: Config =
        serde_json::from_value(raw).map_err(|e| StorageError::ConfigInvalid {
            reason: e.to_string(),
        })?;
    config.apply_overrides(|name| env.get_var(name));
    Ok(config)
}

/// Convert camelCase JSON keys to snake_case recursively.
///
/// Processes objects and arrays recursively. Non-object/array values are
/// returned unchanged.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut new_map = serde_json::Map::new();
            for (key, val) in map {
                new_map.insert(camel_to_snake(&key), normalize_keys(val));
            }
            Value::Object(new_map)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

/// Convert a single camelCase string to snake_case.
///
/// A run of uppercase letters like `"RPC"` is kept together, with an
/// underscore inserted only before the last uppercase letter if it is
/// followed by a lowercase letter.
///
/// # Examples
/// ```
/// # use sessdir_platform::config_loader::camel_to_snake;
/// assert_eq!(camel_to_snake("userScratchPath"), "user_scratch_path");
/// assert_eq!(camel_to_snake("already_snake"), "already_snake");
/// assert_eq!(camel_to_snake("RPCEndpoint"), "rpc_endpoint");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            if prev.is_lowercase()
                || (prev.is_uppercase() && next.is_some_and(|c| c.is_lowercase()))
            {
                result.push('_');
            }
        }
        result.push(ch.to_ascii_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::NativeFileSystem;
    use serde_json::json;
    use std::collections::HashMap;

    /// A minimal in-memory environment.
    struct MockEnv {
        vars: HashMap<String, String>,
    }

    impl MockEnv {
        fn new() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }

        fn with_var(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl crate::env::Environment for MockEnv {
        fn get_var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }
    }

    // ── camel_to_snake / normalize_keys ───────────────────────────────

    #[test]
    fn test_camel_to_snake_basic() {
        assert_eq!(camel_to_snake("sessionUseFileStorage"), "session_use_file_storage");
        assert_eq!(camel_to_snake("timeoutSecs"), "timeout_secs");
        assert_eq!(camel_to_snake("storage"), "storage");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn test_camel_to_snake_acronyms() {
        assert_eq!(camel_to_snake("RPC"), "rpc");
        assert_eq!(camel_to_snake("RPCEndpoint"), "rpc_endpoint");
        assert_eq!(camel_to_snake("authorityURL"), "authority_url");
    }

    #[test]
    fn test_normalize_keys_nested() {
        let input = json!({
            "storage": { "userScratchPath": "/srv" },
            "rpc": { "timeoutSecs": 3 }
        });
        let expected = json!({
            "storage": { "user_scratch_path": "/srv" },
            "rpc": { "timeout_secs": 3 }
        });
        assert_eq!(normalize_keys(input), expected);
    }

    #[test]
    fn test_normalize_keys_primitives_unchanged() {
        assert_eq!(normalize_keys(json!(42)), json!(42));
        assert_eq!(normalize_keys(json!([1, "a"])), json!([1, "a"]));
    }

    // ── discovery ─────────────────────────────────────────────────────

    #[test]
    fn test_discover_env_var_takes_precedence() {
        let env = MockEnv::new().with_var(ENV_CONFIG_PATH, "/custom/config.json");
        let result = discover_config_path(&env, Some(PathBuf::from("/home/user")));
        assert_eq!(result, Some(PathBuf::from("/custom/config.json")));
    }

    #[test]
    fn test_discover_prefers_user_file() {
        let home = tempfile::tempdir().unwrap();
        let cfg = home.path().join(".sessdir").join("config.json");
        std::fs::create_dir_all(cfg.parent().unwrap()).unwrap();
        std::fs::write(&cfg, "{}").unwrap();

        let result = discover_config_path(&MockEnv::new(), Some(home.path().to_path_buf()));
        assert_eq!(result, Some(cfg));
    }

    // ── loading ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_missing_env_path_falls_back_to_defaults() {
        let env = MockEnv::new().with_var(ENV_CONFIG_PATH, "/tmp/.sessdir-test-nonexistent.json");
        let cfg = load_config(&NativeFileSystem, &env, None).await.unwrap();
        assert!(cfg.storage.session_use_file_storage);
    }

    #[tokio::test]
    async fn test_load_explicit_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"storage":{"sessionUseFileStorage":true,"userScratchPath":"/a"}}"#,
        )
        .unwrap();

        let env = MockEnv::new().with_var("SESSDIR_USE_FILE_STORAGE", "0");
        let cfg = load_config(&NativeFileSystem, &env, Some(&path)).await.unwrap();

        assert!(!cfg.storage.session_use_file_storage);
        assert_eq!(cfg.storage.user_scratch_path, "/a");
    }

    #[tokio::test]
    async fn test_load_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(
            &NativeFileSystem,
            &MockEnv::new(),
            Some(&dir.path().join("nope.json")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StorageError::ConfigInvalid { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config(&NativeFileSystem, &MockEnv::new(), Some(&path))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }
}

//! Filesystem abstraction and native implementation.
//!
//! Provides a platform-agnostic [`FileSystem`] trait for the handful of
//! operations the local session backend needs, and a native implementation
//! backed by [`tokio::fs`]. Tests substitute implementations that fail on
//! demand.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Platform-agnostic filesystem operations.
///
/// All path arguments use [`Path`] for proper cross-platform path handling.
/// Implementations should create parent directories when writing files.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read a file's entire contents as a UTF-8 string.
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Write a string to a file, creating parent directories if needed.
    ///
    /// Overwrites the file if it already exists.
    async fn write_string(&self, path: &Path, content: &str) -> std::io::Result<()>;

    /// Check whether a path exists (file or directory).
    ///
    /// Errors other than "not found" (permission denied, a non-directory
    /// path component, an over-long name) are returned rather than read as
    /// absence.
    async fn try_exists(&self, path: &Path) -> std::io::Result<bool>;

    /// Like [`try_exists`](Self::try_exists), treating any error as absent.
    async fn exists(&self, path: &Path) -> bool {
        self.try_exists(path).await.unwrap_or(false)
    }

    /// List all entries in a directory.
    ///
    /// Returns the full path of each entry in enumeration order. Does not
    /// recurse into subdirectories.
    async fn list_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>>;

    /// Create a directory and all parent directories.
    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Remove a directory and everything beneath it.
    async fn remove_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Get the user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Native filesystem implementation using [`tokio::fs`].
#[cfg(feature = "native")]
pub struct NativeFileSystem;

#[cfg(feature = "native")]
#[async_trait]
impl FileSystem for NativeFileSystem {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write_string(&self, path: &Path, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn try_exists(&self, path: &Path) -> std::io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn list_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        let mut read_dir = tokio::fs::read_dir(path).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            entries.push(entry.path());
        }
        Ok(entries)
    }

    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn remove_dir_all(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::remove_dir_all(path).await
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let fs = NativeFileSystem;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session-a").join("properites").join("label");

        fs.write_string(&path, "analysis").await.unwrap();
        assert!(fs.exists(&path).await);
        assert_eq!(fs.read_to_string(&path).await.unwrap(), "analysis");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let fs = NativeFileSystem;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value");

        fs.write_string(&path, "first").await.unwrap();
        fs.write_string(&path, "second").await.unwrap();
        assert_eq!(fs.read_to_string(&path).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_list_dir_returns_full_paths() {
        let fs = NativeFileSystem;
        let dir = tempfile::tempdir().unwrap();
        fs.create_dir_all(&dir.path().join("session-1")).await.unwrap();
        fs.write_string(&dir.path().join("notes.txt"), "x").await.unwrap();

        let entries = fs.list_dir(dir.path()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|p| p.starts_with(dir.path())));

        let names: Vec<String> = entries
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert!(names.contains(&"session-1".to_string()));
        assert!(names.contains(&"notes.txt".to_string()));
    }

    #[tokio::test]
    async fn test_list_missing_dir_fails() {
        let fs = NativeFileSystem;
        let dir = tempfile::tempdir().unwrap();
        assert!(fs.list_dir(&dir.path().join("absent")).await.is_err());
    }

    #[tokio::test]
    async fn test_remove_dir_all() {
        let fs = NativeFileSystem;
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session-x");
        fs.write_string(&session.join("properites").join("created"), "now")
            .await
            .unwrap();

        fs.remove_dir_all(&session).await.unwrap();
        assert!(!fs.exists(&session).await);
    }

    #[tokio::test]
    async fn test_try_exists_reports_component_errors() {
        let fs = NativeFileSystem;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs.write_string(&file, "x").await.unwrap();

        assert!(fs.try_exists(&file).await.unwrap());
        assert!(!fs.try_exists(&dir.path().join("absent")).await.unwrap());

        // A regular file used as a directory is an error, not absence.
        assert!(fs.try_exists(&file.join("child")).await.is_err());
        assert!(!fs.exists(&file.join("child")).await);
    }

    #[tokio::test]
    async fn test_read_nonexistent_file_is_not_found() {
        let fs = NativeFileSystem;
        let dir = tempfile::tempdir().unwrap();
        let err = fs
            .read_to_string(&dir.path().join("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}

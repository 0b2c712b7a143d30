//! `sessdir list`, `sessdir count`, `sessdir exists`.
//!
//! Listing and counting never fail: an unreachable backend shows up as no
//! sessions (and an error in the log). The existence check does fail, so
//! scripts can tell "free" apart from "could not check".
//!
//! # Examples
//!
//! ```text
//! sessdir list
//! sessdir count
//! sessdir exists 7f3a9c
//! ```

use comfy_table::{Table, presets::UTF8_FULL};
use sessdir_core::SessionDirectory;
use sessdir_types::session::{CREATED, LAST_USED};

use super::{display_value, storage_failure};

/// List all sessions with their creation and last-use times.
pub async fn list(directory: &dyn SessionDirectory) -> anyhow::Result<()> {
    let mut ids = directory.list_session_ids().await;

    if ids.is_empty() {
        println!("No sessions found.");
        println!("  Backend: {}", directory.backend_name());
        return Ok(());
    }
    ids.sort();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["SESSION ID", "CREATED", "LAST USED"]);

    for id in &ids {
        let store = directory.session_storage(id);
        match store.read_properties(&[CREATED, LAST_USED]).await {
            Ok(values) => {
                let created = values.get(CREATED).map_or("-", |v| display_value(v));
                let last_used = values.get(LAST_USED).map_or("-", |v| display_value(v));
                table.add_row([id.as_str(), created, last_used]);
            }
            Err(e) => {
                tracing::warn!(session_id = %id, error = %e, "failed to read session properties");
                table.add_row([id.as_str(), "?", "?"]);
            }
        }
    }

    println!("{table}");
    println!("  {} session(s)", ids.len());
    println!("  Backend: {}", directory.backend_name());
    Ok(())
}

/// Print the number of sessions.
pub async fn count(directory: &dyn SessionDirectory) -> anyhow::Result<()> {
    println!("{}", directory.session_count().await);
    Ok(())
}

/// Print whether `session_id` is in use.
pub async fn exists(directory: &dyn SessionDirectory, session_id: &str) -> anyhow::Result<()> {
    let in_use = directory
        .has_session_id(session_id)
        .await
        .map_err(|e| storage_failure(&format!("failed to check session '{session_id}'"), e))?;
    println!("{}", if in_use { "yes" } else { "no" });
    Ok(())
}

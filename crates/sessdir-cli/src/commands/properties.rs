//! `sessdir get`, `sessdir set`, `sessdir show`, `sessdir remove`.
//!
//! None of these check that the session exists first: writing a property
//! of an unknown id creates the session, reading one yields an empty value.
//!
//! # Examples
//!
//! ```text
//! sessdir get 7f3a9c last_used
//! sessdir set 7f3a9c label "quarterly report"
//! sessdir show 7f3a9c --json
//! sessdir remove 7f3a9c
//! ```

use std::collections::BTreeMap;

use comfy_table::{Table, presets::UTF8_FULL};
use sessdir_core::SessionDirectory;
use sessdir_core::legacy::canonical_name;
use sessdir_types::session::{KNOWN_PROPERTIES, is_known_property};

use super::{display_value, storage_failure};

/// Print one property; unset properties print an empty line.
pub async fn get(
    directory: &dyn SessionDirectory,
    session_id: &str,
    name: &str,
) -> anyhow::Result<()> {
    let value = directory
        .session_storage(session_id)
        .read_property(name)
        .await
        .map_err(|e| {
            storage_failure(&format!("failed to read '{name}' of session '{session_id}'"), e)
        })?;
    println!("{value}");
    Ok(())
}

/// Create or overwrite one property.
pub async fn set(
    directory: &dyn SessionDirectory,
    session_id: &str,
    name: &str,
    value: &str,
) -> anyhow::Result<()> {
    if let Some(note) = unknown_property_note(name) {
        eprintln!("warning: {note}");
    }
    directory
        .session_storage(session_id)
        .write_property(name, value)
        .await
        .map_err(|e| {
            storage_failure(&format!("failed to write '{name}' of session '{session_id}'"), e)
        })?;
    println!("Set {name} on session '{session_id}'.");
    Ok(())
}

/// Show every known property plus any others that have been written.
pub async fn show(
    directory: &dyn SessionDirectory,
    session_id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let store = directory.session_storage(session_id);
    let mut values = store
        .read_properties(KNOWN_PROPERTIES)
        .await
        .map_err(|e| storage_failure(&format!("failed to read session '{session_id}'"), e))?;
    let extra = store
        .read_all_properties()
        .await
        .map_err(|e| storage_failure(&format!("failed to read session '{session_id}'"), e))?;
    merge_extra(&mut values, extra);

    if json {
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    println!("Session: {session_id}");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["PROPERTY", "VALUE"]);
    for (name, value) in &values {
        table.add_row([name.as_str(), display_value(value)]);
    }
    println!("{table}");
    Ok(())
}

/// Remove a session and all of its properties.
pub async fn remove(directory: &dyn SessionDirectory, session_id: &str) -> anyhow::Result<()> {
    directory
        .session_storage(session_id)
        .destroy()
        .await
        .map_err(|e| storage_failure(&format!("failed to remove session '{session_id}'"), e))?;
    println!("Session '{session_id}' removed.");
    Ok(())
}

/// Operator-facing note for a property name outside the known set.
///
/// Such names are stored as written but nothing on the server reads them,
/// so a typo would otherwise go unnoticed.
fn unknown_property_note(name: &str) -> Option<String> {
    if is_known_property(name) {
        return None;
    }
    let canonical = canonical_name(name);
    if canonical != name {
        return Some(format!(
            "'{name}' is the on-disk name of '{canonical}'; prefer '{canonical}'"
        ));
    }
    Some(format!(
        "'{name}' is not a known session property and will not be read by the server \
         (known: {})",
        KNOWN_PROPERTIES.join(", ")
    ))
}

/// Add properties outside the known set without overwriting known ones.
fn merge_extra(values: &mut BTreeMap<String, String>, extra: BTreeMap<String, String>) {
    for (name, value) in extra {
        values.entry(name).or_insert(value);
    }
}

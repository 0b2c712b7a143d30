//! Legacy property-name translation.
//!
//! Older on-disk layouts stored some properties under hyphenated file
//! names. The local property store always addresses the physical file by
//! its legacy name when one exists, so existing deployments keep reading
//! and writing the same files without a migration step.

/// Canonical name -> physical (legacy) name. Fixed; never configurable.
const LEGACY_NAMES: &[(&str, &str)] = &[
    ("last_used", "last-used"),
    ("r_version", "r-version"),
    ("r_version_label", "r-version-label"),
    ("r_version_home", "r-version-home"),
    ("working_directory", "working-dir"),
    ("launch_parameters", "launch-parameters"),
];

/// Physical key for a canonical property name.
///
/// Names absent from the table are returned unchanged.
pub fn legacy_name(name: &str) -> &str {
    LEGACY_NAMES
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map_or(name, |&(_, legacy)| legacy)
}

/// Canonical property name for a physical key found on disk.
///
/// Inverse of [`legacy_name`]; unmapped keys are returned unchanged.
pub fn canonical_name(physical: &str) -> &str {
    LEGACY_NAMES
        .iter()
        .find(|(_, legacy)| *legacy == physical)
        .map_or(physical, |&(canonical, _)| canonical)
}

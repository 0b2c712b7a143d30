//! Active session property names.
//!
//! Property names form an open set: the constants below are the names the
//! server itself reads and writes, but any other string is a valid name and
//! is stored unchanged.

/// Creation timestamp. Also the single field requested when listing
/// sessions remotely.
pub const CREATED: &str = "created";
/// Timestamp of the most recent user activity.
pub const LAST_USED: &str = "last_used";
/// Interpreter version the session was launched with.
pub const R_VERSION: &str = "r_version";
/// Human-readable label of the interpreter version.
pub const R_VERSION_LABEL: &str = "r_version_label";
/// Installation home of the interpreter version.
pub const R_VERSION_HOME: &str = "r_version_home";
/// Working directory at last save.
pub const WORKING_DIRECTORY: &str = "working_directory";
/// Serialized launch parameters.
pub const LAUNCH_PARAMETERS: &str = "launch_parameters";
/// Project the session has open.
pub const PROJECT: &str = "project";
/// User-assigned label.
pub const LABEL: &str = "label";
/// Editor the session was started from.
pub const EDITOR: &str = "editor";
/// Whether the session process is running.
pub const RUNNING: &str = "running";
/// Whether unsaved state requires a prompt before quitting.
pub const SAVE_PROMPT_REQUIRED: &str = "save_prompt_required";
/// Opaque data captured when the session was suspended.
pub const SUSPENDED_SESSION_DATA: &str = "suspended_session_data";
/// Timestamp of the last run-state transition.
pub const LAST_STATE_UPDATED: &str = "last_state_updated";

/// Every property name the server knows about, in display order.
pub const KNOWN_PROPERTIES: &[&str] = &[
    CREATED,
    LAST_USED,
    LABEL,
    PROJECT,
    WORKING_DIRECTORY,
    EDITOR,
    RUNNING,
    LAST_STATE_UPDATED,
    SAVE_PROMPT_REQUIRED,
    R_VERSION,
    R_VERSION_LABEL,
    R_VERSION_HOME,
    LAUNCH_PARAMETERS,
    SUSPENDED_SESSION_DATA,
];

/// Whether `name` is one of [`KNOWN_PROPERTIES`].
pub fn is_known_property(name: &str) -> bool {
    KNOWN_PROPERTIES.contains(&name)
}

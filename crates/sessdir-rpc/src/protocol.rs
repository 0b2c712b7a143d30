//! Session-storage envelope shared by every remote operation.
//!
//! Every request uses the single method [`SESSION_STORAGE_METHOD`] and a
//! keyword-parameter object carrying the calling user's id and an operation
//! code. Some operations add a session id and a `fields` value:
//!
//! | operation  | `id` | `fields`              | result shape                   |
//! |------------|------|-----------------------|--------------------------------|
//! | `read_all` |  -   | array of names        | `{"sessions": [{"id": ..}]}`   |
//! | `count`    | opt. |  -                    | `{"count": N}`                 |
//! | `read`     | yes  | array of names        | `{"session": {name: value}}`   |
//! | `update`   | yes  | object name -> value  | any object                     |
//! | `delete`   | yes  |  -                    | any object                     |
//!
//! An empty `fields` array on `read_all`/`read` means "all fields" to the
//! authority.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sessdir_types::{Result, StorageError};

use crate::types::{JsonRpcRequest, JsonRpcResponse};

/// Method name of every session-storage request.
pub const SESSION_STORAGE_METHOD: &str = "session_storage";

/// Parameter carrying the calling user's numeric id.
pub const USER_ID_FIELD: &str = "user_id";
/// Parameter carrying the [`Operation`].
pub const OPERATION_FIELD: &str = "operation";
/// Parameter (and record key) carrying a session id.
pub const ID_FIELD: &str = "id";
/// Parameter carrying requested field names or field values.
pub const FIELDS_FIELD: &str = "fields";
/// Result key holding the array of session records.
pub const SESSIONS_FIELD: &str = "sessions";
/// Result key holding a count.
pub const COUNT_FIELD: &str = "count";
/// Result key holding one session's field map.
pub const SESSION_FIELD: &str = "session";

/// Operation codes understood by the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Enumerate every session owned by the user.
    ReadAll,
    /// Count sessions owned by the user, optionally filtered by id.
    Count,
    /// Read fields of one session.
    Read,
    /// Create or overwrite fields of one session.
    Update,
    /// Remove one session.
    Delete,
}

impl Operation {
    /// Wire spelling of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadAll => "read_all",
            Self::Count => "count",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for one session-storage request.
#[derive(Debug, Clone)]
pub struct StorageRequest {
    params: Map<String, Value>,
}

impl StorageRequest {
    /// Start a request for `operation` scoped to `user_id`.
    pub fn new(user_id: u32, operation: Operation) -> Self {
        let mut params = Map::new();
        params.insert(USER_ID_FIELD.into(), Value::from(user_id));
        params.insert(OPERATION_FIELD.into(), Value::from(operation.as_str()));
        Self { params }
    }

    /// Scope the request to one session id.
    pub fn session(mut self, id: &str) -> Self {
        self.params.insert(ID_FIELD.into(), Value::from(id));
        self
    }

    /// Request exactly these field names.
    pub fn field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Value> = names.into_iter().map(|n| Value::String(n.into())).collect();
        self.params.insert(FIELDS_FIELD.into(), Value::Array(names));
        self
    }

    /// Attach field values to write.
    pub fn field_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: Map<String, Value> = values
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        self.params.insert(FIELDS_FIELD.into(), Value::Object(map));
        self
    }

    /// The keyword parameters built so far.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Finish into a JSON-RPC request.
    pub fn into_rpc(self) -> JsonRpcRequest {
        JsonRpcRequest::new(SESSION_STORAGE_METHOD, Value::Object(self.params))
    }
}

// ── Response readers ─────────────────────────────────────────────────────

/// Extract the result object of a response.
///
/// An error object becomes [`StorageError::Authority`]; a missing or
/// non-object result becomes [`StorageError::Protocol`].
pub fn result_object(response: &JsonRpcResponse) -> Result<&Map<String, Value>> {
    if let Some(err) = &response.error {
        return Err(StorageError::Authority {
            code: err.code,
            message: err.message.clone(),
        });
    }
    match &response.result {
        Some(Value::Object(obj)) => Ok(obj),
        Some(other) => Err(StorageError::protocol(format!(
            "expected an object result, got {other}"
        ))),
        None => Err(StorageError::protocol("response carries no result")),
    }
}

/// Read the non-negative `count` field.
pub fn read_count(obj: &Map<String, Value>) -> Result<u64> {
    obj.get(COUNT_FIELD)
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            StorageError::protocol(format!(
                "missing or non-integer `{COUNT_FIELD}` field in {}",
                Value::Object(obj.clone())
            ))
        })
}

/// Read the `sessions` array of records.
pub fn read_sessions(obj: &Map<String, Value>) -> Result<&Vec<Value>> {
    obj.get(SESSIONS_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| StorageError::protocol(format!("missing `{SESSIONS_FIELD}` array")))
}

/// Read the `id` string of one session record.
pub fn record_id(record: &Value) -> Result<String> {
    record
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            StorageError::protocol(format!("session record without string `{ID_FIELD}`: {record}"))
        })
}

/// Read the `session` field map of a `read` result.
pub fn read_session_fields(obj: &Map<String, Value>) -> Result<&Map<String, Value>> {
    obj.get(SESSION_FIELD)
        .and_then(Value::as_object)
        .ok_or_else(|| StorageError::protocol(format!("missing `{SESSION_FIELD}` object")))
}

/// Render one field value as a property string.
///
/// Absent and `null` values read as "not set" (empty). Non-string scalars
/// are rendered in their JSON form so booleans and numbers survive the trip.
pub fn field_value(fields: &Map<String, Value>, name: &str) -> String {
    match fields.get(name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operation_wire_names() {
        assert_eq!(Operation::ReadAll.as_str(), "read_all");
        assert_eq!(
            serde_json::to_value(Operation::ReadAll).unwrap(),
            json!("read_all")
        );
        assert_eq!(Operation::Count.to_string(), "count");
    }

    #[test]
    fn list_request_asks_for_one_field() {
        let req = StorageRequest::new(1000, Operation::ReadAll)
            .field_names(["created"])
            .into_rpc();
        assert_eq!(req.method, SESSION_STORAGE_METHOD);
        assert_eq!(
            req.params,
            json!({"user_id": 1000, "operation": "read_all", "fields": ["created"]})
        );
    }

    #[test]
    fn update_request_carries_values() {
        let req = StorageRequest::new(5, Operation::Update)
            .session("abc")
            .field_values([("label", "notebook")])
            .into_rpc();
        assert_eq!(req.params["id"], "abc");
        assert_eq!(req.params["fields"], json!({"label": "notebook"}));
    }

    #[test]
    fn result_object_maps_error_object() {
        let resp = JsonRpcResponse::failure(1, -32000, "denied");
        let err = result_object(&resp).unwrap_err();
        assert!(matches!(err, StorageError::Authority { code: -32000, .. }));
    }

    #[test]
    fn result_object_rejects_non_object() {
        let resp = JsonRpcResponse::success(1, json!([1, 2]));
        assert!(matches!(
            result_object(&resp).unwrap_err(),
            StorageError::Protocol { .. }
        ));
    }

    #[test]
    fn read_count_rejects_negative_and_missing() {
        assert_eq!(read_count(json!({"count": 3}).as_object().unwrap()).unwrap(), 3);
        assert!(read_count(json!({"count": -1}).as_object().unwrap()).is_err());
        assert!(read_count(json!({"total": 1}).as_object().unwrap()).is_err());
    }

    #[test]
    fn record_id_requires_string() {
        assert_eq!(record_id(&json!({"id": "s1", "created": "x"})).unwrap(), "s1");
        assert!(record_id(&json!({"id": 7})).is_err());
        assert!(record_id(&json!("s1")).is_err());
    }

    #[test]
    fn field_value_renders_scalars() {
        let fields = json!({"label": "x", "running": true, "gone": null});
        let fields = fields.as_object().unwrap();
        assert_eq!(field_value(fields, "label"), "x");
        assert_eq!(field_value(fields, "running"), "true");
        assert_eq!(field_value(fields, "gone"), "");
        assert_eq!(field_value(fields, "absent"), "");
    }
}

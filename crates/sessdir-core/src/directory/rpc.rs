//! Directory backend that delegates to the remote authority.

use std::sync::Arc;

use async_trait::async_trait;
use sessdir_rpc::protocol::{self, Operation, StorageRequest};
use sessdir_rpc::RpcInvoker;
use sessdir_types::session::CREATED;
use sessdir_types::{Result, SystemUser};
use tracing::{debug, error};

use super::SessionDirectory;
use crate::property::{PropertyStore, RpcPropertyStore};

/// Remote backend scoped to one user.
///
/// Every request carries the user's id; the authority enforces that a user
/// only ever sees their own sessions. Listing and counting are separate
/// requests, so under concurrent remote mutation the count may briefly
/// disagree with a list fetched moments earlier.
pub struct RpcSessionDirectory {
    user: SystemUser,
    invoker: Arc<dyn RpcInvoker>,
}

impl RpcSessionDirectory {
    /// Create a backend acting for `user` through `invoker`.
    pub fn new(user: SystemUser, invoker: Arc<dyn RpcInvoker>) -> Self {
        Self { user, invoker }
    }

    /// The user every request is scoped to.
    pub fn user(&self) -> &SystemUser {
        &self.user
    }

    async fn try_list(&self) -> Result<Vec<String>> {
        // An empty field list would return every field; ask for one instead.
        let request = StorageRequest::new(self.user.user_id, Operation::ReadAll)
            .field_names([CREATED])
            .into_rpc();
        let response = self.invoker.invoke(request).await?;
        let obj = protocol::result_object(&response)?;
        let records = protocol::read_sessions(obj)?;

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            match protocol::record_id(record) {
                Ok(id) => ids.push(id),
                Err(e) => error!(user = %self.user, error = %e, "skipping session record"),
            }
        }
        Ok(ids)
    }

    async fn try_count(&self) -> Result<u64> {
        let request = StorageRequest::new(self.user.user_id, Operation::Count).into_rpc();
        let response = self.invoker.invoke(request).await?;
        protocol::read_count(protocol::result_object(&response)?)
    }
}

#[async_trait]
impl SessionDirectory for RpcSessionDirectory {
    async fn has_session_id(&self, id: &str) -> Result<bool> {
        debug!(session_id = id, user = %self.user, "checking whether session id is in use");
        let request = StorageRequest::new(self.user.user_id, Operation::Count)
            .session(id)
            .into_rpc();
        let response = self.invoker.invoke(request).await?;

        let obj = protocol::result_object(&response).inspect_err(|e| {
            error!(
                session_id = id,
                user = %self.user,
                error = %e,
                "unexpected response when checking session id"
            );
        })?;
        let count = protocol::read_count(obj)?;

        // The authority answers this query with zero for an id that is in
        // use; that convention is part of the wire contract.
        Ok(count == 0)
    }

    async fn list_session_ids(&self) -> Vec<String> {
        match self.try_list().await {
            Ok(ids) => {
                debug!(user = %self.user, count = ids.len(), "listed remote sessions");
                ids
            }
            Err(e) => {
                error!(user = %self.user, error = %e, "failed to list sessions");
                Vec::new()
            }
        }
    }

    async fn session_count(&self) -> usize {
        match self.try_count().await {
            Ok(count) => usize::try_from(count).unwrap_or(usize::MAX),
            Err(e) => {
                error!(user = %self.user, error = %e, "failed to count sessions");
                0
            }
        }
    }

    fn session_storage(&self, id: &str) -> Box<dyn PropertyStore> {
        Box::new(RpcPropertyStore::new(
            self.user.clone(),
            id,
            Arc::clone(&self.invoker),
        ))
    }

    fn backend_name(&self) -> &'static str {
        "rpc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sessdir_rpc::{JsonRpcResponse, MockInvoker};
    use sessdir_types::StorageError;

    fn directory(invoker: Arc<MockInvoker>) -> RpcSessionDirectory {
        RpcSessionDirectory::new(SystemUser::new(1000, "alice"), invoker)
    }

    #[tokio::test]
    async fn list_requests_single_created_field() {
        let invoker = Arc::new(MockInvoker::responding(json!({
            "sessions": [{"id": "s1", "created": "t"}, {"id": "s2"}]
        })));
        let ids = directory(invoker.clone()).list_session_ids().await;
        assert_eq!(ids, vec!["s1".to_string(), "s2".to_string()]);

        let requests = invoker.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "session_storage");
        assert_eq!(
            requests[0].params,
            json!({"user_id": 1000, "operation": "read_all", "fields": ["created"]})
        );
    }

    #[tokio::test]
    async fn list_skips_records_without_id() {
        let invoker = Arc::new(MockInvoker::responding(json!({
            "sessions": [{"created": "t"}, {"id": "ok"}, 5]
        })));
        assert_eq!(directory(invoker).list_session_ids().await, vec!["ok".to_string()]);
    }

    #[tokio::test]
    async fn list_degrades_on_malformed_response() {
        let invoker = Arc::new(MockInvoker::responding(json!("not an object")));
        assert!(directory(invoker).list_session_ids().await.is_empty());

        let invoker = Arc::new(MockInvoker::responding(json!({"sessions": "nope"})));
        assert!(directory(invoker).list_session_ids().await.is_empty());
    }

    #[tokio::test]
    async fn list_degrades_on_authority_error() {
        let invoker = Arc::new(MockInvoker::new(|req| {
            Ok(JsonRpcResponse::failure(req.id, -32000, "unavailable"))
        }));
        assert!(directory(invoker).list_session_ids().await.is_empty());
    }

    #[tokio::test]
    async fn count_reads_count_field() {
        let invoker = Arc::new(MockInvoker::responding(json!({"count": 7})));
        assert_eq!(directory(invoker.clone()).session_count().await, 7);

        let requests = invoker.requests().await;
        assert_eq!(
            requests[0].params,
            json!({"user_id": 1000, "operation": "count"})
        );
    }

    #[tokio::test]
    async fn count_degrades_to_zero() {
        let invoker = Arc::new(MockInvoker::responding(json!({"total": 7})));
        assert_eq!(directory(invoker).session_count().await, 0);

        let invoker = Arc::new(MockInvoker::unreachable());
        assert_eq!(directory(invoker).session_count().await, 0);
    }

    #[tokio::test]
    async fn has_session_id_zero_count_means_in_use() {
        let invoker = Arc::new(MockInvoker::responding(json!({"count": 0})));
        let backend = directory(invoker.clone());
        assert!(backend.has_session_id("abc").await.unwrap());

        let requests = invoker.requests().await;
        assert_eq!(
            requests[0].params,
            json!({"user_id": 1000, "operation": "count", "id": "abc"})
        );
    }

    #[tokio::test]
    async fn has_session_id_nonzero_count_means_free() {
        let invoker = Arc::new(MockInvoker::responding(json!({"count": 3})));
        assert!(!directory(invoker).has_session_id("abc").await.unwrap());
    }

    #[tokio::test]
    async fn has_session_id_propagates_transport_error() {
        let invoker = Arc::new(MockInvoker::unreachable());
        let err = directory(invoker).has_session_id("abc").await.unwrap_err();
        assert!(matches!(err, StorageError::Transport { .. }));
    }

    #[tokio::test]
    async fn has_session_id_propagates_parse_error() {
        let invoker = Arc::new(MockInvoker::responding(json!([0])));
        let err = directory(invoker).has_session_id("abc").await.unwrap_err();
        assert!(matches!(err, StorageError::Protocol { .. }));

        let invoker = Arc::new(MockInvoker::responding(json!({"count": "zero"})));
        let err = directory(invoker).has_session_id("abc").await.unwrap_err();
        assert!(matches!(err, StorageError::Protocol { .. }));
    }

    #[tokio::test]
    async fn storage_is_bound_without_a_request() {
        let invoker = Arc::new(MockInvoker::unreachable());
        let backend = directory(invoker.clone());
        let store = backend.session_storage("later");
        assert_eq!(store.session_id(), "later");
        assert!(invoker.requests().await.is_empty());
    }
}

//! Property store backed by the remote authority.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use sessdir_rpc::protocol::{self, Operation, StorageRequest};
use sessdir_rpc::RpcInvoker;
use sessdir_types::{Result, SystemUser};
use tracing::debug;

use super::PropertyStore;

/// Property store that issues one request per operation.
///
/// Requests are scoped by the owning user's id and the bound session id.
/// Property names travel in canonical form; legacy aliases only apply to
/// on-disk layouts.
pub struct RpcPropertyStore {
    user: SystemUser,
    id: String,
    invoker: Arc<dyn RpcInvoker>,
}

impl RpcPropertyStore {
    /// Create a store for session `id` owned by `user`.
    pub fn new(user: SystemUser, id: impl Into<String>, invoker: Arc<dyn RpcInvoker>) -> Self {
        Self {
            user,
            id: id.into(),
            invoker,
        }
    }

    fn request(&self, operation: Operation) -> StorageRequest {
        StorageRequest::new(self.user.user_id, operation).session(&self.id)
    }

    /// Issue a `read` for `names` (all fields when empty) and return the
    /// session's field map.
    async fn read_fields(
        &self,
        names: &[&str],
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        let request = self.request(Operation::Read).field_names(names.iter().copied());
        let response = self.invoker.invoke(request.into_rpc()).await?;
        let obj = protocol::result_object(&response)?;
        Ok(protocol::read_session_fields(obj)?.clone())
    }

    async fn send_update<'a, I>(&self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)> + Send,
    {
        let request = self.request(Operation::Update).field_values(values);
        let response = self.invoker.invoke(request.into_rpc()).await?;
        protocol::result_object(&response)?;
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for RpcPropertyStore {
    fn session_id(&self) -> &str {
        &self.id
    }

    async fn read_property(&self, name: &str) -> Result<String> {
        let fields = self.read_fields(&[name]).await?;
        Ok(protocol::field_value(&fields, name))
    }

    async fn write_property(&self, name: &str, value: &str) -> Result<()> {
        self.send_update([(name, value)]).await?;
        debug!(session_id = %self.id, property = name, "wrote remote session property");
        Ok(())
    }

    async fn read_properties(&self, names: &[&str]) -> Result<BTreeMap<String, String>> {
        if names.is_empty() {
            // An empty field list would ask the authority for every field.
            return Ok(BTreeMap::new());
        }
        let fields = self.read_fields(names).await?;
        Ok(names
            .iter()
            .map(|name| ((*name).to_string(), protocol::field_value(&fields, name)))
            .collect())
    }

    async fn write_properties(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.send_update(values.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .await
    }

    async fn read_all_properties(&self) -> Result<BTreeMap<String, String>> {
        let fields = self.read_fields(&[]).await?;
        Ok(fields
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, _)| (k.clone(), protocol::field_value(&fields, k)))
            .collect())
    }

    async fn destroy(&self) -> Result<()> {
        let response = self
            .invoker
            .invoke(self.request(Operation::Delete).into_rpc())
            .await?;
        protocol::result_object(&response)?;
        debug!(session_id = %self.id, "removed remote session");
        Ok(())
    }
}

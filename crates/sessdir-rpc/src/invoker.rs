//! Request invokers.
//!
//! [`RpcInvoker`] is the seam between the remote backend and whatever
//! carries requests to the authority. [`HttpRpcInvoker`] posts requests over
//! HTTP; [`MockInvoker`] (tests and the `test-utils` feature) answers from
//! a closure and records every request.
//!
//! Timeout and retry policy belong to the invoker, never to the backend.

use std::time::Duration;

use async_trait::async_trait;
use sessdir_types::config::RpcConfig;
use sessdir_types::{Result, StorageError};
use tracing::debug;

use crate::types::{JsonRpcRequest, JsonRpcResponse};

/// Carries one request to the authority and returns its response.
///
/// An `Err` means no usable response was received (connection refused,
/// timeout, undecodable body). A response carrying a JSON-RPC error object
/// is still `Ok`; interpreting it is the caller's job.
#[async_trait]
pub trait RpcInvoker: Send + Sync {
    /// Send `request` and wait for the matching response.
    async fn invoke(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse>;
}

/// Invoker that posts JSON-RPC requests to an HTTP endpoint.
pub struct HttpRpcInvoker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRpcInvoker {
    /// Create an invoker targeting `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create an invoker from the `rpc` section of the configuration.
    pub fn from_config(config: &RpcConfig) -> Result<Self> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RpcInvoker for HttpRpcInvoker {
    async fn invoke(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        debug!(
            method = %request.method,
            id = request.id,
            endpoint = %self.endpoint,
            "sending session storage request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| StorageError::Transport {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Transport {
                message: format!("HTTP {status}: {body}"),
            });
        }

        resp.json::<JsonRpcResponse>()
            .await
            .map_err(|e| StorageError::Transport {
                message: format!("failed to decode response: {e}"),
            })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockInvoker;

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use std::sync::Arc;

    use async_trait::async_trait;
    use sessdir_types::{Result, StorageError};
    use tokio::sync::Mutex;

    use super::RpcInvoker;
    use crate::types::{JsonRpcRequest, JsonRpcResponse};

    type Handler = dyn Fn(&JsonRpcRequest) -> Result<JsonRpcResponse> + Send + Sync;

    /// An invoker answering from a closure.
    ///
    /// Every request is recorded before the handler runs, so tests can
    /// assert on the exact envelope even when the handler fails.
    pub struct MockInvoker {
        handler: Box<Handler>,
        requests: Arc<Mutex<Vec<JsonRpcRequest>>>,
    }

    impl MockInvoker {
        /// Answer every request with `handler`.
        pub fn new<F>(handler: F) -> Self
        where
            F: Fn(&JsonRpcRequest) -> Result<JsonRpcResponse> + Send + Sync + 'static,
        {
            Self {
                handler: Box::new(handler),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Answer every request successfully with the same result value.
        pub fn responding(result: serde_json::Value) -> Self {
            Self::new(move |req| Ok(JsonRpcResponse::success(req.id, result.clone())))
        }

        /// Fail every request at the transport level.
        pub fn unreachable() -> Self {
            Self::new(|_| {
                Err(StorageError::Transport {
                    message: "connection refused".into(),
                })
            })
        }

        /// All requests received so far, oldest first.
        pub async fn requests(&self) -> Vec<JsonRpcRequest> {
            self.requests.lock().await.clone()
        }
    }

    #[async_trait]
    impl RpcInvoker for MockInvoker {
        async fn invoke(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
            self.requests.lock().await.push(request.clone());
            (self.handler)(&request)
        }
    }
}

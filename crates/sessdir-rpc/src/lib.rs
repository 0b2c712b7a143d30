//! # sessdir-rpc
//!
//! Wire contract between the remote session backend and the authority.
//!
//! - **[`types`]** -- JSON-RPC 2.0 request/response/error envelopes
//! - **[`protocol`]** -- the session-storage method, operation codes, field
//!   names, request builder and response readers
//! - **[`invoker`]** -- the [`RpcInvoker`] transport seam and its HTTP
//!   implementation

pub mod invoker;
pub mod protocol;
pub mod types;

pub use invoker::{HttpRpcInvoker, RpcInvoker};
pub use protocol::{Operation, StorageRequest};
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use invoker::MockInvoker;

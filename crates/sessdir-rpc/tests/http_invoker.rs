//! HTTP invoker tests against a local mock authority.

use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use sessdir_rpc::protocol::{self, Operation, StorageRequest};
use sessdir_rpc::{HttpRpcInvoker, RpcInvoker};
use sessdir_types::StorageError;

#[tokio::test]
async fn posts_envelope_and_decodes_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rpc")
        .match_body(Matcher::PartialJson(json!({
            "method": "session_storage",
            "params": {"user_id": 1000, "operation": "count"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"count":4}}"#)
        .create_async()
        .await;

    let invoker =
        HttpRpcInvoker::new(format!("{}/rpc", server.url()), Duration::from_secs(5)).unwrap();
    let request = StorageRequest::new(1000, Operation::Count).into_rpc();
    let response = invoker.invoke(request).await.unwrap();

    let obj = protocol::result_object(&response).unwrap();
    assert_eq!(protocol::read_count(obj).unwrap(), 4);
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_transport_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/rpc")
        .with_status(503)
        .with_body("authority restarting")
        .create_async()
        .await;

    let invoker =
        HttpRpcInvoker::new(format!("{}/rpc", server.url()), Duration::from_secs(5)).unwrap();
    let err = invoker
        .invoke(StorageRequest::new(1, Operation::ReadAll).into_rpc())
        .await
        .unwrap_err();

    match err {
        StorageError::Transport { message } => {
            assert!(message.contains("503"));
            assert!(message.contains("authority restarting"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_transport_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/rpc")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let invoker =
        HttpRpcInvoker::new(format!("{}/rpc", server.url()), Duration::from_secs(5)).unwrap();
    let err = invoker
        .invoke(StorageRequest::new(1, Operation::Count).into_rpc())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Transport { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    // Port 9 (discard) on loopback is closed in test environments.
    let invoker = HttpRpcInvoker::new("http://127.0.0.1:9/rpc", Duration::from_secs(2)).unwrap();
    let err = invoker
        .invoke(StorageRequest::new(1, Operation::Count).into_rpc())
        .await
        .unwrap_err();
    assert!(err.is_transient());
}

use picpay_core::gateway::Gateway;
use picpay_core::message_service::{MessageRequest, MessageServiceClient};
use picpay_core::server::serve_grpc_with_gateway;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::net::SocketAddr;

mod common;

/// Starts the dual-protocol variant and returns (gRPC address, gateway address).
async fn spawn_grpc_with_gateway() -> (SocketAddr, SocketAddr) {
    let (grpc_listener, grpc_addr) = common::ephemeral().await;
    let (gateway_listener, gateway_addr) = common::ephemeral().await;
    tokio::spawn(serve_grpc_with_gateway(grpc_listener, gateway_listener));
    (grpc_addr, gateway_addr)
}

#[tokio::test]
async fn gateway_and_grpc_return_the_same_payload() {
    let (grpc_addr, gateway_addr) = spawn_grpc_with_gateway().await;

    let via_gateway: Value = common::http_client()
        .get(format!("http://{gateway_addr}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let mut client = MessageServiceClient::connect(format!("http://{grpc_addr}"))
        .await
        .unwrap();
    let via_grpc = client
        .get_message(MessageRequest {})
        .await
        .unwrap()
        .into_inner();

    assert_eq!(via_gateway, json!({ "message": "hi picpay" }));
    assert_eq!(via_gateway["message"], via_grpc.message.as_str());
}

#[tokio::test]
async fn unbound_route_calls_the_method() {
    let (_, gateway_addr) = spawn_grpc_with_gateway().await;
    let client = common::http_client();
    let url = format!("http://{gateway_addr}/picpay.MessageService/GetMessage");

    for body in ["{}", ""] {
        let res = client.post(&url).body(body).send().await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/json");
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({ "message": "hi picpay" })
        );
    }
}

#[tokio::test]
async fn forwarded_headers_do_not_change_the_answer() {
    let (_, gateway_addr) = spawn_grpc_with_gateway().await;

    let res = common::http_client()
        .get(format!("http://{gateway_addr}/"))
        .header("authorization", "Bearer token")
        .header("grpc-metadata-x-request-id", "42")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "message": "hi picpay" })
    );
}

#[tokio::test]
async fn header_that_is_not_valid_metadata_is_a_bad_request() {
    let (_, gateway_addr) = spawn_grpc_with_gateway().await;

    // Keys ending in "-bin" are reserved for binary metadata.
    let res = common::http_client()
        .get(format!("http://{gateway_addr}/"))
        .header("grpc-metadata-trace-bin", "abc")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await.unwrap()["code"], 3);
}

#[tokio::test]
async fn unknown_service_or_method_is_not_found() {
    let (_, gateway_addr) = spawn_grpc_with_gateway().await;
    let client = common::http_client();

    for path in ["picpay.MessageService/Nope", "picpay.Nope/GetMessage"] {
        let res = client
            .post(format!("http://{gateway_addr}/{path}"))
            .body("{}")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["code"], 5);
        assert_eq!(body["details"], json!([]));
    }
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (_, gateway_addr) = spawn_grpc_with_gateway().await;

    let res = common::http_client()
        .post(format!("http://{gateway_addr}/picpay.MessageService/GetMessage"))
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await.unwrap()["code"], 3);
}

#[tokio::test]
async fn unknown_body_fields_are_ignored() {
    let (_, gateway_addr) = spawn_grpc_with_gateway().await;

    let res = common::http_client()
        .post(format!("http://{gateway_addr}/picpay.MessageService/GetMessage"))
        .body(r#"{"extra": "field", "unknown": 1}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "message": "hi picpay" })
    );
}

#[tokio::test]
async fn routing_failures_use_the_status_body() {
    let (_, gateway_addr) = spawn_grpc_with_gateway().await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{gateway_addr}/no/such/route"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "code": 5, "message": "Not Found", "details": [] })
    );

    let res = client
        .get(format!("http://{gateway_addr}/picpay.MessageService/GetMessage"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "code": 12, "message": "Method Not Allowed", "details": [] })
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_server_error() {
    let backend = common::closed_addr().await;
    let gateway = Gateway::connect_lazy(&format!("http://{backend}")).unwrap();

    let (listener, gateway_addr) = common::ephemeral().await;
    tokio::spawn(async move { axum::serve(listener, gateway.router()).await });

    let res = common::http_client()
        .get(format!("http://{gateway_addr}/"))
        .send()
        .await
        .unwrap();

    assert!(res.status().is_server_error());
    let body: Value = res.json().await.unwrap();
    assert_ne!(body["code"], 0);
}

#[tokio::test]
async fn invalid_backend_uri_is_rejected() {
    let err = Gateway::connect_lazy("not a uri").unwrap_err();

    assert!(matches!(
        err,
        picpay_core::ServeError::InvalidEndpoint { addr, .. } if addr == "not a uri"
    ));
}

use picpay_core::server::{bind, run};
use picpay_core::{ServeError, Variant};
use std::time::Duration;
use tokio::time::timeout;

mod common;

#[tokio::test]
async fn binding_a_taken_address_fails() {
    let (_held, addr) = common::ephemeral().await;

    let err = bind(&addr.to_string()).await.unwrap_err();

    assert!(matches!(err, ServeError::Bind { addr: failed, .. } if failed == addr.to_string()));
}

#[tokio::test]
async fn every_variant_fails_fast_on_a_taken_address() {
    let (_held, addr) = common::ephemeral().await;
    let variants = [
        Variant::Http,
        Variant::Json,
        Variant::ProtoJson,
        Variant::Grpc,
        Variant::GrpcGateway {
            gateway_addr: "127.0.0.1:0".to_string(),
        },
    ];

    for variant in variants {
        let result = timeout(Duration::from_secs(5), run(variant, &addr.to_string()))
            .await
            .expect("startup on a taken address must not hang");

        assert!(matches!(result, Err(ServeError::Bind { .. })));
    }
}

#[tokio::test]
async fn gateway_variant_fails_when_the_gateway_address_is_taken() {
    let (_held, taken) = common::ephemeral().await;
    let variant = Variant::GrpcGateway {
        gateway_addr: taken.to_string(),
    };

    let result = timeout(Duration::from_secs(5), run(variant, "127.0.0.1:0"))
        .await
        .expect("startup on a taken address must not hang");

    assert!(matches!(result, Err(ServeError::Bind { addr, .. }) if addr == taken.to_string()));
}

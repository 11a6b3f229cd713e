#![allow(dead_code)]

use picpay_core::server::bind;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds a listener on a free loopback port.
pub async fn ephemeral() -> (TcpListener, SocketAddr) {
    let listener = bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let (listener, addr) = ephemeral().await;
    drop(listener);
    addr
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

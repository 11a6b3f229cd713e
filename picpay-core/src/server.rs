//! # Server Lifecycle
//!
//! Binds listeners and runs the accept loop of each variant. The `serve_*`
//! functions take already bound listeners so callers (and tests) can bind to
//! ephemeral ports; [`run`] binds the configured addresses first and fails fast
//! when one is unavailable.
//!
//! None of these functions return while the server is healthy. There is no
//! graceful shutdown: dropping the future or ending the process is the only way
//! to stop a variant.
use crate::error::ServeError;
use crate::gateway::Gateway;
use crate::http::{
    raw,
    router::{json_router, proto_json_router},
};
use crate::schema::Schema;
use crate::service::MessageServiceImpl;
use std::future::IntoFuture;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

/// Default listening address of every variant, and of the gRPC side of the gateway variant.
pub const DEFAULT_ADDR: &str = "localhost:8000";
/// Default listening address of the REST gateway.
pub const DEFAULT_GATEWAY_ADDR: &str = "localhost:8001";

/// The available ways of serving the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    /// Literal body on a bare HTTP connection.
    Http,
    /// `GET /` rendering a JSON struct.
    Json,
    /// `GET /` rendering `MessageResponse` as Protobuf JSON.
    ProtoJson,
    /// gRPC `picpay.MessageService`.
    Grpc,
    /// gRPC on the main address plus a REST gateway on `gateway_addr`.
    GrpcGateway { gateway_addr: String },
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Http => "http",
            Variant::Json => "gin",
            Variant::ProtoJson => "proto-gin",
            Variant::Grpc => "proto-grpc",
            Variant::GrpcGateway { .. } => "proto-grpc-rest",
        }
    }
}

/// Binds a TCP listener, reporting the address on failure.
pub async fn bind(addr: &str) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })
}

/// Binds every address `variant` needs on top of `addr`, then serves it.
pub async fn run(variant: Variant, addr: &str) -> Result<(), ServeError> {
    let listener = bind(addr).await?;
    log_listening(&variant, &listener, "serving");

    match &variant {
        Variant::Http => serve_http(listener).await,
        Variant::Json => serve_json(listener).await,
        Variant::ProtoJson => serve_proto_json(listener).await,
        Variant::Grpc => serve_grpc(listener).await,
        Variant::GrpcGateway { gateway_addr } => {
            let gateway_listener = bind(gateway_addr).await?;
            log_listening(&variant, &gateway_listener, "gateway");
            serve_grpc_with_gateway(listener, gateway_listener).await
        }
    }
}

fn log_listening(variant: &Variant, listener: &TcpListener, role: &str) {
    match listener.local_addr() {
        Ok(addr) => tracing::info!(variant = variant.name(), role, %addr, "listening"),
        Err(err) => tracing::warn!(
            variant = variant.name(),
            role,
            error = %err,
            "listening on unknown address"
        ),
    }
}

pub async fn serve_http(listener: TcpListener) -> Result<(), ServeError> {
    raw::serve(listener).await
}

pub async fn serve_json(listener: TcpListener) -> Result<(), ServeError> {
    axum::serve(listener, json_router())
        .await
        .map_err(ServeError::Http)
}

pub async fn serve_proto_json(listener: TcpListener) -> Result<(), ServeError> {
    let router = proto_json_router(&Schema::embedded()?)?;
    axum::serve(listener, router)
        .await
        .map_err(ServeError::Http)
}

pub async fn serve_grpc(listener: TcpListener) -> Result<(), ServeError> {
    Server::builder()
        .add_service(MessageServiceImpl.into_server())
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await
        .map_err(ServeError::Grpc)
}

/// Serves gRPC on `grpc_listener` from a spawned task and the REST gateway on
/// `gateway_listener` from the calling task.
///
/// The gateway forwards to the gRPC listener's local address over plaintext
/// HTTP/2, using loopback when the listener is bound to a wildcard address. Whichever loop stops first ends both, and its error is returned.
pub async fn serve_grpc_with_gateway(
    grpc_listener: TcpListener,
    gateway_listener: TcpListener,
) -> Result<(), ServeError> {
    let grpc_addr = grpc_listener.local_addr().map_err(ServeError::Http)?;
    let gateway = Gateway::connect_lazy(&format!("http://{}", dialable(grpc_addr)))?;

    let mut grpc = tokio::spawn(serve_grpc(grpc_listener));

    let result = tokio::select! {
        joined = &mut grpc => joined.map_err(ServeError::TaskPanicked).and_then(|served| served),
        served = axum::serve(gateway_listener, gateway.router()).into_future() => {
            served.map_err(ServeError::Http)
        }
    };

    grpc.abort();
    if let Err(err) = &result {
        tracing::error!(error = %err, "gRPC gateway variant stopped");
    }
    result
}

/// Maps a wildcard listening address to the loopback address of the same family.
fn dialable(addr: SocketAddr) -> SocketAddr {
    match addr {
        SocketAddr::V4(v4) if v4.ip().is_unspecified() => {
            SocketAddr::from((Ipv4Addr::LOCALHOST, v4.port()))
        }
        SocketAddr::V6(v6) if v6.ip().is_unspecified() => {
            SocketAddr::from((Ipv6Addr::LOCALHOST, v6.port()))
        }
        addr => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_addresses_are_dialed_on_loopback() {
        let v4: SocketAddr = "0.0.0.0:8000".parse().unwrap();
        let v6: SocketAddr = "[::]:8000".parse().unwrap();

        assert_eq!(dialable(v4), "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(dialable(v6), "[::1]:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn specific_addresses_are_dialed_as_is() {
        let addr: SocketAddr = "192.168.1.10:8000".parse().unwrap();

        assert_eq!(dialable(addr), addr);
    }
}

//! Startup and transport failures of the responders.
//!
//! These are the only errors a variant can produce on its own: the payload is
//! constant, so once a listener is up every request succeeds. Each variant
//! returns them instead of aborting the process.
use crate::schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to bind '{addr}': {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP server stopped: {0}")]
    Http(#[source] std::io::Error),
    #[error("gRPC server stopped: {0}")]
    Grpc(#[source] tonic::transport::Error),
    #[error("Invalid gRPC endpoint '{addr}': {source}")]
    InvalidEndpoint {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("Failed to load the message schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("gRPC server task aborted: {0}")]
    TaskPanicked(#[source] tokio::task::JoinError),
}

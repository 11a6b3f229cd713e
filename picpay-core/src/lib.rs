//! # Picpay Core
//!
//! `picpay_core` serves one static message, `{"message": "hi picpay"}`, through five
//! interchangeable transports. Every transport answers every request with the same payload;
//! they only differ in how that payload is encoded and carried.
//!
//! ## Variants
//!
//! * **Plain HTTP** ([`raw`](crate::http::raw)): a bare `hyper` connection handler that writes the literal
//!   body for any request.
//! * **JSON route** ([`json_router`](crate::http::router::json_router)): an `axum` route rendering a serializable struct.
//! * **Proto JSON route** ([`proto_json_router`](crate::http::router::proto_json_router)): an `axum` route rendering a
//!   `MessageResponse` through its Protobuf descriptor.
//! * **gRPC** ([`service::MessageServiceImpl`]): the unary `picpay.MessageService/GetMessage`.
//! * **gRPC + gateway** ([`gateway::Gateway`]): the gRPC service plus an HTTP/JSON proxy that
//!   transcodes requests into gRPC calls using the embedded schema.
//!
//! ## Lifecycle
//!
//! [`server`] binds listeners and runs the accept loops. Nothing here exits the process:
//! every startup or transport failure is returned as a [`ServeError`] and the caller decides
//! what to do with it.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost`, `prost-reflect` and `tonic` so consumers use versions
//! compatible with the generated bindings.
pub mod error;
pub mod gateway;
pub mod grpc;
pub mod http;
pub mod message;
pub mod schema;
pub mod server;
pub mod service;

pub use error::ServeError;
pub use server::Variant;

// Re-exports
pub use message_service;
pub use prost;
pub use prost_reflect;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

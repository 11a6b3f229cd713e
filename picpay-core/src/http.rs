//! # HTTP Responders
//!
//! The three HTTP-only variants:
//!
//! * [`raw`]: writes the literal body on a bare `hyper` connection, for any path or method.
//! * [`router::json_router`]: `GET /` rendering a serde struct through `axum::Json`.
//! * [`router::proto_json_router`]: `GET /` rendering a Protobuf message through
//!   [`proto_json::ProtoJson`].
pub mod proto_json;
pub mod raw;
pub mod router;

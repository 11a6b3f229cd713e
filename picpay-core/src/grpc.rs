//! # Generic gRPC Transport
//!
//! Building blocks for calling gRPC methods with schema-driven message types.
//!
//! The gateway does not know `MessageRequest` or `MessageResponse` at compile time:
//! it hands `serde_json::Value` bodies to these components, which transcode them to
//! Protobuf binary format on the fly using descriptors from the embedded schema.
pub mod client;
pub mod codec;

//! # Schema Registry
//!
//! Loads the embedded `FileDescriptorSet` of `message.proto` and resolves
//! services, methods and messages by name. The gateway and the proto-JSON
//! renderer use it to drive transcoding from the schema instead of from
//! generated structs.
use message_service::FILE_DESCRIPTOR_SET;
use prost_reflect::{DescriptorPool, MessageDescriptor, MethodDescriptor};
use thiserror::Error;

/// Fully qualified name of the gRPC service.
pub const MESSAGE_SERVICE: &str = "picpay.MessageService";
/// Name of the single unary method.
pub const GET_MESSAGE: &str = "GetMessage";
/// Fully qualified name of the response message.
pub const MESSAGE_RESPONSE: &str = "picpay.MessageResponse";

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to decode descriptor set: {0}")]
    Decode(#[from] prost_reflect::DescriptorError),
    #[error("Service '{0}' not found")]
    ServiceNotFound(String),
    #[error("Method '{0}' not found")]
    MethodNotFound(String),
    #[error("Message '{0}' not found")]
    MessageNotFound(String),
}

/// A registry that holds the loaded Protobuf definitions.
#[derive(Debug, Clone)]
pub struct Schema {
    pool: DescriptorPool,
}

impl Schema {
    /// Decodes the descriptor set embedded by `message-service`.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::from_bytes(FILE_DESCRIPTOR_SET)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        let pool = DescriptorPool::decode(bytes)?;
        Ok(Self { pool })
    }

    /// Resolves `service` (e.g. `picpay.MessageService`) and `method` (e.g. `GetMessage`).
    pub fn method(&self, service: &str, method: &str) -> Result<MethodDescriptor, SchemaError> {
        self.pool
            .get_service_by_name(service)
            .ok_or_else(|| SchemaError::ServiceNotFound(service.to_string()))?
            .methods()
            .find(|m| m.name() == method)
            .ok_or_else(|| SchemaError::MethodNotFound(method.to_string()))
    }

    pub fn message(&self, name: &str) -> Result<MessageDescriptor, SchemaError> {
        self.pool
            .get_message_by_name(name)
            .ok_or_else(|| SchemaError::MessageNotFound(name.to_string()))
    }
}

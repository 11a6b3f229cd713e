//! Axum response type rendering a `prost` message as canonical Protobuf JSON.
//!
//! The message is encoded to its wire form and merged back into a
//! `DynamicMessage` of the given descriptor, so the JSON follows the schema
//! (field names, default handling) rather than the Rust struct.
use crate::grpc::codec::message_to_json;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prost_reflect::{DynamicMessage, MessageDescriptor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Message does not match descriptor '{name}': {source}")]
    Decode {
        name: String,
        source: prost::DecodeError,
    },
    #[error("Failed to render message as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transcodes `message` into JSON using `descriptor`.
pub fn to_json<M: prost::Message>(
    descriptor: &MessageDescriptor,
    message: &M,
) -> Result<serde_json::Value, TranscodeError> {
    let bytes = message.encode_to_vec();
    let dynamic = DynamicMessage::decode(descriptor.clone(), bytes.as_slice()).map_err(|source| {
        TranscodeError::Decode {
            name: descriptor.full_name().to_string(),
            source,
        }
    })?;
    Ok(message_to_json(&dynamic)?)
}

/// A `prost` message paired with the descriptor used to render it.
pub struct ProtoJson<M> {
    pub descriptor: MessageDescriptor,
    pub message: M,
}

impl<M: prost::Message> IntoResponse for ProtoJson<M> {
    fn into_response(self) -> Response {
        match to_json(&self.descriptor, &self.message) {
            Ok(value) => Json(value).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render Protobuf JSON");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

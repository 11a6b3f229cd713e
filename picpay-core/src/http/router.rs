//! `axum` routers for the framework-based variants.
//!
//! Both serve `GET /` only; other paths get 404 and other methods on `/` get
//! 405. Every request is traced by `tower_http`'s `TraceLayer`.
use super::proto_json::ProtoJson;
use crate::message::{Greeting, message_response};
use crate::schema::{MESSAGE_RESPONSE, Schema, SchemaError};
use axum::{Json, Router, extract::State, routing::get};
use message_service::MessageResponse;
use prost_reflect::MessageDescriptor;
use tower_http::trace::TraceLayer;

/// `GET /` -> `{"message":"hi picpay"}` from a serde struct.
pub fn json_router() -> Router {
    Router::new()
        .route("/", get(greeting))
        .layer(TraceLayer::new_for_http())
}

async fn greeting() -> Json<Greeting> {
    Json(Greeting::default())
}

/// `GET /` -> Protobuf JSON of `MessageResponse`.
///
/// Fails when the schema does not define `picpay.MessageResponse`.
pub fn proto_json_router(schema: &Schema) -> Result<Router, SchemaError> {
    let descriptor = schema.message(MESSAGE_RESPONSE)?;

    Ok(Router::new()
        .route("/", get(proto_greeting))
        .layer(TraceLayer::new_for_http())
        .with_state(descriptor))
}

async fn proto_greeting(
    State(descriptor): State<MessageDescriptor>,
) -> ProtoJson<MessageResponse> {
    ProtoJson {
        descriptor,
        message: message_response(),
    }
}

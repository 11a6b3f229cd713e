//! # REST Gateway
//!
//! An HTTP/JSON reverse proxy in front of the gRPC service. Requests are
//! translated into unary gRPC calls using the embedded schema: the JSON body is
//! encoded with the method's input descriptor (unknown fields are dropped), sent
//! through the [`GrpcClient`], and the response message is rendered back to JSON.
//!
//! ## Routes
//!
//! * `GET /` is bound to `picpay.MessageService/GetMessage` with an empty request.
//! * `POST /{package.Service}/{Method}` calls any unary method of the schema with
//!   the request body (an empty body is `{}`).
//!
//! ## Metadata
//!
//! `Authorization` is forwarded as the `authorization` metadata entry, and every
//! `Grpc-Metadata-<key>` header is forwarded as `<key>`.
//!
//! ## Errors
//!
//! Failures are reported as a gRPC [`Status`] and rendered by [`status::StatusResponse`],
//! including routing failures: an unknown path is `NOT_FOUND` and a known path with
//! the wrong HTTP method is `UNIMPLEMENTED`.
//! The backend channel is lazy: the gateway starts before the gRPC server accepts,
//! and calls made while it is unreachable fail with `UNAVAILABLE`.
pub mod status;

use crate::error::ServeError;
use crate::grpc::client::{GrpcClient, GrpcRequestError};
use crate::schema::{GET_MESSAGE, MESSAGE_SERVICE, Schema, SchemaError};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use status::StatusResponse;
use tonic::{
    Status,
    transport::{Channel, Endpoint},
};
use tower_http::trace::TraceLayer;

/// Prefix of HTTP headers forwarded as gRPC metadata.
pub const METADATA_HEADER_PREFIX: &str = "grpc-metadata-";

#[derive(Debug, Clone)]
pub struct Gateway {
    schema: Schema,
    client: GrpcClient<Channel>,
}

impl Gateway {
    pub fn new(schema: Schema, channel: Channel) -> Self {
        Self {
            schema,
            client: GrpcClient::new(channel),
        }
    }

    /// Builds a gateway for the gRPC server at `addr` (e.g. `http://localhost:8000`)
    /// without waiting for it to accept connections.
    pub fn connect_lazy(addr: &str) -> Result<Self, ServeError> {
        let endpoint = Endpoint::from_shared(addr.to_string()).map_err(|source| {
            ServeError::InvalidEndpoint {
                addr: addr.to_string(),
                source,
            }
        })?;

        Ok(Self::new(Schema::embedded()?, endpoint.connect_lazy()))
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(get_message))
            .route("/{service}/{method}", post(unbound_call))
            .fallback(route_not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }

    /// Calls the unary `service/method` with a JSON payload.
    pub async fn call(
        &self,
        service: &str,
        method: &str,
        payload: serde_json::Value,
        metadata: Vec<(String, String)>,
    ) -> Result<serde_json::Value, Status> {
        let method = self.schema.method(service, method).map_err(|err| match err {
            SchemaError::ServiceNotFound(_) | SchemaError::MethodNotFound(_) => {
                Status::not_found(err.to_string())
            }
            _ => Status::internal(err.to_string()),
        })?;

        if method.is_client_streaming() || method.is_server_streaming() {
            return Err(Status::unimplemented(format!(
                "Streaming method '{}' cannot be called through the gateway",
                method.full_name()
            )));
        }

        let mut client = self.client.clone();
        match client.unary(method, payload, metadata).await {
            Ok(result) => result,
            Err(GrpcRequestError::ClientNotReady(err)) => Err(Status::unavailable(format!(
                "gRPC backend unavailable: {err}"
            ))),
            Err(
                err @ (GrpcRequestError::InvalidMetadataKey { .. }
                | GrpcRequestError::InvalidMetadataValue { .. }),
            ) => Err(Status::invalid_argument(err.to_string())),
            Err(err @ GrpcRequestError::InvalidPath { .. }) => {
                Err(Status::internal(err.to_string()))
            }
        }
    }

    async fn respond(
        &self,
        service: &str,
        method: &str,
        payload: serde_json::Value,
        headers: &HeaderMap,
    ) -> Response {
        let result = match forwarded_metadata(headers) {
            Ok(metadata) => self.call(service, method, payload, metadata).await,
            Err(status) => Err(status),
        };

        match result {
            Ok(value) => Json(value).into_response(),
            Err(status) => {
                tracing::warn!(
                    service,
                    method,
                    code = ?status.code(),
                    message = status.message(),
                    "gateway call failed"
                );
                StatusResponse(status).into_response()
            }
        }
    }
}

async fn get_message(State(gateway): State<Gateway>, headers: HeaderMap) -> Response {
    gateway
        .respond(MESSAGE_SERVICE, GET_MESSAGE, empty_object(), &headers)
        .await
}

async fn unbound_call(
    State(gateway): State<Gateway>,
    Path((service, method)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match parse_body(&body) {
        Ok(payload) => gateway.respond(&service, &method, payload, &headers).await,
        Err(status) => StatusResponse(status).into_response(),
    }
}

async fn route_not_found() -> StatusResponse {
    StatusResponse(Status::not_found("Not Found"))
}

async fn method_not_allowed() -> StatusResponse {
    StatusResponse(Status::unimplemented("Method Not Allowed"))
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn parse_body(body: &[u8]) -> Result<serde_json::Value, Status> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(empty_object());
    }

    serde_json::from_slice(body)
        .map_err(|e| Status::invalid_argument(format!("Invalid JSON body: {e}")))
}

fn forwarded_metadata(headers: &HeaderMap) -> Result<Vec<(String, String)>, Status> {
    let mut metadata = Vec::new();

    for (name, value) in headers {
        let key = match name.as_str() {
            "authorization" => "authorization",
            other => match other.strip_prefix(METADATA_HEADER_PREFIX) {
                Some(key) => key,
                None => continue,
            },
        };

        let value = value.to_str().map_err(|_| {
            Status::invalid_argument(format!("Header '{name}' is not valid gRPC metadata"))
        })?;

        metadata.push((key.to_string(), value.to_string()));
    }

    Ok(metadata)
}

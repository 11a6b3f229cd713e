//! Plain HTTP/1.1 responder with no router.
//!
//! Every request, whatever its method or path, receives status 200 and the
//! bytes of [`RAW_BODY`].
use crate::error::ServeError;
use crate::message::RAW_BODY;
use bytes::Bytes;
use http::{HeaderValue, Request, Response, header::CONTENT_TYPE};
use http_body_util::Full;
use hyper::{body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use tokio::net::TcpListener;

/// Content type assigned to the raw body; it is served as text, not as JSON.
pub const RAW_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Builds the response written for every request.
pub fn raw_response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(RAW_BODY.as_bytes())));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(RAW_CONTENT_TYPE));
    response
}

async fn respond(_req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(raw_response())
}

/// Accepts connections on `listener` forever, one task per connection.
///
/// Returns only when accepting fails.
pub async fn serve(listener: TcpListener) -> Result<(), ServeError> {
    loop {
        let (stream, remote_addr) = listener.accept().await.map_err(ServeError::Http)?;
        let io = TokioIo::new(stream);

        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, service_fn(respond))
                .await
            {
                tracing::debug!(%remote_addr, error = %err, "connection closed with error");
            }
        });
    }
}

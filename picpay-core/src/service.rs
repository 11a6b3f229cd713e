//! gRPC implementation of `picpay.MessageService`.
use crate::message::message_response;
use message_service::{MessageRequest, MessageResponse, MessageService, MessageServiceServer};
use tonic::{Request, Response, Status};

/// Answers `GetMessage` with `"hi picpay"`, whatever the request holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageServiceImpl;

impl MessageServiceImpl {
    pub fn into_server(self) -> MessageServiceServer<Self> {
        MessageServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl MessageService for MessageServiceImpl {
    async fn get_message(
        &self,
        request: Request<MessageRequest>,
    ) -> Result<Response<MessageResponse>, Status> {
        tracing::debug!(remote_addr = ?request.remote_addr(), "GetMessage");
        Ok(Response::new(message_response()))
    }
}

//! # Message Service
//!
//! Generated `prost` types and `tonic` bindings for `picpay.MessageService`,
//! plus the binary `FileDescriptorSet` of the schema for runtime reflection.

pub mod pb {
    include!(concat!(env!("OUT_DIR"), "/picpay.rs"));
}

pub use pb::message_service_client::MessageServiceClient;
pub use pb::message_service_server::{MessageService, MessageServiceServer};
pub use pb::{MessageRequest, MessageResponse};

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("descriptors");

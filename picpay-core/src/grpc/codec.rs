//! # JSON <-> Protobuf Codec
//!
//! Implements `tonic::codec::Codec` so `tonic` can carry `serde_json::Value`
//! directly, bypassing generated Rust structs.
//!
//! 1. **Encoder (JSON -> Proto)**: deserializes the value into a `DynamicMessage`
//!    of the input descriptor and writes its binary encoding.
//! 2. **Decoder (Proto -> JSON)**: merges the wire bytes into a `DynamicMessage`
//!    of the output descriptor and renders it with [`message_to_json`].
use prost::Message;
use prost_reflect::{DeserializeOptions, DynamicMessage, MessageDescriptor, SerializeOptions};
use tonic::{
    Status,
    codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder},
};

/// Renders a message as canonical Protobuf JSON.
///
/// Fields holding their default value are still emitted, so an empty
/// `message` renders as `""` rather than disappearing.
pub fn message_to_json(msg: &DynamicMessage) -> Result<serde_json::Value, serde_json::Error> {
    let options = SerializeOptions::new().skip_default_fields(false);
    msg.serialize_with_options(serde_json::value::Serializer, &options)
}

/// Parses a JSON value against `desc`.
///
/// Fields the schema does not know are discarded, the same way a Protobuf
/// decoder skips unknown tags.
pub fn json_to_message(
    desc: MessageDescriptor,
    value: serde_json::Value,
) -> Result<DynamicMessage, Status> {
    let options = DeserializeOptions::new().deny_unknown_fields(false);
    DynamicMessage::deserialize_with_options(desc, value, &options).map_err(|e| {
        Status::invalid_argument(format!(
            "JSON structure does not match Protobuf schema: {}",
            e
        ))
    })
}

/// A Codec bridging `serde_json::Value` and Protobuf binary format.
///
/// It holds the descriptors for both the request and the response messages.
pub struct JsonCodec {
    req_desc: MessageDescriptor,
    res_desc: MessageDescriptor,
}

impl JsonCodec {
    pub fn new(req_desc: MessageDescriptor, res_desc: MessageDescriptor) -> Self {
        Self { req_desc, res_desc }
    }
}

impl Codec for JsonCodec {
    type Encode = serde_json::Value;
    type Decode = serde_json::Value;

    type Encoder = JsonEncoder;
    type Decoder = JsonDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        JsonEncoder(self.req_desc.clone())
    }

    fn decoder(&mut self) -> Self::Decoder {
        JsonDecoder(self.res_desc.clone())
    }
}

pub struct JsonEncoder(MessageDescriptor);

impl Encoder for JsonEncoder {
    type Item = serde_json::Value;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        let msg = json_to_message(self.0.clone(), item)?;
        msg.encode_raw(dst);
        Ok(())
    }
}

pub struct JsonDecoder(MessageDescriptor);

impl Decoder for JsonDecoder {
    type Item = serde_json::Value;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        let mut msg = DynamicMessage::new(self.0.clone());
        msg.merge(src)
            .map_err(|e| Status::internal(format!("Failed to decode Protobuf bytes: {}", e)))?;

        let value = message_to_json(&msg)
            .map_err(|e| Status::internal(format!("Failed to map response to JSON: {}", e)))?;

        Ok(Some(value))
    }
}

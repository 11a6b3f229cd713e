//! The one payload every variant serves.
use message_service::MessageResponse;
use serde::{Deserialize, Serialize};

/// The text carried by every response.
pub const GREETING: &str = "hi picpay";

/// Body written verbatim by the plain HTTP responder.
pub const RAW_BODY: &str = r#"{ "message": "hi picpay" }"#;

/// JSON shape served by the framework route: `{"message":"hi picpay"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self {
            message: GREETING.to_string(),
        }
    }
}

/// Builds the Protobuf response returned by `GetMessage`.
pub fn message_response() -> MessageResponse {
    MessageResponse {
        message: GREETING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_body_is_valid_json_with_the_greeting() {
        let parsed: Greeting = serde_json::from_str(RAW_BODY).unwrap();
        assert_eq!(parsed, Greeting::default());
    }

    #[test]
    fn greeting_serializes_compactly() {
        let json = serde_json::to_string(&Greeting::default()).unwrap();
        assert_eq!(json, r#"{"message":"hi picpay"}"#);
    }

    #[test]
    fn message_response_carries_the_greeting() {
        assert_eq!(message_response().message, GREETING);
    }
}

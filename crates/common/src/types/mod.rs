use serde::{Deserialize, Serialize};

/// Liveness body returned by the admin registry root.
#[derive(Serialize, Deserialize, Debug)]
pub struct Status {
    pub status: &'static str,
}

/// Plain `{"message": ...}` acknowledgement body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Error body shared by both services: `{"detail": ...}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    pub detail: String,
}

use serde::Serialize;
use utoipa::ToSchema;

/// Plain acknowledgement body for operations without a richer response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Wrap a human-readable confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

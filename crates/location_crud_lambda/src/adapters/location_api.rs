use crate::runtime::contract::{LocationKey, LocationRecord};

/// Status and raw body text of one upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A call that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }
}

pub trait LocationApi {
    fn create_location(&self, record: &LocationRecord) -> Result<UpstreamReply, TransportError>;

    fn list_locations(&self, country: &str) -> Result<UpstreamReply, TransportError>;

    fn update_location(
        &self,
        key: &LocationKey,
        record: &LocationRecord,
    ) -> Result<UpstreamReply, TransportError>;

    fn delete_location(&self, key: &LocationKey) -> Result<UpstreamReply, TransportError>;
}

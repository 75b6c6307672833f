use thiserror::Error;

/// Failures talking to the card record service.
///
/// A missing card and a rejected update are not errors; repositories report
/// them as `None` and `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("Problem retrieving card (status {0})")]
    UnexpectedStatus(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("Record service request failed: {0}")]
    Transport(String),
}

/// Failure writing an image to the object store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to store image '{key}': {cause}")]
pub struct StoreError {
    pub key: String,
    pub cause: String,
}

impl StoreError {
    pub fn new(key: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cause: cause.into(),
        }
    }
}

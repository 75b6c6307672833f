use crate::{
    config::ConfigError,
    domain::card::{
        errors::{RemoteError, StoreError},
        value_objects::CardId,
    },
};
use http::StatusCode;
use thiserror::Error;

/// Every way an upload invocation can end without linking an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Required input field absent or empty (400).
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Input field present but unusable (400).
    #[error("{field} {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Record service has no such card (404).
    #[error("No card exists with cardId '{0}'")]
    CardNotFound(CardId),

    /// Card already links an image (409).
    #[error("This card already has an image '{0}'")]
    ImageAlreadyPresent(CardId),

    /// Image stored but the record service refused the update (409).
    /// The stored object is left in place.
    #[error("An image was uploaded but the card record could not be updated for cardId '{0}'")]
    RecordNotUpdated(CardId),

    /// Record service unreachable or misbehaving (500).
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Object store write failed (500).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Function started without usable configuration (500).
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl UploadError {
    /// Get the status code reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Self::CardNotFound(_) => StatusCode::NOT_FOUND,
            Self::ImageAlreadyPresent(_) | Self::RecordNotUpdated(_) => StatusCode::CONFLICT,
            Self::Remote(_) | Self::Store(_) | Self::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

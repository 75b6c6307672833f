//! Response payloads returned to the invoking runtime.
//!
//! A successful upload is returned as the function result. A failed one is
//! returned as the function error, whose message is the JSON failure payload,
//! so callers reading either channel see the same `statusCode` field.

use crate::application::upload_card_image::{dto::CardImageUpdated, errors::UploadError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    pub status_code: u16,
    pub result: CardImageUpdated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureResponse {
    pub status_code: u16,
    pub message: String,
}

impl fmt::Display for FailureResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl std::error::Error for FailureResponse {}

impl From<UploadError> for FailureResponse {
    fn from(err: UploadError) -> Self {
        Self {
            status_code: err.status_code().as_u16(),
            message: err.to_string(),
        }
    }
}

/// Maps the terminal outcome of an upload to the payload handed back to the runtime.
pub fn format_outcome(
    outcome: Result<CardImageUpdated, UploadError>,
) -> Result<SuccessResponse, FailureResponse> {
    outcome
        .map(|result| SuccessResponse {
            status_code: http::StatusCode::OK.as_u16(),
            result,
        })
        .map_err(FailureResponse::from)
}

use super::errors::UploadError;
use crate::domain::card::value_objects::{CardId, ImageContentType};
use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard alphabet, padding optional.
const IMAGE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Upload event as delivered by the invoking runtime.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCardImageRequest {
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub base64_image: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl fmt::Debug for UploadCardImageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCardImageRequest")
            .field("card_id", &self.card_id)
            .field(
                "base64_image_len",
                &self.base64_image.as_ref().map(String::len),
            )
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// A request that passed validation, with the image already decoded.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub card_id: CardId,
    pub image: Bytes,
    pub content_type: Option<ImageContentType>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl UploadCardImageRequest {
    /// Checks the request field by field, `cardId` first, and decodes the image.
    pub fn validate(&self) -> Result<ValidatedUpload, UploadError> {
        let card_id =
            present(self.card_id.as_deref()).ok_or(UploadError::MissingField("cardId"))?;
        let base64_image = present(self.base64_image.as_deref())
            .ok_or(UploadError::MissingField("base64Image"))?;

        let card_id = CardId::new(card_id.to_string()).map_err(|_| UploadError::InvalidField {
            field: "cardId",
            reason: "is invalid".to_string(),
        })?;

        let content_type = match present(self.content_type.as_deref()) {
            None => None,
            Some(raw) => Some(ImageContentType::parse(raw).ok_or_else(|| {
                UploadError::InvalidField {
                    field: "contentType",
                    reason: format!(
                        "must be one of {}",
                        ImageContentType::ALL.map(|t| t.as_mime()).join(", ")
                    ),
                }
            })?),
        };

        // Line-wrapped payloads (76-column MIME style) are common, so all
        // whitespace is dropped, not just the ends.
        let compact: String = base64_image.split_ascii_whitespace().collect();
        let image = IMAGE_ENGINE
            .decode(compact)
            .ok()
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| UploadError::InvalidField {
                field: "base64Image",
                reason: "is not valid base64".to_string(),
            })?;

        Ok(ValidatedUpload {
            card_id,
            image: Bytes::from(image),
            content_type,
        })
    }
}

/// Success payload: the card now links its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImageUpdated {
    pub card_id: String,
    pub updated: bool,
}

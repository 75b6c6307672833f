use crate::{
    application::upload_card_image::{
        dto::{CardImageUpdated, UploadCardImageRequest},
        errors::UploadError,
    },
    domain::card::{
        repository::CardRepository,
        value_objects::{ImageContentType, ImageFilename},
    },
    infrastructure::storage::traits::StorageService,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Attaches an uploaded image to an existing card.
///
/// The workflow is strictly sequential and stops at the first failure:
/// 1. Validate the request and decode the image
/// 2. Look the card up in the record service; it must exist and carry no image
/// 3. Store the image in the bucket under `<cardId>.<ext>`
/// 4. Patch the card record with the stored filename
///
/// Nothing is retried. When step 4 is refused the stored image stays in the
/// bucket and the caller gets a conflict.
pub struct UploadCardImageUseCase {
    cards: Arc<dyn CardRepository>,
    storage: Arc<dyn StorageService>,
}

impl UploadCardImageUseCase {
    pub fn new(cards: Arc<dyn CardRepository>, storage: Arc<dyn StorageService>) -> Self {
        Self { cards, storage }
    }

    /// Runs one upload end-to-end.
    ///
    /// # Errors
    /// - [`UploadError::MissingField`] / [`UploadError::InvalidField`] before any remote call
    /// - [`UploadError::CardNotFound`] and [`UploadError::ImageAlreadyPresent`] after the lookup
    /// - [`UploadError::RecordNotUpdated`] when the image was stored but not linked
    /// - [`UploadError::Remote`] / [`UploadError::Store`] on collaborator failures
    #[instrument(skip(self, request), fields(card_id = request.card_id.as_deref().unwrap_or_default()))]
    pub async fn execute(
        &self,
        request: UploadCardImageRequest,
    ) -> Result<CardImageUpdated, UploadError> {
        let upload = request.validate().map_err(|e| {
            warn!(error = %e, "Rejected upload request");
            e
        })?;
        let card_id = upload.card_id;

        let card = self
            .cards
            .find_by_id(&card_id)
            .await
            .map_err(|e| {
                error!(error = %e, "An error occurred retrieving the card");
                UploadError::from(e)
            })?
            .ok_or_else(|| UploadError::CardNotFound(card_id.clone()))?;

        if let Some(existing) = card.image_url() {
            warn!(%existing, "Card already has an image");
            return Err(UploadError::ImageAlreadyPresent(card_id));
        }

        let filename = ImageFilename::for_card(&card_id, upload.content_type);
        let content_type = upload.content_type.unwrap_or(ImageContentType::DEFAULT);
        debug!(%filename, %content_type, size = upload.image.len(), "Uploading image");

        self.storage
            .put(&filename, content_type, upload.image)
            .await
            .map_err(|e| {
                error!(error = %e, "An error occurred saving the image");
                UploadError::from(e)
            })?;
        info!(%filename, "Image uploaded");

        let updated = self
            .cards
            .set_image_url(&card_id, &filename)
            .await
            .map_err(|e| {
                error!(error = %e, "An error occurred updating the card image");
                UploadError::from(e)
            })?;

        if !updated {
            // The stored object is not removed; the card and bucket now disagree.
            error!(%filename, "Image uploaded but card record was not updated");
            return Err(UploadError::RecordNotUpdated(card_id));
        }

        info!(%filename, "Updated card with image details");
        Ok(CardImageUpdated {
            card_id: card_id.to_string(),
            updated: true,
        })
    }
}

use super::entity::Card;
use super::errors::RemoteError;
use super::value_objects::{CardId, ImageFilename};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Fetch a card, `None` when the record service has no such card.
    async fn find_by_id(&self, card_id: &CardId) -> Result<Option<Card>, RemoteError>;

    /// Link an uploaded image to a card. `false` means the service answered
    /// but refused the update.
    async fn set_image_url(
        &self,
        card_id: &CardId,
        filename: &ImageFilename,
    ) -> Result<bool, RemoteError>;
}

use crate::domain::card::{
    entity::Card,
    errors::RemoteError,
    repository::CardRepository,
    value_objects::{CardId, ImageFilename},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

/// Card repository backed by the record service's REST API.
pub struct HttpCardRepository {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct ImagePatch<'a> {
    image_url: &'a str,
}

impl HttpCardRepository {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Client shared by every invocation of a warm function.
    pub fn default_client() -> reqwest::Result<Client> {
        Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    fn card_url(&self, card_id: &CardId) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::Transport(format!("invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(["cards", card_id.as_str()]);
        Ok(url)
    }
}

/// Flattens the reqwest error and its source chain into one message. The URL
/// is left out, it is already recorded on the span.
fn transport_error(err: reqwest::Error) -> RemoteError {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    RemoteError::Transport(message)
}

#[async_trait]
impl CardRepository for HttpCardRepository {
    #[instrument(skip_all, fields(card_id = %card_id))]
    async fn find_by_id(&self, card_id: &CardId) -> Result<Option<Card>, RemoteError> {
        let url = self.card_url(card_id)?;
        debug!(%url, "Retrieving card");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = %e, "Card lookup request failed");
            transport_error(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("Card not found");
            return Ok(None);
        }
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Unexpected status retrieving card");
            return Err(RemoteError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(transport_error)?;
        let document = serde_json::from_str::<Value>(&body).map_err(|e| {
            warn!(error = %e, body = %body, "Malformed card response");
            RemoteError::MalformedResponse(body.clone())
        })?;
        let card = Card::from_document(document);
        debug!(found = card.is_some(), "Card retrieved");
        Ok(card)
    }

    #[instrument(skip_all, fields(card_id = %card_id, filename = %filename))]
    async fn set_image_url(
        &self,
        card_id: &CardId,
        filename: &ImageFilename,
    ) -> Result<bool, RemoteError> {
        let url = self.card_url(card_id)?;
        debug!(%url, "Patching card record with image_url");

        let response = self
            .client
            .patch(url)
            .json(&ImagePatch {
                image_url: filename.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Card update request failed");
                transport_error(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Record service refused the image update");
            return Ok(false);
        }
        debug!("Card updated with image details");
        Ok(true)
    }
}

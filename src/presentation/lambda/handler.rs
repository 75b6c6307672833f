use crate::{
    application::upload_card_image::{
        dto::UploadCardImageRequest, errors::UploadError, use_case::UploadCardImageUseCase,
    },
    config::ConfigError,
    presentation::lambda::response::{FailureResponse, SuccessResponse, format_outcome},
};
use lambda_runtime::LambdaEvent;
use tracing::{error, info, instrument, warn};

/// Lambda entry point for card image uploads.
///
/// Built once per cold start. A function deployed without usable
/// configuration still starts, and answers every invocation with a 500
/// before touching any collaborator.
pub struct CardImageHandler {
    use_case: Result<UploadCardImageUseCase, ConfigError>,
}

impl CardImageHandler {
    pub fn new(use_case: UploadCardImageUseCase) -> Self {
        Self {
            use_case: Ok(use_case),
        }
    }

    pub fn misconfigured(err: ConfigError) -> Self {
        Self { use_case: Err(err) }
    }

    #[instrument(skip_all, fields(request_id = %event.context.request_id))]
    pub async fn handle(
        &self,
        event: LambdaEvent<UploadCardImageRequest>,
    ) -> Result<SuccessResponse, lambda_runtime::Error> {
        let (request, _context) = event.into_parts();
        Ok(self.process(request).await?)
    }

    /// Runs one upload and formats its outcome.
    pub async fn process(
        &self,
        request: UploadCardImageRequest,
    ) -> Result<SuccessResponse, FailureResponse> {
        info!(?request, "Upload request received");

        let outcome = match &self.use_case {
            Ok(use_case) => use_case.execute(request).await,
            Err(err) => Err(UploadError::Configuration(err.clone())),
        };
        let response = format_outcome(outcome);

        match &response {
            Ok(success) => info!(status = success.status_code, "Upload complete"),
            Err(failure) if failure.status_code >= 500 => {
                error!(status = failure.status_code, message = %failure.message, "Upload failed")
            }
            Err(failure) => {
                warn!(status = failure.status_code, message = %failure.message, "Upload rejected")
            }
        }
        response
    }
}

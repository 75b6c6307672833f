use cards::{
    application::upload_card_image::use_case::UploadCardImageUseCase,
    config::Config,
    infrastructure::{
        repositories::http_card_repository::HttpCardRepository,
        storage::s3_storage_service::S3StorageService,
    },
    presentation::lambda::handler::CardImageHandler,
};
use lambda_runtime::{run, service_fn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults.
    // CloudWatch stamps each line itself, so no timestamps or colours.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,cards=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .without_time()
        .init();

    let handler = match Config::from_env() {
        Ok(config) => CardImageHandler::new(build_use_case(&config).await?),
        Err(err) => {
            tracing::error!(error = %err, "Configuration invalid, every invocation will fail");
            CardImageHandler::misconfigured(err)
        }
    };

    tracing::info!("Card image upload function ready");
    run(service_fn(|event| handler.handle(event))).await
}

async fn build_use_case(config: &Config) -> anyhow::Result<UploadCardImageUseCase> {
    let cards = HttpCardRepository::new(
        HttpCardRepository::default_client()?,
        config.cognicity_url.clone(),
    );
    let storage = S3StorageService::from_config(config).await;
    tracing::info!(
        cognicity_url = %config.cognicity_url,
        bucket = storage.bucket(),
        "Upload pipeline configured"
    );
    Ok(UploadCardImageUseCase::new(Arc::new(cards), Arc::new(storage)))
}

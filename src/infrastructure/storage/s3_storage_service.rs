use super::traits::StorageService;
use crate::{
    config::Config,
    domain::card::{
        errors::StoreError,
        value_objects::{ImageContentType, ImageFilename},
    },
};
use async_trait::async_trait;
use aws_sdk_s3::{
    Client, config::BehaviorVersion, error::DisplayErrorContext, primitives::ByteStream,
};
use bytes::Bytes;
use tracing::{debug, error, instrument};

pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    /// Builds a client from the AWS default provider chain (Lambda role,
    /// `AWS_REGION`), honouring the optional custom endpoint settings.
    pub async fn from_config(config: &Config) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.s3_force_path_style);
        if let Some(endpoint) = &config.s3_endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(Client::from_conf(builder.build()), config.card_image_bucket.clone())
    }

    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    #[instrument(skip_all, fields(
        bucket = %self.bucket,
        key = %filename,
        content_type = %content_type,
        size = data.len()
    ))]
    async fn put(
        &self,
        filename: &ImageFilename,
        content_type: ImageContentType,
        data: Bytes,
    ) -> Result<(), StoreError> {
        debug!("Putting object");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(filename.as_str())
            .body(ByteStream::from(data))
            .content_type(content_type.as_mime())
            .send()
            .await
            .map_err(|e| {
                let cause = DisplayErrorContext(&e).to_string();
                error!(error = %cause, "S3 put_object failed");
                StoreError::new(filename.as_str(), cause)
            })?;
        debug!("Object stored");
        Ok(())
    }
}


use crate::domain::card::{
    errors::StoreError,
    value_objects::{ImageContentType, ImageFilename},
};
use async_trait::async_trait;
use bytes::Bytes;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Write `data` under `filename`, replacing any existing object.
    async fn put(
        &self,
        filename: &ImageFilename,
        content_type: ImageContentType,
        data: Bytes,
    ) -> Result<(), StoreError>;
}

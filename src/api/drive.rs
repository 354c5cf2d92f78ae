use crate::client::{Client, RequestOptions};
use crate::error::ApiResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Media download API methods
#[async_trait]
pub trait DriveApi {
    /// Download a media attachment by its file token, returning the raw
    /// bytes unmodified
    async fn get_resource_item(&self, file_token: &str) -> ApiResult<Bytes>;
}

#[async_trait]
impl DriveApi for Client {
    async fn get_resource_item(&self, file_token: &str) -> ApiResult<Bytes> {
        self.get_bytes(
            &format!("drive/v1/medias/{}/download", file_token),
            RequestOptions::new(),
        )
        .await
    }
}

use crate::client::{Client, RequestOptions};
use crate::error::{ApiError, ApiResult};
use crate::models::docx::{Block, BlockPage};
use async_trait::async_trait;

/// Hard cap on pages fetched by one [`DocxApi::get_page_blocks`] call; a
/// server that never reports `has_more = false` would otherwise keep the
/// loop alive forever.
const MAX_BLOCK_PAGES: usize = 1000;

/// Document block API methods
#[async_trait]
pub trait DocxApi {
    /// Fetch a single page of blocks for a document
    async fn list_blocks(&self, page_id: &str, page_token: Option<&str>) -> ApiResult<BlockPage>;

    /// Fetch all blocks of a document, following the pagination cursor
    /// until the server reports no further pages. Items keep the server's
    /// order, earlier pages first. Any request failure aborts the whole
    /// call; nothing partial is returned.
    async fn get_page_blocks(
        &self,
        page_id: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Vec<Block>>;
}

#[async_trait]
impl DocxApi for Client {
    async fn list_blocks(&self, page_id: &str, page_token: Option<&str>) -> ApiResult<BlockPage> {
        let query = match page_token {
            Some(token) => format!("?page_token={}", urlencoding::encode(token)),
            None => String::new(),
        };

        self.get(
            &format!("docx/v1/documents/{}/blocks{}", page_id, query),
            RequestOptions::new(),
        )
        .await
    }

    async fn get_page_blocks(
        &self,
        page_id: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut cursor = page_token.map(str::to_owned);

        for _ in 0..MAX_BLOCK_PAGES {
            let page = self.list_blocks(page_id, cursor.as_deref()).await?;
            blocks.extend(page.items);

            if !page.has_more {
                return Ok(blocks);
            }

            match page.page_token {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                Some(next) => {
                    return Err(ApiError::Pagination(format!(
                        "server repeated page cursor {:?} for document {}",
                        next, page_id
                    )));
                }
                None => {
                    return Err(ApiError::Pagination(format!(
                        "server reported more pages without a cursor for document {}",
                        page_id
                    )));
                }
            }
        }

        Err(ApiError::Pagination(format!(
            "document {} exceeded {} pages",
            page_id, MAX_BLOCK_PAGES
        )))
    }
}

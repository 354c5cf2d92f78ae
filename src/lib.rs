//! # Feishu API Client
//!
//! A small Rust client for the Feishu (Lark) open API covering document
//! content and media download.
//!
//! ## Features
//!
//! - One-time tenant access token acquisition shared by all callers
//! - Cursor pagination over document blocks with loop guards
//! - Typed response-envelope unwrapping at the transport boundary
//! - Raw binary download of media attachments
//!
//! ## Example
//!
//! ```no_run
//! use feishu_api::api::{DocxApi, DriveApi};
//! use feishu_api::{Client, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("cli_xxx", "yyy");
//!     let client = Client::new(config)?;
//!
//!     // Fetch every block of a document, following pagination
//!     let blocks = client.get_page_blocks("doxcnXXXX", None).await?;
//!     println!("document has {} blocks", blocks.len());
//!
//!     // Download an image block's attachment
//!     let bytes = client.get_resource_item("boxbcXXXX").await?;
//!     println!("downloaded {} bytes", bytes.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use client::{Client, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};

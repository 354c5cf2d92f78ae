pub mod auth;
pub mod docx;

// Re-export for convenience
pub use auth::TokenResponse;
pub use docx::{Block, BlockPage};

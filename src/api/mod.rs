pub mod docx;
pub mod drive;

// Re-export for convenience
pub use docx::DocxApi;
pub use drive::DriveApi;

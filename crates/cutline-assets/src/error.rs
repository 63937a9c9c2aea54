//! Error types for asset generation.

use thiserror::Error;

/// Errors that can occur while generating assets.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssetError {
    /// The prompt was empty or whitespace.
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Another generation is still in flight for this pool.
    #[error("A generation is already in progress")]
    Busy,

    /// The generator backend failed.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The response carried no image part.
    #[error("No image generated found in response")]
    NoImage,

    /// The generation task was dropped before finishing.
    #[error("Generation task aborted")]
    Aborted,
}

/// Result type alias for asset operations.
pub type AssetResult<T> = std::result::Result<T, AssetError>;

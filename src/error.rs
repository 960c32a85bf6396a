use thiserror::Error;

/// Unified error type for pages-publish operations
#[derive(Error, Debug)]
pub enum PagesPublishError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source directory error: {0}")]
    Source(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Hook error: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pages-publish
pub type Result<T> = std::result::Result<T, PagesPublishError>;

impl PagesPublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PagesPublishError::Config(msg.into())
    }

    /// Create a source directory error with context
    pub fn source(msg: impl Into<String>) -> Self {
        PagesPublishError::Source(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        PagesPublishError::Remote(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        PagesPublishError::Hook(msg.into())
    }
}

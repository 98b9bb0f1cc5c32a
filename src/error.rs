//! Error types for the gallery renderer

use thiserror::Error;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a gallery page
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to retrieve or parse the artwork collection.
    ///
    /// This is the only kind `render_site` recovers from; it is turned into
    /// the user-visible fallback message.
    #[error("Failed to load artworks: {0}")]
    LoadError(String),

    /// Failed to initialize the HTTP client
    #[error("Loader initialization failed: {0}")]
    InitializationError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The host page could not be read
    #[error("Host page error: {0}")]
    PageError(String),

    /// Output could not be written
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error falls inside the page-load error boundary
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::LoadError(_))
    }
}

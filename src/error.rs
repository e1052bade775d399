//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Streaming session error (login, token, audio key)
    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),

    /// Catalog API error
    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Audio fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::fetch::FetchError),

    /// Audio conversion error
    #[error("Conversion error: {0}")]
    Convert(#[from] crate::convert::ConvertError),

    /// Tag writing error
    #[error("Tagging error for {path}: {message}")]
    Tagging { path: PathBuf, message: String },

    /// Identifier did not match any known link pattern
    #[error("'{0}' does not match any track, album, playlist or episode link")]
    UnrecognizedLink(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a tagging error.
    pub fn tagging(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Tagging {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_link_display() {
        let err = Error::UnrecognizedLink("https://example.com/nope".to_string());
        assert!(err.to_string().contains("https://example.com/nope"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::config("missing output root").context("while loading settings");
        let msg = err.to_string();
        assert!(msg.contains("while loading settings"));
        assert!(msg.contains("missing output root"));
    }

    #[test]
    fn test_tagging_error() {
        let err = Error::tagging("/music/song.mp3", "unsupported container");
        let msg = err.to_string();
        assert!(msg.contains("song.mp3"));
        assert!(msg.contains("unsupported container"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::config("test"));
        let with_ctx = result.with_context("additional context");
        assert!(
            with_ctx
                .unwrap_err()
                .to_string()
                .contains("additional context")
        );
    }
}

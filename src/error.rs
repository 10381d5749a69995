//! Error handling for the StreamVis-RS crate
//!
//! This module defines the crate error type and a Result alias. The
//! animation itself never surfaces errors to the host; these are used by
//! configuration loading and by host adapters that need to report why a
//! surface could not be acquired.

use thiserror::Error;

/// Main error type for StreamVis-RS operations
#[derive(Error, Debug)]
pub enum StreamVisError {
    /// The host could not provide a drawing context
    #[error("Drawing context unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Errors related to configuration loading/saving/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<StreamVisError>,
    },
}

impl StreamVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        StreamVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for StreamVisError {
    fn from(err: serde_json::Error) -> Self {
        StreamVisError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for StreamVisError {
    fn from(err: toml::de::Error) -> Self {
        StreamVisError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for StreamVisError {
    fn from(err: toml::ser::Error) -> Self {
        StreamVisError::Serialization(err.to_string())
    }
}

/// Result type alias for StreamVis-RS operations
pub type Result<T> = std::result::Result<T, StreamVisError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamVisError::Config("palette must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: palette must not be empty"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = StreamVisError::Serialization("bad json".to_string());
        let with_ctx = err.with_context("Failed to load background config");
        assert!(with_ctx
            .to_string()
            .contains("Failed to load background config"));
    }

    #[test]
    fn test_result_ext_lazy_context() {
        let res: Result<()> = Err(StreamVisError::SurfaceUnavailable("headless".into()));
        let err = res.with_context(|| "mount".to_string()).unwrap_err();
        assert!(err.to_string().starts_with("mount: "));
        assert!(err.to_string().contains("headless"));
    }
}

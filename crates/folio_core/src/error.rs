//! # Folio Error Types
//!
//! Errors raised at the fallible seams of the page: configuration parsing,
//! preference storage and element lookup. None of them ever reach the
//! visitor. Callers log them and keep the page working with defaults.

use thiserror::Error;

/// Errors that can occur while wiring or running page behavior.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// A configuration value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    /// The preference store refused a read or a write.
    #[error("preference storage unavailable: {0}")]
    Storage(String),

    /// A persisted theme value is neither `light` nor `dark`.
    #[error("unknown theme value: {0:?}")]
    UnknownTheme(String),

    /// A required element is not present on the page.
    #[error("element not found: {0}")]
    MissingElement(String),
}

/// Result type for folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.message().to_owned())
    }
}

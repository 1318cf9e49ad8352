//! Error types for the lore site tooling
//!
//! The browser side never surfaces these: a missing anchor or a bad index
//! simply leaves a feature inert. They exist for strict parsing, config
//! loading and the CLI.

use thiserror::Error;

/// Main error type for lore site operations
#[derive(Error, Debug)]
pub enum SiteError {
    /// Page tag is not one of the known navigation pages
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Config or template JSON could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Config parsed but holds values the controller cannot use
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Page file has no header placeholder to replace
    #[error("Header placeholder not found: {0}")]
    MissingPlaceholder(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using SiteError
pub type SiteResult<T> = Result<T, SiteError>;

//! Error types for srslist.

use thiserror::Error;

/// Error type for srslist operations.
///
/// The record decoder itself never fails; every variant here belongs to
/// the fetch/extract/write collaborators around it.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failure
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Corrupt or unreadable zip archive
    #[error("zip archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Requested member is absent from the archive
    #[error("archive member not found: {member}")]
    MemberNotFound {
        member: String,
        /// Archive members with a similar file name, for diagnostics
        similar: Vec<String>,
    },

    /// Named asset is absent from the release
    #[error("release asset not found: {0}")]
    AssetNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for srslist operations.
pub type Result<T> = std::result::Result<T, Error>;

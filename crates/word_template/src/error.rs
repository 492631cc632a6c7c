//! Error types for template operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening or writing a template package
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The container could not be opened (missing, corrupt, not a zip archive)
    #[error("Could not open file \"{}\": {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A package given as a reader could not be opened as a zip archive
    #[error("Could not open package: {0}")]
    PackageOpen(#[source] zip::result::ZipError),

    /// IO error while writing the output package
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error while copying or writing entries
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl TemplateError {
    pub(crate) fn file_open(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        TemplateError::FileOpen {
            path: path.into(),
            source,
        }
    }
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all vodprep-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required external tool '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("'{tool}' exited with status {code}")]
    CommandFailed { tool: String, code: i32 },

    #[error("Unparsable output from '{tool}': {output:?}")]
    ToolOutput { tool: String, output: String },

    #[error("Expected output file not found: {0}")]
    OutputMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("No processable files found")]
    NoFilesFound,
}

/// Result type for vodprep-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

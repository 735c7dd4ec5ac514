//! Error types for rebound.

use thiserror::Error;

/// Main error type for rebound operations.
#[derive(Error, Debug)]
pub enum ReboundError {
    /// The child process could not be created.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed. This indicates a lifecycle bug.
    #[error("failed to wait on child process: {0}")]
    Wait(#[source] std::io::Error),

    /// A command was built from an empty argument list.
    #[error("no program given to run")]
    EmptyCommand,

    /// A relay task panicked before finishing.
    #[error("relay task panicked: {0}")]
    TaskPanicked(&'static str),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Search backend failure.
    #[error("search failed: {0}")]
    Search(String),

    /// Command-line arguments were rejected.
    #[error("{0}")]
    Args(#[from] crate::cli::ArgsError),
}

impl ReboundError {
    /// Whether this error means the target could not be started at all.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, Self::Launch { .. })
    }
}

/// Convenience Result type for rebound operations.
pub type Result<T> = std::result::Result<T, ReboundError>;

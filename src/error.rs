//! Error types shared by the filter, loader and output stages.

use std::fmt;

/// Result type alias for bikeshare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Filter dimension a token was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Sources,
    Months,
    Weekdays,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Sources => "sources",
            Dimension::Months => "months",
            Dimension::Weekdays => "weekdays",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A filter token set was empty or contained an unknown token
    #[error("invalid {dimension} filter: {reason}")]
    InvalidToken { dimension: Dimension, reason: String },

    /// A selected source could not produce records
    #[error("failed to read records for {source_name}: {message}")]
    DataSource {
        source_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file or environment value was unusable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Writing rendered or exported output failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid token error for an unknown token
    pub fn invalid_token(dimension: Dimension, token: impl Into<String>) -> Self {
        Self::InvalidToken {
            dimension,
            reason: format!("unknown token '{}'", token.into()),
        }
    }

    /// Create an invalid token error for an empty selection
    pub fn empty_selection(dimension: Dimension) -> Self {
        Self::InvalidToken {
            dimension,
            reason: "no tokens given".to_string(),
        }
    }

    /// Create a data source error wrapping the collaborator's failure
    pub fn data_source(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataSource {
            source_name: source_name.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a data source error without an underlying cause
    pub fn data_source_msg(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_name: source_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Returns `true` for errors the interactive caller should re-prompt on.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Error::InvalidToken { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

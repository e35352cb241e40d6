//! Error taxonomy for backend calls.

use std::path::PathBuf;

use thiserror::Error;

/// Which backend interaction an error came from. Selects the fallback
/// message shown when the server or transport gives nothing better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Analyze,
    Download,
    SaveFile,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Download => "download",
            Self::SaveFile => "save_file",
        }
    }

    pub fn remote_fallback(self) -> &'static str {
        match self {
            Self::Analyze => "Failed to analyze video",
            Self::Download => "Download failed",
            Self::SaveFile => "File not found",
        }
    }

    pub fn network_fallback(self) -> &'static str {
        match self {
            Self::Analyze => "An error occurred. Please try again.",
            Self::Download => "Download failed. Please try again.",
            Self::SaveFile => "Could not retrieve the file. Please try again.",
        }
    }
}

/// The `Display` output of every variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn network(operation: Operation, source: reqwest::Error) -> Self {
        Self::Network {
            message: operation.network_fallback().to_string(),
            source: Some(source),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

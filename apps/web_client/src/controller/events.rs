//! Backend-to-UI events and error modeling for the controller.

use std::path::PathBuf;

use client_core::ClientError;
use shared::protocol::VideoInfo;
use url::Url;

#[derive(Debug)]
pub enum UiEvent {
    AnalyzeFinished {
        generation: u64,
        url: Url,
        result: Result<VideoInfo, ClientError>,
    },
    DownloadFinished {
        generation: u64,
        result: Result<String, ClientError>,
    },
    FileSaved {
        path: PathBuf,
    },
    FileSaveFailed(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Remote,
    Transport,
    Internal,
}

impl UiErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Remote => "remote",
            Self::Transport => "transport",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Analyze,
    Download,
    SaveFile,
    General,
}

impl UiErrorContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Download => "download",
            Self::SaveFile => "save_file",
            Self::General => "general",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Validation { .. } => UiErrorCategory::Validation,
            ClientError::Remote { .. } => UiErrorCategory::Remote,
            ClientError::Network { .. } => UiErrorCategory::Transport,
            ClientError::Io { .. } => UiErrorCategory::Internal,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn internal(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Internal,
            context,
            message: message.into(),
        }
    }

    /// Transport and internal failures may succeed if the user retries as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category,
            UiErrorCategory::Transport | UiErrorCategory::Internal
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

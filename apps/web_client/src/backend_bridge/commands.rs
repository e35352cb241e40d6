//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

use shared::domain::FormatId;
use url::Url;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Analyze {
        generation: u64,
        url: Url,
    },
    Download {
        generation: u64,
        url: Url,
        format_id: FormatId,
    },
    SaveFile {
        filename: String,
        dest_dir: PathBuf,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analyze { .. } => "analyze",
            Self::Download { .. } => "download",
            Self::SaveFile { .. } => "save_file",
        }
    }
}

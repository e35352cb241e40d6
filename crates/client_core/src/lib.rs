use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::FormatId,
    error::ErrorBody,
    protocol::{
        download_file_path, AnalyzeRequest, DownloadRequest, DownloadResponse, VideoInfo,
        ANALYZE_PATH, DOWNLOAD_PATH,
    },
};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;
pub mod validation;

pub use error::{ClientError, Operation};
pub use validation::validate_video_url;

const MISSING_FILENAME_MESSAGE: &str = "Download failed - file not found";

/// The three backend interactions the client depends on.
#[async_trait]
pub trait VideoBackend: Send + Sync {
    async fn analyze(&self, url: &Url) -> Result<VideoInfo, ClientError>;

    /// Asks the backend to produce the file; returns the name to fetch it by.
    async fn request_download(&self, url: &Url, format_id: &FormatId)
        -> Result<String, ClientError>;

    /// Retrieves a produced file into `dest_dir` and returns where it landed.
    async fn save_file(&self, filename: &str, dest_dir: &Path) -> Result<PathBuf, ClientError>;
}

pub struct VideoApiClient {
    http: Client,
    server_url: String,
}

impl VideoApiClient {
    pub fn new(server_url: impl Into<String>, request_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        let server_url = server_url.into().trim().trim_end_matches('/').to_string();
        Ok(Self { http, server_url })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

#[async_trait]
impl VideoBackend for VideoApiClient {
    async fn analyze(&self, url: &Url) -> Result<VideoInfo, ClientError> {
        debug!(url = %url, "requesting video analysis");
        let response = self
            .http
            .post(self.endpoint(ANALYZE_PATH))
            .json(&AnalyzeRequest {
                url: url.to_string(),
            })
            .send()
            .await
            .map_err(|err| ClientError::network(Operation::Analyze, err))?;
        let info: VideoInfo = read_json(response, Operation::Analyze).await?;
        info!(
            title = info.title.as_deref().unwrap_or_default(),
            formats = info.formats.len(),
            "video analyzed"
        );
        Ok(info)
    }

    async fn request_download(
        &self,
        url: &Url,
        format_id: &FormatId,
    ) -> Result<String, ClientError> {
        debug!(url = %url, format_id = %format_id, "requesting download");
        let response = self
            .http
            .post(self.endpoint(DOWNLOAD_PATH))
            .json(&DownloadRequest {
                url: url.to_string(),
                format_id: format_id.clone(),
            })
            .send()
            .await
            .map_err(|err| ClientError::network(Operation::Download, err))?;
        let status = response.status().as_u16();
        let body: DownloadResponse = read_json(response, Operation::Download).await?;
        match body.filename.filter(|name| !name.trim().is_empty()) {
            Some(filename) => {
                info!(filename = %filename, "download prepared by backend");
                Ok(filename)
            }
            None => {
                warn!(status, "download response carried no filename");
                Err(ClientError::remote(status, MISSING_FILENAME_MESSAGE))
            }
        }
    }

    async fn save_file(&self, filename: &str, dest_dir: &Path) -> Result<PathBuf, ClientError> {
        let local_name = Path::new(filename)
            .file_name()
            .ok_or_else(|| ClientError::validation(format!("invalid file name '{filename}'")))?;
        let dest = dest_dir.join(local_name);

        let mut response = self
            .http
            .get(self.endpoint(&download_file_path(filename)))
            .send()
            .await
            .map_err(|err| ClientError::network(Operation::SaveFile, err))?;
        if !response.status().is_success() {
            return Err(remote_error(response, Operation::SaveFile).await);
        }

        fs::create_dir_all(dest_dir)
            .await
            .map_err(|source| ClientError::Io {
                path: dest_dir.to_path_buf(),
                source,
            })?;
        let mut file = fs::File::create(&dest)
            .await
            .map_err(|source| ClientError::Io {
                path: dest.clone(),
                source,
            })?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| ClientError::network(Operation::SaveFile, err))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|source| ClientError::Io {
                    path: dest.clone(),
                    source,
                })?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|source| ClientError::Io {
            path: dest.clone(),
            source,
        })?;

        info!(path = %dest.display(), bytes = written, "file saved");
        Ok(dest)
    }
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    operation: Operation,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(remote_error(response, operation).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ClientError::network(operation, err))
}

async fn remote_error(response: Response, operation: Operation) -> ClientError {
    let status = response.status().as_u16();
    let body = response.bytes().await.unwrap_or_default();
    let message = ErrorBody::from_slice(&body).message_or(operation.remote_fallback());
    warn!(
        operation = operation.name(),
        status,
        error = %message,
        "backend rejected request"
    );
    ClientError::remote(status, message)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

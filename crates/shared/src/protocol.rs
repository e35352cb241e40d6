use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{FormatId, Platform};

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const DOWNLOAD_PATH: &str = "/api/download";
pub const DOWNLOAD_FILE_PREFIX: &str = "/api/download-file/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub format_id: FormatId,
}

/// Metadata returned by a successful analyze call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: Vec<Format>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub format_id: FormatId,
    #[serde(default = "default_ext")]
    pub ext: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "lenient_byte_count")]
    pub filesize: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quality: f64,
}

impl Format {
    /// Entry offered when the backend reports no formats at all.
    pub fn best_available() -> Self {
        Self {
            format_id: FormatId::best(),
            ext: "mp4".to_string(),
            resolution: Some("Best available".to_string()),
            filesize: None,
            quality: 0.0,
        }
    }

    /// Size in bytes if the backend knows it. Zero means unknown.
    pub fn known_size(&self) -> Option<u64> {
        self.filesize.filter(|size| *size > 0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadResponse {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Path the browser navigates to in order to fetch a produced file.
pub fn download_file_path(filename: &str) -> String {
    format!("{DOWNLOAD_FILE_PREFIX}{}", urlencoding::encode(filename))
}

fn default_ext() -> String {
    "mp4".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

// Some extractors report approximate sizes as floats.
fn lenient_byte_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(value.and_then(|n| {
        n.as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    }))
}

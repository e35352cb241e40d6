use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::controller::{timers::Timings, ControllerOptions};

pub const DEFAULT_CONFIG_FILE: &str = "web_client.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid server url '{0}'")]
    InvalidServerUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub save_dir: PathBuf,
    pub request_timeout_secs: Option<u64>,
    pub error_dismiss_ms: u64,
    pub success_dismiss_ms: u64,
    pub close_delay_ms: u64,
    pub sections: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            save_dir: PathBuf::from("downloads"),
            request_timeout_secs: None,
            error_dismiss_ms: 5000,
            success_dismiss_ms: 3000,
            close_delay_ms: 1500,
            sections: vec![
                "features".into(),
                "platforms".into(),
                "how-it-works".into(),
            ],
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn timings(&self) -> Timings {
        Timings {
            error_dismiss: Duration::from_millis(self.error_dismiss_ms),
            success_dismiss: Duration::from_millis(self.success_dismiss_ms),
            close_after_download: Duration::from_millis(self.close_delay_ms),
        }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            timings: self.timings(),
            save_dir: self.save_dir.clone(),
            sections: self.sections.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        match Url::parse(&self.server_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
            _ => Err(SettingsError::InvalidServerUrl(self.server_url.clone())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    server_url: Option<String>,
    save_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    error_dismiss_ms: Option<u64>,
    success_dismiss_ms: Option<u64>,
    close_delay_ms: Option<u64>,
    sections: Option<Vec<String>>,
}

/// Defaults, then the config file, then environment overrides. An explicit
/// `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw, &path)?,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => return Err(SettingsError::Read { path, source }),
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str, path: &Path) -> Result<(), SettingsError> {
    let file: FileSettings = toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(v) = file.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file.save_dir {
        settings.save_dir = v;
    }
    if file.request_timeout_secs.is_some() {
        settings.request_timeout_secs = file.request_timeout_secs;
    }
    if let Some(v) = file.error_dismiss_ms {
        settings.error_dismiss_ms = v;
    }
    if let Some(v) = file.success_dismiss_ms {
        settings.success_dismiss_ms = v;
    }
    if let Some(v) = file.close_delay_ms {
        settings.close_delay_ms = v;
    }
    if let Some(v) = file.sections {
        settings.sections = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__SAVE_DIR") {
        settings.save_dir = PathBuf::from(v);
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => tracing::warn!(value = %v, "ignoring unparseable APP__REQUEST_TIMEOUT_SECS"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

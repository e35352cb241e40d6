use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one downloadable format, as assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatId(pub String);

impl FormatId {
    pub const BEST: &'static str = "best";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn best() -> Self {
        Self(Self::BEST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormatId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    Linkedin,
    Twitter,
    Instagram,
    #[serde(other)]
    Unknown,
}

impl Platform {
    /// Looks a platform up by the key used on logos and in backend payloads.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "youtube" => Self::Youtube,
            "linkedin" => Self::Linkedin,
            "twitter" | "x" => Self::Twitter,
            "instagram" => Self::Instagram,
            _ => Self::Unknown,
        }
    }

    /// Classifies a URL host. Matches the platform's domains and their
    /// subdomains only, so `dropbox.com` is not taken for `x.com`.
    pub fn from_host(host: &str) -> Self {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let is_domain = |domain: &str| {
            host == domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        };

        if is_domain("youtube.com") || is_domain("youtu.be") {
            Self::Youtube
        } else if is_domain("linkedin.com") {
            Self::Linkedin
        } else if is_domain("twitter.com") || is_domain("x.com") {
            Self::Twitter
        } else if is_domain("instagram.com") {
            Self::Instagram
        } else {
            Self::Unknown
        }
    }

    pub fn display_name(self) -> Option<&'static str> {
        match self {
            Self::Youtube => Some("YouTube"),
            Self::Linkedin => Some("LinkedIn"),
            Self::Twitter => Some("X (Twitter)"),
            Self::Instagram => Some("Instagram"),
            Self::Unknown => None,
        }
    }

    /// Hint shown in the URL input after the platform's logo is clicked.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Youtube => "Paste YouTube video link here...",
            Self::Linkedin => "Paste LinkedIn video link here...",
            Self::Twitter => "Paste X (Twitter) video link here...",
            Self::Instagram => "Paste Instagram video link here...",
            Self::Unknown => "Paste video link here...",
        }
    }
}

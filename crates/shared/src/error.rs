use serde::{Deserialize, Serialize};

/// Body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Server-supplied message, or `fallback` when the body carried none.
    pub fn message_or(self, fallback: &str) -> String {
        self.error
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Parses an error body leniently; anything unparseable counts as empty.
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

//! Client state owned by the controller.

use shared::{domain::FormatId, protocol::VideoInfo};
use url::Url;

/// A VideoInfo together with the URL it was analyzed from; downloads are
/// requested for that URL, not for whatever the input holds later.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedVideo {
    pub source_url: Url,
    pub info: VideoInfo,
}

#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub current: Option<LoadedVideo>,
    pub selected_format: Option<FormatId>,
    /// Bumped when an analyze starts and when the dialog closes. Responses and
    /// deferred actions issued under an older generation are dropped.
    pub generation: u64,
    pub analyze_pending: Option<u64>,
    pub download_pending: Option<u64>,
}

impl ClientState {
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn can_confirm(&self) -> bool {
        self.current.is_some()
            && self.selected_format.is_some()
            && self.analyze_pending.is_none()
            && self.download_pending.is_none()
    }

    pub fn clear_video(&mut self) {
        self.current = None;
        self.selected_format = None;
    }
}

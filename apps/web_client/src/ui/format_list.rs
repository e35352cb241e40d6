//! Selectable format entries shown in the download dialog.

use shared::{
    domain::{FormatId, Platform},
    protocol::{Format, VideoInfo},
};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
const DEFAULT_LABEL: &str = "Best Quality";

#[derive(Debug, Clone, PartialEq)]
pub struct FormatEntry {
    pub format_id: FormatId,
    pub label: String,
    pub details: String,
    pub selected: bool,
}

impl FormatEntry {
    pub fn describe(format: &Format) -> Self {
        let ext = format.ext.to_uppercase();
        let details = match format.known_size() {
            Some(bytes) => format!("{ext} {}", size_label(bytes)),
            None => ext,
        };

        Self {
            format_id: format.format_id.clone(),
            label: format
                .resolution
                .clone()
                .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            details,
            selected: false,
        }
    }
}

/// One entry per format in backend order, or the synthetic "best" entry
/// when the backend offered nothing.
pub fn entries_for(info: &VideoInfo) -> Vec<FormatEntry> {
    if info.formats.is_empty() {
        return vec![FormatEntry::describe(&Format::best_available())];
    }
    info.formats.iter().map(FormatEntry::describe).collect()
}

/// Dialog header line: platform name and running time, whichever are known.
pub fn subtitle_for(info: &VideoInfo) -> Option<String> {
    let parts: Vec<String> = [
        info.platform
            .and_then(Platform::display_name)
            .map(str::to_string),
        info.duration.and_then(duration_label),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" · "))
}

/// `61.0` renders as `1:01`, `3725.0` as `1:02:05`.
pub fn duration_label(secs: f64) -> Option<String> {
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    let total = secs.round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    Some(if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    })
}

/// `5242880` renders as `(5.00 MB)`.
pub fn size_label(bytes: u64) -> String {
    format!("({:.2} MB)", bytes as f64 / BYTES_PER_MIB)
}

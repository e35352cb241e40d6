//! Headless view model of the page. Everything a user could observe lives
//! here; the controller is the only writer.

use std::fmt::Write as _;

use shared::domain::Platform;

use super::format_list::FormatEntry;

pub const DEFAULT_DIALOG_TITLE: &str = "Select Format";
pub const CONFIRM_LABEL: &str = "Download Selected";
pub const CONFIRM_BUSY_LABEL: &str = "Downloading...";

#[derive(Debug, Clone, PartialEq)]
pub struct UrlInputView {
    pub value: String,
    pub placeholder: String,
    pub focused: bool,
}

impl Default for UrlInputView {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: Platform::Unknown.placeholder().to_string(),
            focused: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeButtonView {
    pub enabled: bool,
    pub loading: bool,
}

impl Default for AnalyzeButtonView {
    fn default() -> Self {
        Self {
            enabled: true,
            loading: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmButtonView {
    pub enabled: bool,
    pub busy: bool,
}

impl ConfirmButtonView {
    pub fn label(&self) -> &'static str {
        if self.busy {
            CONFIRM_BUSY_LABEL
        } else {
            CONFIRM_LABEL
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Preview {
    Thumbnail(String),
    #[default]
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogView {
    pub open: bool,
    pub title: String,
    pub subtitle: Option<String>,
    pub preview: Preview,
    pub entries: Vec<FormatEntry>,
    pub confirm: ConfirmButtonView,
}

impl Default for DialogView {
    fn default() -> Self {
        Self {
            open: false,
            title: DEFAULT_DIALOG_TITLE.to_string(),
            subtitle: None,
            preview: Preview::Placeholder,
            entries: Vec::new(),
            confirm: ConfirmButtonView::default(),
        }
    }
}

impl DialogView {
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.selected).count()
    }

    pub fn selected_entry(&self) -> Option<&FormatEntry> {
        self.entries.iter().find(|entry| entry.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: String,
    pub smooth: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub url_input: UrlInputView,
    pub analyze_button: AnalyzeButtonView,
    pub error_banner: Option<String>,
    pub notices: Vec<Notice>,
    pub dialog: DialogView,
    pub scroll_locked: bool,
    pub location: Option<String>,
    pub scroll_request: Option<ScrollRequest>,
    pub sections: Vec<String>,
}

impl PageView {
    pub fn new(sections: Vec<String>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.analyze_button.enabled = !loading;
        self.analyze_button.loading = loading;
    }

    pub fn open_dialog(
        &mut self,
        title: String,
        subtitle: Option<String>,
        preview: Preview,
        entries: Vec<FormatEntry>,
    ) {
        self.dialog.title = title;
        self.dialog.subtitle = subtitle;
        self.dialog.preview = preview;
        self.dialog.entries = entries;
        self.dialog.confirm = ConfirmButtonView::default();
        self.dialog.open = true;
        self.scroll_locked = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog.open = false;
        self.dialog.confirm = ConfirmButtonView::default();
        self.scroll_locked = false;
    }

    /// Marks exactly one entry. Returns false if the index is out of range.
    pub fn mark_selected(&mut self, index: usize) -> bool {
        if index >= self.dialog.entries.len() {
            return false;
        }
        for (i, entry) in self.dialog.entries.iter_mut().enumerate() {
            entry.selected = i == index;
        }
        true
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections.iter().any(|section| section == id)
    }

    /// Plain-text rendering used by the terminal driver.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let input = if self.url_input.value.is_empty() {
            format!("<{}>", self.url_input.placeholder)
        } else {
            self.url_input.value.clone()
        };
        let _ = writeln!(out, "URL: {input}");
        if self.analyze_button.loading {
            let _ = writeln!(out, "  analyzing...");
        }
        if let Some(error) = &self.error_banner {
            let _ = writeln!(out, "! {error}");
        }
        for notice in &self.notices {
            let _ = writeln!(out, "+ {}", notice.text);
        }
        if self.dialog.open {
            let _ = writeln!(out, "== {} ==", self.dialog.title);
            if let Some(subtitle) = &self.dialog.subtitle {
                let _ = writeln!(out, "  {subtitle}");
            }
            if let Preview::Thumbnail(src) = &self.dialog.preview {
                let _ = writeln!(out, "  thumbnail: {src}");
            }
            for (i, entry) in self.dialog.entries.iter().enumerate() {
                let mark = if entry.selected { '*' } else { ' ' };
                let _ = writeln!(
                    out,
                    " {mark}[{}] {} {}",
                    i + 1,
                    entry.label,
                    entry.details
                );
            }
            let state = if self.dialog.confirm.enabled {
                ""
            } else {
                " (disabled)"
            };
            let _ = writeln!(out, "  [{}]{state}", self.dialog.confirm.label());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::FormatId;

    fn entry(id: &str) -> FormatEntry {
        FormatEntry {
            format_id: FormatId::new(id),
            label: format!("label-{id}"),
            details: "MP4".to_string(),
            selected: false,
        }
    }

    #[test]
    fn fresh_page_shows_generic_placeholder() {
        let page = PageView::new(vec!["features".to_string()]);
        assert_eq!(page.url_input.placeholder, "Paste video link here...");
        assert!(page.analyze_button.enabled);
        assert!(!page.dialog.open);
        assert!(page.has_section("features"));
        assert!(!page.has_section("pricing"));
    }

    #[test]
    fn rendering_marks_selection_and_disabled_confirm() {
        let mut page = PageView::default();
        page.open_dialog(
            "Clip".to_string(),
            Some("YouTube · 1:01".to_string()),
            Preview::Placeholder,
            vec![entry("18"), entry("22")],
        );
        assert!(page.mark_selected(1));
        assert!(!page.mark_selected(2));

        let text = page.render_text();
        assert!(text.contains("== Clip ==\n  YouTube · 1:01\n"));
        assert!(text.contains(" *[2] label-22 MP4"));
        assert!(text.contains("  [1] label-18 MP4"));
        assert!(text.contains("[Download Selected] (disabled)"));
    }

    #[test]
    fn closing_restores_scroll_and_confirm_label() {
        let mut page = PageView::default();
        page.open_dialog(
            "Clip".to_string(),
            None,
            Preview::Placeholder,
            vec![entry("18")],
        );
        page.dialog.confirm.busy = true;
        assert!(page.scroll_locked);

        page.close_dialog();
        assert!(!page.scroll_locked);
        assert_eq!(page.dialog.confirm.label(), CONFIRM_LABEL);
    }
}

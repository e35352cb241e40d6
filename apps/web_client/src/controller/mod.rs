//! Controller layer: client state, event routing, and command orchestration.

pub mod bindings;
pub mod events;
pub mod orchestration;
pub mod state;
pub mod timers;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use client_core::{validate_video_url, ClientError};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use shared::{
    domain::Platform,
    protocol::{download_file_path, VideoInfo},
};
use tracing::{debug, info, warn};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::ui::{
    format_list,
    page::{Notice, ScrollRequest, DEFAULT_DIALOG_TITLE},
    PageView, Preview,
};
use bindings::{DomEvent, Element, EventTable, Handler, Key};
use events::{UiError, UiErrorContext, UiEvent};
use orchestration::dispatch_backend_command;
use state::{ClientState, LoadedVideo};
use timers::{Deferred, TimerQueue, Timings};

pub const DOWNLOAD_STARTED_MESSAGE: &str = "Download started! Your video will be saved shortly.";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub timings: Timings,
    pub save_dir: PathBuf,
    pub sections: Vec<String>,
}

/// A browser navigation the page asked for. Download-file navigations carry
/// the filename so the driver can retrieve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub filename: String,
}

pub struct Controller {
    state: ClientState,
    page: PageView,
    table: EventTable,
    timers: TimerQueue,
    timings: Timings,
    save_dir: PathBuf,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    error_serial: u64,
    next_notice_id: u64,
    pending_navigation: Option<Navigation>,
}

impl Controller {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            state: ClientState::default(),
            page: PageView::new(options.sections),
            table: EventTable::standard(),
            timers: TimerQueue::default(),
            timings: options.timings,
            save_dir: options.save_dir,
            cmd_tx,
            ui_rx,
            error_serial: 0,
            next_notice_id: 0,
            pending_navigation: None,
        }
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn event_table(&self) -> &EventTable {
        &self.table
    }

    pub fn event_table_mut(&mut self) -> &mut EventTable {
        &mut self.table
    }

    pub fn backend_events(&self) -> &Receiver<UiEvent> {
        &self.ui_rx
    }

    /// True while a request is in flight or a deferred action is scheduled.
    pub fn is_busy(&self) -> bool {
        self.state.analyze_pending.is_some()
            || self.state.download_pending.is_some()
            || !self.timers.is_empty()
    }

    pub fn set_url_input(&mut self, value: impl Into<String>) {
        self.page.url_input.value = value.into();
    }

    pub fn dispatch(&mut self, event: DomEvent) {
        let Some(handler) = self.table.handler_for(&event) else {
            tracing::trace!(?event, "no handler bound");
            return;
        };
        debug!(handler = handler.name(), "dispatching ui event");

        match handler {
            Handler::Analyze => self.analyze(),
            Handler::AnalyzeOnEnter => {
                if event.key == Some(Key::Enter) {
                    self.analyze();
                }
            }
            Handler::CloseDialog | Handler::CloseOnBackdrop => {
                if self.page.dialog.open {
                    self.close_dialog();
                }
            }
            Handler::CloseOnEscape => {
                if event.key == Some(Key::Escape) && self.page.dialog.open {
                    self.close_dialog();
                }
            }
            Handler::ConfirmDownload => self.confirm_download(),
            Handler::SelectFormat => {
                if let Element::FormatItem(index) = event.target {
                    self.select_format(index);
                }
            }
            Handler::ShowPlatformHint => {
                if let Element::PlatformLogo(key) = &event.target {
                    self.show_platform_hint(key);
                }
            }
            Handler::SmoothScroll => {
                if let Element::AnchorLink(href) = &event.target {
                    self.scroll_to_anchor(href);
                }
            }
        }
    }

    /// Validates the URL input and queues an analyze request.
    pub fn analyze(&mut self) {
        if self.state.analyze_pending.is_some() {
            debug!("analyze already in flight; ignoring trigger");
            return;
        }

        let url = match validate_video_url(&self.page.url_input.value) {
            Ok(url) => url,
            Err(err) => {
                self.report(UiError::from_client_error(UiErrorContext::Analyze, &err));
                return;
            }
        };

        self.page.set_loading(true);
        self.hide_error();
        let generation = self.state.next_generation();
        self.state.analyze_pending = Some(generation);
        // The loaded video and any download in flight belong to the old generation.
        self.state.clear_video();
        self.state.download_pending = None;
        self.sync_confirm();
        info!(url = %url, generation, "analyzing video url");

        if let Err(err) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::Analyze { generation, url })
        {
            self.state.analyze_pending = None;
            self.page.set_loading(false);
            self.report(err);
        }
    }

    pub fn render_format_dialog(&mut self, info: &VideoInfo) {
        let title = info
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_DIALOG_TITLE.to_string());
        let preview = match &info.thumbnail {
            Some(src) => Preview::Thumbnail(src.clone()),
            None => Preview::Placeholder,
        };

        self.state.selected_format = None;
        self.page.open_dialog(
            title,
            format_list::subtitle_for(info),
            preview,
            format_list::entries_for(info),
        );
        self.sync_confirm();
    }

    pub fn select_format(&mut self, index: usize) {
        if !self.page.dialog.open || !self.page.mark_selected(index) {
            debug!(index, "ignoring selection outside the open format list");
            return;
        }
        let format_id = self.page.dialog.entries[index].format_id.clone();
        debug!(format_id = %format_id, "format selected");
        self.state.selected_format = Some(format_id);
        self.sync_confirm();
    }

    pub fn close_dialog(&mut self) {
        self.page.close_dialog();
        self.state.clear_video();
        self.state.download_pending = None;
        self.state.next_generation();
        self.sync_confirm();
    }

    pub fn confirm_download(&mut self) {
        if !self.state.can_confirm() {
            return;
        }
        let (Some(loaded), Some(format_id)) = (&self.state.current, &self.state.selected_format)
        else {
            return;
        };
        let url = loaded.source_url.clone();
        let format_id = format_id.clone();
        let generation = self.state.generation;

        self.state.download_pending = Some(generation);
        self.sync_confirm();
        info!(url = %url, format_id = %format_id, "requesting download");

        if let Err(err) = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Download {
                generation,
                url,
                format_id,
            },
        ) {
            self.state.download_pending = None;
            self.sync_confirm();
            self.report(err);
        }
    }

    /// Queues retrieval of a produced file into the configured directory.
    pub fn retrieve_file(&mut self, filename: String) {
        let cmd = BackendCommand::SaveFile {
            filename,
            dest_dir: self.save_dir.clone(),
        };
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.report(err);
        }
    }

    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.pending_navigation.take()
    }

    pub fn apply_backend_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::AnalyzeFinished {
                generation,
                url,
                result,
            } => self.finish_analyze(generation, url, result),
            UiEvent::DownloadFinished { generation, result } => {
                self.finish_download(generation, result)
            }
            UiEvent::FileSaved { path } => {
                info!(path = %path.display(), "download saved");
                self.show_success(format!("Saved to {}", path.display()));
            }
            UiEvent::FileSaveFailed(err) => {
                self.report(UiError::from_client_error(UiErrorContext::SaveFile, &err));
            }
        }
    }

    /// Applies every backend event already queued. Returns how many.
    pub fn poll_backend(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_backend_event(event);
            applied += 1;
        }
        applied
    }

    /// Blocks for at most `timeout` waiting for one backend event.
    pub fn wait_for_backend(&mut self, timeout: Duration) -> bool {
        match self.ui_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.apply_backend_event(event);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                self.report(UiError::internal(
                    UiErrorContext::General,
                    "Backend worker stopped; restart the client and retry",
                ));
                false
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        for action in self.timers.take_due(now) {
            match action {
                Deferred::HideError { serial } => {
                    if serial == self.error_serial {
                        self.hide_error();
                    }
                }
                Deferred::RemoveNotice { id } => {
                    self.page.notices.retain(|notice| notice.id != id);
                }
                Deferred::FinishDownload { generation } => {
                    if self.state.is_current(generation) {
                        self.close_dialog();
                        self.page.url_input.value.clear();
                    } else {
                        debug!(generation, "dialog changed before auto-close; skipping");
                    }
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_serial += 1;
        self.page.error_banner = Some(message.into());
        self.timers.schedule(
            Instant::now() + self.timings.error_dismiss,
            Deferred::HideError {
                serial: self.error_serial,
            },
        );
    }

    pub fn hide_error(&mut self) {
        self.page.error_banner = None;
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.page.notices.push(Notice {
            id,
            text: message.into(),
        });
        self.timers.schedule(
            Instant::now() + self.timings.success_dismiss,
            Deferred::RemoveNotice { id },
        );
    }

    fn show_platform_hint(&mut self, key: &str) {
        let platform = Platform::from_key(key);
        self.page.url_input.placeholder = platform.placeholder().to_string();
        self.page.url_input.focused = true;
    }

    fn scroll_to_anchor(&mut self, href: &str) {
        let target = href.trim_start_matches('#');
        if target.is_empty() || !self.page.has_section(target) {
            debug!(href, "anchor target not found");
            return;
        }
        self.page.scroll_request = Some(ScrollRequest {
            target: target.to_string(),
            smooth: true,
        });
    }

    fn finish_analyze(
        &mut self,
        generation: u64,
        url: Url,
        result: Result<VideoInfo, ClientError>,
    ) {
        if self.state.analyze_pending == Some(generation) {
            self.state.analyze_pending = None;
            self.page.set_loading(false);
        }
        if !self.state.is_current(generation) {
            debug!(
                generation,
                current = self.state.generation,
                "discarding stale analyze result"
            );
            return;
        }

        match result {
            Ok(mut info) => {
                if matches!(info.platform, None | Some(Platform::Unknown)) {
                    info.platform = url.host_str().map(Platform::from_host);
                }
                self.render_format_dialog(&info);
                self.state.current = Some(LoadedVideo {
                    source_url: url,
                    info,
                });
                self.sync_confirm();
            }
            Err(err) => self.report(UiError::from_client_error(UiErrorContext::Analyze, &err)),
        }
    }

    fn finish_download(
        &mut self,
        generation: u64,
        result: Result<String, ClientError>,
    ) {
        if self.state.download_pending != Some(generation) || !self.state.is_current(generation) {
            if self.state.download_pending == Some(generation) {
                self.state.download_pending = None;
                self.sync_confirm();
            }
            debug!(generation, "discarding stale download result");
            return;
        }

        match result {
            Ok(filename) => {
                let path = download_file_path(&filename);
                info!(filename = %filename, path = %path, "navigating to produced file");
                self.page.location = Some(path.clone());
                self.pending_navigation = Some(Navigation { path, filename });
                self.show_success(DOWNLOAD_STARTED_MESSAGE);
                // Confirm stays busy until the dialog auto-closes.
                self.timers.schedule(
                    Instant::now() + self.timings.close_after_download,
                    Deferred::FinishDownload { generation },
                );
            }
            Err(err) => {
                self.state.download_pending = None;
                self.sync_confirm();
                self.report(UiError::from_client_error(UiErrorContext::Download, &err));
            }
        }
    }

    fn sync_confirm(&mut self) {
        self.page.dialog.confirm.enabled = self.page.dialog.open && self.state.can_confirm();
        self.page.dialog.confirm.busy = self.state.download_pending.is_some();
    }

    fn report(&mut self, err: UiError) {
        warn!(
            category = err.category().as_str(),
            context = err.context().as_str(),
            retryable = err.is_retryable(),
            error = err.message(),
            "operation failed"
        );
        self.show_error(err.message().to_string());
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

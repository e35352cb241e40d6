//! DOM-like input events and the table that routes them to named handlers.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    UrlInput,
    AnalyzeButton,
    CloseButton,
    ConfirmButton,
    /// The dimmed area around the dialog; clicks on the content are a different target.
    DialogBackdrop,
    DialogContent,
    Document,
    FormatItem(usize),
    PlatformLogo(String),
    AnchorLink(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    UrlInput,
    AnalyzeButton,
    CloseButton,
    ConfirmButton,
    DialogBackdrop,
    DialogContent,
    Document,
    FormatItem,
    PlatformLogo,
    AnchorLink,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::UrlInput => ElementKind::UrlInput,
            Self::AnalyzeButton => ElementKind::AnalyzeButton,
            Self::CloseButton => ElementKind::CloseButton,
            Self::ConfirmButton => ElementKind::ConfirmButton,
            Self::DialogBackdrop => ElementKind::DialogBackdrop,
            Self::DialogContent => ElementKind::DialogContent,
            Self::Document => ElementKind::Document,
            Self::FormatItem(_) => ElementKind::FormatItem,
            Self::PlatformLogo(_) => ElementKind::PlatformLogo,
            Self::AnchorLink(_) => ElementKind::AnchorLink,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyPress,
    KeyDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub target: Element,
    pub event_type: EventType,
    pub key: Option<Key>,
}

impl DomEvent {
    pub fn click(target: Element) -> Self {
        Self {
            target,
            event_type: EventType::Click,
            key: None,
        }
    }

    pub fn key_press(target: Element, key: Key) -> Self {
        Self {
            target,
            event_type: EventType::KeyPress,
            key: Some(key),
        }
    }

    pub fn key_down(target: Element, key: Key) -> Self {
        Self {
            target,
            event_type: EventType::KeyDown,
            key: Some(key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    Analyze,
    AnalyzeOnEnter,
    CloseDialog,
    CloseOnBackdrop,
    CloseOnEscape,
    ConfirmDownload,
    SelectFormat,
    ShowPlatformHint,
    SmoothScroll,
}

impl Handler {
    pub fn name(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::AnalyzeOnEnter => "analyze_on_enter",
            Self::CloseDialog => "close_dialog",
            Self::CloseOnBackdrop => "close_on_backdrop",
            Self::CloseOnEscape => "close_on_escape",
            Self::ConfirmDownload => "confirm_download",
            Self::SelectFormat => "select_format",
            Self::ShowPlatformHint => "show_platform_hint",
            Self::SmoothScroll => "smooth_scroll",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventTable {
    bindings: HashMap<(ElementKind, EventType), Handler>,
}

impl EventTable {
    pub fn standard() -> Self {
        let mut table = Self::default();
        table.bind(ElementKind::AnalyzeButton, EventType::Click, Handler::Analyze);
        table.bind(ElementKind::UrlInput, EventType::KeyPress, Handler::AnalyzeOnEnter);
        table.bind(ElementKind::CloseButton, EventType::Click, Handler::CloseDialog);
        table.bind(ElementKind::DialogBackdrop, EventType::Click, Handler::CloseOnBackdrop);
        table.bind(ElementKind::Document, EventType::KeyDown, Handler::CloseOnEscape);
        table.bind(ElementKind::ConfirmButton, EventType::Click, Handler::ConfirmDownload);
        table.bind(ElementKind::FormatItem, EventType::Click, Handler::SelectFormat);
        table.bind(ElementKind::PlatformLogo, EventType::Click, Handler::ShowPlatformHint);
        table.bind(ElementKind::AnchorLink, EventType::Click, Handler::SmoothScroll);
        table
    }

    /// Returns the handler previously bound to the pair, if any.
    pub fn bind(
        &mut self,
        element: ElementKind,
        event_type: EventType,
        handler: Handler,
    ) -> Option<Handler> {
        self.bindings.insert((element, event_type), handler)
    }

    pub fn unbind(&mut self, element: ElementKind, event_type: EventType) -> Option<Handler> {
        self.bindings.remove(&(element, event_type))
    }

    pub fn handler_for(&self, event: &DomEvent) -> Option<Handler> {
        self.bindings
            .get(&(event.target.kind(), event.event_type))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

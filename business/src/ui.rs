//! The UI-toolkit collaborator.
//!
//! Business code never draws anything itself. It talks to whatever surface
//! hosts it (terminal, browser shell, test recorder) through [`UiToolkit`].

use std::fmt;
use std::sync::Mutex;

use crate::escape::escape_html;
use crate::table::TableView;

/// Prefix of the inline message shown when a collection fails to load.
pub const LOAD_ERROR_PREFIX: &str = "Failed to load data";

/// Shown in place of the loading placeholder when a request is cancelled.
pub const CANCELLED_NOTE: &str = "Loading cancelled";

/// Severity of a transient notice. Display form matches the Bootstrap
/// contextual class suffix (`bg-success`, `bg-danger`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        })
    }
}

/// Content of the data modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    Loading,
    /// The request was dropped before its response arrived.
    Cancelled,
    Table(TableView),
    /// Human-readable failure description, unescaped.
    Error(String),
}

impl ModalBody {
    pub fn to_html(&self) -> String {
        match self {
            Self::Loading => concat!(
                r#"<div class="text-center"><div class="spinner-border" role="status">"#,
                r#"<span class="visually-hidden">Loading...</span></div></div>"#
            )
            .to_owned(),
            Self::Cancelled => {
                format!(r#"<div class="text-center text-muted">{CANCELLED_NOTE}</div>"#)
            }
            Self::Table(table) => table.to_html(),
            Self::Error(message) => format!(
                r#"<div class="alert alert-danger"><i class="fas fa-exclamation-triangle me-2"></i>{LOAD_ERROR_PREFIX}: {}</div>"#,
                escape_html(message)
            ),
        }
    }
}

/// Surface operations the admin helpers rely on.
pub trait UiToolkit: Send + Sync {
    /// Short-lived notice (toast).
    fn show_transient_notice(&self, message: &str, level: NoticeLevel);

    /// Blocking yes/no question. `false` aborts the pending action.
    fn confirm_action(&self, prompt: &str) -> bool;

    /// Present (or replace the content of) the titled data modal.
    fn render_modal(&self, title: &str, body: &ModalBody);

    /// Navigate to / open `url` in a new view.
    fn open_location(&self, url: &str) {
        self.show_transient_notice(url, NoticeLevel::Info);
    }
}

/// A notice captured by [`HeadlessUi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

/// A surface with no screen: records everything it is asked to show and
/// answers confirmations with a fixed value.
#[derive(Debug, Default)]
pub struct HeadlessUi {
    confirm_answer: bool,
    notices: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<String>>,
    modals: Mutex<Vec<(String, ModalBody)>>,
    locations: Mutex<Vec<String>>,
}

impl HeadlessUi {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Every modal render in order, the loading placeholder included.
    pub fn modals(&self) -> Vec<(String, ModalBody)> {
        lock(&self.modals).clone()
    }

    /// What the modal shows right now.
    pub fn current_modal(&self) -> Option<(String, ModalBody)> {
        lock(&self.modals).last().cloned()
    }

    pub fn locations(&self) -> Vec<String> {
        lock(&self.locations).clone()
    }
}

// A poisoned recorder still holds valid data; keep reading it.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl UiToolkit for HeadlessUi {
    fn show_transient_notice(&self, message: &str, level: NoticeLevel) {
        lock(&self.notices).push(Notice {
            message: message.to_owned(),
            level,
        });
    }

    fn confirm_action(&self, prompt: &str) -> bool {
        lock(&self.prompts).push(prompt.to_owned());
        self.confirm_answer
    }

    fn render_modal(&self, title: &str, body: &ModalBody) {
        lock(&self.modals).push((title.to_owned(), body.clone()));
    }

    fn open_location(&self, url: &str) {
        lock(&self.locations).push(url.to_owned());
    }
}

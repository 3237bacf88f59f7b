//! [`UiToolkit`] for an interactive terminal.

use inquire::Confirm;
use newsletter_admin_business::escape::unescape_html;
use newsletter_admin_business::table::EMPTY_PLACEHOLDER;
use newsletter_admin_business::ui::{CANCELLED_NOTE, LOAD_ERROR_PREFIX};
use newsletter_admin_business::{ModalBody, NoticeLevel, TableView, UiToolkit};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::warn;

use crate::output::Output;

pub struct TerminalUi {
    out: Output,
    assume_yes: bool,
}

impl TerminalUi {
    /// With `assume_yes` every confirmation is answered yes without prompting.
    pub fn new(assume_yes: bool) -> Self {
        Self {
            out: Output::new(),
            assume_yes,
        }
    }
}

impl UiToolkit for TerminalUi {
    fn show_transient_notice(&self, message: &str, level: NoticeLevel) {
        match level {
            NoticeLevel::Info => self.out.info(message),
            NoticeLevel::Success => self.out.success(message),
            NoticeLevel::Warning => self.out.warning(message),
            NoticeLevel::Danger => self.out.error(message),
        }
    }

    fn confirm_action(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        match Confirm::new(prompt).with_default(false).prompt() {
            Ok(answer) => answer,
            Err(e) => {
                warn!("confirmation prompt failed: {e}");
                false
            }
        }
    }

    fn render_modal(&self, title: &str, body: &ModalBody) {
        match body {
            ModalBody::Loading => self.out.dim(format!("Loading {title}...")),
            ModalBody::Cancelled => self.out.dim(format!("{title}: {CANCELLED_NOTE}")),
            ModalBody::Table(table) => {
                self.out.header(title);
                match render_table(table) {
                    Some(text) => {
                        self.out.print(text);
                        self.out.total(table.rows().len(), "rows");
                    }
                    None => self.out.dim(EMPTY_PLACEHOLDER),
                }
            }
            ModalBody::Error(message) => {
                self.out.header(title);
                self.out.warning(format!("{LOAD_ERROR_PREFIX}: {message}"));
            }
        }
    }

    fn open_location(&self, url: &str) {
        self.out.info(format!("Open in a browser: {url}"));
    }
}

/// Plain-text rendition of `table`, `None` when there is nothing to show.
///
/// Cells arrive HTML-escaped; a terminal wants the text back.
pub fn render_table(table: &TableView) -> Option<String> {
    if table.is_empty() {
        return None;
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().map(|c| unescape_html(c)));
    for row in table.rows() {
        builder.push_record(row.iter().map(|cell| unescape_html(cell)));
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    Some(rendered.to_string())
}

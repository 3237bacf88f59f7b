//! Newsletter preview and export.
//!
//! `/newsletter/{id}` serves the rendered HTML of a generated issue. Preview
//! hands that URL to the surface; export downloads it and writes it to disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{error, info, instrument};

use crate::BusinessConfig;
use crate::escape::unescape_html;
use crate::http::{Client, HttpError, HttpTransport};
use crate::ui::{NoticeLevel, UiToolkit};

pub fn newsletter_path(newsletter_id: u64) -> String {
    format!("/newsletter/{newsletter_id}")
}

pub fn preview_url(config: &BusinessConfig, newsletter_id: u64) -> String {
    config.url(&newsletter_path(newsletter_id))
}

/// Open the rendered newsletter in a new view.
pub fn preview_newsletter(config: &BusinessConfig, ui: &dyn UiToolkit, newsletter_id: u64) {
    ui.open_location(&preview_url(config, newsletter_id));
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Html,
    /// Markup stripped, entities decoded.
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!("unsupported export format '{other}'")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("newsletter body is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

static DROPPED_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<head\b[^>]*>.*?</head>")
        .expect("static pattern is valid")
});

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|h[1-6]|li|tr|table)>")
        .expect("static pattern is valid")
});

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static pattern is valid"));

/// Plain-text rendition of newsletter HTML.
pub fn html_to_text(html: &str) -> String {
    let without_blocks = DROPPED_BLOCKS.replace_all(html, "");
    let with_breaks = LINE_BREAKS.replace_all(&without_blocks, "\n");
    let stripped = TAGS.replace_all(&with_breaks, "");
    let decoded = unescape_html(&stripped);

    let mut out = String::new();
    let mut blank_run = 0;
    for line in decoded.lines().map(str::trim) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_end().to_owned()
}

/// Download newsletter `newsletter_id` into `dir` and return the written path.
#[cfg(not(target_arch = "wasm32"))]
#[instrument(skip(config, transport), name = "export_newsletter")]
pub async fn fetch_and_write(
    config: &BusinessConfig,
    transport: &dyn HttpTransport,
    newsletter_id: u64,
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let url = preview_url(config, newsletter_id);
    let response = transport
        .send(Client::get(url).header("accept", "text/html"))
        .await?;

    if !response.is_success() {
        return Err(ExportError::Status(response.status));
    }

    let html = response.text()?;
    let contents = match format {
        ExportFormat::Html => html,
        ExportFormat::Text => html_to_text(&html),
    };

    let path = dir.join(format!("newsletter-{newsletter_id}.{}", format.extension()));
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "newsletter exported");
    Ok(path)
}

/// [`fetch_and_write`] with the result reported as a notice.
#[cfg(not(target_arch = "wasm32"))]
pub async fn export_newsletter(
    config: &BusinessConfig,
    transport: &dyn HttpTransport,
    ui: &dyn UiToolkit,
    newsletter_id: u64,
    format: ExportFormat,
    dir: &Path,
) -> Option<PathBuf> {
    match fetch_and_write(config, transport, newsletter_id, format, dir).await {
        Ok(path) => {
            ui.show_transient_notice(
                &format!("Newsletter {newsletter_id} exported to {}", path.display()),
                NoticeLevel::Success,
            );
            Some(path)
        }
        Err(err) => {
            error!("newsletter export failed: {err}");
            ui.show_transient_notice(
                &format!("Export of newsletter {newsletter_id} failed: {err}"),
                NoticeLevel::Danger,
            );
            None
        }
    }
}

//! Newsletter preview and export.

use std::path::Path;

use newsletter_admin_business::{
    BusinessConfig, ExportFormat, ReqwestTransport, export_newsletter, preview_newsletter,
};
use tracing::instrument;

use crate::commands::{CommandResult, exit_code};
use crate::terminal_ui::TerminalUi;

pub fn run_preview(config: &BusinessConfig, newsletter_id: u64) -> CommandResult {
    preview_newsletter(config, &TerminalUi::new(false), newsletter_id);
    Ok(exit_code(true))
}

#[instrument(skip_all, name = "export", fields(newsletter_id = newsletter_id, format = %format))]
pub async fn run_export(
    config: &BusinessConfig,
    newsletter_id: u64,
    format: ExportFormat,
    dir: &Path,
) -> CommandResult {
    let ui = TerminalUi::new(false);
    let written =
        export_newsletter(config, &ReqwestTransport, &ui, newsletter_id, format, dir).await;
    Ok(exit_code(written.is_some()))
}

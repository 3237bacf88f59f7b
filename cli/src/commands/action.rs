//! Server-side admin jobs.

use newsletter_admin_business::{
    ActionOutcome, AdminAction, BusinessConfig, ReqwestTransport, execute_admin_action,
};
use tracing::instrument;

use crate::cli::Job;
use crate::commands::{CommandResult, exit_code};
use crate::terminal_ui::TerminalUi;

impl From<Job> for AdminAction {
    fn from(job: Job) -> Self {
        match job {
            Job::Scraping => Self::manual_scraping(),
            Job::Newsletter => Self::manual_newsletter(),
        }
    }
}

#[instrument(skip_all, name = "action", fields(job = ?job))]
pub async fn run_action(config: &BusinessConfig, assume_yes: bool, job: Job) -> CommandResult {
    run(config, assume_yes, &AdminAction::from(job)).await
}

#[instrument(skip_all, name = "delete_user", fields(user_id = user_id))]
pub async fn run_delete_user(
    config: &BusinessConfig,
    assume_yes: bool,
    user_id: u64,
) -> CommandResult {
    run(config, assume_yes, &AdminAction::delete_user(user_id)).await
}

async fn run(config: &BusinessConfig, assume_yes: bool, action: &AdminAction) -> CommandResult {
    let ui = TerminalUi::new(assume_yes);
    let outcome = execute_admin_action(config, &ReqwestTransport, &ui, action).await;

    // declining is not a failure
    Ok(exit_code(!matches!(outcome, ActionOutcome::Failed(_))))
}

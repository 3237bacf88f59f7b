//! Subscribe and unsubscribe on behalf of a reader.

use newsletter_admin_business::{
    BusinessConfig, ReqwestTransport, SubscriptionForm, SubscriptionOutcome, subscribe,
    unsubscribe,
};
use tracing::instrument;

use crate::commands::{CommandResult, exit_code};
use crate::terminal_ui::TerminalUi;

#[instrument(skip_all, name = "subscribe")]
pub async fn run_subscribe(config: &BusinessConfig, form: &SubscriptionForm) -> CommandResult {
    let outcome = subscribe(config, &ReqwestTransport, &TerminalUi::new(false), form).await;
    Ok(exit_code(matches!(outcome, SubscriptionOutcome::Accepted(_))))
}

#[instrument(skip_all, name = "unsubscribe")]
pub async fn run_unsubscribe(config: &BusinessConfig, email: &str) -> CommandResult {
    let outcome = unsubscribe(config, &ReqwestTransport, &TerminalUi::new(false), email).await;
    Ok(exit_code(matches!(outcome, SubscriptionOutcome::Accepted(_))))
}

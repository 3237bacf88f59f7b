//! `newsletter-admin`: terminal front end for the newsletter service admin tools.

mod cli;
mod commands;
mod config;
mod output;
mod terminal_ui;
mod timing;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser as _;
use newsletter_admin_business::{NoticeLevel, SubscriptionForm, UiToolkit as _};
use tracing::error;

use crate::cli::{Cli, Commands};
use crate::commands::{
    generate_completions, run_action, run_config, run_delete_user, run_export, run_preview,
    run_status, run_subscribe, run_unsubscribe, run_view,
};
use crate::config::Config;
use crate::terminal_ui::TerminalUi;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    timing::init_tracing(cli.verbose, cli.timing);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            TerminalUi::new(false).show_transient_notice(
                &format!("An unexpected error occurred: {e:#}"),
                NoticeLevel::Danger,
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let explicit = cli.base_url.as_deref();
    let service = || Config::load().map(|file| file.business_config(explicit));

    match cli.command {
        Commands::View { target, title } => run_view(service()?, cli.yes, &target, title).await,
        Commands::Action { job } => run_action(&service()?, cli.yes, job).await,
        Commands::DeleteUser { id } => run_delete_user(&service()?, cli.yes, id).await,
        Commands::Preview { id } => run_preview(&service()?, id),
        Commands::Export { id, format, out } => run_export(&service()?, id, format, &out).await,
        Commands::Subscribe {
            email,
            name,
            company,
            interests,
        } => {
            let form = SubscriptionForm {
                email,
                name,
                company,
                interests,
            };
            run_subscribe(&service()?, &form).await
        }
        Commands::Unsubscribe { email } => run_unsubscribe(&service()?, &email).await,
        Commands::Status => run_status(&service()?).await,
        Commands::Config { command } => run_config(command, explicit),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

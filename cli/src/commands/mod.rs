//! Command implementations for the newsletter admin CLI.
//!
//! Each command reports through [`TerminalUi`](crate::terminal_ui::TerminalUi)
//! and returns the process exit code: failures the user was already told
//! about yield [`ExitCode::FAILURE`] rather than an error.

use std::process::ExitCode;

pub mod action;
pub mod completions;
pub mod config;
pub mod newsletter;
pub mod status;
pub mod subscribe;
pub mod view;

pub use action::{run_action, run_delete_user};
pub use completions::generate_completions;
pub use config::run_config;
pub use newsletter::{run_export, run_preview};
pub use status::run_status;
pub use subscribe::{run_subscribe, run_unsubscribe};
pub use view::run_view;

pub type CommandResult = anyhow::Result<ExitCode>;

pub(crate) fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

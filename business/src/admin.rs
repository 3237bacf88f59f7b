//! Admin dashboard operations: the named collections shown in the data modal
//! and the confirm-then-POST actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::BusinessConfig;
use crate::api::api_request;
use crate::http::{Client, HttpTransport};
use crate::ui::{NoticeLevel, UiToolkit};

/// Collections the dashboard can load into the data modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Subscribers,
    Documents,
    Changes,
    Newsletters,
    Users,
}

impl Dataset {
    pub const ALL: [Self; 5] = [
        Self::Subscribers,
        Self::Documents,
        Self::Changes,
        Self::Newsletters,
        Self::Users,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Subscribers => "/admin/subscribers",
            Self::Documents => "/admin/documents",
            Self::Changes => "/admin/changes",
            Self::Newsletters => "/admin/newsletters",
            Self::Users => "/admin/users",
        }
    }

    /// Modal title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Subscribers => "Subscribers",
            Self::Documents => "Monitored documents",
            Self::Changes => "Detected changes",
            Self::Newsletters => "Generated newsletters",
            Self::Users => "Users",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Subscribers => "subscribers",
            Self::Documents => "documents",
            Self::Changes => "changes",
            Self::Newsletters => "newsletters",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dataset '{s}'"))
    }
}

/// A POST-triggered admin operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAction {
    pub endpoint: String,
    /// Shown in the result notices.
    pub name: String,
    /// Asked before anything is sent; `None` sends right away.
    pub confirm: Option<String>,
}

impl AdminAction {
    pub fn new(endpoint: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            name: name.into(),
            confirm: None,
        }
    }

    pub fn with_confirm(mut self, prompt: impl Into<String>) -> Self {
        self.confirm = Some(prompt.into());
        self
    }

    pub fn manual_scraping() -> Self {
        Self::new("/admin/manual-scraping", "Scraping")
            .with_confirm("Start a scraping run over all monitored sources now?")
    }

    pub fn manual_newsletter() -> Self {
        Self::new("/admin/manual-newsletter", "Newsletter generation")
            .with_confirm("Generate a newsletter from the pending changes now?")
    }

    pub fn delete_user(user_id: u64) -> Self {
        Self::new(format!("/admin/user/delete/{user_id}"), "User deletion")
            .with_confirm(format!("Delete user {user_id}? This cannot be undone."))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// How an [`AdminAction`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The confirmation was declined; nothing was sent.
    Cancelled,
    /// Server accepted the action with this message.
    Started(String),
    /// Request failed with this description.
    Failed(String),
}

/// Ask for confirmation if the action wants it, POST it, and report the result as a notice.
#[instrument(skip_all, name = "admin_action", fields(action = %action.name, endpoint = %action.endpoint))]
pub async fn execute_admin_action(
    config: &BusinessConfig,
    transport: &dyn HttpTransport,
    ui: &dyn UiToolkit,
    action: &AdminAction,
) -> ActionOutcome {
    if let Some(prompt) = &action.confirm
        && !ui.confirm_action(prompt)
    {
        info!("action declined");
        return ActionOutcome::Cancelled;
    }

    let request = Client::post(config.url(&action.endpoint));
    match api_request::<MessageResponse>(transport, request).await {
        Ok(response) => {
            let message = response.message.unwrap_or_default();
            ui.show_transient_notice(
                &format!("{} started successfully: {message}", action.name),
                NoticeLevel::Success,
            );
            ActionOutcome::Started(message)
        }
        Err(err) => {
            let message = err.to_string();
            ui.show_transient_notice(
                &format!("Error during {}: {message}", action.name),
                NoticeLevel::Danger,
            );
            ActionOutcome::Failed(message)
        }
    }
}

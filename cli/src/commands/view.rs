//! View an admin collection as a table.

use newsletter_admin_business::{
    BusinessConfig, Dataset, RemoteTableViewer, ReqwestTransport, ViewState,
};
use tracing::{debug, instrument};

use crate::commands::{CommandResult, exit_code};
use crate::terminal_ui::TerminalUi;

/// What `view <target>` points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTarget {
    pub endpoint: String,
    pub title: String,
}

impl ViewTarget {
    /// A known dataset name, or else a raw endpoint path / URL.
    pub fn resolve(target: &str, title: Option<String>) -> Self {
        match target.parse::<Dataset>() {
            Ok(dataset) => Self {
                endpoint: dataset.endpoint().to_owned(),
                title: title.unwrap_or_else(|| dataset.title().to_owned()),
            },
            Err(_) => {
                let endpoint = if target.starts_with('/') || target.contains("://") {
                    target.to_owned()
                } else {
                    format!("/{target}")
                };
                Self {
                    title: title.unwrap_or_else(|| endpoint.clone()),
                    endpoint,
                }
            }
        }
    }
}

#[instrument(skip_all, name = "view", fields(target = %target))]
pub async fn run_view(
    config: BusinessConfig,
    assume_yes: bool,
    target: &str,
    title: Option<String>,
) -> CommandResult {
    let target = ViewTarget::resolve(target, title);
    debug!(endpoint = %target.endpoint, "resolved view target");

    let viewer = RemoteTableViewer::new(config, ReqwestTransport, TerminalUi::new(assume_yes));
    let state = viewer.show(&target.endpoint, &target.title).await;

    Ok(exit_code(matches!(state, ViewState::Rendered(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_names_resolve_to_admin_endpoints() {
        let target = ViewTarget::resolve("subscribers", None);
        assert_eq!(target.endpoint, "/admin/subscribers");
        assert_eq!(target.title, Dataset::Subscribers.title());
    }

    #[test]
    fn explicit_title_wins() {
        let target = ViewTarget::resolve("changes", Some("Recent".to_owned()));
        assert_eq!(target.title, "Recent");
    }

    #[test]
    fn unknown_targets_are_paths() {
        assert_eq!(
            ViewTarget::resolve("admin/reports", None),
            ViewTarget {
                endpoint: "/admin/reports".to_owned(),
                title: "/admin/reports".to_owned(),
            }
        );
        assert_eq!(
            ViewTarget::resolve("https://other.example/list", None).endpoint,
            "https://other.example/list"
        );
    }
}

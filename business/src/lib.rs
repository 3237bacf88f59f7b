//! Business layer of the newsletter admin tools.
//!
//! Everything here talks to the newsletter web service over HTTP and reports
//! back through a [`UiToolkit`]; nothing draws directly. Hosts (the CLI, a
//! browser shell) supply the transport and the surface.

pub mod admin;
pub mod api;
mod config;
pub mod escape;
pub mod format;
pub mod http;
pub mod newsletter;
pub mod status;
pub mod subscription;
pub mod table;
pub mod ui;
pub mod validation;
pub mod viewer;

pub use admin::{ActionOutcome, AdminAction, Dataset, execute_admin_action};
pub use api::{ApiError, ApiResult, api_request};
pub use config::{BASE_URL_ENV, BusinessConfig};
pub use escape::escape_html;
pub use format::format_date;
pub use http::{HttpTransport, ReqwestTransport};
pub use newsletter::{ExportFormat, preview_newsletter};
#[cfg(not(target_arch = "wasm32"))]
pub use newsletter::{export_newsletter, fetch_and_write};
pub use status::{ApiStatus, HealthStatus, fetch_health, fetch_status};
pub use subscription::{SubscriptionOutcome, subscribe, unsubscribe};
pub use table::TableView;
pub use ui::{HeadlessUi, ModalBody, Notice, NoticeLevel, UiToolkit};
pub use validation::{SubscriptionForm, validate_email, validate_subscription_form};
#[cfg(not(target_arch = "wasm32"))]
pub use viewer::ViewTask;
pub use viewer::{RemoteTableViewer, ViewState};

//! Subscribe / unsubscribe calls against the public endpoints.

use serde::Serialize;
use tracing::{info, instrument};

use crate::BusinessConfig;
use crate::admin::MessageResponse;
use crate::api::{ApiError, api_request};
use crate::http::{Client, HttpTransport};
use crate::ui::{NoticeLevel, UiToolkit};
use crate::validation::{SubscriptionForm, show_validation_errors, validate_subscription_form};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid(Vec<String>),
    /// Server accepted; carries its message.
    Accepted(String),
    /// Server or transport refused; carries the description.
    Rejected(String),
}

#[derive(Debug, Serialize)]
struct UnsubscribeRequest<'a> {
    email: &'a str,
}

/// Validate `form`, then `POST /subscribe`.
#[instrument(skip_all, name = "subscribe")]
pub async fn subscribe(
    config: &BusinessConfig,
    transport: &dyn HttpTransport,
    ui: &dyn UiToolkit,
    form: &SubscriptionForm,
) -> SubscriptionOutcome {
    let errors = validate_subscription_form(form);
    if !errors.is_empty() {
        show_validation_errors(ui, &errors);
        return SubscriptionOutcome::Invalid(errors);
    }

    let form = form.normalized();
    let result = match Client::post(config.url("/subscribe")).json(&form) {
        Ok(request) => api_request::<MessageResponse>(transport, request).await,
        Err(e) => Err(ApiError::Decode(format!("could not encode form: {e}"))),
    };
    report(ui, result)
}

/// Validate the address, then `POST /unsubscribe`.
#[instrument(skip_all, name = "unsubscribe")]
pub async fn unsubscribe(
    config: &BusinessConfig,
    transport: &dyn HttpTransport,
    ui: &dyn UiToolkit,
    email: &str,
) -> SubscriptionOutcome {
    let errors = validate_subscription_form(&SubscriptionForm::new(email));
    if !errors.is_empty() {
        show_validation_errors(ui, &errors);
        return SubscriptionOutcome::Invalid(errors);
    }

    let email = email.trim().to_lowercase();
    let body = UnsubscribeRequest { email: &email };
    let result = match Client::post(config.url("/unsubscribe")).json(&body) {
        Ok(request) => api_request::<MessageResponse>(transport, request).await,
        Err(e) => Err(ApiError::Decode(format!("could not encode request: {e}"))),
    };
    report(ui, result)
}

fn report(ui: &dyn UiToolkit, result: Result<MessageResponse, ApiError>) -> SubscriptionOutcome {
    match result {
        Ok(response) => {
            let message = response.message.unwrap_or_default();
            info!("accepted: {message}");
            ui.show_transient_notice(&message, NoticeLevel::Success);
            SubscriptionOutcome::Accepted(message)
        }
        Err(err) => {
            let message = err.to_string();
            ui.show_transient_notice(&message, NoticeLevel::Danger);
            SubscriptionOutcome::Rejected(message)
        }
    }
}

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ui::{NoticeLevel, UiToolkit};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern is valid")
});

pub const EMAIL_REQUIRED: &str = "E-mail address is required";
pub const EMAIL_INVALID: &str = "Invalid e-mail address";

/// Loose shape check: something, an `@`, something, a dot, something.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Fields of the public subscription form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionForm {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl SubscriptionForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Trimmed and lowercased the way the server stores it.
    pub fn normalized(&self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            name: self.name.trim().to_owned(),
            company: self.company.trim().to_owned(),
            interests: self
                .interests
                .iter()
                .map(|i| i.trim().to_owned())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }
}

/// Messages for every problem with `form`; empty when it can be submitted.
pub fn validate_subscription_form(form: &SubscriptionForm) -> Vec<String> {
    let mut errors = Vec::new();

    let email = form.email.trim();
    if email.is_empty() {
        errors.push(EMAIL_REQUIRED.to_owned());
    } else if !validate_email(email) {
        errors.push(EMAIL_INVALID.to_owned());
    }

    errors
}

/// One danger notice per validation error.
pub fn show_validation_errors(ui: &dyn UiToolkit, errors: &[String]) {
    for error in errors {
        ui.show_transient_notice(error, NoticeLevel::Danger);
    }
}

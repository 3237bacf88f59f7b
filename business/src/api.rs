//! JSON request helper shared by every admin call.
//!
//! Sends the request through an injected [`HttpTransport`], decodes the body as
//! JSON and turns non-2xx answers into [`ApiError::Status`]. The server reports
//! failures as `{"error": "..."}`; that text becomes the error message when it
//! is present.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::http::{HttpTransport, RequestBuilder};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response (DNS, connection refused, reset...).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body was not the JSON shape the caller asked for.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

fn status_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

/// Send `request` and decode the JSON answer as `T`.
#[instrument(skip_all, name = "api_request", fields(method = %request.method(), url = request.url()))]
pub async fn api_request<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    request: RequestBuilder,
) -> ApiResult<T> {
    let request = if request.has_header("content-type") {
        request
    } else {
        request.header("content-type", "application/json")
    };

    let response = transport.send(request).await.map_err(|e| {
        error!("API request error: {e}");
        ApiError::Transport(e.message)
    })?;

    debug!(status = response.status, bytes = response.body.len(), "response received");

    let body: Result<Value, _> = response.json();

    if !response.is_success() {
        let message = status_message(response.status, body.as_ref().ok());
        error!(status = response.status, "API request error: {message}");
        return Err(ApiError::Status {
            status: response.status,
            message,
        });
    }

    let body = body.map_err(|e| {
        error!("API request error: invalid JSON: {e}");
        ApiError::Decode(format!("invalid JSON response: {e}"))
    })?;

    serde_json::from_value(body).map_err(|e| {
        error!("API request error: unexpected payload: {e}");
        ApiError::Decode(format!("unexpected response shape: {e}"))
    })
}

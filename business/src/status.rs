//! Service status endpoints (`/api/status`, `/health`).

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::BusinessConfig;
use crate::api::{ApiResult, api_request};
use crate::format::format_date;
use crate::http::{Client, HttpTransport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub scheduler_running: bool,
}

impl ApiStatus {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }

    /// `timestamp` in display form.
    pub fn checked_at(&self) -> String {
        format_date(self.timestamp.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[instrument(skip_all, name = "fetch_status")]
pub async fn fetch_status(
    config: &BusinessConfig,
    transport: &dyn HttpTransport,
) -> ApiResult<ApiStatus> {
    api_request(transport, Client::get(config.url("/api/status"))).await
}

#[instrument(skip_all, name = "fetch_health")]
pub async fn fetch_health(
    config: &BusinessConfig,
    transport: &dyn HttpTransport,
) -> ApiResult<HealthStatus> {
    api_request(transport, Client::get(config.url("/health"))).await
}

//! Service health overview.

use newsletter_admin_business::format::NOT_AVAILABLE;
use newsletter_admin_business::{
    ApiStatus, BusinessConfig, HealthStatus, ReqwestTransport, fetch_health, fetch_status,
};
use tracing::instrument;

use crate::commands::{CommandResult, exit_code};
use crate::output::Output;

#[instrument(skip_all, name = "status")]
pub async fn run_status(config: &BusinessConfig) -> CommandResult {
    let out = Output::new();
    let transport = ReqwestTransport;

    let (status, health) = tokio::join!(
        fetch_status(config, &transport),
        fetch_health(config, &transport)
    );

    out.header(format!("Service {}", config.base_url));
    out.divider(40);

    let mut healthy = true;
    match status {
        Ok(status) => print_status(&out, &status),
        Err(e) => {
            healthy = false;
            out.error(format!("Status unavailable: {e}"));
        }
    }
    match health {
        Ok(health) => {
            healthy &= health.is_healthy();
            print_health(&out, &health);
        }
        Err(e) => {
            healthy = false;
            out.error(format!("Health check failed: {e}"));
        }
    }

    Ok(exit_code(healthy))
}

fn print_status(out: &Output, status: &ApiStatus) {
    if status.is_running() {
        out.success(format!("API {}", status.status));
    } else {
        out.warning(format!("API {}", status.status));
    }
    out.labeled(
        "Scheduler",
        if status.scheduler_running {
            "running"
        } else {
            "stopped"
        },
    );
    out.labeled("Checked at", status.checked_at());
}

fn print_health(out: &Output, health: &HealthStatus) {
    if health.is_healthy() {
        out.success(format!("Health {}", health.status));
    } else {
        out.warning(format!("Health {}", health.status));
    }
    out.labeled("Database", health.database.as_deref().unwrap_or(NOT_AVAILABLE));
    out.labeled("E-mail", health.email.as_deref().unwrap_or(NOT_AVAILABLE));
}

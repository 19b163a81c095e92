//! Health probe handler.

use serde::Serialize;

use sensorboard_core::{ConnectionStatus, Dashboard, EndpointLabel};

use crate::error::CliError;
use crate::output::{self, Render};

#[derive(Serialize)]
struct HealthView {
    status: ConnectionStatus,
    endpoint: String,
    label: EndpointLabel,
    service_status: Option<String>,
    message: Option<String>,
    storage_connected: Option<bool>,
    healthy: bool,
}

fn detail(view: &HealthView, color: bool) -> String {
    let yes_no = |b: Option<bool>| match b {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };
    let mut lines = vec![
        format!("API:       {}", output::status_badge(view.status, color)),
        format!("Endpoint:  {} ({})", view.label, view.endpoint),
        format!(
            "Service:   {}",
            view.service_status.as_deref().unwrap_or("unknown")
        ),
        format!("Storage:   {}", yes_no(view.storage_connected)),
    ];
    if let Some(ref message) = view.message {
        lines.push(format!("Message:   {message}"));
    }
    lines.join("\n")
}

pub async fn handle(dashboard: &Dashboard, render: &Render) -> Result<(), CliError> {
    let report = dashboard.health().await?;

    let view = HealthView {
        status: dashboard.api_status(),
        endpoint: dashboard.api().active_endpoint().to_string(),
        label: dashboard.api().active_label(),
        healthy: report.is_healthy(),
        service_status: report.status,
        message: report.message,
        storage_connected: report.cassandra_connected,
    };

    let out = output::render_single(
        render.format,
        &view,
        |v| detail(v, render.color),
        |v| v.status.to_string(),
    )?;
    output::print_output(&out, render.quiet);
    Ok(())
}

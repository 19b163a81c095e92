//! Readings handlers: list, chart, create.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use sensorboard_core::{CreatedReading, Dashboard, Reading, ReadingDraft};

use crate::chart::{self, Summary};
use crate::cli::{OutputFormat, ReadingFilterArgs, ReadingsArgs, ReadingsCommand};
use crate::error::CliError;
use crate::output::{self, Render};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Type")]
    sensor_type: String,
    #[tabled(rename = "Sensor")]
    sensor_id: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Time")]
    timestamp: String,
}

impl From<&Reading> for ReadingRow {
    fn from(r: &Reading) -> Self {
        Self {
            site: r.site.clone(),
            sensor_type: r.sensor_type.clone(),
            sensor_id: r.sensor_id.clone(),
            value: format!("{:.2}", r.value),
            timestamp: r.timestamp.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChartView<'a> {
    summary: Option<Summary>,
    readings: Vec<&'a Reading>,
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Apply site, then sensor type, then limit, and fetch.
///
/// The site's sensor-type list is not needed to query readings, so a failed
/// type lookup does not stop the fetch.
async fn fetch(
    dashboard: &Dashboard,
    filter: &ReadingFilterArgs,
    render: &Render,
) -> Result<Arc<Vec<Reading>>, CliError> {
    if let Err(e) = dashboard.select_site(filter.site.clone()).await {
        debug!(site = %filter.site, error = %e, "sensor types unavailable, loading readings anyway");
    }
    dashboard
        .select_sensor_type(filter.sensor_type.clone())
        .await?;
    if let Some(limit) = filter.limit {
        dashboard.set_limit(limit).await?;
    }
    debug!(filters = ?dashboard.store().filters(), "loading readings");

    let spinner = output::spinner(render, "Loading readings...");
    let result = dashboard.load_readings().await;
    spinner.finish_and_clear();
    let readings = result?;

    if readings.is_empty() {
        output::print_notice(
            &format!(
                "No readings for site \"{}\" and sensor type \"{}\".",
                filter.site, filter.sensor_type
            ),
            render,
        );
    }
    Ok(readings)
}

fn created_detail(created: &CreatedReading) -> String {
    format!(
        "Reading stored (status: {}, timestamp: {})",
        created.status.as_deref().unwrap_or("unknown"),
        created.timestamp.as_deref().unwrap_or("unknown"),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: ReadingsArgs,
    render: &Render,
) -> Result<(), CliError> {
    match args.command {
        ReadingsCommand::List(filter) => {
            let readings = fetch(dashboard, &filter, render).await?;
            let out = output::render_list(
                render.format,
                readings.as_slice(),
                |r| ReadingRow::from(r),
                |r| format!("{}\t{:.2}", r.timestamp, r.value),
            )?;
            output::print_output(&out, render.quiet);
            Ok(())
        }

        ReadingsCommand::Chart { filter, width } => {
            let readings = fetch(dashboard, &filter, render).await?;
            let ordered = chart::chronological(&readings);
            let values: Vec<f64> = ordered.iter().map(|r| r.value).collect();

            let out = match render.format {
                OutputFormat::Table => chart::bar_chart(&readings, width),
                OutputFormat::Plain => chart::sparkline(&values),
                format => {
                    let view = ChartView {
                        summary: chart::summarize(&values),
                        readings: ordered,
                    };
                    output::render_single(format, &view, |_| String::new(), |_| String::new())?
                }
            };
            output::print_output(&out, render.quiet);
            Ok(())
        }

        ReadingsCommand::Create {
            site,
            sensor_type,
            sensor_id,
            value,
        } => {
            let draft = ReadingDraft {
                site,
                sensor_type,
                sensor_id,
                value,
            };
            let created = dashboard.create_reading(&draft).await?;
            let out = output::render_single(render.format, &created, created_detail, |c| {
                c.timestamp.clone().unwrap_or_default()
            })?;
            output::print_output(&out, render.quiet);
            Ok(())
        }
    }
}

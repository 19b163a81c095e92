//! Sensor-type listing handler.

use sensorboard_core::Dashboard;

use crate::cli::SensorTypesArgs;
use crate::error::CliError;
use crate::output::{self, Render};

use super::sites::NameRow;

pub async fn handle(
    dashboard: &Dashboard,
    args: SensorTypesArgs,
    render: &Render,
) -> Result<(), CliError> {
    dashboard.select_site(args.site).await?;
    let types = dashboard.store().sensor_types();

    if types.is_empty() {
        if let Some(notice) = dashboard.store().error() {
            output::print_notice(&notice, render);
        }
    }

    let out = output::render_list(
        render.format,
        types.as_slice(),
        |t| NameRow { name: t.clone() },
        Clone::clone,
    )?;
    output::print_output(&out, render.quiet);
    Ok(())
}

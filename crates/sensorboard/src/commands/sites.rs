//! Site listing handler.

use tabled::Tabled;

use sensorboard_core::Dashboard;

use crate::error::CliError;
use crate::output::{self, Render};

#[derive(Tabled)]
pub(super) struct NameRow {
    #[tabled(rename = "Name")]
    pub(super) name: String,
}

pub async fn handle(dashboard: &Dashboard, render: &Render) -> Result<(), CliError> {
    let sites = dashboard.load_sites().await?;

    if sites.is_empty() {
        if let Some(notice) = dashboard.store().error() {
            output::print_notice(&notice, render);
        }
    }

    let out = output::render_list(
        render.format,
        sites.as_slice(),
        |s| NameRow { name: s.clone() },
        Clone::clone,
    )?;
    output::print_output(&out, render.quiet);
    Ok(())
}

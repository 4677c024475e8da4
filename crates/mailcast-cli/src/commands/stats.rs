//! Handler for the aggregate statistics overview.

use mailcast_client::tracker;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliResult};
use crate::output::render_overview;

pub(crate) async fn handle_stats(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let stats = tracker::overview(&ctx.client).await?;
    render_overview(&stats, format)
}

//! `stine export Y2024M06` — start a calendar export and print the link.
//!
//! The link points at the portal's file transfer script. Whether it can be
//! fetched more than once is up to the portal.

use anyhow::{Context as _, Result};
use stine_core::ExportPeriod;

use super::Context;

pub async fn run(ctx: &Context, period: &str) -> Result<()> {
    let period: ExportPeriod = period.parse()?;
    let manager = ctx.resume()?;

    let url = manager
        .scheduler_export(&period.to_string())
        .await
        .with_context(|| format!("export of {period} failed"))?;

    println!("{url}");
    Ok(())
}

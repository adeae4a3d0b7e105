//! `stine check` — probe whether the saved session still works.

use anyhow::{bail, Result};
use tracing::info;

use super::Context;

pub async fn run(ctx: &Context) -> Result<()> {
    let manager = ctx.resume()?;
    let session_id = manager.session_id().unwrap_or_default().to_string();

    match manager.session_valid().await {
        Ok(()) => {
            info!(session = %session_id, "session valid");
            println!("session {session_id} is valid");
            Ok(())
        }
        Err(e) if e.needs_login() => {
            bail!("session {session_id}: {e}; run `stine login` to start a new one")
        }
        Err(e) => Err(e.into()),
    }
}

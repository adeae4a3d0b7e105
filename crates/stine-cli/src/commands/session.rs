//! `stine session` / `stine logout` — inspect or forget the saved session.
//!
//! Neither talks to the portal. `logout` only deletes the local file; the
//! remote session stays alive until it times out.

use anyhow::Result;

use super::Context;

/// Print the saved session.
pub async fn run_show(ctx: &Context, json: bool) -> Result<()> {
    let Some(identity) = ctx.store.load()? else {
        println!("no saved session");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&identity)?);
    } else {
        println!("{:<10} {}", "SESSION", identity.session_id);
        println!("{:<10} {}", "COOKIE", identity.cookie_token);
        println!("{:<10} {}", "FILE", ctx.store.path().display());
    }
    Ok(())
}

/// Delete the saved session.
pub async fn run_logout(ctx: &Context) -> Result<()> {
    if ctx.store.clear()? {
        println!("removed {}", ctx.store.path().display());
    } else {
        println!("no saved session");
    }
    Ok(())
}

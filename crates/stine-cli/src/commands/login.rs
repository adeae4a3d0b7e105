//! `stine login` — start a session and save it for later commands.

use std::io::BufRead;

use anyhow::{bail, Context as _, Result};
use stine_client::SessionManager;
use tracing::{debug, info};

use super::Context;

const PASSWORD_ENV: &str = "STINE_PASSWORD";

pub async fn run(ctx: &Context, username: Option<&str>, password_stdin: bool) -> Result<()> {
    let username = match username.or(ctx.username.as_deref()) {
        Some(name) => name.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .context("failed to read username")?,
    };
    let password = read_password(password_stdin)?;

    let mut manager = SessionManager::new(ctx.portal.clone())?;
    manager
        .login(&username, &password)
        .await
        .context("login failed (wrong credentials or unexpected portal response)")?;

    let identity = manager
        .current_session()
        .context("portal did not hand out a session cookie")?;
    ctx.store
        .save(&identity)
        .with_context(|| format!("failed to save session to {}", ctx.store.path().display()))?;
    info!(path = %ctx.store.path().display(), "session saved");

    println!("logged in as {username} (session {})", identity.session_id);
    Ok(())
}

/// Password from stdin, the environment, or an interactive prompt, in that order.
fn read_password(from_stdin: bool) -> Result<String> {
    if from_stdin {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read password from stdin")?;
        let password = line.trim_end_matches(['\r', '\n']).to_string();
        if password.is_empty() {
            bail!("empty password on stdin");
        }
        return Ok(password);
    }

    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        debug!("using password from {PASSWORD_ENV}");
        return Ok(password);
    }

    dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .context("failed to read password")
}

//! CLI subcommand implementations.

pub mod check;
pub mod export;
pub mod login;
pub mod session;

use anyhow::{anyhow, Result};
use stine_client::{HttpTransport, SessionManager, SessionStore};
use stine_core::PortalConfig;

/// Settings shared by every subcommand, after config and flags are merged.
pub struct Context {
    pub portal: PortalConfig,
    pub store: SessionStore,
    pub username: Option<String>,
}

impl Context {
    /// Build a manager and resume the saved session.
    pub fn resume(&self) -> Result<SessionManager<HttpTransport>> {
        let identity = self
            .store
            .load()?
            .ok_or_else(|| anyhow!("no saved session; run `stine login` first"))?;
        let mut manager = SessionManager::new(self.portal.clone())?;
        manager.restore(&identity);
        Ok(manager)
    }
}

//! File-backed persistence of a session identity.
//!
//! Stores the session id and cookie at `~/.stine/session.toml` by default so
//! a later process can resume the session instead of logging in again.

use std::fs;
use std::path::{Path, PathBuf};

use stine_core::{Identity, StineError, StineResult};
use tracing::debug;

/// Session file manager.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default location (`~/.stine/session.toml`).
    pub fn default_location() -> StineResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| StineError::Store("cannot determine home directory".into()))?;
        Ok(Self::new(home.join(".stine").join("session.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved identity, `None` if nothing is saved.
    pub fn load(&self) -> StineResult<Option<Identity>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let identity = toml::from_str(&content).map_err(|e| {
            StineError::Store(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        Ok(Some(identity))
    }

    /// Save an identity, replacing whatever was stored.
    pub fn save(&self, identity: &Identity) -> StineResult<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(parent, fs::Permissions::from_mode(0o700))?;
                }
            }
        }

        let content = toml::to_string(identity)
            .map_err(|e| StineError::Store(format!("failed to serialize session: {e}")))?;
        fs::write(&self.path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.path.display(), "saved session");
        Ok(())
    }

    /// Remove the saved identity. Returns whether anything was removed.
    pub fn clear(&self) -> StineResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

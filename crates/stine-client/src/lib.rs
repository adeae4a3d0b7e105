//! stine-client: Rust client library for the STiNE campus portal.
//!
//! Logs in through the portal's form endpoint, checks whether a session is
//! still alive, and starts calendar exports. Sessions can be saved and
//! resumed across processes.
//!
//! # Quick Start
//!
//! ```no_run
//! use stine_client::{PortalConfig, SessionManager};
//!
//! # async fn example() -> stine_client::StineResult<()> {
//! let mut manager = SessionManager::new(PortalConfig::default())?;
//! manager.login("bax1234", "hunter2").await?;
//! manager.session_valid().await?;
//!
//! let url = manager.scheduler_export("Y2030M06").await?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod store;
pub mod transport;

// Re-export primary public types.
pub use manager::SessionManager;
pub use store::SessionStore;
pub use transport::{HttpTransport, MockTransport};

// Re-export stine-core types for convenience.
pub use stine_core::{ExportPeriod, Identity, PortalConfig, StineError, StineResult};

//! stine-core: Shared protocol library for the STiNE portal client.
//!
//! Provides portal configuration, form descriptors for the supported
//! programs, response classification, the export period type, the session
//! identity, and the abstract transport trait.

pub mod classify;
pub mod config;
pub mod error;
pub mod form;
pub mod identity;
pub mod period;
pub mod protocol;
pub mod transport;

// Re-export commonly used items at crate root.
pub use classify::{MarkupClassifier, ResponseClassifier, Validity};
pub use config::PortalConfig;
pub use error::{StineError, StineResult, TransportError};
pub use form::FormRequest;
pub use identity::Identity;
pub use period::ExportPeriod;
pub use transport::{find_cookie, FormPost, FormResponse, Transport};

//! Transport implementations.
//!
//! - [`HttpTransport`] talks to the live portal over reqwest.
//! - [`MockTransport`] answers from a queue, for tests.

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

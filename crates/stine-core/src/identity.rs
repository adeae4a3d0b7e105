//! The (session id, cookie token) pair that makes up one logged-in session.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric session id taken from the login redirect.
    pub session_id: String,
    /// Value of the session cookie.
    pub cookie_token: String,
}

impl Identity {
    pub fn new(session_id: impl Into<String>, cookie_token: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            cookie_token: cookie_token.into(),
        }
    }
}

// The cookie token is a bearer credential; keep it out of logs.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("session_id", &self.session_id)
            .field("cookie_token", &"<redacted>")
            .finish()
    }
}

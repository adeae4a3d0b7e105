use thiserror::Error;

/// Failures raised by the HTTP collaborator.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Errors produced by the portal protocol layer.
#[derive(Debug, Error)]
pub enum StineError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The login response carried no usable `refresh` header. Wrong
    /// credentials and a changed response format look identical here.
    #[error("invalid refresh header in login response")]
    InvalidRefresh,

    #[error("no active session")]
    NoActiveSession,

    #[error("session timed out")]
    SessionTimeout,

    #[error("access denied")]
    AccessDenied,

    #[error("export link not found in response")]
    ExportLinkNotFound,

    #[error("invalid export period: {0}")]
    InvalidPeriod(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("session store error: {0}")]
    Store(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<url::ParseError> for StineError {
    fn from(e: url::ParseError) -> Self {
        StineError::InvalidUrl(e.to_string())
    }
}

impl StineError {
    /// Whether the caller should log in again before retrying.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            StineError::InvalidRefresh
                | StineError::NoActiveSession
                | StineError::SessionTimeout
                | StineError::AccessDenied
        )
    }
}

pub type StineResult<T> = Result<T, StineError>;

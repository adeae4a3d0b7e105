//! The portal session manager.
//!
//! `SessionManager` owns one account's identity: it performs the login
//! handshake, presents the session id on every request, and turns the
//! portal's HTML and redirect headers into typed outcomes. The session
//! cookie itself lives in the transport's cookie store and is read from
//! there whenever it is needed.

use stine_core::classify::{MarkupClassifier, ResponseClassifier, Validity};
use stine_core::error::{StineError, StineResult};
use stine_core::form::FormRequest;
use stine_core::identity::Identity;
use stine_core::protocol::{self, REFRESH_HEADER};
use stine_core::transport::{FormPost, FormResponse, Transport};
use stine_core::PortalConfig;
use tracing::{debug, info, warn};
use url::Url;

use crate::transport::HttpTransport;

/// Session lifecycle for one portal account.
///
/// Not meant for concurrent use: mutating operations take `&mut self`, so
/// callers sharing one account across tasks must serialize access.
pub struct SessionManager<T: Transport, C: ResponseClassifier = MarkupClassifier> {
    config: PortalConfig,
    endpoint: Url,
    cookie_scope: Url,
    transport: T,
    classifier: C,
    /// Set by a successful login or by `set_session`.
    session_id: Option<String>,
}

impl SessionManager<HttpTransport> {
    /// Manager talking to the live portal described by `config`.
    pub fn new(config: PortalConfig) -> StineResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> SessionManager<T> {
    /// Manager over a caller-supplied transport.
    pub fn with_transport(config: PortalConfig, transport: T) -> StineResult<Self> {
        let endpoint = config.endpoint_url()?;
        let cookie_scope = config.cookie_url()?;
        Ok(Self {
            config,
            endpoint,
            cookie_scope,
            transport,
            classifier: MarkupClassifier,
            session_id: None,
        })
    }
}

impl<T: Transport, C: ResponseClassifier> SessionManager<T, C> {
    /// Swap the response classifier.
    pub fn with_classifier<D: ResponseClassifier>(self, classifier: D) -> SessionManager<T, D> {
        SessionManager {
            config: self.config,
            endpoint: self.endpoint,
            cookie_scope: self.cookie_scope,
            transport: self.transport,
            classifier,
            session_id: self.session_id,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The session id, if one is held.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Log in and take over the session id from the login redirect.
    ///
    /// The session cookie arrives through the transport's cookie store. On
    /// any failure the previously held identity is left as it was.
    pub async fn login(&mut self, username: &str, password: &str) -> StineResult<()> {
        let form = protocol::login_request(&self.config.app_name, username, password);
        let response = self.submit(form).await?;

        let session_id = response
            .header(REFRESH_HEADER)
            .and_then(|refresh| self.classifier.session_id(refresh))
            .ok_or_else(|| {
                warn!(status = response.status, "login response without usable refresh header");
                StineError::InvalidRefresh
            })?;

        info!("logged in as '{}' -- session {}", username, session_id);
        self.session_id = Some(session_id);
        Ok(())
    }

    /// The identity currently held: session id plus the session cookie as
    /// found in the transport's store right now.
    pub fn current_session(&self) -> StineResult<Identity> {
        let session_id = self.session_id.as_ref().ok_or(StineError::NoActiveSession)?;
        let cookie_token = self
            .transport
            .cookie(&self.cookie_scope, &self.config.cookie_name)
            .ok_or(StineError::NoActiveSession)?;
        Ok(Identity::new(session_id.clone(), cookie_token))
    }

    /// Resume a session obtained elsewhere. Nothing is validated; call
    /// [`session_valid`](Self::session_valid) to find out if it still works.
    pub fn set_session(&mut self, session_id: impl Into<String>, cookie_token: &str) {
        let session_id = session_id.into();
        debug!(session = %session_id, "resuming session");
        self.transport
            .set_cookie(&self.cookie_scope, &self.config.cookie_name, cookie_token);
        self.session_id = Some(session_id);
    }

    /// Shorthand for `set_session` with a stored identity.
    pub fn restore(&mut self, identity: &Identity) {
        self.set_session(identity.session_id.clone(), &identity.cookie_token);
    }

    /// Probe whether the held session is still accepted by the portal.
    ///
    /// A failed probe does not drop the session; re-login is the caller's call.
    pub async fn session_valid(&self) -> StineResult<()> {
        let session_id = self.require_session()?;
        let form = protocol::session_check_request(&self.config.app_name, session_id);
        let body = self.submit(form).await?.text();

        match self.classifier.validity(&body) {
            Validity::Alive => {
                debug!(session = %session_id, "session alive");
                Ok(())
            }
            Validity::TimedOut => {
                warn!(session = %session_id, "session timed out");
                Err(StineError::SessionTimeout)
            }
            Validity::AccessDenied => {
                warn!(session = %session_id, "session access denied");
                Err(StineError::AccessDenied)
            }
        }
    }

    /// Start a scheduler export and return the absolute download URL.
    ///
    /// `date` is `Y<yyyy>M<mm>` or `Y<yyyy>W<ww>` and must name a present or
    /// future period; the portal enforces that, not this method. How long
    /// the returned link stays usable is up to the portal.
    pub async fn scheduler_export(&self, date: &str) -> StineResult<String> {
        let session_id = self.require_session()?;
        let form = protocol::scheduler_export_request(&self.config.app_name, session_id, date);
        let body = self.submit(form).await?.text();

        let path = self
            .classifier
            .export_link(&body)
            .ok_or(StineError::ExportLinkNotFound)?;
        let url = self.config.absolute(&path);
        info!(date = %date, "scheduler export ready");
        Ok(url)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn require_session(&self) -> StineResult<&str> {
        self.session_id.as_deref().ok_or(StineError::NoActiveSession)
    }

    /// POST a form to the endpoint with the headers the portal insists on.
    async fn submit(&self, form: FormRequest) -> StineResult<FormResponse> {
        debug!(program = %form.program(), "submitting form");
        let request = FormPost {
            url: self.endpoint.clone(),
            headers: vec![
                ("Origin".to_string(), self.config.origin()),
                ("Referer".to_string(), self.config.referer()),
            ],
            form,
        };
        self.transport.post_form(&request).await
    }
}

//! Abstract HTTP transport for the portal protocol.
//!
//! The session logic never talks to the network directly. Implementations
//! perform one form POST per call and own a persistent cookie store.

use url::Url;

use crate::error::StineResult;
use crate::form::FormRequest;

/// One form submission to the portal.
#[derive(Debug, Clone)]
pub struct FormPost {
    pub url: Url,
    /// Extra request headers (`Origin`, `Referer`).
    pub headers: Vec<(String, String)>,
    pub form: FormRequest,
}

/// A raw portal response.
#[derive(Debug, Clone, Default)]
pub struct FormResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl FormResponse {
    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP collaborator with a persistent cookie jar.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// POST a form-encoded body and return the full response.
    async fn post_form(&self, request: &FormPost) -> StineResult<FormResponse>;

    /// Value of the cookie `name` that the store would send to `url`.
    fn cookie(&self, url: &Url, name: &str) -> Option<String>;

    /// Store `name=value` scoped to `url`'s host and path.
    fn set_cookie(&self, url: &Url, name: &str, value: &str);
}

/// Pick one cookie out of a `Cookie` request header value (`a=1; b=2`).
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k.trim() == name).then(|| v.trim().to_string())
    })
}

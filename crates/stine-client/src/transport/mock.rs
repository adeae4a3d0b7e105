use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use stine_core::error::{StineResult, TransportError};
use stine_core::transport::{FormPost, FormResponse, Transport};
use url::Url;

/// A mock transport for testing. Returns queued responses in order and
/// records every request it receives.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<StineResult<FormResponse>>>,
    requests: Mutex<Vec<FormPost>>,
    cookies: Mutex<HashMap<(String, String), String>>,
    /// Cookie to "receive" alongside the next successful response.
    pending_cookie: Mutex<Option<(Url, String, String)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: FormResponse) -> Self {
        self.push(Ok(response));
        self
    }

    pub fn with_error(self, error: TransportError) -> Self {
        self.push(Err(error.into()));
        self
    }

    /// Queue a response that only carries a body.
    pub fn with_body(self, body: &str) -> Self {
        self.with_response(FormResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        })
    }

    /// Queue a response that only carries one header.
    pub fn with_header(self, name: &str, value: &str) -> Self {
        self.with_response(FormResponse {
            status: 200,
            headers: vec![(name.to_string(), value.to_string())],
            body: Vec::new(),
        })
    }

    /// Have the next successful response set a cookie, like a server would.
    pub fn with_set_cookie(self, url: &Url, name: &str, value: &str) -> Self {
        *self.pending_cookie.lock().unwrap() =
            Some((url.clone(), name.to_string(), value.to_string()));
        self
    }

    fn push(&self, response: StineResult<FormResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<FormPost> {
        self.requests.lock().unwrap().clone()
    }

    fn scope(url: &Url) -> String {
        format!("{}{}", url.host_str().unwrap_or_default(), url.path())
    }
}

impl Transport for MockTransport {
    async fn post_form(&self, request: &FormPost) -> StineResult<FormResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        let response = next.unwrap_or_else(|| {
            Err(TransportError::Request("no mock responses remaining".to_string()).into())
        })?;
        if let Some((url, name, value)) = self.pending_cookie.lock().unwrap().take() {
            self.set_cookie(&url, &name, &value);
        }
        Ok(response)
    }

    fn cookie(&self, url: &Url, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .unwrap()
            .get(&(Self::scope(url), name.to_string()))
            .cloned()
    }

    fn set_cookie(&self, url: &Url, name: &str, value: &str) {
        self.cookies
            .lock()
            .unwrap()
            .insert((Self::scope(url), name.to_string()), value.to_string());
    }
}

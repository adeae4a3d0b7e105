//! reqwest-backed transport with a persistent cookie jar.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use stine_core::error::{StineError, StineResult, TransportError};
use stine_core::transport::{find_cookie, FormPost, FormResponse, Transport};
use stine_core::PortalConfig;
use tracing::debug;
use url::Url;

/// HTTP transport used against the live portal.
pub struct HttpTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl HttpTransport {
    /// Build a client with a fresh cookie jar and the portal's timeout.
    pub fn new(config: &PortalConfig) -> StineResult<Self> {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| StineError::Transport(TransportError::Request(e.to_string())))?;
        Ok(Self { client, jar })
    }
}

fn map_reqwest(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(e.to_string())
    }
}

impl Transport for HttpTransport {
    async fn post_form(&self, request: &FormPost) -> StineResult<FormResponse> {
        debug!(url = %request.url, program = %request.form.program(), "POST");

        let mut builder = self
            .client
            .post(request.url.clone())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(request.form.encode());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(map_reqwest)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        debug!(status, bytes = body.len(), "response");
        Ok(FormResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    fn cookie(&self, url: &Url, name: &str) -> Option<String> {
        let header = self.jar.cookies(url)?;
        find_cookie(header.to_str().ok()?, name)
    }

    /// Goes through `Set-Cookie` parsing, so a value is cut at the first `;`
    /// and loses surrounding whitespace.
    fn set_cookie(&self, url: &Url, name: &str, value: &str) {
        let cookie = format!("{name}={value}; Path={}", url.path());
        self.jar.add_cookie_str(&cookie, url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stine_core::FormRequest;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request with `response` and hand back the raw request.
    async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= pos + 4 + len {
                        break;
                    }
                }
            }
            sock.write_all(response.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
            String::from_utf8_lossy(&buf).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    fn portal_post(config: &PortalConfig) -> FormPost {
        FormPost {
            url: config.endpoint_url().unwrap(),
            headers: vec![
                ("Origin".to_string(), config.origin()),
                ("Referer".to_string(), config.referer()),
            ],
            form: FormRequest::new(&config.app_name, "EXTERNALPAGES").arguments("-N1"),
        }
    }

    #[tokio::test]
    async fn post_form_sends_portal_headers_and_keeps_server_cookie() {
        let (host, server) = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Set-Cookie: cnsc=SRV; Path=/scripts\r\n\
             Refresh: 0;URL=/x?ARGUMENTS=-N7,-N8\r\n\
             Content-Length: 2\r\n\
             Connection: close\r\n\r\nok",
        )
        .await;
        let config = PortalConfig::with_host(host.clone());
        let transport = HttpTransport::new(&config).unwrap();

        let response = transport.post_form(&portal_post(&config)).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header("refresh"), Some("0;URL=/x?ARGUMENTS=-N7,-N8"));
        assert_eq!(response.text(), "ok");
        assert_eq!(
            transport.cookie(&config.cookie_url().unwrap(), "cnsc").as_deref(),
            Some("SRV")
        );

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /scripts/mgrqispi.dll "));
        assert!(lower.contains(&format!("origin: {host}\r\n")));
        assert!(lower.contains(&format!("referer: {host}/\r\n")));
        assert!(lower.contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.contains("APPNAME=CampusNet"));
        assert!(request.contains("PRGNAME=EXTERNALPAGES"));
    }

    #[tokio::test]
    async fn injected_cookie_goes_out_on_the_wire() {
        let (host, server) =
            serve_once("HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let config = PortalConfig::with_host(host);
        let transport = HttpTransport::new(&config).unwrap();
        transport.set_cookie(&config.cookie_url().unwrap(), "cnsc", "MINE");

        transport.post_form(&portal_post(&config)).await.unwrap();

        let request = server.await.unwrap().to_lowercase();
        assert!(request.contains("cookie: cnsc=mine"));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        // Bound but never answered.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = PortalConfig {
            timeout_secs: 1,
            ..PortalConfig::with_host(format!("http://{}", listener.local_addr().unwrap()))
        };
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport.post_form(&portal_post(&config)).await.unwrap_err();

        assert!(matches!(err, StineError::Transport(TransportError::Timeout)));
        drop(listener);
    }

    #[test]
    fn injected_value_is_cut_at_semicolon() {
        let transport = HttpTransport::new(&PortalConfig::default()).unwrap();
        let scope = Url::parse("https://www.stine.uni-hamburg.de/scripts").unwrap();
        transport.set_cookie(&scope, "cnsc", "a;b");
        assert_eq!(transport.cookie(&scope, "cnsc").as_deref(), Some("a"));
        transport.set_cookie(&scope, "cnsc", " x ");
        assert_eq!(transport.cookie(&scope, "cnsc").as_deref(), Some("x"));
    }

    #[test]
    fn injected_cookie_is_visible_under_its_path() {
        let transport = HttpTransport::new(&PortalConfig::default()).unwrap();
        let scope = Url::parse("https://www.stine.uni-hamburg.de/scripts").unwrap();
        transport.set_cookie(&scope, "cnsc", "ABC");

        assert_eq!(transport.cookie(&scope, "cnsc").as_deref(), Some("ABC"));

        let endpoint = Url::parse("https://www.stine.uni-hamburg.de/scripts/mgrqispi.dll").unwrap();
        assert_eq!(transport.cookie(&endpoint, "cnsc").as_deref(), Some("ABC"));
    }

    #[test]
    fn cookie_replaced_on_second_injection() {
        let transport = HttpTransport::new(&PortalConfig::default()).unwrap();
        let scope = Url::parse("https://www.stine.uni-hamburg.de/scripts").unwrap();
        transport.set_cookie(&scope, "cnsc", "old");
        transport.set_cookie(&scope, "cnsc", "new");
        assert_eq!(transport.cookie(&scope, "cnsc").as_deref(), Some("new"));
    }

    #[test]
    fn no_cookie_for_other_host() {
        let transport = HttpTransport::new(&PortalConfig::default()).unwrap();
        let scope = Url::parse("https://www.stine.uni-hamburg.de/scripts").unwrap();
        transport.set_cookie(&scope, "cnsc", "ABC");
        let other = Url::parse("https://example.com/scripts").unwrap();
        assert_eq!(transport.cookie(&other, "cnsc"), None);
    }
}

//! Interpretation of portal responses.
//!
//! The portal answers with server-rendered HTML and redirect headers, never
//! structured status codes. Everything here is pattern matching over that
//! markup and breaks silently if the markup changes.

use std::sync::LazyLock;

use regex::Regex;

static REFRESH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ARGUMENTS=-N(\d+),-N(\d+)").expect("valid refresh regex"));

static FILETRANSFER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href=["'](/scripts/filetransfer\.exe\?[^"']+)["']"#)
        .expect("valid filetransfer regex")
});

pub const TIMEOUT_MARKER: &str = "<h1>Timeout!</h1>";
pub const ACCESS_DENIED_MARKER: &str = "<h1>Zugang verweigert</h1>";

/// Outcome of a session liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Alive,
    TimedOut,
    AccessDenied,
}

/// Extracts protocol outcomes from raw responses.
pub trait ResponseClassifier: Send + Sync {
    /// Session id from a login `refresh` header.
    fn session_id(&self, refresh: &str) -> Option<String>;

    /// Liveness verdict for a decoded `EXTERNALPAGES` body.
    fn validity(&self, body: &str) -> Validity;

    /// Host-relative download path from a scheduler export body.
    fn export_link(&self, body: &str) -> Option<String>;
}

/// Regex and substring matching against the portal's current markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupClassifier;

impl ResponseClassifier for MarkupClassifier {
    fn session_id(&self, refresh: &str) -> Option<String> {
        let caps = REFRESH_RE.captures(refresh)?;
        // Both groups must be present even though only the first is used.
        caps.get(2)?;
        caps.get(1).map(|m| m.as_str().to_string())
    }

    fn validity(&self, body: &str) -> Validity {
        if body.contains(TIMEOUT_MARKER) {
            Validity::TimedOut
        } else if body.contains(ACCESS_DENIED_MARKER) {
            Validity::AccessDenied
        } else {
            Validity::Alive
        }
    }

    fn export_link(&self, body: &str) -> Option<String> {
        FILETRANSFER_RE
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_takes_first_group() {
        let c = MarkupClassifier;
        let header = "0;URL=/scripts/mgrqispi.dll?APPNAME=CampusNet&PRGNAME=STARTPAGE_DISPATCH&ARGUMENTS=-N000123,-N000456,-N000000000000000";
        assert_eq!(c.session_id(header).as_deref(), Some("000123"));
    }

    #[test]
    fn refresh_needs_two_groups() {
        let c = MarkupClassifier;
        assert_eq!(c.session_id("0;URL=...ARGUMENTS=-N000123"), None);
        assert_eq!(c.session_id("0;URL=...ARGUMENTS=-N000123,-Nabc"), None);
        assert_eq!(c.session_id(""), None);
    }

    #[test]
    fn timeout_wins_over_access_denied() {
        let c = MarkupClassifier;
        let body = format!("<html>{ACCESS_DENIED_MARKER}{TIMEOUT_MARKER}</html>");
        assert_eq!(c.validity(&body), Validity::TimedOut);
    }

    #[test]
    fn access_denied_and_alive() {
        let c = MarkupClassifier;
        assert_eq!(
            c.validity("<body><h1>Zugang verweigert</h1></body>"),
            Validity::AccessDenied
        );
        assert_eq!(c.validity("<h1>Willkommen</h1>"), Validity::Alive);
        // Near misses do not count.
        assert_eq!(c.validity("<h1>timeout!</h1>"), Validity::Alive);
    }

    #[test]
    fn export_link_with_either_quote() {
        let c = MarkupClassifier;
        assert_eq!(
            c.export_link(r#"<a href="/scripts/filetransfer.exe?x=1&y=2">ics</a>"#).as_deref(),
            Some("/scripts/filetransfer.exe?x=1&y=2")
        );
        assert_eq!(
            c.export_link("<a href='/scripts/filetransfer.exe?id=9'>").as_deref(),
            Some("/scripts/filetransfer.exe?id=9")
        );
    }

    #[test]
    fn export_link_requires_query() {
        let c = MarkupClassifier;
        assert_eq!(c.export_link(r#"href="/scripts/filetransfer.exe""#), None);
        assert_eq!(c.export_link(r#"href="/scripts/other.exe?x=1""#), None);
        assert_eq!(c.export_link("no links here"), None);
    }
}

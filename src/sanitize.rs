//! Input sanitization and format validation.
//!
//! Denylist scrubbing of untrusted strings before they reach business logic.
//! These functions never fail; bad input comes out smaller, not as an error.
//! `sanitize_html` is best effort and documented as such — it is not a proof
//! of XSS safety.

use once_cell::sync::Lazy;
use regex::Regex;

static JS_PROTOCOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("static pattern"));

static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)on\w+=").expect("static pattern"));

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("static pattern"));

static IFRAME_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe>").expect("static pattern"));

static HTML_EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\son\w+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).expect("static pattern")
});

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9\s\-().]{6,19}$").expect("static pattern"));

/// Strip angle brackets, `javascript:` protocols, and inline event handler
/// patterns from a string, then trim it.
///
/// Runs the strip passes to a fixpoint: removing one pattern can splice a new
/// one together (`"javasc" + "ript:"`), and idempotence is part of the
/// contract.
pub fn sanitize_string(input: &str) -> String {
    let mut current = input.trim().to_string();
    loop {
        let mut next = current.replace(['<', '>'], "");
        next = JS_PROTOCOL.replace_all(&next, "").into_owned();
        next = EVENT_HANDLER.replace_all(&next, "").into_owned();
        let next = next.trim().to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Normalize an email address for storage or lookup.
pub fn sanitize_email(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Remove script/iframe blocks (including their content), inline event
/// handlers, and `javascript:` URIs from an HTML fragment.
///
/// Best-effort denylist; rendering untrusted HTML still requires escaping or
/// a real sanitizer downstream.
pub fn sanitize_html(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let mut next = SCRIPT_BLOCK.replace_all(&current, "").into_owned();
        next = IFRAME_BLOCK.replace_all(&next, "").into_owned();
        next = HTML_EVENT_HANDLER.replace_all(&next, "").into_owned();
        next = JS_PROTOCOL.replace_all(&next, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Format predicate only; no deliverability check.
pub fn validate_email(input: &str) -> bool {
    EMAIL.is_match(input)
}

/// Format predicate for phone numbers with optional leading `+`.
pub fn validate_phone_number(input: &str) -> bool {
    PHONE.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_angle_brackets_and_trims() {
        assert_eq!(sanitize_string("  <b>hello</b>  "), "bhello/b");
    }

    #[test]
    fn strips_script_tag_and_js_protocol() {
        assert_eq!(
            sanitize_string("<script>alert(1)</script>"),
            "scriptalert(1)/script"
        );

        assert_eq!(sanitize_string("javascript:alert(1)"), "alert(1)");
        assert_eq!(sanitize_string("JaVaScRiPt:alert(1)"), "alert(1)");
    }

    #[test]
    fn strips_event_handlers() {
        let cleaned = sanitize_string("a onclick=steal() b");
        assert!(!cleaned.contains("onclick="));
    }

    #[test]
    fn sanitize_string_is_idempotent() {
        let cases = [
            "  <b>hi</b>  ",
            "javasc<x>ript:alert(1)",
            "ononclick=click=payload",
            "plain text",
            "",
            "jAvAsCrIpT:jAvAsCrIpT:x",
        ];
        for case in cases {
            let once = sanitize_string(case);
            assert_eq!(sanitize_string(&once), once, "not idempotent for {case:?}");
        }
    }

    #[test]
    fn email_is_lowercased_and_trimmed() {
        assert_eq!(sanitize_email("  User@Example.COM "), "user@example.com");
    }

    #[test]
    fn html_removes_script_blocks_with_content() {
        let html = r#"<p>ok</p><script type="text/javascript">evil()</script><p>more</p>"#;
        let cleaned = sanitize_html(html);
        assert_eq!(cleaned, "<p>ok</p><p>more</p>");
    }

    #[test]
    fn html_removes_iframes_and_handlers() {
        let html = r#"<div onclick="x()"><iframe src="a">inner</iframe>text</div>"#;
        let cleaned = sanitize_html(html);
        assert!(!cleaned.contains("iframe"));
        assert!(!cleaned.contains("onclick"));
        assert!(cleaned.contains("text"));
    }

    #[test]
    fn html_removes_javascript_uris() {
        let cleaned = sanitize_html(r#"<a href="javascript:steal()">x</a>"#);
        assert!(!cleaned.to_lowercase().contains("javascript:"));
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("a.b+c@sub.domain.org"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a b@example.com"));
        assert!(!validate_email("user@nodot"));
    }

    #[test]
    fn phone_validation() {
        assert!(validate_phone_number("+1 (555) 123-4567"));
        assert!(validate_phone_number("5551234567"));
        assert!(!validate_phone_number("12345"));
        assert!(!validate_phone_number("call me"));
    }
}

//! Steps 2-5: replace hand-built cookie forwarding with the helper call.
//!
//! Every pattern matches one literal shape. Reordered keys, renamed
//! variables, or extra fields are left for a human to migrate.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Comment left where the cookie was read from the incoming request.
pub const EXTRACTION_MARKER: &str = "// Headers now built with buildBFFHeaders() including subdomain";

/// Expression that replaces a matched header object.
pub const HELPER_CALL: &str = "headers: await buildBFFHeaders()";

/// `const cookieHeader = request.headers.get("cookie") ... ;` on a single line.
static COOKIE_EXTRACTION: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r#"const cookieHeader = request\.headers\.get\(["']cookie["']\).*?;"#) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid cookie extraction regex: {err}"),
    }
});

/// `headers: { "Content-Type": "application/json", Cookie: cookieHeader }`
static COOKIE_HEADERS: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"headers:\s*\{\s*",
        r#"["']Content-Type["']: ["']application/json["']"#,
        r"\s*,\s*Cookie:\s*cookieHeader",
        r"\s*\}",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid cookie headers regex: {err}"),
    }
});

/// `headers: { "Content-Type": "application/json" }`
static JSON_HEADERS: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(concat!(
        r"headers:\s*\{\s*",
        r#"["']Content-Type["']: ["']application/json["']"#,
        r"\s*\}",
    )) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid JSON headers regex: {err}"),
    }
});

/// `, Cookie: cookieHeader` left inside a larger header object.
static COOKIE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r",\s*Cookie:\s*cookieHeader") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid cookie field regex: {err}"),
    }
});

/// Step 2: replace the cookie read with [`EXTRACTION_MARKER`].
#[must_use]
pub fn strip_cookie_extraction(content: &str) -> Cow<'_, str> {
    COOKIE_EXTRACTION.replace_all(content, EXTRACTION_MARKER)
}

/// Step 3: replace the two-key JSON + cookie header object.
#[must_use]
pub fn replace_cookie_headers(content: &str) -> Cow<'_, str> {
    COOKIE_HEADERS.replace_all(content, HELPER_CALL)
}

/// Step 4: replace the JSON-only header object.
#[must_use]
pub fn replace_json_headers(content: &str) -> Cow<'_, str> {
    JSON_HEADERS.replace_all(content, HELPER_CALL)
}

/// Step 5: drop any remaining `Cookie: cookieHeader` field.
#[must_use]
pub fn strip_cookie_fields(content: &str) -> Cow<'_, str> {
    COOKIE_FIELD.replace_all(content, "")
}

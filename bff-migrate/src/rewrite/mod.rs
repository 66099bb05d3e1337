//! Text rewrite pipeline for route handlers.
//!
//! Five regex/line steps run in a fixed order over the whole file. Each step
//! sees the output of the one before it:
//!
//! 1. [`inject_import`] adds the helper import.
//! 2. [`strip_cookie_extraction`] removes the manual cookie read.
//! 3. [`replace_cookie_headers`] replaces `{ Content-Type, Cookie }` objects.
//! 4. [`replace_json_headers`] replaces `{ Content-Type }` objects.
//! 5. [`strip_cookie_fields`] drops cookie fields left in larger objects.
//!
//! No syntax tree is built. Shapes outside the patterns are left untouched.

pub mod headers;
pub mod imports;

pub use headers::{
    EXTRACTION_MARKER, HELPER_CALL, replace_cookie_headers, replace_json_headers,
    strip_cookie_extraction, strip_cookie_fields,
};
pub use imports::{HELPER_IMPORT_LINE, HELPER_IMPORT_SOURCE, inject_import};

/// Run all rewrite steps.
///
/// Returns `None` when no step changed the content, which callers must
/// report as "No pattern matched" rather than as an update.
#[must_use]
pub fn rewrite_route(content: &str) -> Option<String> {
    let rewritten = inject_import(content);
    let rewritten = strip_cookie_extraction(&rewritten).into_owned();
    let rewritten = replace_cookie_headers(&rewritten).into_owned();
    let rewritten = replace_json_headers(&rewritten).into_owned();
    let rewritten = strip_cookie_fields(&rewritten).into_owned();

    if rewritten == content {
        None
    } else {
        Some(rewritten)
    }
}

/// True when `content` calls the helper but never imports it.
///
/// Files without any import line get their headers rewritten but no import,
/// so they need a manual fix before they compile.
#[must_use]
pub fn helper_import_missing(content: &str) -> bool {
    content.contains(HELPER_CALL) && !content.contains(HELPER_IMPORT_SOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::HELPER_MARKER;

    const COOKIE_ROUTE: &str = concat!(
        "import { NextRequest, NextResponse } from \"next/server\";\n",
        "\n",
        "export async function GET(request: NextRequest) {\n",
        "  const cookieHeader = request.headers.get(\"cookie\") || \"\";\n",
        "  const res = await fetch(`${BACKEND}/users`, {\n",
        "    headers: { \"Content-Type\": \"application/json\", Cookie: cookieHeader },\n",
        "  });\n",
        "  return NextResponse.json(await res.json());\n",
        "}\n",
    );

    #[test]
    fn test_rewrite_cookie_route() {
        let out = rewrite_route(COOKIE_ROUTE).unwrap();
        assert_eq!(
            out,
            concat!(
                "import { NextRequest, NextResponse } from \"next/server\";\n",
                "import { buildBFFHeaders } from \"@/lib/bffHelpers\";\n",
                "\n",
                "export async function GET(request: NextRequest) {\n",
                "  // Headers now built with buildBFFHeaders() including subdomain\n",
                "  const res = await fetch(`${BACKEND}/users`, {\n",
                "    headers: await buildBFFHeaders(),\n",
                "  });\n",
                "  return NextResponse.json(await res.json());\n",
                "}\n",
            )
        );
        assert!(!out.contains("cookieHeader"));
    }

    #[test]
    fn test_rewrite_json_only_route() {
        let src = concat!(
            "import { NextRequest, NextResponse } from \"next/server\";\n",
            "export async function POST(request: NextRequest) {\n",
            "  const res = await fetch(url, {\n",
            "    method: \"POST\",\n",
            "    headers: {\n",
            "      \"Content-Type\": \"application/json\"\n",
            "    },\n",
            "    body: JSON.stringify(await request.json()),\n",
            "  });\n",
            "}\n",
        );
        let out = rewrite_route(src).unwrap();
        assert_eq!(out.matches("await buildBFFHeaders()").count(), 1);
        assert!(!out.contains("\"Content-Type\": \"application/json\""));
        assert!(out.contains("    headers: await buildBFFHeaders(),\n    body:"));
    }

    #[test]
    fn test_every_literal_is_replaced() {
        let src = concat!(
            "import { z } from \"zod\";\n",
            "await fetch(a, { headers: { \"Content-Type\": \"application/json\" } });\n",
            "await fetch(b, { headers: { \"Content-Type\": \"application/json\", Cookie: cookieHeader } });\n",
        );
        let out = rewrite_route(src).unwrap();
        assert_eq!(out.matches(HELPER_CALL).count(), 2);
        assert!(!out.contains("Content-Type"));
    }

    #[test]
    fn test_unmatched_shape_without_imports_is_none() {
        let src = concat!(
            "export async function GET() {\n",
            "  await fetch(url, { headers: { \"Content-Type\": \"application/json\", \"X-Tenant\": t, Authorization: token } });\n",
            "}\n",
        );
        assert_eq!(rewrite_route(src), None);
    }

    #[test]
    fn test_import_alone_counts_as_a_change() {
        let src = "import { z } from \"zod\";\nawait fetch(url, { headers: custom });\n";
        let out = rewrite_route(src).unwrap();
        assert!(out.contains(HELPER_IMPORT_LINE));
        assert!(!out.contains(HELPER_CALL));
    }

    #[test]
    fn test_no_import_gap_is_preserved() {
        let src = "export async function GET() {\n  await fetch(url, { headers: { \"Content-Type\": \"application/json\" } });\n}\n";
        let out = rewrite_route(src).unwrap();
        assert!(out.contains(HELPER_CALL));
        assert!(!out.contains(HELPER_IMPORT_LINE));
        assert!(helper_import_missing(&out));
    }

    #[test]
    fn test_helper_import_missing_false_after_normal_rewrite() {
        let out = rewrite_route(COOKIE_ROUTE).unwrap();
        assert!(!helper_import_missing(&out));
        assert!(!helper_import_missing(COOKIE_ROUTE));
    }

    #[test]
    fn test_orphan_cookie_field_is_removed() {
        let src = concat!(
            "import { z } from \"zod\";\n",
            "await fetch(url, { headers: { \"Content-Type\": \"application/json\", Cookie: cookieHeader, \"X-Id\": id } });\n",
        );
        let out = rewrite_route(src).unwrap();
        assert!(out.contains(r#"headers: { "Content-Type": "application/json", "X-Id": id }"#));
        assert!(!out.contains("Cookie"));
    }

    #[test]
    fn test_rewritten_output_is_already_updated() {
        let out = rewrite_route(COOKIE_ROUTE).unwrap();
        assert!(out.contains(HELPER_MARKER));
    }
}

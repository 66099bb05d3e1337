//! Step 1: import the header helper.

use std::borrow::Cow;

/// Present once the helper module is imported.
pub const HELPER_IMPORT_SOURCE: &str = r#"from "@/lib/bffHelpers""#;

/// Import line added to migrated files.
pub const HELPER_IMPORT_LINE: &str = r#"import { buildBFFHeaders } from "@/lib/bffHelpers";"#;

/// Prefix that marks a file importing the Next.js request/response types.
const FRAMEWORK_IMPORT_PREFIX: &str = "import { NextRequest, NextResponse }";

/// Full framework import line the helper import is placed after.
const FRAMEWORK_IMPORT_LINE: &str = r#"import { NextRequest, NextResponse } from "next/server";"#;

/// Add the helper import if it is missing.
///
/// Placement, in order of preference:
/// 1. Right after the `next/server` import. If the prefix is present but the
///    line is spelled differently (quotes, extra names), nothing is added and
///    the fallback is not tried.
/// 2. Right after the first line that starts with `import`.
/// 3. Nowhere, when the file has no import line at all.
#[must_use]
pub fn inject_import(content: &str) -> Cow<'_, str> {
    if content.contains(HELPER_IMPORT_SOURCE) {
        return Cow::Borrowed(content);
    }

    let crlf = content.contains("\r\n");

    if content.contains(FRAMEWORK_IMPORT_PREFIX) {
        if !content.contains(FRAMEWORK_IMPORT_LINE) {
            return Cow::Borrowed(content);
        }
        return Cow::Owned(content.replace(
            FRAMEWORK_IMPORT_LINE,
            &format!(
                "{FRAMEWORK_IMPORT_LINE}{}{HELPER_IMPORT_LINE}",
                if crlf { "\r\n" } else { "\n" }
            ),
        ));
    }

    // Lines keep their `\r`, so the inserted line needs one too.
    let inserted = if crlf {
        format!("{HELPER_IMPORT_LINE}\r")
    } else {
        HELPER_IMPORT_LINE.to_owned()
    };
    let mut lines: Vec<&str> = content.split('\n').collect();
    match lines.iter().position(|line| line.starts_with("import")) {
        Some(idx) => {
            lines.insert(idx + 1, &inserted);
            Cow::Owned(lines.join("\n"))
        }
        None => Cow::Borrowed(content),
    }
}

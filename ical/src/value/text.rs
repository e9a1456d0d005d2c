// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TEXT value escaping as defined in RFC 5545 Section 3.3.11.
//!
//! ```txt
//! text       = *(TSAFE-CHAR / ":" / DQUOTE / ESCAPED-CHAR)
//! ; Folded according to description above
//!
//! ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
//! ; \\ encodes \, \N or \n encodes newline
//! ; \; encodes ;, \, encodes ,
//! ```

/// Decode a TEXT value.
///
/// Unknown escape sequences are kept verbatim, a trailing lone backslash too.
#[must_use]
pub fn unescape_text(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(c @ ('\\' | ';' | ',')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Encode a TEXT value, the inverse of [`unescape_text`].
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            ';' => out.push_str(r"\;"),
            ',' => out.push_str(r"\,"),
            '\n' => out.push_str(r"\n"),
            '\r' => {} // Skip CR characters
            _ => out.push(c),
        }
    }
    out
}

/// Split a multi-valued TEXT list on unescaped commas, decoding each item.
#[must_use]
pub fn split_text_list(src: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in src.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ',' => {
                items.push(unescape_text(src.get(start..i).unwrap_or_default()));
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(unescape_text(src.get(start..).unwrap_or_default()));
    items
}

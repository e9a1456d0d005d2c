// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parameter formatting, RFC 5545 Section 3.2 with RFC 6868 caret encoding.
//!
//! ```txt
//! param       = param-name "=" param-value *("," param-value)
//! param-value = paramtext / quoted-string
//! ```

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::syntax::RawParameter;

/// Format all parameters, each prefixed with a semicolon.
pub fn write_parameters<W: Write>(
    f: &mut Formatter<W>,
    parameters: &[RawParameter],
) -> io::Result<()> {
    for param in parameters {
        write!(f, ";{}=", param.name)?;
        for (i, value) in param.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", encode_parameter_value(value))?;
        }
    }
    Ok(())
}

/// Encode one parameter value: caret-escape newlines, double quotes and
/// carets, then quote the value if it contains `;`, `:` or `,`.
#[must_use]
pub fn encode_parameter_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '^' => encoded.push_str("^^"),
            '\n' => encoded.push_str("^n"),
            '"' => encoded.push_str("^'"),
            '\r' => {}
            _ => encoded.push(c),
        }
    }

    if encoded.contains([';', ':', ',']) {
        format!("\"{encoded}\"")
    } else {
        encoded
    }
}

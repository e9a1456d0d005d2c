// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property content line formatting.
//!
//! ```txt
//! contentline = name *(";" param ) ":" value CRLF
//! ```

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::formatter::parameter::write_parameters;
use crate::syntax::RawProperty;

/// Format one property as a CRLF terminated content line.
///
/// The value is written as is, it is expected to be encoded already.
pub fn write_property<W: Write>(f: &mut Formatter<W>, property: &RawProperty) -> io::Result<()> {
    write!(f, "{}", property.name)?;
    write_parameters(f, &property.parameters)?;
    write!(f, ":{}", property.value)?;
    f.writeln()
}

#[cfg(test)]
mod tests {
    use crate::formatter::{FormatOptions, format_property};
    use crate::syntax::{RawParameter, RawProperty};

    #[test]
    fn formats_content_line() {
        let mut prop = RawProperty::new("ATTENDEE", "mailto:a@example.com");
        prop.parameters.push(RawParameter::new("CN", "Doe, Jane"));
        prop.parameters.push(RawParameter {
            name: "DELEGATED-TO".to_owned(),
            values: vec!["mailto:b@example.com".to_owned(), "mailto:c@example.com".to_owned()],
        });
        let out = FormatOptions::default()
            .folding(None)
            .property_to_string(&prop)
            .unwrap();
        assert_eq!(
            out,
            "ATTENDEE;CN=\"Doe, Jane\";DELEGATED-TO=\"mailto:b@example.com\",\"mailto:c@example.com\":mailto:a@example.com\r\n"
        );
    }

    #[test]
    fn formats_empty_value() {
        let prop = RawProperty::new("X-EMPTY", "");
        assert_eq!(format_property(&prop).unwrap(), "X-EMPTY:\r\n");
    }
}

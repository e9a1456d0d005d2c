// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! This module writes raw component trees back to the RFC 5545 text format,
//! to any `std::io::Write` implementer, folding long content lines.
//!
//! # Example
//!
//! ```
//! use calmodel_ical::{formatter::format, parse};
//!
//! let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
//! let calendars = parse(input).unwrap();
//! let ics_string = format(&calendars[0]).unwrap();
//! assert_eq!(ics_string, input);
//! ```

mod component;
mod parameter;
mod property;

use std::io::{self, Write};

pub use parameter::encode_parameter_value;

use crate::formatter::component::write_component;
use crate::formatter::property::write_property;
use crate::syntax::{RawComponent, RawProperty};

/// Convenience function to format a component to a `String` (uses default options).
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format(component: &RawComponent) -> io::Result<String> {
    FormatOptions::default().write_to_string(component)
}

/// Format a single property as a content line, CRLF terminated.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the output
/// contains invalid UTF-8 data.
pub fn format_property(property: &RawProperty) -> io::Result<String> {
    FormatOptions::default().property_to_string(property)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Write a component tree to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, component: &RawComponent, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        formatter.write_component(component)?;
        formatter.flush()
    }

    /// Write a component tree to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn write_to_string(&self, component: &RawComponent) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(component, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write a single property to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid UTF-8 data.
    pub fn property_to_string(&self, property: &RawProperty) -> io::Result<String> {
        let mut buffer = Vec::new();
        let mut formatter = Formatter::new(&mut buffer, *self);
        formatter.write_property(property)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// Get the folding sequence for this style.
    #[must_use]
    pub(crate) const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }

    /// Get the length of the continuation character after CRLF.
    #[must_use]
    pub(crate) const fn continuation_len() -> usize {
        1 // Both SPACE and TAB are 1 byte
    }
}

/// iCalendar formatter that writes to any `Write` implementer.
///
/// Everything written through its `Write` impl is folded: a fold is never
/// placed inside a UTF-8 sequence or between a backslash and the character it
/// escapes.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
    /// Current line length in bytes (excluding the pending CRLF).
    line_length: usize,
    /// The last byte written was a backslash starting an escape sequence.
    in_escape: bool,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub const fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
            in_escape: false,
        }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a component and its descendants.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_component(&mut self, component: &RawComponent) -> io::Result<()> {
        write_component(self, component)
    }

    /// Write one property content line.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_property(&mut self, property: &RawProperty) -> io::Result<()> {
        write_property(self, property)
    }

    /// Write a CRLF line ending.
    pub(crate) fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        self.in_escape = false;
        Ok(())
    }

    /// Insert line folding: CRLF + whitespace.
    ///
    /// This inserts the RFC 5545 line folding sequence and updates the
    /// line length counter (the whitespace after CRLF counts as 1 byte).
    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer
            .write_all(self.options.folding_style.as_bytes())?;
        self.line_length = FoldingStyle::continuation_len();
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding else {
            // Folding disabled, write directly
            self.writer.write_all(buf)?;
            return Ok(buf.len());
        };

        let mut pos = 0;
        while let Some(&byte) = buf.get(pos) {
            let left = buf.len() - pos;
            // (bytes written now, bytes that must fit on the current line)
            let (len, reserve) = if self.in_escape {
                (utf8_len(byte).min(left), 0)
            } else if byte == b'\\' {
                match buf.get(pos + 1) {
                    Some(&next) => {
                        let len = (1 + utf8_len(next)).min(left);
                        (len, len)
                    }
                    // The escaped character arrives with the next write
                    None => (1, 2),
                }
            } else {
                let len = utf8_len(byte).min(left);
                (len, len)
            };

            if reserve > 0
                && self.line_length + reserve > max_len
                && self.line_length > FoldingStyle::continuation_len()
            {
                self.insert_fold()?;
            }

            self.writer
                .write_all(buf.get(pos..pos + len).unwrap_or_default())?;
            self.line_length += len;
            self.in_escape = !self.in_escape && byte == b'\\' && len == 1;
            pos += len;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Length of the UTF-8 sequence introduced by a leading byte.
///
/// - 0xxxxxxx: 1 byte (ASCII)
/// - 110xxxxx: 2 bytes
/// - 1110xxxx: 3 bytes
/// - 11110xxx: 4 bytes
/// - 10xxxxxx: stray continuation byte, written alone
const fn utf8_len(byte: u8) -> usize {
    match byte {
        0xF0..=0xFF => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}

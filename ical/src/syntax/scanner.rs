// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! This module provides a linear scanner that converts token streams into
//! content lines, one per unfolded physical line.
//!
//! # Content Line Format
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! Parameter values are decoded with the RFC 6868 caret escapes (`^n`, `^'`,
//! `^^`) so that the formatter can encode them back.

use std::fmt;
use std::iter::Peekable;

use crate::syntax::Span;
use crate::syntax::lexer::{SpannedToken, Token};

/// A scanned iCalendar content line.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Property name (e.g., "DTSTART", "SUMMARY"), original casing
    pub name: String,

    /// Property parameters (semicolon-separated)
    pub parameters: Vec<ScannedParameter>,

    /// Property value, unfolded but otherwise untouched
    pub value: String,

    /// Span of the entire content line (from name start to newline end)
    pub span: Span,

    /// Error information if parsing this line failed
    pub error: Option<ContentLineError>,
}

impl ContentLine {
    /// Check if this content line is valid (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// A scanned parameter from a content line.
///
/// Parameters have the format: `name=value` or `name=value1,value2`
#[derive(Debug, Clone)]
pub struct ScannedParameter {
    /// Parameter name (e.g., "TZID", "VALUE")
    pub name: String,

    /// Parameter values (comma-separated), quotes removed
    pub values: Vec<String>,

    /// Span of the entire parameter
    pub span: Span,
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContentLineError {
    /// Missing colon separator.
    ///
    /// Example: `PROPNAME value` instead of `PROPNAME:value`
    MissingColon {
        /// Span where colon was expected
        expected_at: Span,
        /// Description of what was found instead
        found: Option<String>,
    },

    /// Empty content line (no name).
    EmptyLine {
        /// Span of the empty line
        span: Span,
    },

    /// Invalid parameter syntax.
    InvalidParameter {
        /// Span of the invalid parameter
        span: Span,
        /// Specific error details
        kind: ParameterErrorKind,
    },

    /// Characters the lexer could not classify, e.g. raw control characters.
    InvalidCharacter {
        /// Span of the offending bytes
        span: Span,
    },
}

impl ContentLineError {
    /// Span the error refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::MissingColon { expected_at, .. } => *expected_at,
            Self::EmptyLine { span }
            | Self::InvalidParameter { span, .. }
            | Self::InvalidCharacter { span } => *span,
        }
    }
}

impl fmt::Display for ContentLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentLineError::MissingColon { found: Some(found), .. } => {
                write!(f, "missing colon in property, found {found}")
            }
            ContentLineError::MissingColon { found: None, .. } => {
                write!(f, "missing colon in property")
            }
            ContentLineError::EmptyLine { .. } => write!(f, "empty content line"),
            ContentLineError::InvalidParameter { kind, .. } => {
                let msg = match kind {
                    ParameterErrorKind::MissingEquals => "missing equals in parameter",
                    ParameterErrorKind::EmptyName => "empty parameter name",
                    ParameterErrorKind::UnterminatedQuote => "unterminated quoted string",
                };
                write!(f, "{msg}")
            }
            ContentLineError::InvalidCharacter { .. } => write!(f, "invalid character"),
        }
    }
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterErrorKind {
    /// Missing equals sign.
    ///
    /// Example: `TZID America/New_York`
    MissingEquals,

    /// Empty parameter name.
    ///
    /// Example: `;=value`
    EmptyName,

    /// Unterminated quoted string.
    ///
    /// Example: `PARAM="unclosed value`
    UnterminatedQuote,
}

/// Result of scanning content lines.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// All scanned content lines (including ones with errors)
    pub lines: Vec<ContentLine>,

    /// Whether any errors were encountered
    pub has_errors: bool,
}

/// Scan a token stream into content lines.
///
/// Errors are recorded on the offending [`ContentLine`] rather than aborting,
/// so a caller can report every bad line at once. Blank lines between content
/// lines are skipped.
pub fn scan_content_lines<'src>(tokens: impl IntoIterator<Item = SpannedToken<'src>>) -> ScanResult {
    let mut tokens = tokens.into_iter().peekable();
    let mut lines = Vec::new();
    let mut has_errors = false;

    while let Some(&SpannedToken(first, span)) = tokens.peek() {
        if matches!(first, Token::Newline) {
            tokens.next(); // blank line
            continue;
        }

        let line = scan_content_line(&mut tokens, span);
        has_errors |= line.error.is_some();
        lines.push(line);
    }

    ScanResult { lines, has_errors }
}

/// Parse the structure of a content line: name [;param]* : value newline.
fn scan_content_line<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
    line_start: Span,
) -> ContentLine {
    let mut line = ContentLine {
        name: parse_name(tokens),
        parameters: Vec::new(),
        value: String::new(),
        span: line_start,
        error: None,
    };

    if line.name.is_empty() {
        let end = consume_until_newline(tokens).unwrap_or(line_start.end);
        line.span = Span::new(line_start.start, end);
        line.error = Some(ContentLineError::EmptyLine { span: line.span });
        return line;
    }

    // Parameters (semicolon-separated)
    while let Some(SpannedToken(_, semi_span)) =
        tokens.next_if(|SpannedToken(t, _)| matches!(t, Token::Semicolon))
    {
        match parse_parameter(tokens, semi_span) {
            Ok(param) => line.parameters.push(param),
            Err(kind) => {
                let end = consume_until_newline(tokens).unwrap_or(semi_span.end);
                line.span = Span::new(line_start.start, end);
                line.error = Some(ContentLineError::InvalidParameter {
                    span: Span::new(semi_span.start, end),
                    kind,
                });
                return line;
            }
        }
    }

    // Expect colon
    match tokens.next() {
        Some(SpannedToken(Token::Colon, _)) => {}
        Some(SpannedToken(token, span)) => {
            let end = if matches!(token, Token::Newline) {
                span.end
            } else {
                consume_until_newline(tokens).unwrap_or(span.end)
            };
            line.span = Span::new(line_start.start, end);
            line.error = Some(ContentLineError::MissingColon {
                expected_at: span,
                found: Some(token.to_string()),
            });
            return line;
        }
        None => {
            line.error = Some(ContentLineError::MissingColon {
                expected_at: Span::new(line_start.end, line_start.end),
                found: None,
            });
            return line;
        }
    }

    // Value: everything until newline
    let mut end = line_start.end;
    while let Some(SpannedToken(token, span)) =
        tokens.next_if(|SpannedToken(t, _)| !matches!(t, Token::Newline))
    {
        end = span.end;
        if matches!(token, Token::Error) && line.error.is_none() {
            line.error = Some(ContentLineError::InvalidCharacter { span });
        }
        line.value.push_str(token.text());
    }

    if let Some(SpannedToken(_, newline)) = tokens.next() {
        end = newline.end;
    }
    line.span = Span::new(line_start.start, end);
    line
}

/// Collect consecutive Word tokens (names can be hyphenated like "PERCENT-COMPLETE").
fn parse_name<'src>(tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>) -> String {
    let mut name = String::new();
    while let Some(SpannedToken(token, _)) =
        tokens.next_if(|SpannedToken(t, _)| matches!(t, Token::Word(_)))
    {
        name.push_str(token.text());
    }
    name
}

/// Parse a single parameter, the leading semicolon already consumed.
fn parse_parameter<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
    semi_span: Span,
) -> Result<ScannedParameter, ParameterErrorKind> {
    let name = parse_name(tokens);
    if name.is_empty() {
        return Err(ParameterErrorKind::EmptyName);
    }

    match tokens.next() {
        Some(SpannedToken(Token::Equal, _)) => {}
        Some(_) | None => return Err(ParameterErrorKind::MissingEquals),
    }

    let mut values = Vec::new();
    let mut end = semi_span.end;
    loop {
        let (value, value_end) = parse_parameter_value(tokens)?;
        values.push(decode_caret(&value));
        end = value_end.unwrap_or(end);

        if tokens
            .next_if(|SpannedToken(t, _)| matches!(t, Token::Comma))
            .is_none()
        {
            break;
        }
    }

    Ok(ScannedParameter {
        name,
        values,
        span: Span::new(semi_span.start, end),
    })
}

/// Parse a single, possibly empty, parameter value.
fn parse_parameter_value<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<(String, Option<usize>), ParameterErrorKind> {
    let mut value = String::new();

    if tokens
        .next_if(|SpannedToken(t, _)| matches!(t, Token::DQuote))
        .is_some()
    {
        // The newline is left in place so error recovery stops at this line
        loop {
            match tokens.next_if(|SpannedToken(t, _)| !matches!(t, Token::Newline)) {
                Some(SpannedToken(Token::DQuote, span)) => return Ok((value, Some(span.end))),
                Some(SpannedToken(token, _)) => value.push_str(token.text()),
                None => return Err(ParameterErrorKind::UnterminatedQuote),
            }
        }
    }

    let mut end = None;
    while let Some(SpannedToken(token, span)) = tokens.next_if(|SpannedToken(t, _)| {
        !matches!(
            t,
            Token::Semicolon | Token::Colon | Token::Comma | Token::Newline | Token::DQuote
        )
    }) {
        value.push_str(token.text());
        end = Some(span.end);
    }
    Ok((value, end))
}

/// Decode RFC 6868 parameter value escapes.
fn decode_caret(value: &str) -> String {
    if !value.contains('^') {
        return value.to_owned();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n' | 'N') => out.push('\n'),
            Some('\'') => out.push('"'),
            Some('^') => out.push('^'),
            _ => {
                // Not an escape, keep the caret as-is
                out.push('^');
                continue;
            }
        }
        chars.next();
    }
    out
}

/// Consume all tokens through the next newline, returning the end offset seen.
fn consume_until_newline<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Option<usize> {
    let mut end = None;
    for SpannedToken(token, span) in tokens.by_ref() {
        end = Some(span.end);
        if matches!(token, Token::Newline) {
            break;
        }
    }
    end
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for BINARY and BOOLEAN values, and the shared failure labels.

use std::borrow::Cow;

use chumsky::Parser;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A boolean literal was expected
    Boolean,
    /// A date value was expected
    Date,
    /// A 64-bit floating-point value was expected
    F64,
    /// A 32-bit signed integer value was expected
    I32,
    /// A 32-bit unsigned integer value was expected
    U32,
    /// Period date-times must have consistent timezone (both UTC or both floating)
    MismatchedTimezone,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Boolean => Self::Label(Cow::Borrowed("TRUE or FALSE")),
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::F64 => Self::Label(Cow::Borrowed("f64 out of range")),
            ValueExpected::I32 => Self::Label(Cow::Borrowed("i32 out of range")),
            ValueExpected::U32 => Self::Label(Cow::Borrowed("u32 out of range")),
            ValueExpected::MismatchedTimezone => Self::Label(Cow::Borrowed(
                "period date-times must have consistent timezone",
            )),
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// binary     = *(4b-char) [b-end]
/// ; A "BASE64" encoded character string, as defined by [RFC4648].
///
/// b-end      = (2b-char "==") / (3b-char "=")
///
/// b-char = ALPHA / DIGIT / "+" / "/"
/// ```
pub fn value_binary<'src, I, E>() -> impl Parser<'src, I, (), E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let b_char = select! {
        'A'..='Z' => (),
        'a'..='z' => (),
        '0'..='9' => (),
        '+' => (),
        '/' => (),
    };

    let quartet = b_char.repeated().exactly(4).ignored();

    // b-end = (2b-char "==") / (3b-char "=")
    let b_end = choice((
        b_char.repeated().exactly(2).ignored().then_ignore(just("==")),
        b_char.repeated().exactly(3).ignored().then_ignore(just('=')),
    ));

    quartet.repeated().ignore_then(b_end.or_not()).ignored()
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// boolean    = "TRUE" / "FALSE"
/// ```
///
/// These values are case-insensitive text.
pub fn value_boolean<'src, I, E>() -> impl Parser<'src, I, bool, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    select! { c @ ('A'..='Z' | 'a'..='z') => c }
        .repeated()
        .at_least(4)
        .at_most(5)
        .collect::<String>()
        .try_map(|word, span| {
            if word.eq_ignore_ascii_case("TRUE") {
                Ok(true)
            } else if word.eq_ignore_ascii_case("FALSE") {
                Ok(false)
            } else {
                Err(E::Error::expected_found([ValueExpected::Boolean], None, span))
            }
        })
}

#[cfg(test)]
mod tests {
    use chumsky::input::Stream;

    use super::*;

    #[test]
    fn parses_binary() {
        fn check(src: &str) -> Result<(), Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            value_binary::<'_, _, extra::Err<_>>()
                .then_ignore(end())
                .parse(stream)
                .into_result()
        }

        let success_cases = [
            // RFC 5545 Section 3.1.3, padding fixed per erratum 5602
            "VGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4=",
            "",
            "TWFu",
            "+/9a",
            "TQ==",
            "TWE=",
            "SGVsbG8=",
        ];
        for src in success_cases {
            assert!(check(src).is_ok(), "Parse {src} should succeed");
        }

        let fail_cases = ["TQ===", "TWFu=", "TWFuA", "T@Fu"];
        for src in fail_cases {
            assert!(check(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_boolean() {
        fn parse(src: &str) -> Result<bool, Vec<Rich<'_, char>>> {
            let stream = Stream::from_iter(src.chars());
            value_boolean::<'_, _, extra::Err<_>>()
                .then_ignore(end())
                .parse(stream)
                .into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            ("TRUE", true), ("True", true), ("true", true),
            ("FALSE", false), ("False", false), ("false", false),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "{src}");
        }

        for src in ["T", "YES", "TRUEE", "FALS", "1"] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }
}

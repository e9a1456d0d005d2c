// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value type parsing module for iCalendar property values.
//!
//! This module handles the parsing and validation of iCalendar value types
//! as defined in RFC 5545 Section 3.3.

mod datetime;
mod duration;
mod miscellaneous;
mod numeric;
mod period;
mod text;

use std::fmt;

pub use datetime::{ValueDate, ValueDateTime, ValueTime, ValueUtcOffset};
pub use duration::ValueDuration;
pub use period::ValuePeriod;
pub use text::{escape_text, split_text_list, unescape_text};

use chumsky::prelude::*;

use crate::parameter::ValueType;
use crate::value::datetime::{value_date, value_date_time, value_time, value_utc_offset};
use crate::value::duration::value_duration;
use crate::value::miscellaneous::{value_binary, value_boolean};
use crate::value::numeric::{value_float, value_float_pair, value_integer};
use crate::value::period::value_period;

/// Error produced when a value does not match its value type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {value_type} value `{value}`: {reason}")]
pub struct ValueError {
    /// The value type the text was decoded as
    pub value_type: ValueType,
    /// The offending text
    pub value: String,
    /// Human readable reason
    pub reason: String,
}

/// Typed iCalendar property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Inline binary data, kept BASE64 encoded
    Binary(String),

    /// Boolean value
    Boolean(bool),

    /// Calendar user address
    CalAddress(String),

    /// Date value
    Date(ValueDate),

    /// Date-time value
    DateTime(ValueDateTime),

    /// Duration value
    Duration(ValueDuration),

    /// Floating point value
    Float(f64),

    /// Latitude and longitude pair of GEO
    Geo(f64, f64),

    /// Integer value
    Integer(i32),

    /// Period of time
    Period(ValuePeriod),

    /// Recurrence rule, kept verbatim
    Recur(String),

    /// Unescaped text
    Text(String),

    /// Unescaped multi-valued text, e.g. CATEGORIES
    TextList(Vec<String>),

    /// Time value
    Time(ValueTime),

    /// URI
    Uri(String),

    /// UTC offset
    UtcOffset(ValueUtcOffset),

    /// Experimental or unrecognized value, kept verbatim
    Raw(String),
}

impl Value {
    /// Decode `src` as a value of the given type.
    ///
    /// # Errors
    /// Returns [`ValueError`] if the text does not match the value grammar.
    pub fn parse(value_type: ValueType, src: &str) -> Result<Self, ValueError> {
        let result = match value_type {
            ValueType::Binary => run(value_binary().to_slice(), src)
                .map(|s: &str| Self::Binary(s.to_owned())),
            ValueType::Boolean => run(value_boolean(), src).map(Self::Boolean),
            ValueType::CalAddress => Ok(Self::CalAddress(src.to_owned())),
            ValueType::Date => run(value_date(), src).map(Self::Date),
            ValueType::DateTime => run(value_date_time(), src).map(Self::DateTime),
            ValueType::Duration => run(value_duration(), src).map(Self::Duration),
            ValueType::Float => run(value_float(), src).map(Self::Float),
            ValueType::Integer => run(value_integer(), src).map(Self::Integer),
            ValueType::Period => run(value_period(), src).map(Self::Period),
            ValueType::Recur => non_empty(src).map(|s| Self::Recur(s.to_owned())),
            ValueType::Text => Ok(Self::Text(unescape_text(src))),
            ValueType::Time => run(value_time(), src).map(Self::Time),
            ValueType::Uri => Ok(Self::Uri(src.to_owned())),
            ValueType::UtcOffset => run(value_utc_offset(), src).map(Self::UtcOffset),
        };

        result.map_err(|reason| ValueError {
            value_type,
            value: src.to_owned(),
            reason,
        })
    }

    /// Decode a GEO value, `latitude;longitude`.
    ///
    /// # Errors
    /// Returns [`ValueError`] if the text is not a float pair.
    pub fn parse_geo(src: &str) -> Result<Self, ValueError> {
        run(value_float_pair(), src)
            .map(|(lat, lon)| Self::Geo(lat, lon))
            .map_err(|reason| ValueError {
                value_type: ValueType::Float,
                value: src.to_owned(),
                reason,
            })
    }

    /// The value type this value encodes as, `None` for raw and geo values.
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Self::Binary(_) => ValueType::Binary,
            Self::Boolean(_) => ValueType::Boolean,
            Self::CalAddress(_) => ValueType::CalAddress,
            Self::Date(_) => ValueType::Date,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Duration(_) => ValueType::Duration,
            Self::Float(_) => ValueType::Float,
            Self::Integer(_) => ValueType::Integer,
            Self::Period(_) => ValueType::Period,
            Self::Recur(_) => ValueType::Recur,
            Self::Text(_) | Self::TextList(_) => ValueType::Text,
            Self::Time(_) => ValueType::Time,
            Self::Uri(_) => ValueType::Uri,
            Self::UtcOffset(_) => ValueType::UtcOffset,
            Self::Geo(..) | Self::Raw(_) => return None,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(s)
            | Self::CalAddress(s)
            | Self::Recur(s)
            | Self::Uri(s)
            | Self::Raw(s) => f.write_str(s),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Date(v) => fmt::Display::fmt(v, f),
            Self::DateTime(v) => fmt::Display::fmt(v, f),
            Self::Duration(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Geo(lat, lon) => write!(f, "{lat};{lon}"),
            Self::Integer(v) => fmt::Display::fmt(v, f),
            Self::Period(v) => fmt::Display::fmt(v, f),
            Self::Text(s) => f.write_str(&escape_text(s)),
            Self::TextList(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(&escape_text(item))?;
                }
                Ok(())
            }
            Self::Time(v) => fmt::Display::fmt(v, f),
            Self::UtcOffset(v) => fmt::Display::fmt(v, f),
        }
    }
}

fn run<'src, T>(
    parser: impl Parser<'src, &'src str, T, extra::Err<Rich<'src, char>>>,
    src: &'src str,
) -> Result<T, String> {
    parser
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        })
}

fn non_empty(src: &str) -> Result<&str, String> {
    if src.is_empty() {
        Err("empty value".to_owned())
    } else {
        Ok(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_values() {
        #[rustfmt::skip]
        let cases = [
            (ValueType::Boolean,   "true",               "TRUE"),
            (ValueType::Date,      "19970714",           "19970714"),
            (ValueType::DateTime,  "19980119T070000Z",   "19980119T070000Z"),
            (ValueType::Duration,  "PT1H0M0S",           "PT1H"),
            (ValueType::Integer,   "+17",                "17"),
            (ValueType::Period,    "19970101T180000Z/PT5H30M", "19970101T180000Z/PT5H30M"),
            (ValueType::Text,      r"a\, b\; c",         r"a\, b\; c"),
            (ValueType::Time,      "230000",             "230000"),
            (ValueType::UtcOffset, "-0500",              "-0500"),
            (ValueType::Uri,       "http://example.com/a?b=c", "http://example.com/a?b=c"),
            (ValueType::Binary,    "AAABAAEAEBA=",       "AAABAAEAEBA="),
            (ValueType::Recur,     "FREQ=DAILY;COUNT=10", "FREQ=DAILY;COUNT=10"),
        ];
        for (value_type, src, expected) in cases {
            let value = Value::parse(value_type, src).unwrap();
            assert_eq!(value.value_type(), Some(value_type), "{src}");
            assert_eq!(value.to_string(), expected, "{src}");
        }
    }

    #[test]
    fn rejects_malformed_values() {
        #[rustfmt::skip]
        let cases = [
            (ValueType::Boolean,  "yes"),
            (ValueType::Date,     "19970230"),
            (ValueType::DateTime, "19980119"),
            (ValueType::Duration, "1H"),
            (ValueType::Integer,  "1.5"),
            (ValueType::Float,    "abc"),
            (ValueType::Period,   "19970101T180000Z"),
            (ValueType::Recur,    ""),
            (ValueType::Binary,   "A"),
        ];
        for (value_type, src) in cases {
            let err = Value::parse(value_type, src).unwrap_err();
            assert_eq!(err.value_type, value_type);
            assert_eq!(err.value, src);
        }
    }

    #[test]
    fn text_value_is_unescaped() {
        let value = Value::parse(ValueType::Text, r"line\nnext").unwrap();
        assert_eq!(value, Value::Text("line\nnext".to_owned()));
    }

    #[test]
    fn formats_text_list_and_geo() {
        let list = Value::TextList(vec!["A,B".to_owned(), "C".to_owned()]);
        assert_eq!(list.to_string(), r"A\,B,C");
        assert_eq!(list.value_type(), Some(ValueType::Text));

        let geo = Value::parse_geo("37.386013;-122.082932").unwrap();
        assert_eq!(geo.to_string(), "37.386013;-122.082932");
        assert_eq!(geo.value_type(), None);
    }
}

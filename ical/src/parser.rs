// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::property::PropertyKind;
use crate::syntax::lexer::tokenize;
use crate::syntax::{
    ContentLine, ContentLineError, RawComponent, RawParameter, RawProperty, Span, TreeBuildError,
    build_tree, scan_content_lines,
};

/// Parse iCalendar source into raw components.
///
/// Multi-valued EXDATE, RDATE and FREEBUSY lines are split into one property
/// per value, so every value is individually addressable.
///
/// ## Errors
///
/// The first malformed content line or structural error is returned, a
/// partially built tree never is. Input without any component is an error.
///
/// ## Examples
///
/// Parsing valid iCalendar source will return the root component
///
/// ```
/// # use calmodel_ical::parse;
/// let ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let roots = parse(ical_src).unwrap();
/// assert_eq!(roots[0].children[0].name, "VEVENT");
/// ```
///
/// Parsing invalid iCalendar source will return an error with a span
///
/// ```
/// # use calmodel_ical::parse;
/// use ariadne::{Color, Label, Report, ReportKind, Source};
/// let invalid_ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// END:VEVENT\r\n\
/// ";
/// let err = parse(invalid_ical_src).unwrap_err();
/// let report = Report::build(ReportKind::Error, err.span().into_range())
///     .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
///     .with_code(err.code().as_i32())
///     .with_message(err.to_string())
///     .with_label(
///         Label::new(err.span().into_range())
///             .with_message(err.to_string())
///             .with_color(Color::Red),
///     )
///     .finish();
/// report.eprint(Source::from(invalid_ical_src)).unwrap();
/// ```
pub fn parse(src: &str) -> Result<Vec<RawComponent>, ParseError> {
    let scanned = scan_content_lines(tokenize(src));
    if let Some(err) = first_line_error(&scanned.lines) {
        return Err(ParseError::ContentLine(err));
    }

    let built = build_tree(&scanned.lines);
    if let Some(err) = built.errors.into_iter().next() {
        return Err(ParseError::Tree(err));
    }

    let mut roots = built.roots;
    if roots.is_empty() {
        return Err(ParseError::Empty);
    }

    for root in &mut roots {
        split_multi_valued(root);
    }
    Ok(roots)
}

/// Parse a single content line, e.g. `DTSTART;TZID=Europe/Berlin:20240101T090000`.
///
/// The line may be folded and may end with a line break.
///
/// ## Errors
///
/// Returns an error if the text is not exactly one well-formed content line.
pub fn parse_content_line(src: &str) -> Result<RawProperty, ParseError> {
    let scanned = scan_content_lines(tokenize(src));
    if let Some(err) = first_line_error(&scanned.lines) {
        return Err(ParseError::ContentLine(err));
    }

    let mut lines = scanned.lines.into_iter();
    match (lines.next(), lines.next()) {
        (Some(line), None) => Ok(RawProperty {
            name: line.name,
            parameters: line.parameters.iter().map(RawParameter::from).collect(),
            value: line.value,
        }),
        (None, _) => Err(ParseError::Empty),
        (Some(_), Some(second)) => Err(ParseError::NotSingleLine { span: second.span }),
    }
}

fn first_line_error(lines: &[ContentLine]) -> Option<ContentLineError> {
    lines.iter().find_map(|line| line.error.clone())
}

fn split_multi_valued(component: &mut RawComponent) {
    let needs_split = component.properties.iter().any(|p| {
        p.value.contains(',')
            && p.name
                .parse::<PropertyKind>()
                .is_ok_and(|kind| kind.is_multi_valued_date())
    });

    if needs_split {
        let properties = std::mem::take(&mut component.properties);
        for prop in properties {
            let multi = prop
                .name
                .parse::<PropertyKind>()
                .is_ok_and(|kind| kind.is_multi_valued_date());
            if multi && prop.value.contains(',') {
                for value in prop.value.split(',') {
                    component.properties.push(RawProperty {
                        name: prop.name.clone(),
                        parameters: prop.parameters.clone(),
                        value: value.to_owned(),
                    });
                }
            } else {
                component.properties.push(prop);
            }
        }
    }

    for child in &mut component.children {
        split_multi_valued(child);
    }
}

/// Errors that can occur during parsing
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// Malformed content line
    #[error(transparent)]
    ContentLine(ContentLineError),

    /// Malformed component structure
    #[error(transparent)]
    Tree(TreeBuildError),

    /// No component or content line at all
    #[error("no iCalendar data found")]
    Empty,

    /// More than one content line where a single one was expected
    #[error("expected a single content line")]
    NotSingleLine {
        /// Span of the second line
        span: Span,
    },
}

impl ParseError {
    /// Error number in the libical numbering.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ContentLine(_) => ErrorCode::Parse,
            Self::Tree(_) | Self::Empty => ErrorCode::MalformedData,
            Self::NotSingleLine { .. } => ErrorCode::BadArgument,
        }
    }

    /// Span the error refers to, empty for [`ParseError::Empty`].
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::ContentLine(err) => err.span(),
            Self::Tree(err) => err.span(),
            Self::Empty => Span::new(0, 0),
            Self::NotSingleLine { span } => *span,
        }
    }
}

/// Error numbers compatible with libical's `icalerrorenum`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
#[expect(missing_docs)]
pub enum ErrorCode {
    NoError = 0,
    BadArgument = 1,
    NewFailed = 2,
    Allocation = 3,
    MalformedData = 4,
    Parse = 5,
    Internal = 6,
    File = 7,
    Usage = 8,
    Unimplemented = 9,
    Unknown = 10,
}

impl ErrorCode {
    /// Numeric value of the code.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

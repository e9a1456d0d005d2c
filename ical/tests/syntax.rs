// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the iCalendar syntax layer
//!
//! These tests validate the lexer, scanner and tree builder on realistic
//! iCalendar content and edge cases.

#![expect(clippy::indexing_slicing)]

use calmodel_ical::syntax::lexer::tokenize;
use calmodel_ical::syntax::{RawComponent, build_tree, scan_content_lines};

/// Test helper to build raw components from source
fn parse_ical(src: &str) -> Vec<RawComponent> {
    let scanned = scan_content_lines(tokenize(src));
    assert!(!scanned.has_errors, "unexpected scan errors");
    let built = build_tree(&scanned.lines);
    assert!(built.errors.is_empty(), "{:?}", built.errors);
    built.roots
}

#[test]
fn syntax_empty_component() {
    let src = "\
BEGIN:VCALENDAR\r
END:VCALENDAR\r
";
    let components = parse_ical(src);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].name, "VCALENDAR");
    assert!(components[0].properties.is_empty());
    assert!(components[0].children.is_empty());
}

#[test]
fn syntax_nested_components() {
    let src = "\
BEGIN:VCALENDAR\r
PRODID:-//Example//EN\r
BEGIN:VEVENT\r
UID:1\r
BEGIN:VALARM\r
ACTION:DISPLAY\r
TRIGGER:-PT15M\r
END:VALARM\r
END:VEVENT\r
BEGIN:VTODO\r
UID:2\r
END:VTODO\r
END:VCALENDAR\r
";
    let components = parse_ical(src);
    let calendar = &components[0];
    assert_eq!(calendar.properties[0].value, "-//Example//EN");
    assert_eq!(calendar.children.len(), 2);
    assert_eq!(calendar.children[0].children[0].name, "VALARM");
    assert_eq!(calendar.children[0].children[0].properties[1].value, "-PT15M");
    assert_eq!(calendar.children[1].name, "VTODO");
}

#[test]
fn syntax_unix_line_endings_and_folding() {
    let src = "BEGIN:VEVENT\nSUMMARY:folded\n  across\n\tlines\nEND:VEVENT\n";
    let components = parse_ical(src);
    assert_eq!(components[0].properties[0].value, "folded across\tlines");
}

#[test]
fn syntax_parameters_preserve_order_and_case() {
    let src = "BEGIN:VEVENT\r\nDTSTART;x-b=2;TzId=Europe/Paris;X-A=1:20240101T000000\r\nEND:VEVENT\r\n";
    let components = parse_ical(src);
    let names: Vec<_> = components[0].properties[0]
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["x-b", "TzId", "X-A"]);
    assert_eq!(
        components[0].properties[0].parameter("TZID").unwrap().values,
        ["Europe/Paris"]
    );
}

#[test]
fn syntax_rejects_runaway_nesting() {
    let depth = 20_000;
    let src = "BEGIN:VEVENT\r\n".repeat(depth) + &"END:VEVENT\r\n".repeat(depth);
    let err = calmodel_ical::parse(&src).unwrap_err();
    assert_eq!(err.code(), calmodel_ical::ErrorCode::MalformedData);
    assert!(err.to_string().contains("nested deeper than"), "{err}");
}

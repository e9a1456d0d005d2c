// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the iCalendar formatter.

use calmodel_ical::formatter::{FoldingStyle, FormatOptions, format, format_property};
use calmodel_ical::{RawComponent, RawParameter, RawProperty, Value, ValueType};

#[test]
fn test_format_built_calendar() {
    let mut event = RawComponent::new("VEVENT");
    event.properties.push(RawProperty::new("UID", "built@example.com"));
    let summary = Value::Text("Meeting; room 1, floor 2".to_owned());
    event.properties.push(RawProperty::new("SUMMARY", summary.to_string()));

    let mut calendar = RawComponent::new("VCALENDAR");
    calendar.properties.push(RawProperty::new("VERSION", "2.0"));
    calendar.children.push(event);

    let formatted = format(&calendar).unwrap();
    assert_eq!(
        formatted,
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         BEGIN:VEVENT\r\n\
         UID:built@example.com\r\n\
         SUMMARY:Meeting\\; room 1\\, floor 2\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    );
}

#[test]
fn test_format_creates_crlf_line_endings() {
    let calendar = RawComponent::new("VCALENDAR");
    let formatted = format(&calendar).unwrap();
    assert!(formatted.lines().all(|l| l.ends_with('\r')));
}

#[test]
fn test_format_date_value_parameter() {
    let mut prop = RawProperty::new("DTSTART", "");
    prop.parameters
        .push(RawParameter::new("VALUE", ValueType::Date.name()));
    prop.value = Value::parse(ValueType::Date, "20250101").unwrap().to_string();
    assert_eq!(
        format_property(&prop).unwrap(),
        "DTSTART;VALUE=DATE:20250101\r\n"
    );
}

#[test]
fn test_format_options() {
    let mut calendar = RawComponent::new("VCALENDAR");
    calendar
        .properties
        .push(RawProperty::new("X-LONG", "x".repeat(100)));

    let unfolded = FormatOptions::default()
        .folding(None)
        .write_to_string(&calendar)
        .unwrap();
    assert!(unfolded.contains(&"x".repeat(100)));

    let tabbed = FormatOptions::default()
        .folding_style(FoldingStyle::Tab)
        .write_to_string(&calendar)
        .unwrap();
    assert!(tabbed.contains("\r\n\t"));

    let narrow = FormatOptions::default()
        .folding(Some(40))
        .write_to_string(&calendar)
        .unwrap();
    assert!(narrow.split("\r\n").all(|l| l.len() <= 40));
}

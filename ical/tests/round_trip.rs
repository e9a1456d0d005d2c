// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests for the iCalendar parser and formatter.
//!
//! These tests verify that parsing, formatting, and parsing again produces
//! equivalent results.

#![expect(clippy::indexing_slicing)]

use calmodel_ical::{formatter::format, parse};

fn assert_round_trip(original: &str) {
    let calendars1 = parse(original).unwrap();
    let formatted = format(&calendars1[0]).unwrap();
    let calendars2 = parse(&formatted).unwrap();
    assert_eq!(calendars1, calendars2, "round-trip changed the tree:\n{formatted}");
}

#[test]
fn round_trip_simple_calendar() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:12345@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
DTEND:20250110T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_round_trip(original);
    assert_eq!(format(&parse(original).unwrap()[0]).unwrap(), original);
}

#[test]
fn round_trip_calendar_with_timezone() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19701101T020000\r\n\
RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
TZNAME:EST\r\n\
END:STANDARD\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:19700308T020000\r\n\
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r\n\
TZOFFSETFROM:-0500\r\n\
TZOFFSETTO:-0400\r\n\
TZNAME:EDT\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:tz@example.com\r\n\
DTSTART;TZID=America/New_York:20250110T090000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_round_trip(original);
}

#[test]
fn round_trip_parameters_and_escapes() {
    let original = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
ATTENDEE;CN=\"Doe, Jane\";ROLE=REQ-PARTICIPANT;X-NOTE=say ^'hi^':mailto:jane@example.com\r\n\
DESCRIPTION:Line one\\nLine two\\, with comma\\; and semicolon\r\n\
X-CUSTOM;X-PARAM=1:raw \\value\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let calendars = parse(original).unwrap();
    let attendee = &calendars[0].children[0].properties[0];
    assert_eq!(attendee.parameter("CN").unwrap().values, ["Doe, Jane"]);
    assert_eq!(attendee.parameter("X-NOTE").unwrap().values, ["say \"hi\""]);
    assert_round_trip(original);
}

#[test]
fn round_trip_long_folded_lines() {
    let description = "Lorem ipsum dolor sit amet, consectetur adipiscing elit ".repeat(5);
    let original = format!(
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDESCRIPTION:{description}\r\nSUMMARY:{}\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
        "日本語のテキスト".repeat(10)
    );

    let calendars = parse(&original).unwrap();
    let formatted = format(&calendars[0]).unwrap();
    for line in formatted.split("\r\n") {
        assert!(line.len() <= 75, "{line:?} is longer than 75 octets");
    }
    assert_eq!(parse(&formatted).unwrap(), calendars);
}

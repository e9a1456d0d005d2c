// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::date;

use crate::common::{CUSTOM_ZONE, MEETING, parse, tzids};

#[test]
fn document_vtimezone_resolves_unknown_tzids() {
    let tree = parse(CUSTOM_ZONE);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();

    let start = event.start_time().unwrap().unwrap();
    let tz = start.timezone();
    assert!(!tz.is_phantom());
    assert_eq!(tz.id(), "Custom/Plus3");
    assert_eq!(start.utc_civil(), date(2024, 6, 1).at(9, 0, 0, 0));

    let definition = tz.definition().unwrap();
    assert!(definition.root().parent().is_none());
    assert_eq!(definition.root().component_type(), "VTIMEZONE");
    assert_eq!(tzids(tree.root()), ["Custom/Plus3"]);
}

#[test]
fn document_vtimezone_is_not_duplicated() {
    let mut tree = parse(CUSTOM_ZONE);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();
    event.start_time().unwrap();

    let text = tree.serialize().unwrap();
    assert_eq!(text.matches("BEGIN:VTIMEZONE").count(), 1);
}

#[test]
fn serialize_twice_appends_once() {
    let mut tree = parse(MEETING);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();
    event.start_time().unwrap();

    let first = tree.serialize().unwrap();
    let second = tree.serialize().unwrap();
    assert_eq!(first, second);
    assert_eq!(second.matches("BEGIN:VTIMEZONE").count(), 1);
    assert!(second.contains("TZID:America/New_York\r\n"));
    assert!(second.contains("BEGIN:DAYLIGHT\r\n"));

    let reread = parse(&second);
    let vtimezone = reread.root().first_subcomponent("VTIMEZONE").unwrap().unwrap();
    let tz = vtimezone.vtimezone().unwrap();
    assert_eq!(tz.to_utc(date(2024, 7, 1).at(12, 0, 0, 0)), date(2024, 7, 1).at(16, 0, 0, 0));
    assert_eq!(tz.to_utc(date(2024, 1, 1).at(12, 0, 0, 0)), date(2024, 1, 1).at(17, 0, 0, 0));
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::date;

use calmodel_core::ical::ComponentKind;
use calmodel_core::{
    ComponentTree, DateTime, Property, Timezone, TimezoneProvider, timezone_service,
};

#[test]
fn detached_writes_are_coerced() {
    let tokyo = timezone_service().get_timezone("Asia/Tokyo").unwrap();
    let mut prop = Property::from_name("DTSTART").unwrap();

    #[rustfmt::skip]
    let cases = [
        (DateTime::new(date(2024, 1, 1).at(9, 0, 0, 0), tokyo.clone()),                     "DTSTART:20240101T000000Z"),
        (DateTime::date(date(2024, 1, 1), tokyo),                                            "DTSTART;VALUE=DATE:20240101"),
        (DateTime::new(date(2024, 1, 1).at(9, 0, 0, 0), Timezone::phantom("Nowhere/Land")), "DTSTART:20240101T090000"),
        (DateTime::utc(date(2024, 1, 1).at(9, 0, 0, 0)),                                     "DTSTART:20240101T090000Z"),
    ];
    for (value, expected) in cases {
        prop.set_value_as_datetime(&value);
        assert_eq!(prop.to_string(), expected);
        assert!(prop.embedded_timezone().is_none(), "{expected}");
    }
}

#[test]
fn attached_writes_keep_the_zone() {
    let tokyo = timezone_service().get_timezone("Asia/Tokyo").unwrap();
    let mut calendar = ComponentTree::new(ComponentKind::VCalendar).unwrap();
    let event = calendar
        .root_mut()
        .add_subcomponent(ComponentTree::new(ComponentKind::VEvent).unwrap())
        .unwrap();

    let value = DateTime::new(date(2024, 1, 1).at(9, 0, 0, 0), tokyo);
    calendar.get_mut(event).unwrap().set_start_time(Some(&value)).unwrap();

    let text = calendar.serialize().unwrap();
    assert!(text.contains("DTSTART;TZID=Asia/Tokyo:20240101T090000\r\n"));
    assert!(text.contains("TZID:Asia/Tokyo\r\n"));
}

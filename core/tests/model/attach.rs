// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::date;

use calmodel_core::ical::ComponentKind;
use calmodel_core::{ComponentTree, IcsService, Property};

use crate::common::{CUSTOM_ZONE, MEETING, parse, tzids};

#[test]
fn clones_share_nothing() {
    let original = parse(MEETING);
    let mut copy = original.clone();

    let event = copy.root().first_subcomponent("VEVENT").unwrap().unwrap().id();
    let mut component = copy.get_mut(event).unwrap();
    component.set_summary(Some("Changed")).unwrap();
    let mut dtstart = component.first_property_mut("DTSTART").unwrap().unwrap();
    dtstart.set_parameter("X-NOTE", "copy").unwrap();

    let event = original.root().first_subcomponent("VEVENT").unwrap().unwrap();
    assert_eq!(event.summary().as_deref(), Some("Planning"));
    let dtstart = event.first_property("DTSTART").unwrap().unwrap();
    assert_eq!(dtstart.parameter("X-NOTE").unwrap(), None);
}

#[test]
fn attaching_leaves_the_source_alone() {
    let source = parse(MEETING);
    let mut target = IcsService::new().create_component("VCALENDAR").unwrap();

    let event = source.root().first_subcomponent("VEVENT").unwrap().unwrap();
    let copied = target.root_mut().copy_subcomponent(event).unwrap();
    target.get_mut(copied).unwrap().set_uid(Some("meeting-2")).unwrap();

    assert_eq!(event.uid().as_deref(), Some("meeting-1"));
    assert_eq!(target.get(copied).unwrap().uid().as_deref(), Some("meeting-2"));
    assert_eq!(source.root().children().count(), 2);
    assert_eq!(target.get(copied).unwrap().parent().map(|p| p.id()), Some(target.root().id()));
}

#[test]
fn attaching_registers_referenced_timezones() {
    let mut event = ComponentTree::new(ComponentKind::VEvent).unwrap();
    let dtstart = Property::from_ical_string("DTSTART;TZID=Europe/Paris:20240701T090000").unwrap();
    event.root_mut().add_property(dtstart).unwrap();

    let mut calendar = ComponentTree::new(ComponentKind::VCalendar).unwrap();
    calendar.root_mut().add_subcomponent(event).unwrap();
    assert_eq!(tzids(calendar.root()), ["Europe/Paris"]);

    let text = calendar.serialize().unwrap();
    assert_eq!(text.matches("BEGIN:VTIMEZONE").count(), 1);
    assert!(text.contains("TZID:Europe/Paris\r\n"));
}

#[test]
fn standalone_copies_keep_their_zones() {
    let tree = parse(MEETING);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();
    let start = event.start_time().unwrap().unwrap();

    let standalone = event.to_tree();
    assert!(standalone.root().parent().is_none());
    assert_eq!(tzids(standalone.root()), ["America/New_York"]);
    assert_eq!(standalone.root().start_time().unwrap(), Some(start));
}

#[test]
fn unread_copies_take_document_zones() {
    let source = parse(CUSTOM_ZONE);
    let event = source.root().first_subcomponent("VEVENT").unwrap().unwrap();
    let mut target = IcsService::new().create_component("VCALENDAR").unwrap();
    let copied = target.root_mut().copy_subcomponent(event).unwrap();
    assert_eq!(tzids(target.root()), ["Custom/Plus3"]);

    let start = target.get(copied).unwrap().start_time().unwrap().unwrap();
    assert!(!start.timezone().is_phantom());
    assert_eq!(start.utc_civil(), date(2024, 6, 1).at(9, 0, 0, 0));

    let text = target.serialize().unwrap();
    assert_eq!(text.matches("BEGIN:VTIMEZONE").count(), 1);
    assert!(text.contains("TZID:Custom/Plus3\r\n"));
    assert!(text.contains("TZOFFSETTO:+0300\r\n"));
}

#[test]
fn unread_copies_take_database_zones() {
    let source = parse(MEETING);
    let event = source.root().first_subcomponent("VEVENT").unwrap().unwrap();
    let standalone = event.to_tree();
    assert_eq!(tzids(standalone.root()), ["America/New_York"]);
    assert!(tzids(source.root()).is_empty());
}

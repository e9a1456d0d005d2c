// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use tokio::fs;

use calmodel_core::IcsService;

use crate::common::{MEETING, parse};

#[test]
fn reserializing_is_stable() {
    let mut tree = parse(MEETING);
    let first = tree.serialize().unwrap();
    let second = parse(&first).serialize().unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(first.ends_with("END:VCALENDAR\r\n"));
}

#[test]
fn values_survive_a_round_trip() {
    let mut tree = parse(MEETING);
    let text = tree.serialize().unwrap();
    let tree = parse(&text);

    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();
    assert_eq!(event.uid().as_deref(), Some("meeting-1"));
    assert_eq!(event.description().as_deref(), Some("Quarterly planning, bring notes"));
    assert_eq!(event.categories().as_deref(), Some("WORK,PLANNING"));
    assert_eq!(event.priority(), 2);
    assert!(text.contains("DESCRIPTION:Quarterly planning\\, bring notes\r\n"));
}

#[tokio::test]
async fn round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meeting.ics");

    let service = IcsService::new();
    let mut tree = service.parse(MEETING, None).unwrap();
    fs::write(&path, service.serialize(&mut tree).unwrap()).await.unwrap();

    let text = fs::read_to_string(&path).await.unwrap();
    let reread = service.parse_async(text, None).await.unwrap();
    assert_eq!(reread.len(), tree.len());
    let todo = reread.root().first_subcomponent("VTODO").unwrap().unwrap();
    assert_eq!(todo.summary().as_deref(), Some("Write minutes"));
}

#[test]
fn singleton_attributes_replace() {
    let mut tree = parse(MEETING);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap().id();

    let mut component = tree.get_mut(event).unwrap();
    component.set_summary(Some("Renamed")).unwrap();
    component.set_summary(Some("Renamed again")).unwrap();
    component.set_location(Some("Room 4")).unwrap();

    let event = tree.get(event).unwrap();
    assert_eq!(event.properties("SUMMARY").unwrap().count(), 1);
    assert_eq!(event.summary().as_deref(), Some("Renamed again"));
    assert_eq!(event.location().as_deref(), Some("Room 4"));
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;

use jiff::civil::date;
use jiff::tz::{self, TimeZone};

use calmodel_core::{IcsService, Timezone, TimezoneProvider};

use crate::common::{MEETING, parse, tzids};

#[test]
fn reads_are_deterministic() {
    let tree = parse(MEETING);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();

    let first = event.start_time().unwrap().unwrap();
    let second = event.start_time().unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.timezone().id(), "America/New_York");
    assert_eq!(first.utc_civil(), date(2024, 3, 15).at(14, 0, 0, 0));

    event.end_time().unwrap();
    assert_eq!(tzids(tree.root()), ["America/New_York"]);
}

#[test]
fn floating_values_stay_floating() {
    let tree = parse(MEETING);
    let todo = tree.root().first_subcomponent("VTODO").unwrap().unwrap();
    let due = todo.due_time().unwrap().unwrap();
    assert!(due.timezone().is_floating());
    assert_eq!(due.civil(), date(2024, 3, 20).at(17, 0, 0, 0));
    assert!(tzids(tree.root()).is_empty());
}

#[test]
fn unknown_tzids_become_phantoms() {
    let text = MEETING.replace("America/New_York", "Atlantis/Capital");
    let mut tree = parse(&text);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();

    let start = event.start_time().unwrap().unwrap();
    assert!(start.timezone().is_phantom());
    assert_eq!(start.timezone().id(), "Atlantis/Capital");
    assert_eq!(start.civil(), date(2024, 3, 15).at(10, 0, 0, 0));

    let out = tree.serialize().unwrap();
    assert!(out.contains("DTSTART;TZID=Atlantis/Capital:20240315T100000\r\n"));
    assert!(!out.contains("BEGIN:VTIMEZONE"));
}

#[derive(Debug)]
struct OneZone;

impl TimezoneProvider for OneZone {
    fn get_timezone(&self, tzid: &str) -> Option<Timezone> {
        let zone = TimeZone::fixed(tz::offset(-2));
        (tzid == "Atlantis/Capital").then(|| Timezone::from_zone(tzid, zone))
    }
}

#[test]
fn tree_provider_comes_before_the_service() {
    let text = MEETING.replace("America/New_York", "Atlantis/Capital");
    let tree = IcsService::new().parse(&text, Some(Arc::new(OneZone))).unwrap();
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();

    let start = event.start_time().unwrap().unwrap();
    assert!(!start.timezone().is_phantom());
    assert_eq!(start.utc_civil(), date(2024, 3, 15).at(12, 0, 0, 0));
}

#[test]
fn map_providers_override_the_database() {
    let pinned = Timezone::from_zone("America/New_York", TimeZone::UTC);
    let provider: BTreeMap<String, Timezone> =
        [("America/New_York".to_owned(), pinned)].into_iter().collect();

    let tree = IcsService::new().parse(MEETING, Some(Arc::new(provider))).unwrap();
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();
    let start = event.start_time().unwrap().unwrap();
    assert_eq!(start.utc_civil(), date(2024, 3, 15).at(10, 0, 0, 0));
}

#[test]
fn date_only_values_read_as_dates() {
    let mut tree = IcsService::new()
        .parse("BEGIN:VEVENT\r\nUID:d\r\nDTSTART:20240101\r\nEND:VEVENT\r\n", None)
        .unwrap();

    let start = tree.root().start_time().unwrap().unwrap();
    assert!(start.is_date());
    assert!(start.timezone().is_floating());
    assert_eq!(start.civil(), date(2024, 1, 1).at(0, 0, 0, 0));
    assert!(tree.serialize().unwrap().contains("DTSTART:20240101\r\n"));
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calmodel_core::{ComponentRef, ComponentTree, IcsService};

/// A calendar with one event in a database zone and one floating todo.
pub const MEETING: &str = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//calmodel//tests//EN\r
BEGIN:VEVENT\r
UID:meeting-1\r
DTSTAMP:20240301T080000Z\r
DTSTART;TZID=America/New_York:20240315T100000\r
DTEND;TZID=America/New_York:20240315T110000\r
SUMMARY:Planning\r
DESCRIPTION:Quarterly planning\\, bring notes\r
CATEGORIES:WORK,PLANNING\r
PRIORITY:2\r
END:VEVENT\r
BEGIN:VTODO\r
UID:todo-1\r
DUE:20240320T170000\r
SUMMARY:Write minutes\r
END:VTODO\r
END:VCALENDAR\r
";

/// A calendar whose only zone is defined by the document itself.
pub const CUSTOM_ZONE: &str = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//calmodel//tests//EN\r
BEGIN:VTIMEZONE\r
TZID:Custom/Plus3\r
BEGIN:STANDARD\r
DTSTART:19700101T000000\r
TZOFFSETFROM:+0300\r
TZOFFSETTO:+0300\r
TZNAME:P3\r
END:STANDARD\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
UID:custom-1\r
DTSTART;TZID=Custom/Plus3:20240601T120000\r
END:VEVENT\r
END:VCALENDAR\r
";

/// Parse with a default service.
pub fn parse(text: &str) -> ComponentTree {
    IcsService::new().parse(text, None).unwrap()
}

/// TZIDs registered on a component.
pub fn tzids(component: ComponentRef<'_>) -> Vec<String> {
    component
        .referenced_timezones()
        .iter()
        .map(|tz| tz.id().to_owned())
        .collect()
}

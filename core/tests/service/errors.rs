// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calmodel_core::ical::ErrorCode;
use calmodel_core::{Duration, ERROR_BASE, ICS_ERROR_BASE, IcsError, IcsService, Period};

use crate::common::MEETING;

#[test]
fn parse_errors_carry_codec_codes() {
    let service = IcsService::new();

    let two_roots = format!("{MEETING}{MEETING}");
    let err = service.parse(&two_roots, None).unwrap_err();
    assert_eq!(err.code(), ICS_ERROR_BASE + 4);

    #[rustfmt::skip]
    let malformed = [
        "",
        "BEGIN:VCALENDAR\r\n",
        "BEGIN:VCALENDAR\r\nEND:VEVENT\r\n",
    ];
    for text in malformed {
        let err = service.parse(text, None).unwrap_err();
        assert!(
            matches!(err, IcsError::ParseError { code: ErrorCode::MalformedData, .. }),
            "{text:?}: {err}"
        );
        assert_eq!(err.code(), ICS_ERROR_BASE + 4);
    }
}

#[test]
fn other_errors_have_fixed_codes() {
    let service = IcsService::new();
    let err = service.create_component("VNOTHING").unwrap_err();
    assert_eq!(err.code(), ERROR_BASE + 1);

    let mut duration = Duration::from_seconds(60);
    duration.make_immutable();
    assert_eq!(duration.set_minutes(2).unwrap_err().code(), ERROR_BASE + 2);

    let err = Period::default().ical_string().unwrap_err();
    assert_eq!(err.code(), ERROR_BASE + 3);
}

#[test]
fn absence_is_not_an_error() {
    let tree = IcsService::new().parse(MEETING, None).unwrap();
    let todo = tree.root().first_subcomponent("VTODO").unwrap().unwrap();
    assert_eq!(todo.start_time(), Ok(None));
    assert_eq!(todo.location(), None);
    assert!(todo.first_property("RRULE").unwrap().is_none());
    assert!(tree.root().first_subcomponent("VJOURNAL").unwrap().is_none());
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calmodel_core::{IcsError, Property};

#[test]
fn experimental_parameters_are_scanned_and_cleared() {
    let mut prop = Property::from_ical_string("SUMMARY;X-A=1;LANGUAGE=en;X-B=2:Hi").unwrap();
    let names: Vec<_> = prop.parameter_names().collect();
    assert_eq!(names, ["X-A", "LANGUAGE", "X-B"]);

    prop.clear_x_parameters();
    let names: Vec<_> = prop.parameter_names().collect();
    assert_eq!(names, ["LANGUAGE"]);
    assert_eq!(prop.parameter("language").unwrap().as_deref(), Some("en"));
}

#[test]
fn parameter_names_are_validated() {
    let mut prop = Property::from_name("SUMMARY").unwrap();
    assert!(matches!(prop.set_parameter("NOT A NAME", "x"), Err(IcsError::InvalidArgument(_))));
    assert_eq!(prop.parameter("ALTREP").unwrap(), None);
    assert!(!prop.remove_parameter("ALTREP").unwrap());

    prop.set_parameter("LANGUAGE", "de").unwrap();
    prop.set_parameter("LANGUAGE", "fr").unwrap();
    assert_eq!(prop.parameters().len(), 1);
    assert_eq!(prop.parameter("LANGUAGE").unwrap().as_deref(), Some("fr"));
}

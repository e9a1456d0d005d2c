// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calmodel_core::{Config, IcsService};

use crate::common::{MEETING, parse};

fn long_description() -> String {
    "Grüße aus Zürich, 日本語のテキスト. ".repeat(8)
}

#[test]
fn folded_lines_fit_and_unfold() {
    let mut tree = parse(MEETING);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap().id();
    tree.get_mut(event).unwrap().set_description(Some(&long_description())).unwrap();

    let text = tree.serialize().unwrap();
    for line in text.split("\r\n") {
        assert!(line.len() <= 75, "{line:?}");
    }

    let reread = parse(&text);
    let event = reread.root().first_subcomponent("VEVENT").unwrap().unwrap();
    assert_eq!(event.description(), Some(long_description()));
}

#[test]
fn configured_folding() {
    let config: Config = toml::from_str("[format]\nfolding = 40\nfolding-style = \"tab\"\n").unwrap();
    let service = IcsService::from_config(&config);

    let mut tree = parse(MEETING);
    let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap().id();
    tree.get_mut(event).unwrap().set_description(Some(&long_description())).unwrap();

    let text = service.serialize(&mut tree).unwrap();
    assert!(text.split("\r\n").all(|line| line.len() <= 40));
    assert!(text.contains("\r\n\t"));
    assert!(!text.contains("\r\n "));
}

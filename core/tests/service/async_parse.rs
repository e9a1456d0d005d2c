// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex};

use calmodel_core::{ComponentTree, IcsError, IcsService, ParsingListener};

use crate::common::MEETING;

#[tokio::test]
async fn parse_async_matches_parse() {
    let service = IcsService::new();
    let mut sync = service.parse(MEETING, None).unwrap();
    let mut background = service.parse_async(MEETING.to_owned(), None).await.unwrap();
    assert_eq!(sync.serialize().unwrap(), background.serialize().unwrap());
}

#[derive(Debug, Default, Clone)]
struct Recorder(Arc<Mutex<Vec<Result<usize, u32>>>>);

impl ParsingListener for Recorder {
    fn on_parsing_complete(self: Box<Self>, result: Result<ComponentTree, IcsError>) {
        let outcome = result.map(|tree| tree.len()).map_err(|err| err.code());
        self.0.lock().unwrap().push(outcome);
    }
}

#[tokio::test]
async fn listener_sees_each_outcome_once() {
    let service = IcsService::new();
    let recorder = Recorder::default();

    let ok = service.parse_async_with_listener(MEETING.to_owned(), None, recorder.clone());
    let bad = service.parse_async_with_listener("BEGIN:VEVENT\r\n".to_owned(), None, recorder.clone());
    ok.await.unwrap();
    bad.await.unwrap();

    let outcomes = recorder.0.lock().unwrap().clone();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.contains(&Ok(3)));
    assert_eq!(outcomes.iter().filter(|o| o.is_err()).count(), 1);
}

#[tokio::test]
async fn parsed_trees_move_between_tasks() {
    let tree = IcsService::new().parse_async(MEETING.to_owned(), None).await.unwrap();
    let summary = tokio::spawn(async move {
        let event = tree.root().first_subcomponent("VEVENT").unwrap().unwrap();
        event.summary()
    })
    .await
    .unwrap();
    assert_eq!(summary.as_deref(), Some("Planning"));
}

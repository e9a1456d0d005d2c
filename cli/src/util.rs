// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use calmodel_core::ical::Value;
use calmodel_core::{ComponentRef, ComponentTree, DateTime, IcsService, PropertyRef};
use clap::{Arg, ArgMatches, ValueHint, arg, value_parser};
use tokio::fs;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn arg_file() -> Arg {
    arg!(file: <FILE> "Path to the iCalendar file")
        .value_parser(value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

pub fn get_file(matches: &ArgMatches) -> PathBuf {
    match matches.get_one::<PathBuf>("file") {
        Some(file) => file.clone(),
        None => unreachable!(),
    }
}

/// Read and parse an iCalendar file.
#[tracing::instrument(skip(service))]
pub async fn read_calendar(
    service: &IcsService,
    path: &PathBuf,
) -> Result<ComponentTree, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let tree = service
        .parse_async(text, None)
        .await
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    Ok(tree)
}

/// Visit every date or date-time value below `component`, resolving its
/// timezone on the way.
pub fn visit_datetimes<'a>(
    component: ComponentRef<'a>,
    f: &mut impl FnMut(PropertyRef<'a>, DateTime),
) {
    for property in component.all_properties() {
        if !matches!(property.typed_value(), Some(Value::Date(_) | Value::DateTime(_))) {
            continue;
        }
        match property.value_as_datetime() {
            Ok(Some(dt)) => f(property, dt),
            Ok(None) => {}
            Err(err) => tracing::warn!(
                property = property.property_name(),
                %err,
                "skipping unreadable value"
            ),
        }
    }

    for child in component.children() {
        visit_datetimes(child, f);
    }
}

/// Resolve every date-time of the tree, returning how many there were.
pub fn resolve_datetimes(tree: &ComponentTree) -> usize {
    let mut count = 0;
    visit_datetimes(tree.root(), &mut |_, _| count += 1);
    tracing::debug!(count, "resolved date-times");
    count
}

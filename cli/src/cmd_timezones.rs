// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::BTreeMap, error::Error, fmt::Write as _, path::PathBuf};

use calmodel_core::{ComponentTree, IcsService, Timezone, TimezoneProvider, timezone_service};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::util::{ArgOutputFormat, arg_file, get_file, read_calendar, visit_datetimes};

#[derive(Debug, Clone)]
pub struct CmdTimezones {
    pub file: PathBuf,
    pub output_format: ArgOutputFormat,
}

impl CmdTimezones {
    pub const NAME: &str = "timezones";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("tz")
            .about("List the timezones an iCalendar file uses and where they resolve")
            .arg(arg_file())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: get_file(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, service: &IcsService) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing timezones...");
        let tree = read_calendar(service, &self.file).await?;
        let usages = collect(&tree);
        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&usages)?),
            ArgOutputFormat::Table => print!("{}", to_table(&usages)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
enum Source {
    /// The process-wide timezone database.
    Database,
    /// A VTIMEZONE of the document.
    Document,
    /// Nothing, kept as a phantom.
    Unresolved,
}

impl Source {
    fn of(tz: &Timezone) -> Self {
        if tz.is_phantom() {
            Self::Unresolved
        } else if timezone_service().get_timezone(tz.id()).is_some() {
            Self::Database
        } else {
            Self::Document
        }
    }

    fn label(self) -> String {
        match self {
            Self::Database => "database".green().to_string(),
            Self::Document => "document".cyan().to_string(),
            Self::Unresolved => "unresolved".yellow().to_string(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct Usage {
    tzid: String,
    source: Source,
    uses: usize,
}

fn collect(tree: &ComponentTree) -> Vec<Usage> {
    let mut usages: BTreeMap<String, Usage> = BTreeMap::new();
    visit_datetimes(tree.root(), &mut |_, dt| {
        let tz = dt.timezone();
        if !tz.needs_tzid() {
            return;
        }
        usages
            .entry(tz.id().to_owned())
            .or_insert_with(|| Usage {
                tzid: tz.id().to_owned(),
                source: Source::of(tz),
                uses: 0,
            })
            .uses += 1;
    });
    usages.into_values().collect()
}

fn to_table(usages: &[Usage]) -> String {
    let width = usages.iter().map(|u| u.tzid.len()).max().unwrap_or(0);
    let mut out = String::new();
    for usage in usages {
        let _ = writeln!(
            out,
            "{:<width$}  {}  {}",
            usage.tzid,
            usage.source.label(),
            usage.uses
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR: &str = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VTIMEZONE\r
TZID:Custom/Plus3\r
BEGIN:STANDARD\r
DTSTART:19700101T000000\r
TZOFFSETFROM:+0300\r
TZOFFSETTO:+0300\r
END:STANDARD\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
UID:1\r
DTSTART;TZID=Custom/Plus3:20240105T090000\r
DTEND;TZID=Europe/Berlin:20240105T100000\r
RECURRENCE-ID;TZID=Europe/Berlin:20240105T090000\r
DTSTAMP;TZID=Nowhere/Land:20240101T000000\r
END:VEVENT\r
END:VCALENDAR\r
";

    #[test]
    fn reports_sources() {
        let tree = IcsService::new().parse(CALENDAR, None).unwrap();
        let usages = collect(&tree);
        let summary: Vec<_> = usages.iter().map(|u| (u.tzid.as_str(), u.source, u.uses)).collect();
        assert_eq!(
            summary,
            [
                ("Custom/Plus3", Source::Document, 1),
                ("Europe/Berlin", Source::Database, 2),
                ("Nowhere/Land", Source::Unresolved, 1),
            ]
        );
    }

    #[test]
    fn renders_table() {
        colored::control::set_override(false);
        let usages = [Usage {
            tzid: "Asia/Tokyo".to_owned(),
            source: Source::Database,
            uses: 3,
        }];
        assert_eq!(to_table(&usages), "Asia/Tokyo  database  3\n");
    }
}

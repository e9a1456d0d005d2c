// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use calmodel_core::{ComponentTree, IcsService};
use clap::{ArgMatches, Command};

use crate::util::{arg_file, get_file, read_calendar, resolve_datetimes};

#[derive(Debug, Clone)]
pub struct CmdNormalize {
    pub file: PathBuf,
}

impl CmdNormalize {
    pub const NAME: &str = "normalize";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("fmt")
            .about("Reserialize an iCalendar file with its timezone definitions")
            .arg(arg_file())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: get_file(matches),
        }
    }

    pub async fn run(self, service: &IcsService) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "normalizing file...");
        let mut tree = read_calendar(service, &self.file).await?;
        print!("{}", normalize(service, &mut tree)?);
        Ok(())
    }
}

fn normalize(service: &IcsService, tree: &mut ComponentTree) -> Result<String, Box<dyn Error>> {
    resolve_datetimes(tree);
    Ok(service.serialize(tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;

    #[test]
    fn parses_arguments() {
        let matches = Cli::command().try_get_matches_from(["test", "fmt", "a.ics"]).unwrap();
        let sub_matches = matches.subcommand_matches(CmdNormalize::NAME).unwrap();
        assert_eq!(CmdNormalize::from(sub_matches).file, PathBuf::from("a.ics"));
    }

    #[test]
    fn appends_referenced_vtimezones() {
        let service = IcsService::new();
        let mut tree = service
            .parse(
                "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:1\r\n\
                 DTSTART;TZID=Europe/Berlin:20240105T090000\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n",
                None,
            )
            .unwrap();

        let text = normalize(&service, &mut tree).unwrap();
        assert_eq!(text.matches("BEGIN:VTIMEZONE").count(), 1);
        assert!(text.contains("TZID:Europe/Berlin\r\n"));
        assert_eq!(normalize(&service, &mut tree).unwrap(), text);
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calmodel_core::{
    ComponentTree, DateTime, IcsService, Timezone, TimezoneProvider, timezone_service,
};
use clap::{Arg, ArgMatches, Command, arg, crate_version};
use jiff::{Timestamp, civil, tz::TimeZone};

#[derive(Debug, Clone)]
pub struct CmdNewEvent {
    pub summary: String,
    pub start: String,
    pub end: Option<String>,
    pub tz: Option<String>,
    pub uid: Option<String>,
    pub description: Option<String>,
}

impl CmdNewEvent {
    pub const NAME: &str = "new-event";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Print a new calendar holding one event")
            .arg(arg!(-s --summary <SUMMARY> "Summary of the event").required(true))
            .arg(Self::datetime_arg(arg!(--start <START> "Start of the event").required(true)))
            .arg(Self::datetime_arg(arg!(--end [END] "End of the event")))
            .arg(
                arg!(--tz [TZID] "Timezone of start and end")
                    .long_help("Timezone of start and end. Defaults to the system timezone."),
            )
            .arg(arg!(--uid [UID] "UID of the event, a random one if omitted"))
            .arg(arg!(-d --description [DESCRIPTION] "Description of the event"))
    }

    fn datetime_arg(arg: Arg) -> Arg {
        arg.long_help(
            "A date (YYYY-MM-DD) for an all-day event, or a date and time (YYYY-MM-DD HH:MM)",
        )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let get = |name: &str| matches.get_one::<String>(name).cloned();
        Self {
            summary: get("summary").unwrap_or_default(),
            start: get("start").unwrap_or_default(),
            end: get("end"),
            tz: get("tz"),
            uid: get("uid"),
            description: get("description"),
        }
    }

    pub fn run(self, service: &IcsService) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating new event...");
        let mut calendar = self.build(service)?;
        print!("{}", service.serialize(&mut calendar)?);
        Ok(())
    }

    fn build(&self, service: &IcsService) -> Result<ComponentTree, Box<dyn Error>> {
        let tz = match &self.tz {
            Some(tzid) => timezone_service()
                .get_timezone(tzid)
                .ok_or_else(|| format!("Unknown timezone: {tzid}"))?,
            None => system_timezone(),
        };

        let start = parse_datetime(&self.start, &tz)?;
        let end = self.end.as_deref().map(|end| parse_datetime(end, &tz)).transpose()?;
        if let Some(end) = &end {
            if end.is_date() != start.is_date() {
                return Err("Start and end must both be dates or both be date-times".into());
            }
            if end < &start {
                return Err("End must not be before start".into());
            }
        }

        let mut calendar = service.create_component("VCALENDAR")?;
        let mut root = calendar.root_mut();
        root.set_version(Some("2.0"))?;
        root.set_prodid(Some(&format!("-//calmodel//calmodel {}//EN", crate_version!())))?;

        let event = root.add_subcomponent(service.create_component("VEVENT")?)?;
        let mut event = calendar.get_mut(event).ok_or("Event vanished")?;
        let uid = match &self.uid {
            Some(uid) => uid.clone(),
            None => uuid::Uuid::new_v4().to_string(),
        };
        event.set_uid(Some(&uid))?;
        event.set_stamp_time(Some(&now()))?;
        event.set_summary(Some(&self.summary))?;
        event.set_description(self.description.as_deref())?;
        event.set_start_time(Some(&start))?;
        event.set_end_time(end.as_ref())?;
        Ok(calendar)
    }
}

fn system_timezone() -> Timezone {
    let system = TimeZone::system();
    let found = system
        .iana_name()
        .and_then(|name| timezone_service().get_timezone(name));
    match found {
        Some(tz) => tz,
        None => {
            tracing::warn!("system timezone has no IANA name, using floating time");
            Timezone::floating()
        }
    }
}

fn now() -> DateTime {
    DateTime::utc(Timestamp::now().to_zoned(TimeZone::UTC).datetime())
}

/// All-day dates are floating, date-times are in `tz`.
fn parse_datetime(text: &str, tz: &Timezone) -> Result<DateTime, Box<dyn Error>> {
    let text = text.trim();
    let parsed = if text.contains(':') {
        text.parse::<civil::DateTime>()
            .map(|dt| DateTime::new(dt, tz.clone()))
    } else {
        text.parse::<civil::Date>()
            .map(|date| DateTime::date(date, Timezone::floating()))
    };
    parsed.map_err(|_| {
        format!("Invalid date format: {text}. Expected format: YYYY-MM-DD or YYYY-MM-DD HH:MM")
            .into()
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::Cli;

    fn cmd(start: &str, end: Option<&str>) -> CmdNewEvent {
        CmdNewEvent {
            summary: "Launch".to_owned(),
            start: start.to_owned(),
            end: end.map(str::to_owned),
            tz: Some("Europe/Berlin".to_owned()),
            uid: Some("launch-1".to_owned()),
            description: None,
        }
    }

    #[test]
    fn parses_arguments() {
        let matches = Cli::command()
            .try_get_matches_from([
                "test", "new-event", "-s", "Launch", "--start", "2024-05-01 09:30", "--tz", "UTC",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdNewEvent::NAME).unwrap();
        let parsed = CmdNewEvent::from(sub_matches);
        assert_eq!(parsed.summary, "Launch");
        assert_eq!(parsed.start, "2024-05-01 09:30");
        assert_eq!(parsed.tz.as_deref(), Some("UTC"));
        assert_eq!(parsed.end, None);

        assert!(Cli::command().try_get_matches_from(["test", "new-event", "-s", "x"]).is_err());
    }

    #[test]
    fn parses_datetimes() {
        let tz = timezone_service().get_timezone("Asia/Tokyo").unwrap();
        #[rustfmt::skip]
        let cases = [
            ("2024-05-01",       true,  date(2024, 5, 1).at(0, 0, 0, 0)),
            ("2024-05-01 09:30", false, date(2024, 5, 1).at(9, 30, 0, 0)),
            ("2024-05-01T09:30", false, date(2024, 5, 1).at(9, 30, 0, 0)),
        ];
        for (text, is_date, civil) in cases {
            let dt = parse_datetime(text, &tz).unwrap();
            assert_eq!(dt.is_date(), is_date, "{text}");
            assert_eq!(dt.civil(), civil, "{text}");
            assert_eq!(dt.timezone().is_floating(), is_date, "{text}");
        }
        assert!(parse_datetime("tomorrow", &tz).is_err());
    }

    #[test]
    fn builds_a_calendar() {
        let service = IcsService::new();
        let mut calendar = cmd("2024-05-01 09:30", Some("2024-05-01 10:00")).build(&service).unwrap();
        let text = service.serialize(&mut calendar).unwrap();

        assert!(text.contains("UID:launch-1\r\n"));
        assert!(text.contains("SUMMARY:Launch\r\n"));
        assert!(text.contains("DTSTART;TZID=Europe/Berlin:20240501T093000\r\n"));
        assert!(text.contains("DTEND;TZID=Europe/Berlin:20240501T100000\r\n"));
        assert_eq!(text.matches("BEGIN:VTIMEZONE").count(), 1);
        assert!(!text.contains("DESCRIPTION"));
    }

    #[test]
    fn rejects_bad_ranges() {
        let service = IcsService::new();
        assert!(cmd("2024-05-01 09:30", Some("2024-05-01 09:00")).build(&service).is_err());
        assert!(cmd("2024-05-01", Some("2024-05-01 09:00")).build(&service).is_err());

        let mut unknown = cmd("2024-05-01", None);
        unknown.tz = Some("Nowhere/Land".to_owned());
        let err = unknown.build(&service).unwrap_err();
        assert!(err.to_string().contains("Unknown timezone"));
    }

    #[test]
    fn generates_uids() {
        let service = IcsService::new();
        let mut command = cmd("2024-05-01", None);
        command.uid = None;
        let calendar = command.build(&service).unwrap();
        let event = calendar.root().first_subcomponent("VEVENT").unwrap().unwrap();
        let uid = event.uid().unwrap();
        assert_eq!(uid.len(), 36);
        assert!(event.stamp_time().unwrap().unwrap().is_utc());
    }
}

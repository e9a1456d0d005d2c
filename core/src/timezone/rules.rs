// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! UTC offsets from the observances of a VTIMEZONE.
//!
//! Only the yearly rules VTIMEZONEs use in practice are expanded
//! (`FREQ=YEARLY` with `BYMONTH` and an optional `BYDAY` or `BYMONTHDAY`),
//! anything else counts as its DTSTART and RDATEs alone.

use jiff::civil::{self, Weekday};

use calmodel_ical::{ComponentKind, PropertyKind, Value, ValueType};

use crate::ComponentRef;
use crate::timezone::shift;

/// TZID property of a VTIMEZONE.
pub(crate) fn tzid_of(component: ComponentRef<'_>) -> Option<String> {
    component
        .find(&PropertyKind::TzId)
        .and_then(|p| p.value())
        .filter(|id| !id.is_empty())
}

#[derive(Debug, Clone)]
pub(crate) struct VTimezoneRules {
    observances: Vec<Observance>,
}

#[derive(Debug, Clone)]
struct Observance {
    offset_from: i32,
    offset_to: i32,
    start: civil::DateTime,
    rdates: Vec<civil::DateTime>,
    rule: Option<YearlyRule>,
}

#[derive(Debug, Clone)]
struct YearlyRule {
    month: i8,
    day: DaySelector,
    until: Option<civil::DateTime>,
    last_year: Option<i16>,
}

#[derive(Debug, Clone, Copy)]
enum DaySelector {
    Weekday { nth: i8, weekday: Weekday },
    MonthDay(i8),
    Start,
}

impl VTimezoneRules {
    pub(crate) fn from_component(component: ComponentRef<'_>) -> Self {
        let observances = component
            .children()
            .filter(|c| matches!(c.kind(), ComponentKind::Standard | ComponentKind::Daylight))
            .filter_map(Observance::from_component)
            .collect();
        Self { observances }
    }

    /// Offset in seconds at a UTC wall time: the `TZOFFSETTO` of the latest
    /// onset not after it, before any onset the `TZOFFSETFROM` of the first.
    pub(crate) fn offset_at(&self, utc: civil::DateTime) -> i32 {
        let mut latest: Option<(civil::DateTime, i32)> = None;
        for obs in &self.observances {
            for local in obs.onsets_around(utc.year()) {
                let onset = shift(local, -obs.offset_from);
                if onset <= utc && latest.is_none_or(|(at, _)| onset > at) {
                    latest = Some((onset, obs.offset_to));
                }
            }
        }

        match latest {
            Some((_, offset)) => offset,
            None => self
                .observances
                .iter()
                .min_by_key(|obs| obs.start)
                .map_or(0, |obs| obs.offset_from),
        }
    }
}

impl Observance {
    fn from_component(component: ComponentRef<'_>) -> Option<Self> {
        let offset = |kind: PropertyKind| match component.find(&kind)?.typed_value()? {
            Value::UtcOffset(offset) => Some(offset.as_seconds()),
            _ => None,
        };
        let offset_from = offset(PropertyKind::TzOffsetFrom)?;
        let offset_to = offset(PropertyKind::TzOffsetTo)?;
        let start = component
            .find(&PropertyKind::DtStart)
            .and_then(|p| p.property().typed_value().and_then(civil_of))?;

        let rdates = component
            .raw_properties()
            .iter()
            .filter(|p| *p.kind() == PropertyKind::RDate)
            .filter_map(|p| p.typed_value().and_then(civil_of))
            .collect();

        let rule = component
            .find(&PropertyKind::RRule)
            .and_then(|p| match p.property().typed_value()? {
                Value::Recur(text) => YearlyRule::parse(text, start),
                _ => None,
            });

        Some(Self {
            offset_from,
            offset_to,
            start,
            rdates,
            rule,
        })
    }

    /// Local onset times relevant for offsets in `year`.
    fn onsets_around(&self, year: i16) -> impl Iterator<Item = civil::DateTime> + '_ {
        let expanded = self.rule.iter().flat_map(move |rule| {
            // A rule that ended before the window still holds its last onset
            let ended = rule.last_year.filter(|last| *last < year.saturating_sub(1));
            ended
                .into_iter()
                .chain(year.saturating_sub(1)..=year.saturating_add(1))
                .filter_map(|y| rule.onset_in(y, self.start))
        });
        std::iter::once(self.start)
            .chain(self.rdates.iter().copied())
            .chain(expanded)
    }
}

impl YearlyRule {
    fn parse(text: &str, start: civil::DateTime) -> Option<Self> {
        let mut freq_yearly = false;
        let mut month = None;
        let mut day = DaySelector::Start;
        let mut until = None;
        let mut count = None;

        for part in text.split(';') {
            let (key, value) = part.split_once('=')?;
            match key.to_ascii_uppercase().as_str() {
                "FREQ" => freq_yearly = value.eq_ignore_ascii_case("YEARLY"),
                "BYMONTH" => month = value.parse::<i8>().ok(),
                "BYDAY" => day = parse_by_day(value)?,
                "BYMONTHDAY" => day = DaySelector::MonthDay(value.parse().ok()?),
                "UNTIL" => until = parse_until(value),
                "COUNT" => count = value.parse::<i16>().ok(),
                "INTERVAL" if value != "1" => return None,
                _ => {}
            }
        }

        if !freq_yearly {
            tracing::debug!(rule = text, "ignoring non-yearly VTIMEZONE rule");
            return None;
        }

        Some(Self {
            month: month.unwrap_or(start.month()),
            day,
            until,
            last_year: count.map(|n| start.year().saturating_add(n.saturating_sub(1))),
        })
    }

    fn onset_in(&self, year: i16, start: civil::DateTime) -> Option<civil::DateTime> {
        if year < start.year() || self.last_year.is_some_and(|last| year > last) {
            return None;
        }

        let date = match self.day {
            DaySelector::Weekday { nth, weekday } => {
                civil::Date::new(year, self.month, 1)
                    .ok()?
                    .nth_weekday_of_month(nth, weekday)
                    .ok()?
            }
            DaySelector::MonthDay(day) if day < 0 => {
                let first = civil::Date::new(year, self.month, 1).ok()?;
                first.last_of_month().checked_sub(jiff::Span::new().days(i64::from(-day - 1))).ok()?
            }
            DaySelector::MonthDay(day) => civil::Date::new(year, self.month, day).ok()?,
            DaySelector::Start => civil::Date::new(year, self.month, start.day()).ok()?,
        };

        let onset = date.to_datetime(start.time());
        if onset < start || self.until.is_some_and(|until| onset > until) {
            None
        } else {
            Some(onset)
        }
    }
}

fn parse_by_day(value: &str) -> Option<DaySelector> {
    // Only a single day is meaningful for an onset
    let value = value.split(',').next()?;
    let split = value.len().checked_sub(2)?;
    let (nth, day) = (value.get(..split)?, value.get(split..)?);
    let weekday = match day.to_ascii_uppercase().as_str() {
        "MO" => Weekday::Monday,
        "TU" => Weekday::Tuesday,
        "WE" => Weekday::Wednesday,
        "TH" => Weekday::Thursday,
        "FR" => Weekday::Friday,
        "SA" => Weekday::Saturday,
        "SU" => Weekday::Sunday,
        _ => return None,
    };
    let nth = match nth.trim_start_matches('+') {
        "" => 1,
        n => n.parse().ok()?,
    };
    Some(DaySelector::Weekday { nth, weekday })
}

fn parse_until(value: &str) -> Option<civil::DateTime> {
    Value::parse(ValueType::DateTime, value)
        .or_else(|_| Value::parse(ValueType::Date, value))
        .ok()
        .as_ref()
        .and_then(civil_of)
}

fn civil_of(value: &Value) -> Option<civil::DateTime> {
    match value {
        Value::DateTime(dt) => Some(dt.civil_date_time()),
        Value::Date(d) => Some(d.civil_date().to_datetime(civil::Time::midnight())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::IcsService;

    const NEW_YORK: &str = "\
BEGIN:VTIMEZONE\r
TZID:Custom/New_York\r
BEGIN:DAYLIGHT\r
TZOFFSETFROM:-0500\r
TZOFFSETTO:-0400\r
TZNAME:EDT\r
DTSTART:20070311T020000\r
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU\r
END:DAYLIGHT\r
BEGIN:STANDARD\r
TZOFFSETFROM:-0400\r
TZOFFSETTO:-0500\r
TZNAME:EST\r
DTSTART:20071104T020000\r
RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU\r
END:STANDARD\r
END:VTIMEZONE\r
";

    #[test]
    fn yearly_rules() {
        let tree = IcsService::new().parse(NEW_YORK, None).unwrap();
        let rules = VTimezoneRules::from_component(tree.root());

        #[rustfmt::skip]
        let cases = [
            (date(2024, 1, 15).at(12, 0, 0, 0),  -5 * 3600),
            (date(2024, 3, 10).at(6, 59, 0, 0),  -5 * 3600),
            (date(2024, 3, 10).at(7, 0, 0, 0),   -4 * 3600),
            (date(2024, 7, 1).at(0, 0, 0, 0),    -4 * 3600),
            (date(2024, 11, 3).at(5, 59, 0, 0),  -4 * 3600),
            (date(2024, 11, 3).at(6, 0, 0, 0),   -5 * 3600),
            // before the first onset
            (date(2000, 7, 1).at(0, 0, 0, 0),    -5 * 3600),
        ];
        for (utc, offset) in cases {
            assert_eq!(rules.offset_at(utc), offset, "{utc}");
        }
    }

    #[test]
    fn ended_rules_keep_their_last_onset() {
        let tree = IcsService::new()
            .parse(
                "BEGIN:VTIMEZONE\r\nTZID:Custom/Ended\r\n\
                 BEGIN:DAYLIGHT\r\nTZOFFSETFROM:+0100\r\nTZOFFSETTO:+0200\r\n\
                 DTSTART:19800330T020000\r\nRRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU;COUNT=3\r\n\
                 END:DAYLIGHT\r\n\
                 BEGIN:STANDARD\r\nTZOFFSETFROM:+0200\r\nTZOFFSETTO:+0100\r\n\
                 DTSTART:19800928T030000\r\nRRULE:FREQ=YEARLY;BYMONTH=9;BYDAY=-1SU;COUNT=2\r\n\
                 END:STANDARD\r\nEND:VTIMEZONE\r\n",
                None,
            )
            .unwrap();
        let rules = VTimezoneRules::from_component(tree.root());
        // the last onset is the DAYLIGHT one of 1982
        assert_eq!(rules.offset_at(date(1990, 12, 1).at(0, 0, 0, 0)), 7200);
        assert_eq!(rules.offset_at(date(1981, 12, 1).at(0, 0, 0, 0)), 3600);
    }

    #[test]
    fn parses_rule_parts() {
        let start = date(1996, 10, 27).at(2, 0, 0, 0);
        let rule = YearlyRule::parse("FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU;COUNT=3", start).unwrap();
        assert_eq!(rule.onset_in(1997, start), Some(date(1997, 10, 26).at(2, 0, 0, 0)));
        assert_eq!(rule.onset_in(1999, start), None);
        assert_eq!(rule.onset_in(1995, start), None);

        let rule = YearlyRule::parse("FREQ=YEARLY;UNTIL=19981025T070000Z", start).unwrap();
        assert_eq!(rule.onset_in(1997, start), Some(date(1997, 10, 27).at(2, 0, 0, 0)));
        assert_eq!(rule.onset_in(1998, start), None);

        assert!(YearlyRule::parse("FREQ=MONTHLY;BYDAY=1SU", start).is_none());
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! VTIMEZONE definitions built from the transitions of a database zone.
//!
//! Transitions between 1970 and 2038 are grouped by their (from, to, name,
//! dst) signature. Within a group, onsets following one weekday rule in
//! consecutive years become an observance with a yearly RRULE; the run that
//! reaches the end of the range has no COUNT, so the rule goes on after it.
//! The remaining onsets of a group share one observance as RDATEs.

use std::fmt::Write as _;

use jiff::civil::{self, Weekday};
use jiff::tz::{Offset, TimeZone};
use jiff::{SignedDuration, Timestamp};

use calmodel_ical::{ComponentKind, PropertyKind, Value, ValueDateTime, ValueUtcOffset};

use crate::{ComponentTree, Property};

const FIRST_YEAR: i16 = 1970;
const END_YEAR: i16 = 2038;
const MIN_RUN: usize = 2;

#[derive(Debug, PartialEq, Eq)]
struct Signature {
    from: i32,
    to: i32,
    name: String,
    dst: bool,
}

/// The n-th (or last, `-1`) weekday of a month at a wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearlyPattern {
    month: i8,
    nth: i8,
    weekday: Weekday,
    time: civil::Time,
}

impl YearlyPattern {
    fn candidates(onset: civil::DateTime) -> impl Iterator<Item = Self> {
        let date = onset.date();
        let pattern = |nth| Self {
            month: date.month(),
            nth,
            weekday: date.weekday(),
            time: onset.time(),
        };
        let last = (date.day() + 7 > date.days_in_month()).then(|| pattern(-1));
        std::iter::once(pattern((date.day() - 1) / 7 + 1)).chain(last)
    }

    fn matches(self, onset: civil::DateTime) -> bool {
        Self::candidates(onset).any(|p| p == self)
    }

    fn rrule(self, count: Option<usize>) -> String {
        let mut rule = format!(
            "FREQ=YEARLY;BYMONTH={};BYDAY={}{}",
            self.month,
            self.nth,
            weekday_code(self.weekday)
        );
        if let Some(count) = count {
            let _ = write!(rule, ";COUNT={count}");
        }
        rule
    }
}

struct Observance {
    start: civil::DateTime,
    rdates: Vec<civil::DateTime>,
    rrule: Option<String>,
}

pub(super) fn vtimezone(id: &str, zone: &TimeZone) -> Option<ComponentTree> {
    let first = civil::Date::new(FIRST_YEAR, 1, 1).ok()?.to_datetime(civil::Time::midnight());
    let start = TimeZone::UTC.to_ambiguous_timestamp(first).compatible().ok()?;
    let end = TimeZone::UTC
        .to_ambiguous_timestamp(civil::Date::new(END_YEAR, 1, 1).ok()?.to_datetime(civil::Time::midnight()))
        .compatible()
        .ok()?;

    let mut groups: Vec<(Signature, Vec<civil::DateTime>)> = Vec::new();
    for transition in zone.following(start).take_while(|t| t.timestamp() < end) {
        let before = offset_before(zone, transition.timestamp());
        let signature = Signature {
            from: before.seconds(),
            to: transition.offset().seconds(),
            name: transition.abbreviation().to_owned(),
            dst: transition.dst().is_dst(),
        };
        // Onsets are written in the wall time of the offset being left
        let onset = before.to_datetime(transition.timestamp());
        match groups.iter_mut().find(|(sig, _)| *sig == signature) {
            Some((_, onsets)) => onsets.push(onset),
            None => groups.push((signature, vec![onset])),
        }
    }

    let mut tree = ComponentTree::empty(ComponentKind::VTimeZone);
    let mut root = tree.root_mut();
    root.push_property(Property::with_value(PropertyKind::TzId, Value::Text(id.to_owned())));
    root.push_property(Property::with_value(
        PropertyKind::XName("X-LIC-LOCATION".to_owned()),
        Value::Raw(id.to_owned()),
    ));

    if groups.is_empty() {
        let info = zone.to_offset_info(start);
        let signature = Signature {
            from: info.offset().seconds(),
            to: info.offset().seconds(),
            name: info.abbreviation().to_owned(),
            dst: info.dst().is_dst(),
        };
        groups.push((signature, vec![first]));
    }

    let mut observances: Vec<(civil::DateTime, ComponentTree)> = Vec::new();
    for (signature, onsets) in &groups {
        for obs in split_runs(onsets) {
            observances.push((obs.start, observance(signature, &obs)));
        }
    }
    observances.sort_by_key(|(start, _)| *start);
    for (_, child) in observances {
        root.push_child(child);
    }
    Some(tree)
}

fn offset_before(zone: &TimeZone, at: Timestamp) -> Offset {
    at.checked_sub(SignedDuration::from_secs(1))
        .map_or(Offset::UTC, |ts| zone.to_offset(ts))
}

/// Split the ascending onsets of one signature into yearly rules and the
/// leftovers.
fn split_runs(onsets: &[civil::DateTime]) -> Vec<Observance> {
    let mut observances = Vec::new();
    let mut singles = Vec::new();

    let mut i = 0;
    while let Some(&head) = onsets.get(i) {
        let best = YearlyPattern::candidates(head)
            .map(|pattern| (pattern, run_length(onsets, i, pattern)))
            .fold(None, |best: Option<(YearlyPattern, usize)>, (pattern, len)| match best {
                Some((_, best_len)) if best_len >= len => best,
                _ => Some((pattern, len)),
            });

        match best {
            Some((pattern, len)) if len >= MIN_RUN => {
                let last = onsets[i + len - 1];
                let count = (last.year() < END_YEAR - 1).then_some(len);
                observances.push(Observance {
                    start: head,
                    rdates: Vec::new(),
                    rrule: Some(pattern.rrule(count)),
                });
                i += len;
            }
            _ => {
                singles.push(head);
                i += 1;
            }
        }
    }

    if let Some((&start, rest)) = singles.split_first() {
        observances.push(Observance {
            start,
            rdates: rest.to_vec(),
            rrule: None,
        });
    }
    observances
}

/// Number of onsets from `from` on that follow `pattern` one year apart.
fn run_length(onsets: &[civil::DateTime], from: usize, pattern: YearlyPattern) -> usize {
    let mut len = 0;
    let mut previous: Option<civil::DateTime> = None;
    for &onset in &onsets[from..] {
        let follows = previous.is_none_or(|p| onset.year() == p.year() + 1);
        if !follows || !pattern.matches(onset) {
            break;
        }
        len += 1;
        previous = Some(onset);
    }
    len
}

fn observance(signature: &Signature, obs: &Observance) -> ComponentTree {
    let kind = if signature.dst {
        ComponentKind::Daylight
    } else {
        ComponentKind::Standard
    };
    let mut tree = ComponentTree::empty(kind);
    let mut root = tree.root_mut();

    let offset = |seconds| Value::UtcOffset(ValueUtcOffset::from_seconds(seconds));
    root.push_property(Property::with_value(PropertyKind::TzOffsetFrom, offset(signature.from)));
    root.push_property(Property::with_value(PropertyKind::TzOffsetTo, offset(signature.to)));
    if !signature.name.is_empty() {
        root.push_property(Property::with_value(
            PropertyKind::TzName,
            Value::Text(signature.name.clone()),
        ));
    }

    let local = |dt: &civil::DateTime| Value::DateTime(ValueDateTime::from_civil(*dt, false));
    root.push_property(Property::with_value(PropertyKind::DtStart, local(&obs.start)));
    if let Some(rule) = &obs.rrule {
        root.push_property(Property::with_value(PropertyKind::RRule, Value::Recur(rule.clone())));
    }
    for rdate in &obs.rdates {
        root.push_property(Property::with_value(PropertyKind::RDate, local(rdate)));
    }
    tree
}

const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "MO",
        Weekday::Tuesday => "TU",
        Weekday::Wednesday => "WE",
        Weekday::Thursday => "TH",
        Weekday::Friday => "FR",
        Weekday::Saturday => "SA",
        Weekday::Sunday => "SU",
    }
}

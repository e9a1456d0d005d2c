// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use calmodel_ical::{Value, ValueDuration, ValueType};

use crate::IcsError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Length of time as written in iCalendar, e.g. `-P1DT2H` or `P3W`.
///
/// The fields are kept as set, [`Duration::normalize`] folds them into the
/// canonical form. After [`Duration::make_immutable`] every setter fails with
/// [`IcsError::ImmutableViolation`].
///
/// Equality and ordering compare the total length, `P1D` equals `PT24H`.
#[derive(Debug, Default)]
pub struct Duration {
    negative: bool,
    weeks: u32,
    days: u32,
    hours: u32,
    minutes: u32,
    seconds: u32,
    immutable: bool,
}

impl Duration {
    /// A mutable zero-length duration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mutable duration of the given total length, normalized.
    #[must_use]
    pub fn from_seconds(seconds: i64) -> Self {
        Self::from(ValueDuration::from_seconds(seconds))
    }

    /// Whether setters are still allowed.
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        !self.immutable
    }

    /// Freeze this duration, there is no way back.
    pub const fn make_immutable(&mut self) {
        self.immutable = true;
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub const fn weeks(&self) -> u32 {
        self.weeks
    }

    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_is_negative(&mut self, negative: bool) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        self.negative = negative;
        Ok(())
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_weeks(&mut self, weeks: u32) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        self.weeks = weeks;
        Ok(())
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_days(&mut self, days: u32) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        self.days = days;
        Ok(())
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_hours(&mut self, hours: u32) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        self.hours = hours;
        Ok(())
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_minutes(&mut self, minutes: u32) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        self.minutes = minutes;
        Ok(())
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_seconds(&mut self, seconds: u32) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        self.seconds = seconds;
        Ok(())
    }

    /// Total length in seconds, negative for negative durations.
    #[must_use]
    pub fn in_seconds(&self) -> i64 {
        let abs = i64::from(self.weeks) * SECONDS_PER_WEEK
            + i64::from(self.days) * SECONDS_PER_DAY
            + i64::from(self.hours) * SECONDS_PER_HOUR
            + i64::from(self.minutes) * SECONDS_PER_MINUTE
            + i64::from(self.seconds);
        if self.negative { -abs } else { abs }
    }

    /// Replace the length, the fields end up normalized.
    ///
    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_in_seconds(&mut self, seconds: i64) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        self.assign(ValueDuration::from_seconds(seconds));
        Ok(())
    }

    /// Add another duration to this one, the result is normalized.
    ///
    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn add_duration(&mut self, other: &Self) -> Result<(), IcsError> {
        self.set_in_seconds(self.in_seconds().saturating_add(other.in_seconds()))
    }

    /// Compare total lengths.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.in_seconds().cmp(&other.in_seconds())
    }

    /// Back to zero length.
    ///
    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn reset(&mut self) -> Result<(), IcsError> {
        self.set_in_seconds(0)
    }

    /// Fold the fields into the canonical form: whole weeks only, or days,
    /// hours, minutes and seconds each below their next unit.
    ///
    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn normalize(&mut self) -> Result<(), IcsError> {
        self.set_in_seconds(self.in_seconds())
    }

    /// iCalendar text of this duration.
    #[must_use]
    pub fn ical_string(&self) -> String {
        self.to_value().to_string()
    }

    /// Replace this duration with the parsed text.
    ///
    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen, [`IcsError::InvalidArgument`]
    /// if the text is not a duration.
    pub fn set_ical_string(&mut self, text: &str) -> Result<(), IcsError> {
        self.ensure_mutable()?;
        let parsed: Self = text.parse()?;
        self.negative = parsed.negative;
        self.weeks = parsed.weeks;
        self.days = parsed.days;
        self.hours = parsed.hours;
        self.minutes = parsed.minutes;
        self.seconds = parsed.seconds;
        Ok(())
    }

    /// The codec value of this duration.
    ///
    /// Weeks mixed with other fields cannot be written as a week duration,
    /// they are folded into days.
    #[must_use]
    pub fn to_value(&self) -> ValueDuration {
        let positive = !self.negative;
        if self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.weeks > 0 {
            return ValueDuration::Week {
                positive,
                week: self.weeks,
            };
        }
        ValueDuration::DateTime {
            positive,
            day: self.days.saturating_add(self.weeks.saturating_mul(7)),
            hour: self.hours,
            minute: self.minutes,
            second: self.seconds,
        }
    }

    fn assign(&mut self, value: ValueDuration) {
        let fresh = Self::from(value);
        self.negative = fresh.negative;
        self.weeks = fresh.weeks;
        self.days = fresh.days;
        self.hours = fresh.hours;
        self.minutes = fresh.minutes;
        self.seconds = fresh.seconds;
    }

    const fn ensure_mutable(&self) -> Result<(), IcsError> {
        if self.immutable {
            Err(IcsError::ImmutableViolation)
        } else {
            Ok(())
        }
    }
}

/// Cloning yields a mutable copy, also of a frozen duration.
impl Clone for Duration {
    fn clone(&self) -> Self {
        Self {
            immutable: false,
            ..*self
        }
    }
}

impl From<ValueDuration> for Duration {
    fn from(value: ValueDuration) -> Self {
        match value {
            ValueDuration::Week { positive, week } => Self {
                negative: !positive,
                weeks: week,
                ..Self::default()
            },
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => Self {
                negative: !positive,
                days: day,
                hours: hour,
                minutes: minute,
                seconds: second,
                ..Self::default()
            },
        }
    }
}

impl FromStr for Duration {
    type Err = IcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Value::parse(ValueType::Duration, s.trim()) {
            Ok(Value::Duration(value)) => Ok(Self::from(value)),
            Ok(_) => Err(IcsError::Unexpected(format!("`{s}` did not decode as a duration"))),
            Err(err) => Err(IcsError::InvalidArgument(err.to_string())),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_value(), f)
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.in_seconds() == other.in_seconds()
    }
}

impl Eq for Duration {}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints() {
        #[rustfmt::skip]
        let cases = [
            ("PT1H",        3_600,       "PT1H"),
            ("-P1DT2H",     -93_600,     "-P1DT2H"),
            ("P2W",         1_209_600,   "P2W"),
            ("PT90M",       5_400,       "PT90M"),
            ("P0D",         0,           "PT0S"),
        ];
        for (text, seconds, printed) in cases {
            let d: Duration = text.parse().unwrap();
            assert_eq!(d.in_seconds(), seconds, "{text}");
            assert_eq!(d.ical_string(), printed, "{text}");
        }
        assert!("1H".parse::<Duration>().is_err());
    }

    #[test]
    fn normalizes() {
        let mut d: Duration = "PT90M".parse().unwrap();
        d.normalize().unwrap();
        assert_eq!((d.hours(), d.minutes()), (1, 30));
        assert_eq!(d.ical_string(), "PT1H30M");

        let mut d = Duration::new();
        d.set_days(14).unwrap();
        d.normalize().unwrap();
        assert_eq!((d.weeks(), d.days()), (2, 0));

        let mut d = Duration::new();
        d.set_in_seconds(-(SECONDS_PER_DAY + 61)).unwrap();
        assert!(d.is_negative());
        assert_eq!((d.days(), d.hours(), d.minutes(), d.seconds()), (1, 0, 1, 1));
    }

    #[test]
    fn arithmetic_and_compare() {
        let mut a: Duration = "PT1H".parse().unwrap();
        let b: Duration = "-PT30M".parse().unwrap();
        a.add_duration(&b).unwrap();
        assert_eq!(a.in_seconds(), 1_800);
        assert_eq!(a.compare(&b), Ordering::Greater);
        assert_eq!("P1D".parse::<Duration>().unwrap(), "PT24H".parse::<Duration>().unwrap());

        a.reset().unwrap();
        assert_eq!(a.in_seconds(), 0);
    }

    #[test]
    fn mixed_weeks_print_as_days() {
        let mut d = Duration::new();
        d.set_weeks(1).unwrap();
        d.set_hours(2).unwrap();
        assert_eq!(d.ical_string(), "P7DT2H");
        assert_eq!(d.in_seconds(), SECONDS_PER_WEEK + 2 * SECONDS_PER_HOUR);
    }

    #[test]
    fn immutable_rejects_setters() {
        let mut d: Duration = "PT5M".parse().unwrap();
        d.make_immutable();
        assert!(!d.is_mutable());
        assert_eq!(d.set_minutes(1), Err(IcsError::ImmutableViolation));
        assert_eq!(d.set_ical_string("PT1M"), Err(IcsError::ImmutableViolation));
        assert_eq!(d.normalize(), Err(IcsError::ImmutableViolation));
        assert_eq!(d.in_seconds(), 300);

        let mut copy = d.clone();
        assert!(copy.is_mutable());
        copy.set_minutes(1).unwrap();
        assert_eq!(d.minutes(), 5);
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::fmt;

use jiff::SignedDuration;
use jiff::civil;

use calmodel_ical::{Value, ValueDate, ValueDateTime};

use crate::{Duration, IcsError, Timezone};

/// A DATE or DATE-TIME value together with the timezone it is expressed in.
///
/// Floating values carry the floating handle, UTC values the UTC handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    civil: civil::DateTime,
    is_date: bool,
    timezone: Timezone,
}

impl DateTime {
    /// Wall time in a timezone.
    #[must_use]
    pub const fn new(civil: civil::DateTime, timezone: Timezone) -> Self {
        Self {
            civil,
            is_date: false,
            timezone,
        }
    }

    /// A pure date, optionally attributed to a timezone.
    #[must_use]
    pub fn date(date: civil::Date, timezone: Timezone) -> Self {
        Self {
            civil: date.to_datetime(civil::Time::midnight()),
            is_date: true,
            timezone,
        }
    }

    /// Wall time in UTC.
    #[must_use]
    pub fn utc(civil: civil::DateTime) -> Self {
        Self::new(civil, Timezone::utc())
    }

    /// Floating wall time.
    #[must_use]
    pub fn floating(civil: civil::DateTime) -> Self {
        Self::new(civil, Timezone::floating())
    }

    /// A codec value in the given timezone, UTC date-times ignore it.
    ///
    /// # Errors
    /// [`IcsError::Unexpected`] for values that are neither DATE nor DATE-TIME.
    pub fn from_value(value: &Value, timezone: Timezone) -> Result<Self, IcsError> {
        match value {
            Value::Date(date) => Ok(Self::date(date.civil_date(), timezone)),
            Value::DateTime(dt) if dt.time.utc => Ok(Self::utc(dt.civil_date_time())),
            Value::DateTime(dt) => Ok(Self::new(dt.civil_date_time(), timezone)),
            other => Err(IcsError::Unexpected(format!(
                "`{other}` is neither a date nor a date-time"
            ))),
        }
    }

    /// The codec value, wall time as stored.
    #[must_use]
    pub fn to_value(&self) -> Value {
        if self.is_date {
            Value::Date(ValueDate::from(self.civil.date()))
        } else {
            Value::DateTime(ValueDateTime::from_civil(self.civil, self.timezone.is_utc()))
        }
    }

    /// Wall time in [`DateTime::timezone`].
    #[must_use]
    pub const fn civil(&self) -> civil::DateTime {
        self.civil
    }

    #[must_use]
    pub const fn is_date(&self) -> bool {
        self.is_date
    }

    #[must_use]
    pub const fn timezone(&self) -> &Timezone {
        &self.timezone
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.timezone.is_utc()
    }

    /// UTC wall time of this value, floating and phantom values read as UTC.
    #[must_use]
    pub fn utc_civil(&self) -> civil::DateTime {
        self.timezone.to_utc(self.civil)
    }

    /// The same instant in another timezone. Dates and floating values keep
    /// their wall time and only change their zone.
    #[must_use]
    pub fn in_timezone(&self, timezone: &Timezone) -> Self {
        if self.is_date || self.timezone.is_floating() || timezone.is_floating() {
            return Self {
                timezone: timezone.clone(),
                ..self.clone()
            };
        }
        Self {
            civil: timezone.from_utc(self.utc_civil()),
            is_date: false,
            timezone: timezone.clone(),
        }
    }

    /// `self - other` as a normalized duration.
    #[must_use]
    pub fn subtract_date(&self, other: &Self) -> Duration {
        let diff: SignedDuration = self.utc_civil().duration_since(other.utc_civil());
        Duration::from_seconds(diff.as_secs())
    }

    /// Wall time plus a duration; a date stays a date when the duration is
    /// made of whole days.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] if the result leaves the supported range.
    pub fn add_duration(&self, duration: &Duration) -> Result<Self, IcsError> {
        let seconds = duration.in_seconds();
        let civil = self
            .civil
            .checked_add(SignedDuration::from_secs(seconds))
            .map_err(|e| IcsError::invalid(e.to_string()))?;
        Ok(Self {
            civil,
            is_date: self.is_date && seconds % 86_400 == 0,
            timezone: self.timezone.clone(),
        })
    }

    /// iCalendar text of the value, without TZID.
    #[must_use]
    pub fn ical_string(&self) -> String {
        self.to_value().to_string()
    }
}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Instants compare first, a date sorts before a date-time at its midnight.
impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_civil()
            .cmp(&other.utc_civil())
            .then_with(|| other.is_date.cmp(&self.is_date))
            .then_with(|| self.timezone.id().cmp(other.timezone.id()))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_value(), f)?;
        if self.timezone.needs_tzid() {
            write!(f, " ({})", self.timezone)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::timezone::{TimezoneProvider, timezone_service};

    fn new_york() -> Timezone {
        timezone_service().get_timezone("America/New_York").unwrap()
    }

    #[test]
    fn converts_between_zones() {
        let local = DateTime::new(date(2024, 1, 15).at(9, 0, 0, 0), new_york());
        let utc = local.in_timezone(&Timezone::utc());
        assert_eq!(utc.civil(), date(2024, 1, 15).at(14, 0, 0, 0));
        assert_eq!(utc.ical_string(), "20240115T140000Z");
        assert_eq!(utc, DateTime::utc(date(2024, 1, 15).at(14, 0, 0, 0)));
        assert_eq!(utc.utc_civil(), local.utc_civil());

        let floating = local.in_timezone(&Timezone::floating());
        assert_eq!(floating.civil(), local.civil());
        assert!(floating.timezone().is_floating());
    }

    #[test]
    fn subtracts_and_adds() {
        let start = DateTime::utc(date(2024, 1, 1).at(0, 0, 0, 0));
        let end = DateTime::utc(date(2024, 1, 1).at(2, 0, 0, 0));
        assert_eq!(end.subtract_date(&start).in_seconds(), 7_200);

        let hour: Duration = "PT1H".parse().unwrap();
        assert_eq!(start.add_duration(&hour).unwrap().civil(), date(2024, 1, 1).at(1, 0, 0, 0));

        let day = DateTime::date(date(2024, 2, 28), Timezone::floating());
        let next = day.add_duration(&"P1D".parse().unwrap()).unwrap();
        assert!(next.is_date());
        assert_eq!(next.ical_string(), "20240229");
        assert!(!day.add_duration(&hour).unwrap().is_date());
    }

    #[test]
    fn decodes_values() {
        let value = Value::parse(calmodel_ical::ValueType::DateTime, "20240101T090000Z").unwrap();
        let dt = DateTime::from_value(&value, new_york()).unwrap();
        assert!(dt.is_utc());

        let value = Value::parse(calmodel_ical::ValueType::Date, "20240101").unwrap();
        let dt = DateTime::from_value(&value, Timezone::floating()).unwrap();
        assert!(dt.is_date());
        assert_eq!(dt.to_value(), value);

        let text = Value::Text("x".to_owned());
        assert!(matches!(DateTime::from_value(&text, Timezone::floating()), Err(IcsError::Unexpected(_))));
    }
}

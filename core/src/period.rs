// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use calmodel_ical::{Value, ValueDateTime, ValuePeriod, ValueType};

use crate::{DateTime, Duration, IcsError};

/// A span of time between two date-times.
///
/// The text form may give the end or a duration, the period always keeps a
/// concrete end. After [`Period::make_immutable`] every setter fails with
/// [`IcsError::ImmutableViolation`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Period {
    start: Option<DateTime>,
    end: Option<DateTime>,
    immutable: bool,
}

impl Period {
    /// A mutable period.
    #[must_use]
    pub const fn new(start: DateTime, end: DateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            immutable: false,
        }
    }

    #[must_use]
    pub const fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    #[must_use]
    pub const fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_start(&mut self, start: Option<DateTime>) -> Result<(), IcsError> {
        self.check_mutable()?;
        self.start = start;
        Ok(())
    }

    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen.
    pub fn set_end(&mut self, end: Option<DateTime>) -> Result<(), IcsError> {
        self.check_mutable()?;
        self.end = end;
        Ok(())
    }

    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        !self.immutable
    }

    pub const fn make_immutable(&mut self) {
        self.immutable = true;
    }

    const fn check_mutable(&self) -> Result<(), IcsError> {
        if self.immutable {
            Err(IcsError::ImmutableViolation)
        } else {
            Ok(())
        }
    }

    fn bounds(&self) -> Result<(&DateTime, &DateTime), IcsError> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(IcsError::Unexpected("period without start or end".to_owned())),
        }
    }

    /// `end - start`.
    ///
    /// # Errors
    /// [`IcsError::Unexpected`] if start or end is missing.
    pub fn duration(&self) -> Result<Duration, IcsError> {
        let (start, end) = self.bounds()?;
        Ok(end.subtract_date(start))
    }

    /// `start/end` in iCalendar encoding.
    ///
    /// # Errors
    /// [`IcsError::Unexpected`] if start or end is missing.
    pub fn ical_string(&self) -> Result<String, IcsError> {
        let (start, end) = self.bounds()?;
        Ok(format!("{}/{}", start.ical_string(), end.ical_string()))
    }

    /// Replace start and end from `start/end` or `start/duration`.
    ///
    /// # Errors
    /// [`IcsError::ImmutableViolation`] once frozen,
    /// [`IcsError::InvalidArgument`] if the text is no period.
    pub fn set_ical_string(&mut self, text: &str) -> Result<(), IcsError> {
        self.check_mutable()?;
        let Value::Period(period) = Value::parse(ValueType::Period, text)
            .map_err(|err| IcsError::invalid(err.to_string()))?
        else {
            return Err(IcsError::Unexpected(format!("`{text}` did not decode as a period")));
        };

        let decoded = Self::from(period);
        if decoded.end.is_none() {
            return Err(IcsError::invalid(format!("period `{text}` ends out of range")));
        }
        self.start = decoded.start;
        self.end = decoded.end;
        Ok(())
    }
}

fn datetime_of(value: ValueDateTime) -> DateTime {
    if value.time.utc {
        DateTime::utc(value.civil_date_time())
    } else {
        DateTime::floating(value.civil_date_time())
    }
}

impl From<ValuePeriod> for Period {
    fn from(period: ValuePeriod) -> Self {
        let start = datetime_of(period.start());
        let end = match period {
            ValuePeriod::Explicit { end, .. } => Some(datetime_of(end)),
            ValuePeriod::Duration { duration, .. } => {
                start.add_duration(&Duration::from(duration)).ok()
            }
        };
        Self {
            start: Some(start),
            end,
            immutable: false,
        }
    }
}

/// The copy is mutable again.
impl Clone for Period {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            end: self.end.clone(),
            immutable: false,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.ical_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Attribute date-time values to timezone handles, and back.

use calmodel_ical::{ComponentKind, ParameterKind, ParameterName, Value, ValueType};

use crate::timezone::rules::tzid_of;
use crate::timezone::{TimezoneProvider, timezone_service};
use crate::{ComponentRef, DateTime, IcsError, Property, Timezone};

/// Read the value of a property as a date-time.
///
/// `owner` is the component holding the property, `None` when detached.
/// The TZID lookup order is: the calendar's registered timezones, the tree's
/// provider, the process-wide service, then the timezone the value was
/// written with or a VTIMEZONE of the calendar. An id none of them knows
/// yields a phantom. The handle found is registered on the calendar.
pub(crate) fn read(
    property: &Property,
    owner: Option<ComponentRef<'_>>,
) -> Result<Option<DateTime>, IcsError> {
    let Some(value) = property.typed_value() else {
        return Ok(None);
    };

    match value {
        Value::DateTime(dt) if dt.time.utc => {
            return DateTime::from_value(value, Timezone::utc()).map(Some);
        }
        Value::Date(_) | Value::DateTime(_) => {}
        other => {
            return Err(IcsError::Unexpected(format!(
                "{} holds `{other}`, not a date-time",
                property.property_name()
            )));
        }
    }

    let embedded = property.embedded_timezone();
    let id = embedded
        .map(|tz| tz.id().to_owned())
        .or_else(|| property.tzid())
        .filter(|id| !id.is_empty());
    let Some(id) = id else {
        return DateTime::from_value(value, Timezone::floating()).map(Some);
    };

    let calendar = owner.map(ComponentRef::enclosing_calendar);
    let tz = resolve(&id, embedded, calendar);
    if let Some(calendar) = calendar {
        calendar.tree().register(calendar.id(), &tz);
    }
    DateTime::from_value(value, tz).map(Some)
}

fn resolve(id: &str, embedded: Option<&Timezone>, calendar: Option<ComponentRef<'_>>) -> Timezone {
    lookup(id, embedded, calendar).unwrap_or_else(|| {
        if timezone_service().report_missing() {
            tracing::warn!(tzid = id, "unknown timezone, keeping it as a phantom");
        }
        Timezone::phantom(id)
    })
}

/// The handle for a TZID as seen from `calendar`, `None` where a read would
/// make a phantom.
pub(crate) fn lookup(
    id: &str,
    embedded: Option<&Timezone>,
    calendar: Option<ComponentRef<'_>>,
) -> Option<Timezone> {
    if let Some(calendar) = calendar {
        if let Some(tz) = calendar.tree().registered(calendar.id(), id) {
            return Some(tz);
        }
        if let Some(tz) = calendar.tz_provider().and_then(|p| p.get_timezone(id)) {
            return Some(tz);
        }
    }

    if let Some(tz) = timezone_service().get_timezone(id) {
        return Some(tz);
    }

    if let Some(tz) = embedded.filter(|tz| tz.definition().is_some()) {
        return Some(tz.clone());
    }

    let defined = calendar.and_then(|calendar| {
        calendar
            .children()
            .filter(|c| *c.kind() == ComponentKind::VTimeZone)
            .find(|c| tzid_of(*c).as_deref() == Some(id))
            .and_then(|c| c.vtimezone())
    });
    if defined.is_some() {
        tracing::debug!(tzid = id, "timezone resolved from document VTIMEZONE");
    }
    defined
}

/// Write a date-time to a property.
///
/// Attached properties reference their timezone through TZID. Detached ones
/// have no calendar to record the timezone in: values in a real zone are
/// stored in UTC, dates and phantom zones are stored floating.
pub(crate) fn store(property: &mut Property, value: &DateTime, attached: bool) {
    let tz = value.timezone();
    let stored = if attached || value.is_utc() || tz.is_floating() {
        value.clone()
    } else if value.is_date() {
        DateTime::date(value.civil().date(), Timezone::floating())
    } else if tz.is_phantom() {
        DateTime::floating(value.civil())
    } else {
        value.in_timezone(&Timezone::utc())
    };

    property.set_typed_value(Some(stored.to_value()));

    let tzid = ParameterName::Known(ParameterKind::TimeZoneIdentifier);
    let stored_tz = stored.timezone();
    if stored_tz.needs_tzid() {
        property.put_parameter(tzid, stored_tz.id());
        property.set_zone(Some(stored_tz.clone()));
    } else {
        property.drop_parameter(&tzid);
    }

    let value_type = ParameterName::Known(ParameterKind::ValueType);
    if stored.is_date() {
        property.put_parameter(value_type, ValueType::Date.name());
    } else {
        property.drop_parameter(&value_type);
    }
}

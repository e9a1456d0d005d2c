// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed accessors for the common single-instance properties.
//!
//! Getters read the first property of the kind, `None` if there is none.
//! Setters remove every property of the kind and add one if a value is
//! given.

use calmodel_ical::{Method, PropertyKind, Status, Value};

use crate::{ComponentMut, ComponentRef, DateTime, Duration, IcsError, Property};

/// PRIORITY of a component that has none.
pub const INVALID_VALUE: i32 = -1;

macro_rules! text_attributes {
    ($($getter:ident, $setter:ident => $kind:ident, $name:literal;)+) => {
        impl ComponentRef<'_> {
            $(
                #[doc = concat!("The ", $name, " property as text.")]
                #[must_use]
                pub fn $getter(self) -> Option<String> {
                    self.find(&PropertyKind::$kind).and_then(|p| p.value())
                }
            )+
        }

        impl ComponentMut<'_> {
            $(
                #[doc = concat!("Replace the ", $name, " property.")]
                ///
                /// # Errors
                /// [`IcsError::InvalidArgument`] if the value is no valid
                /// value of the property.
                pub fn $setter(&mut self, value: Option<&str>) -> Result<(), IcsError> {
                    self.set_text(PropertyKind::$kind, value)
                }
            )+
        }
    };
}

macro_rules! token_attributes {
    ($($getter:ident, $setter:ident => $kind:ident, $token:ty, $name:literal;)+) => {
        impl ComponentRef<'_> {
            $(
                #[doc = concat!("The ", $name, " token.")]
                #[must_use]
                pub fn $getter(self) -> Option<String> {
                    self.find(&PropertyKind::$kind).and_then(|p| p.value())
                }
            )+
        }

        impl ComponentMut<'_> {
            $(
                #[doc = concat!("Replace the ", $name, " token, stored in its canonical form.")]
                ///
                /// # Errors
                /// [`IcsError::InvalidArgument`] for unknown tokens.
                pub fn $setter(&mut self, value: Option<&str>) -> Result<(), IcsError> {
                    let token = value
                        .map(|v| {
                            v.parse::<$token>().map_err(|()| {
                                IcsError::invalid(format!("unknown {} `{v}`", $name))
                            })
                        })
                        .transpose()?;
                    self.set_text(PropertyKind::$kind, token.map(|t| t.name()))
                }
            )+
        }
    };
}

macro_rules! datetime_attributes {
    ($($getter:ident, $setter:ident => $kind:ident, $name:literal;)+) => {
        impl ComponentRef<'_> {
            $(
                #[doc = concat!("The ", $name, " property as a date-time.")]
                ///
                /// # Errors
                /// [`IcsError::Unexpected`] if the value is not a date-time.
                pub fn $getter(self) -> Result<Option<DateTime>, IcsError> {
                    match self.find(&PropertyKind::$kind) {
                        Some(p) => p.value_as_datetime(),
                        None => Ok(None),
                    }
                }
            )+
        }

        impl ComponentMut<'_> {
            $(
                #[doc = concat!("Replace the ", $name, " property.")]
                ///
                /// # Errors
                /// [`IcsError::InvalidArgument`] for a timezone with an
                /// empty id.
                pub fn $setter(&mut self, value: Option<&DateTime>) -> Result<(), IcsError> {
                    self.set_datetime(PropertyKind::$kind, value)
                }
            )+
        }
    };
}

text_attributes! {
    uid, set_uid                 => Uid, "UID";
    prodid, set_prodid           => ProdId, "PRODID";
    version, set_version         => Version, "VERSION";
    summary, set_summary         => Summary, "SUMMARY";
    description, set_description => Description, "DESCRIPTION";
    location, set_location       => Location, "LOCATION";
    categories, set_categories   => Categories, "CATEGORIES";
    url, set_url                 => Url, "URL";
}

token_attributes! {
    method, set_method => Method, Method, "METHOD";
    status, set_status => Status, Status, "STATUS";
}

datetime_attributes! {
    start_time, set_start_time         => DtStart, "DTSTART";
    end_time, set_end_time             => DtEnd, "DTEND";
    due_time, set_due_time             => Due, "DUE";
    stamp_time, set_stamp_time         => DtStamp, "DTSTAMP";
    last_modified, set_last_modified   => LastModified, "LAST-MODIFIED";
    created_time, set_created_time     => Created, "CREATED";
    completed_time, set_completed_time => Completed, "COMPLETED";
    recurrence_id, set_recurrence_id   => RecurrenceId, "RECURRENCE-ID";
}

impl ComponentRef<'_> {
    /// PRIORITY, [`INVALID_VALUE`] if absent.
    #[must_use]
    pub fn priority(self) -> i32 {
        match self.find(&PropertyKind::Priority).and_then(|p| p.property().typed_value()) {
            Some(Value::Integer(priority)) => *priority,
            _ => INVALID_VALUE,
        }
    }

    /// DURATION, read-only.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self.find(&PropertyKind::Duration)?.property().typed_value()? {
            Value::Duration(duration) => Some(Duration::from(*duration)),
            _ => None,
        }
    }
}

impl ComponentMut<'_> {
    /// Replace PRIORITY, [`INVALID_VALUE`] removes it.
    pub fn set_priority(&mut self, priority: i32) {
        let kind = PropertyKind::Priority;
        self.remove_where(|p| *p.kind() == kind);
        if priority != INVALID_VALUE {
            self.push_property(Property::with_value(kind, Value::Integer(priority)));
        }
    }

    fn set_text(&mut self, kind: PropertyKind, value: Option<&str>) -> Result<(), IcsError> {
        let property = value
            .map(|value| {
                let mut property = Property::new(kind.clone());
                property.set_value(Some(value)).map(|()| property)
            })
            .transpose()?;

        self.remove_where(|p| *p.kind() == kind);
        if let Some(property) = property {
            self.push_property(property);
        }
        Ok(())
    }

    fn set_datetime(&mut self, kind: PropertyKind, value: Option<&DateTime>) -> Result<(), IcsError> {
        if value.is_some_and(|dt| dt.timezone().needs_tzid() && dt.timezone().id().is_empty()) {
            return Err(IcsError::invalid("timezone without id"));
        }

        self.remove_where(|p| *p.kind() == kind);
        let Some(value) = value else {
            return Ok(());
        };
        let index = self.push_property(Property::new(kind));
        match self.property_mut(index) {
            Some(mut property) => property.set_value_as_datetime(value),
            None => Err(IcsError::Unexpected("property vanished".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use calmodel_ical::ComponentKind;
    use jiff::civil::date;

    use super::*;
    use crate::timezone::{TimezoneProvider, timezone_service};
    use crate::{ComponentTree, Timezone};

    #[test]
    fn singleton_text_attributes() {
        let mut tree = ComponentTree::new(ComponentKind::VEvent).unwrap();
        assert_eq!(tree.root().uid(), None);

        tree.root_mut().set_uid(Some("A")).unwrap();
        tree.root_mut().set_uid(Some("B")).unwrap();
        assert_eq!(tree.root().uid().as_deref(), Some("B"));
        assert_eq!(tree.root().properties("UID").unwrap().count(), 1);

        tree.root_mut().set_summary(Some("Lunch, maybe")).unwrap();
        assert_eq!(tree.root().summary().as_deref(), Some("Lunch, maybe"));
        tree.root_mut().set_summary(None).unwrap();
        assert_eq!(tree.root().summary(), None);

        assert!(tree.root_mut().set_url(Some("https://example.com/")).is_ok());
        assert_eq!(tree.root().url().as_deref(), Some("https://example.com/"));
    }

    #[test]
    fn token_attributes_are_canonical() {
        let mut tree = ComponentTree::new(ComponentKind::VCalendar).unwrap();
        tree.root_mut().set_method(Some("publish")).unwrap();
        assert_eq!(tree.root().method().as_deref(), Some("PUBLISH"));

        let err = tree.root_mut().set_method(Some("shout")).unwrap_err();
        assert!(matches!(err, IcsError::InvalidArgument(_)));
        assert_eq!(tree.root().method().as_deref(), Some("PUBLISH"));

        tree.root_mut().set_status(Some("in-process")).unwrap();
        assert_eq!(tree.root().status().as_deref(), Some("IN-PROCESS"));
    }

    #[test]
    fn priority_and_duration() {
        let mut tree = ComponentTree::new(ComponentKind::VTodo).unwrap();
        assert_eq!(tree.root().priority(), INVALID_VALUE);
        tree.root_mut().set_priority(3);
        assert_eq!(tree.root().priority(), 3);
        tree.root_mut().set_priority(INVALID_VALUE);
        assert_eq!(tree.root().property_count(), 0);

        assert!(tree.root().duration().is_none());
        let mut duration = Property::new(PropertyKind::Duration);
        duration.set_value(Some("PT90M")).unwrap();
        tree.root_mut().add_property(duration).unwrap();
        assert_eq!(tree.root().duration().map(|d| d.in_seconds()), Some(5400));
    }

    #[test]
    fn datetime_attributes() {
        let mut calendar = ComponentTree::new(ComponentKind::VCalendar).unwrap();
        let event = calendar
            .root_mut()
            .add_subcomponent(ComponentTree::new(ComponentKind::VEvent).unwrap())
            .unwrap();

        let tokyo = timezone_service().get_timezone("Asia/Tokyo").unwrap();
        let start = DateTime::new(date(2024, 3, 1).at(10, 0, 0, 0), tokyo);
        let mut component = calendar.get_mut(event).unwrap();
        component.set_start_time(Some(&start)).unwrap();
        component.set_end_time(Some(&DateTime::utc(date(2024, 3, 1).at(2, 0, 0, 0)))).unwrap();

        let event = calendar.get(event).unwrap();
        assert_eq!(event.start_time().unwrap(), Some(start));
        assert!(event.end_time().unwrap().unwrap().is_utc());
        assert_eq!(event.due_time().unwrap(), None);

        let dtstart = event.first_property("DTSTART").unwrap().unwrap();
        assert_eq!(dtstart.to_string(), "DTSTART;TZID=Asia/Tokyo:20240301T100000");
        let registered: Vec<_> = calendar.root().referenced_timezones().iter().map(|tz| tz.id().to_owned()).collect();
        assert_eq!(registered, ["Asia/Tokyo"]);

        let id = event.id();
        let bad = DateTime::new(date(2024, 3, 1).at(10, 0, 0, 0), Timezone::phantom(""));
        let err = calendar.get_mut(id).unwrap().set_start_time(Some(&bad)).unwrap_err();
        assert!(matches!(err, IcsError::InvalidArgument(_)));
        assert!(calendar.get(id).unwrap().start_time().unwrap().is_some());
    }
}

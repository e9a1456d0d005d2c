// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property kinds and value types for iCalendar properties.
//!
//! This module defines the `PropertyKind` enum that represents all standard
//! iCalendar properties defined in RFC 5545, along with their allowed value types.

use std::fmt;
use std::str::FromStr;

use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT,
    KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE,
    KW_DURATION, KW_EXDATE, KW_FREEBUSY, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION, KW_METHOD,
    KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE, KW_RECURRENCE_ID,
    KW_RELATED_TO, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE, KW_SEQUENCE, KW_STATUS,
    KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME, KW_TZOFFSETFROM, KW_TZOFFSETTO,
    KW_TZURL, KW_UID, KW_URL, KW_VERSION,
};
use crate::parameter::{ValueType, is_x_name};

/// Macro to define `PropertyKind` with its default and alternative value types.
///
/// Usage: `property_kind!(Variant => KW => Default, [Alternatives...], ...)`
macro_rules! property_kind {
    (
        $(
            $variant:ident => $kw:ident => $default:ident, [$($alt:ident),* $(,)?]
        ),* $(,)?
    ) => {
        /// Kind of iCalendar property.
        /// Represents all standard properties defined in RFC 5545.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[expect(missing_docs)]
        pub enum PropertyKind {
            $(
                $variant,
            )*
            /// Custom experimental x-name property, keeps the literal name
            XName(String),
            /// Unrecognized IANA property, keeps the literal name
            Unrecognized(String),
        }

        impl PropertyKind {
            /// Every registered kind, in declaration order
            pub const REGISTERED: &'static [Self] = &[$(Self::$variant,)*];

            /// Canonical name for registered kinds, the literal name otherwise.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $kw,)*
                    Self::XName(name) | Self::Unrecognized(name) => name,
                }
            }

            /// Default value type, `None` for x-name and unrecognized properties.
            #[must_use]
            pub const fn default_value_type(&self) -> Option<ValueType> {
                match self {
                    $(Self::$variant => Some(ValueType::$default),)*
                    Self::XName(_) | Self::Unrecognized(_) => None,
                }
            }

            /// Whether the `VALUE` parameter may select the given type.
            #[must_use]
            pub fn allows(&self, value_type: ValueType) -> bool {
                match self {
                    $(Self::$variant => {
                        value_type == ValueType::$default $(|| value_type == ValueType::$alt)*
                    })*
                    Self::XName(_) | Self::Unrecognized(_) => true,
                }
            }
        }

        impl FromStr for PropertyKind {
            type Err = InvalidPropertyName;

            /// Property names are case-insensitive per RFC 5545
            fn from_str(name: &str) -> Result<Self, Self::Err> {
                $(
                    if name.eq_ignore_ascii_case($kw) {
                        return Ok(Self::$variant);
                    }
                )*
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                    Err(InvalidPropertyName(name.to_owned()))
                } else if is_x_name(name) {
                    Ok(Self::XName(name.to_owned()))
                } else {
                    Ok(Self::Unrecognized(name.to_owned()))
                }
            }
        }
    };
}

property_kind! {
    // 3.7. Calendar Properties
    CalScale        => KW_CALSCALE          => Text, [],
    Method          => KW_METHOD            => Text, [],
    ProdId          => KW_PRODID            => Text, [],
    Version         => KW_VERSION           => Text, [],
    // 3.8.1. Descriptive Component Properties
    Attach          => KW_ATTACH            => Uri, [Binary],
    Categories      => KW_CATEGORIES        => Text, [],
    Class           => KW_CLASS             => Text, [],
    Comment         => KW_COMMENT           => Text, [],
    Description     => KW_DESCRIPTION       => Text, [],
    Geo             => KW_GEO               => Float, [],
    Location        => KW_LOCATION          => Text, [],
    PercentComplete => KW_PERCENT_COMPLETE  => Integer, [],
    Priority        => KW_PRIORITY          => Integer, [],
    Resources       => KW_RESOURCES         => Text, [],
    Status          => KW_STATUS            => Text, [],
    Summary         => KW_SUMMARY           => Text, [],
    // 3.8.2. Date and Time Component Properties
    Completed       => KW_COMPLETED         => DateTime, [],
    DtEnd           => KW_DTEND             => DateTime, [Date],
    Due             => KW_DUE               => DateTime, [Date],
    DtStart         => KW_DTSTART           => DateTime, [Date],
    Duration        => KW_DURATION          => Duration, [],
    FreeBusy        => KW_FREEBUSY          => Period, [],
    Transp          => KW_TRANSP            => Text, [],
    // 3.8.3. Time Zone Component Properties
    TzId            => KW_TZID              => Text, [],
    TzName          => KW_TZNAME            => Text, [],
    TzOffsetFrom    => KW_TZOFFSETFROM      => UtcOffset, [],
    TzOffsetTo      => KW_TZOFFSETTO        => UtcOffset, [],
    TzUrl           => KW_TZURL             => Uri, [],
    // 3.8.4. Relationship Component Properties
    Attendee        => KW_ATTENDEE          => CalAddress, [],
    Contact         => KW_CONTACT           => Text, [],
    Organizer       => KW_ORGANIZER         => CalAddress, [],
    RecurrenceId    => KW_RECURRENCE_ID     => DateTime, [Date],
    RelatedTo       => KW_RELATED_TO        => Text, [],
    Url             => KW_URL               => Uri, [],
    Uid             => KW_UID               => Text, [],
    // 3.8.5. Recurrence Component Properties
    ExDate          => KW_EXDATE            => DateTime, [Date],
    RDate           => KW_RDATE             => DateTime, [Date, Period],
    RRule           => KW_RRULE             => Recur, [],
    // 3.8.6. Alarm Component Properties
    Action          => KW_ACTION            => Text, [],
    Repeat          => KW_REPEAT            => Integer, [],
    Trigger         => KW_TRIGGER           => Duration, [DateTime],
    // 3.8.7. Change Management Component Properties
    Created         => KW_CREATED           => DateTime, [],
    DtStamp         => KW_DTSTAMP           => DateTime, [],
    LastModified    => KW_LAST_MODIFIED     => DateTime, [],
    Sequence        => KW_SEQUENCE          => Integer, [],
    // 3.8.8. Miscellaneous Component Properties
    RequestStatus   => KW_REQUEST_STATUS    => Text, [],
}

impl PropertyKind {
    /// Whether the value uses the plain TEXT codec.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.default_value_type() == Some(ValueType::Text)
            && !matches!(self, Self::RequestStatus)
    }

    /// Whether the value is a comma separated TEXT list.
    #[must_use]
    pub const fn is_multi_text(&self) -> bool {
        matches!(self, Self::Categories | Self::Resources)
    }

    /// Whether a content line may carry several comma separated date-time
    /// like values, which are split into one property each when parsing.
    #[must_use]
    pub const fn is_multi_valued_date(&self) -> bool {
        matches!(self, Self::ExDate | Self::RDate | Self::FreeBusy)
    }

    /// Whether this is an experimental property.
    #[must_use]
    pub const fn is_experimental(&self) -> bool {
        matches!(self, Self::XName(_))
    }

    /// Whether this property is registered in RFC 5545.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        !matches!(self, Self::XName(_) | Self::Unrecognized(_))
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property name that is neither registered nor a valid token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid property name `{0}`")]
pub struct InvalidPropertyName(pub String);

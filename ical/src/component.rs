// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component kinds, RFC 5545 Section 3.6 and RFC 7953.

use std::fmt;
use std::str::FromStr;

use crate::keyword::{
    KW_AVAILABLE, KW_DAYLIGHT, KW_STANDARD, KW_VALARM, KW_VAVAILABILITY, KW_VCALENDAR, KW_VEVENT,
    KW_VFREEBUSY, KW_VJOURNAL, KW_VTIMEZONE, KW_VTODO,
};
use crate::parameter::is_x_name;

macro_rules! component_kind {
    ($($variant:ident => $kw:ident),+ $(,)?) => {
        /// Kind of iCalendar component.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[expect(missing_docs)]
        pub enum ComponentKind {
            $($variant,)+
            /// Experimental component, keeps the literal name
            XName(String),
            /// Unrecognized IANA component, keeps the literal name
            Unrecognized(String),
        }

        impl ComponentKind {
            /// Every well-known kind, in declaration order
            pub const REGISTERED: &'static [Self] = &[$(Self::$variant,)+];

            /// Canonical name for well-known kinds, the literal name otherwise.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $kw,)+
                    Self::XName(name) | Self::Unrecognized(name) => name,
                }
            }
        }

        impl FromStr for ComponentKind {
            type Err = std::convert::Infallible;

            /// Component names are case-insensitive per RFC 5545
            fn from_str(name: &str) -> Result<Self, Self::Err> {
                $(
                    if name.eq_ignore_ascii_case($kw) {
                        return Ok(Self::$variant);
                    }
                )+
                if is_x_name(name) {
                    Ok(Self::XName(name.to_owned()))
                } else {
                    Ok(Self::Unrecognized(name.to_owned()))
                }
            }
        }
    };
}

component_kind! {
    VCalendar     => KW_VCALENDAR,
    VEvent        => KW_VEVENT,
    VTodo         => KW_VTODO,
    VJournal      => KW_VJOURNAL,
    VFreeBusy     => KW_VFREEBUSY,
    VTimeZone     => KW_VTIMEZONE,
    VAlarm        => KW_VALARM,
    Standard      => KW_STANDARD,
    Daylight      => KW_DAYLIGHT,
    VAvailability => KW_VAVAILABILITY,
    Available     => KW_AVAILABLE,
}

impl ComponentKind {
    /// Whether this is a well-known component kind.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        !matches!(self, Self::XName(_) | Self::Unrecognized(_))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_component_kind() {
        #[rustfmt::skip]
        let cases = [
            ("VCALENDAR",   ComponentKind::VCalendar),
            ("vevent",      ComponentKind::VEvent),
            ("Standard",    ComponentKind::Standard),
            ("X-WR-THING",  ComponentKind::XName("X-WR-THING".to_owned())),
            ("VFOO",        ComponentKind::Unrecognized("VFOO".to_owned())),
        ];
        for (name, expected) in cases {
            let Ok(kind) = name.parse::<ComponentKind>();
            assert_eq!(kind, expected, "{name}");
        }
        assert_eq!(ComponentKind::VTimeZone.to_string(), "VTIMEZONE");
        assert!(!ComponentKind::XName("X-A".to_owned()).is_registered());
        assert_eq!(ComponentKind::REGISTERED.len(), 11);
    }
}

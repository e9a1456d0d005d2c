// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::keyword::{
    KW_ALTREP, KW_BINARY, KW_BOOLEAN, KW_CAL_ADDRESS, KW_CN, KW_CUTYPE, KW_DATE, KW_DATETIME,
    KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_DIR, KW_DURATION, KW_ENCODING, KW_FBTYPE, KW_FLOAT,
    KW_FMTTYPE, KW_INTEGER, KW_LANGUAGE, KW_MEMBER, KW_PARTSTAT, KW_PERIOD, KW_RANGE, KW_RECUR,
    KW_RELATED, KW_RELTYPE, KW_ROLE, KW_RSVP, KW_SENT_BY, KW_TEXT, KW_TIME, KW_TZID, KW_URI,
    KW_UTC_OFFSET, KW_VALUE, KW_X_PREFIX,
};

/// Keyword-backed enum with a case-insensitive `FromStr` and a canonical name.
macro_rules! impl_keyword_enum {
    (
        $(#[$attr:meta])*
        enum $ty:ident {
            $(
                $variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $(#[$attr])*
        pub enum $ty {
            $(
                $variant,
            )+
        }

        impl $ty {
            /// All variants, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the canonical keyword
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $kw,
                    )+
                }
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($kw) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(())
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use impl_keyword_enum;

impl_keyword_enum! {
    /// Registered iCalendar parameters, RFC 5545 Section 3.2
    #[expect(missing_docs)]
    enum ParameterKind {
        AlternateText       => KW_ALTREP,
        CommonName          => KW_CN,
        CalendarUserType    => KW_CUTYPE,
        Delegators          => KW_DELEGATED_FROM,
        Delegatees          => KW_DELEGATED_TO,
        Directory           => KW_DIR,
        Encoding            => KW_ENCODING,
        FormatType          => KW_FMTTYPE,
        FreeBusyType        => KW_FBTYPE,
        Language            => KW_LANGUAGE,
        GroupOrListMembership => KW_MEMBER,
        ParticipationStatus => KW_PARTSTAT,
        RecurrenceIdRange   => KW_RANGE,
        AlarmTriggerRelationship => KW_RELATED,
        RelationshipType    => KW_RELTYPE,
        ParticipationRole   => KW_ROLE,
        SendBy              => KW_SENT_BY,
        RsvpExpectation     => KW_RSVP,
        TimeZoneIdentifier  => KW_TZID,
        ValueType           => KW_VALUE,
    }
}

impl_keyword_enum! {
    /// Value data types, RFC 5545 Section 3.3
    #[expect(missing_docs)]
    enum ValueType {
        Binary      => KW_BINARY,
        Boolean     => KW_BOOLEAN,
        CalAddress  => KW_CAL_ADDRESS,
        Date        => KW_DATE,
        DateTime    => KW_DATETIME,
        Duration    => KW_DURATION,
        Float       => KW_FLOAT,
        Integer     => KW_INTEGER,
        Period      => KW_PERIOD,
        Recur       => KW_RECUR,
        Text        => KW_TEXT,
        Time        => KW_TIME,
        Uri         => KW_URI,
        UtcOffset   => KW_UTC_OFFSET,
    }
}

/// Classified parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterName {
    /// Registered parameter
    Known(ParameterKind),

    /// Experimental parameter, literal name starting with `X-`
    XName(String),

    /// Unregistered IANA token, literal name
    Iana(String),
}

impl ParameterName {
    /// Classify a parameter name. Returns `None` for an invalid name, i.e. an
    /// empty one or one with characters outside `A-Z a-z 0-9 -`.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return None;
        }

        if let Ok(kind) = name.parse() {
            Some(Self::Known(kind))
        } else if is_x_name(name) {
            Some(Self::XName(name.to_owned()))
        } else {
            Some(Self::Iana(name.to_owned()))
        }
    }

    /// Canonical name for registered kinds, the literal name otherwise.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.name(),
            Self::XName(name) | Self::Iana(name) => name,
        }
    }

    /// Whether a raw parameter name refers to this parameter.
    ///
    /// Literal names compare ASCII case-insensitively, parameter names are
    /// case-insensitive in RFC 5545 Section 2.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }

    /// Whether this is an experimental parameter.
    #[must_use]
    pub const fn is_experimental(&self) -> bool {
        matches!(self, Self::XName(_))
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a name carries the experimental `X-` prefix.
#[must_use]
pub fn is_x_name(name: &str) -> bool {
    name.get(..KW_X_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(KW_X_PREFIX))
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Timezone handles and the services resolving a TZID to one.

mod provider;
pub(crate) mod rules;
mod synthesize;

use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};

use jiff::SignedDuration;
use jiff::civil;
use jiff::tz::TimeZone;

pub use crate::timezone::provider::{
    SystemTimezoneService, TimezoneProvider, install_timezone_service, timezone_service,
};
use crate::timezone::rules::VTimezoneRules;
use crate::{ComponentTree, IcsError};

/// Id of the UTC handle.
pub const UTC_ID: &str = "UTC";

/// Id of the floating handle.
pub const FLOATING_ID: &str = "floating";

static UTC: LazyLock<Timezone> = LazyLock::new(|| Timezone::with_kind(UTC_ID, Kind::Utc));
static FLOATING: LazyLock<Timezone> =
    LazyLock::new(|| Timezone::with_kind(FLOATING_ID, Kind::Floating));

/// Shared timezone handle: an id plus an optional VTIMEZONE definition.
///
/// Handles are cheap to clone and compare equal when their ids do. A phantom
/// handle only knows its id, it keeps an unresolvable TZID round-tripping.
#[derive(Clone)]
pub struct Timezone(Arc<Inner>);

struct Inner {
    id: String,
    kind: Kind,
    definition: OnceLock<Option<ComponentTree>>,
}

enum Kind {
    Utc,
    Floating,
    Zone(TimeZone),
    Definition(VTimezoneRules),
    Phantom,
}

impl Timezone {
    /// The UTC handle.
    #[must_use]
    pub fn utc() -> Self {
        UTC.clone()
    }

    /// The floating handle, local time of whoever looks at the value.
    #[must_use]
    pub fn floating() -> Self {
        FLOATING.clone()
    }

    /// Handle for an id nothing could resolve.
    #[must_use]
    pub fn phantom(id: impl Into<String>) -> Self {
        Self::with_kind(id, Kind::Phantom)
    }

    /// Handle backed by the timezone database, its VTIMEZONE definition is
    /// synthesized from the zone's transitions on first use.
    #[must_use]
    pub fn from_zone(id: impl Into<String>, zone: TimeZone) -> Self {
        Self::with_kind(id, Kind::Zone(zone))
    }

    /// Handle backed by a standalone VTIMEZONE tree.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] if the tree is not a VTIMEZONE with a TZID.
    pub fn from_definition(definition: ComponentTree) -> Result<Self, IcsError> {
        let root = definition.root();
        if *root.kind() != calmodel_ical::ComponentKind::VTimeZone {
            return Err(IcsError::invalid(format!(
                "timezone definition must be a VTIMEZONE, not {}",
                root.kind()
            )));
        }
        let id = rules::tzid_of(root)
            .ok_or_else(|| IcsError::invalid("VTIMEZONE without TZID"))?;
        let rules = VTimezoneRules::from_component(root);

        let inner = Inner {
            id,
            kind: Kind::Definition(rules),
            definition: OnceLock::from(Some(definition)),
        };
        Ok(Self(Arc::new(inner)))
    }

    fn with_kind(id: impl Into<String>, kind: Kind) -> Self {
        Self(Arc::new(Inner {
            id: id.into(),
            kind,
            definition: OnceLock::new(),
        }))
    }

    /// The TZID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0.id
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.0.kind, Kind::Utc)
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.0.kind, Kind::Floating)
    }

    #[must_use]
    pub fn is_phantom(&self) -> bool {
        matches!(self.0.kind, Kind::Phantom)
    }

    /// Whether values in this zone need a TZID, i.e. neither UTC nor floating.
    #[must_use]
    pub fn needs_tzid(&self) -> bool {
        !self.is_utc() && !self.is_floating()
    }

    /// The standalone VTIMEZONE tree describing this zone.
    ///
    /// `None` for UTC, floating and phantom handles.
    #[must_use]
    pub fn definition(&self) -> Option<&ComponentTree> {
        self.0
            .definition
            .get_or_init(|| match &self.0.kind {
                Kind::Zone(zone) => synthesize::vtimezone(&self.0.id, zone),
                Kind::Utc | Kind::Floating | Kind::Phantom | Kind::Definition(_) => None,
            })
            .as_ref()
    }

    /// Offset from UTC in seconds at the given UTC wall time.
    #[must_use]
    pub fn utc_offset(&self, utc: civil::DateTime) -> i32 {
        match &self.0.kind {
            Kind::Utc | Kind::Floating | Kind::Phantom => 0,
            Kind::Definition(rules) => rules.offset_at(utc),
            Kind::Zone(zone) => TimeZone::UTC
                .to_ambiguous_timestamp(utc)
                .compatible()
                .map_or(0, |ts| zone.to_offset(ts).seconds()),
        }
    }

    /// Wall time in this zone to UTC wall time.
    ///
    /// Floating and phantom times stay as they are. A local time inside a gap
    /// or a fold resolves like RFC 5545 Section 3.3.5 asks: the earlier
    /// offset wins.
    #[must_use]
    pub fn to_utc(&self, local: civil::DateTime) -> civil::DateTime {
        match &self.0.kind {
            Kind::Utc | Kind::Floating | Kind::Phantom => local,
            Kind::Zone(zone) => zone
                .to_ambiguous_timestamp(local)
                .compatible()
                .map_or(local, |ts| TimeZone::UTC.to_datetime(ts)),
            Kind::Definition(rules) => {
                let guess = shift(local, -rules.offset_at(local));
                shift(local, -rules.offset_at(guess))
            }
        }
    }

    /// UTC wall time to wall time in this zone.
    #[must_use]
    pub fn from_utc(&self, utc: civil::DateTime) -> civil::DateTime {
        shift(utc, self.utc_offset(utc))
    }
}

pub(crate) fn shift(dt: civil::DateTime, seconds: i32) -> civil::DateTime {
    dt.checked_add(SignedDuration::from_secs(i64::from(seconds)))
        .unwrap_or(dt)
}

impl PartialEq for Timezone {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Timezone {}

impl fmt::Debug for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.0.kind {
            Kind::Utc => "utc",
            Kind::Floating => "floating",
            Kind::Zone(_) => "zone",
            Kind::Definition(_) => "definition",
            Kind::Phantom => "phantom",
        };
        f.debug_struct("Timezone")
            .field("id", &self.0.id)
            .field("kind", &kind)
            .finish()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

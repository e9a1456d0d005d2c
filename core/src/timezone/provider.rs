// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, OnceLock, PoisonError};

use jiff::tz::TimeZone;

use crate::timezone::{FLOATING_ID, Timezone, UTC_ID};

static SERVICE: OnceLock<SystemTimezoneService> = OnceLock::new();

/// Source of timezone handles by TZID.
///
/// Lookups may come from several threads at once; implementations are
/// read-mostly and never see mutation from this crate.
pub trait TimezoneProvider: Send + Sync {
    /// The handle for a TZID, `None` if unknown.
    fn get_timezone(&self, tzid: &str) -> Option<Timezone>;
}

impl TimezoneProvider for HashMap<String, Timezone> {
    fn get_timezone(&self, tzid: &str) -> Option<Timezone> {
        self.get(tzid).cloned()
    }
}

impl TimezoneProvider for BTreeMap<String, Timezone> {
    fn get_timezone(&self, tzid: &str) -> Option<Timezone> {
        self.get(tzid).cloned()
    }
}

/// Process-wide timezone service over the jiff timezone database.
///
/// Aliases map legacy or Windows TZIDs onto IANA names; the returned handle
/// keeps the TZID it was asked for, so values still round-trip unchanged.
/// Handles are cached, asking twice yields the same handle.
#[derive(Debug)]
pub struct SystemTimezoneService {
    aliases: BTreeMap<String, String>,
    report_missing: bool,
    cache: Mutex<BTreeMap<String, Timezone>>,
}

impl Default for SystemTimezoneService {
    fn default() -> Self {
        Self::new(BTreeMap::new(), true)
    }
}

impl SystemTimezoneService {
    /// Service with an alias table.
    #[must_use]
    pub fn new(aliases: BTreeMap<String, String>, report_missing: bool) -> Self {
        Self {
            aliases,
            report_missing,
            cache: Mutex::new(BTreeMap::new()),
        }
    }

    /// Whether unresolvable TZIDs should be reported.
    #[must_use]
    pub const fn report_missing(&self) -> bool {
        self.report_missing
    }

    /// IANA name a TZID resolves through, after aliases.
    #[must_use]
    pub fn resolve_name<'a>(&'a self, tzid: &'a str) -> &'a str {
        self.aliases.get(tzid).map_or(tzid, String::as_str)
    }
}

impl TimezoneProvider for SystemTimezoneService {
    fn get_timezone(&self, tzid: &str) -> Option<Timezone> {
        if tzid == UTC_ID || tzid.eq_ignore_ascii_case("Etc/UTC") || tzid == "Z" {
            return Some(Timezone::utc());
        }
        if tzid == FLOATING_ID {
            return Some(Timezone::floating());
        }

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tz) = cache.get(tzid) {
            return Some(tz.clone());
        }

        let name = self.resolve_name(tzid);
        match TimeZone::get(name) {
            Ok(zone) => {
                let tz = Timezone::from_zone(tzid, zone);
                cache.insert(tzid.to_owned(), tz.clone());
                Some(tz)
            }
            Err(err) => {
                tracing::debug!(tzid, name, %err, "timezone not in database");
                None
            }
        }
    }
}

/// The process-wide timezone service, a default one unless
/// [`install_timezone_service`] ran first.
pub fn timezone_service() -> &'static SystemTimezoneService {
    SERVICE.get_or_init(SystemTimezoneService::default)
}

/// Install the process-wide timezone service.
///
/// # Errors
/// Hands the service back if one is already in place, installation happens
/// at most once per process.
pub fn install_timezone_service(
    service: SystemTimezoneService,
) -> Result<(), SystemTimezoneService> {
    SERVICE.set(service)
}

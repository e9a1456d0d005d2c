// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! An iCalendar object model: a component tree with properties and
//! parameters, date-time values attributed to timezones, and durations and
//! periods as value objects.

mod attribution;
mod component;
mod config;
mod datetime;
mod duration;
mod error;
mod period;
mod property;
mod service;
mod timezone;

pub use crate::component::{ComponentId, ComponentMut, ComponentRef, ComponentTree, INVALID_VALUE};
pub use crate::config::{APP_NAME, Config, ConfigFoldingStyle, FormatConfig, TimezoneConfig};
pub use crate::datetime::DateTime;
pub use crate::duration::Duration;
pub use crate::error::{ERROR_BASE, ICS_ERROR_BASE, IcsError};
pub use crate::period::Period;
pub use crate::property::{Parameter, Property, PropertyMut, PropertyRef};
pub use crate::service::{IcsService, ParsingListener};
pub use crate::timezone::{
    FLOATING_ID, SystemTimezoneService, Timezone, TimezoneProvider, UTC_ID,
    install_timezone_service, timezone_service,
};

pub use calmodel_ical as ical;

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use calmodel_ical::{FoldingStyle, FormatOptions};
use serde::de;

use crate::timezone::SystemTimezoneService;

/// The name of the calmodel application.
pub const APP_NAME: &str = "calmodel";

/// Configuration of the object model.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// How serialized text is written.
    pub format: FormatConfig,

    /// How TZIDs are resolved.
    pub timezone: TimezoneConfig,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatConfig {
    /// Octets per line before folding.
    pub folding: usize,

    /// Leading whitespace of continuation lines.
    pub folding_style: ConfigFoldingStyle,

    /// Write every content line on one physical line.
    pub no_folding: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            folding: 75,
            folding_style: ConfigFoldingStyle(FoldingStyle::Space),
            no_folding: false,
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimezoneConfig {
    /// Legacy or Windows TZIDs mapped onto IANA names.
    pub aliases: BTreeMap<String, String>,

    /// Warn about TZIDs that resolve to phantoms.
    pub report_missing: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            report_missing: true,
        }
    }
}

impl Config {
    /// Formatter options of the `[format]` table.
    #[must_use]
    pub fn format_options(&self) -> FormatOptions {
        let folding = (!self.format.no_folding).then_some(self.format.folding);
        FormatOptions::default()
            .folding(folding)
            .folding_style(self.format.folding_style.0)
    }

    /// Timezone service of the `[timezone]` table.
    #[must_use]
    pub fn timezone_service(&self) -> SystemTimezoneService {
        SystemTimezoneService::new(
            self.timezone.aliases.clone(),
            self.timezone.report_missing,
        )
    }
}

/// `"space"` or `"tab"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFoldingStyle(pub FoldingStyle);

impl<'de> serde::Deserialize<'de> for ConfigFoldingStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct StyleVisitor;

        impl de::Visitor<'_> for StyleVisitor {
            type Value = ConfigFoldingStyle;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a folding style, "space" or "tab""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match value.to_ascii_lowercase().as_str() {
                    "space" => Ok(ConfigFoldingStyle(FoldingStyle::Space)),
                    "tab" => Ok(ConfigFoldingStyle(FoldingStyle::Tab)),
                    _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
                }
            }
        }

        deserializer.deserialize_str(StyleVisitor)
    }
}

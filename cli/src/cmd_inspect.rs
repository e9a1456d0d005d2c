// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt::Write as _, path::PathBuf};

use calmodel_core::{ComponentRef, ComponentTree, IcsService};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::util::{ArgOutputFormat, arg_file, get_file, read_calendar, resolve_datetimes};

#[derive(Debug, Clone)]
pub struct CmdInspect {
    pub file: PathBuf,
    pub output_format: ArgOutputFormat,
}

impl CmdInspect {
    pub const NAME: &str = "inspect";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the component tree of an iCalendar file")
            .arg(arg_file())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: get_file(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, service: &IcsService) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "inspecting file...");
        let tree = read_calendar(service, &self.file).await?;
        println!("{}", self.render(&tree)?);
        Ok(())
    }

    fn render(&self, tree: &ComponentTree) -> Result<String, Box<dyn Error>> {
        resolve_datetimes(tree);
        let report = Report {
            root: Outline::of(tree.root()),
            timezones: tree
                .root()
                .referenced_timezones()
                .iter()
                .map(|tz| tz.id().to_owned())
                .collect(),
        };

        match self.output_format {
            ArgOutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            ArgOutputFormat::Table => Ok(report.to_table()),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct Report {
    root: Outline,
    timezones: Vec<String>,
}

impl Report {
    fn to_table(&self) -> String {
        let mut out = String::new();
        self.root.write_table(&mut out, 0);
        if !self.timezones.is_empty() {
            let _ = write!(out, "{} {}", "Timezones:".bold(), self.timezones.join(", "));
        }
        out.trim_end().to_owned()
    }
}

#[derive(Debug, serde::Serialize)]
struct Outline {
    kind: String,
    properties: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Outline>,
}

impl Outline {
    fn of(component: ComponentRef<'_>) -> Self {
        Self {
            kind: component.component_type().to_owned(),
            properties: component
                .all_properties()
                .map(|p| p.property_name().to_owned())
                .collect(),
            children: component.children().map(Self::of).collect(),
        }
    }

    fn write_table(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = writeln!(
            out,
            "{indent}{} {}",
            self.kind.green().bold(),
            self.properties.join(", ").dimmed()
        );
        for child in &self.children {
            child.write_table(out, depth + 1);
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component formatting, RFC 5545 Section 3.6.

use std::io::{self, Write};

use crate::formatter::Formatter;
use crate::formatter::property::write_property;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::RawComponent;

/// Format a component: its properties in order, then its children.
pub fn write_component<W: Write>(f: &mut Formatter<W>, component: &RawComponent) -> io::Result<()> {
    let mut pending = vec![Step::Open(component)];
    while let Some(step) = pending.pop() {
        match step {
            Step::Open(component) => {
                write!(f, "{KW_BEGIN}:{}", component.name)?;
                f.writeln()?;
                for property in &component.properties {
                    write_property(f, property)?;
                }
                pending.push(Step::Close(&component.name));
                pending.extend(component.children.iter().rev().map(Step::Open));
            }
            Step::Close(name) => {
                write!(f, "{KW_END}:{name}")?;
                f.writeln()?;
            }
        }
    }
    Ok(())
}

enum Step<'a> {
    Open(&'a RawComponent),
    Close(&'a str),
}

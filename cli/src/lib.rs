// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_generate_completion;
mod cmd_inspect;
mod cmd_new_event;
mod cmd_normalize;
mod cmd_timezones;
mod config;
mod util;

pub use crate::cli::{Cli, Commands, run};

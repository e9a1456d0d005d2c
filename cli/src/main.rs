// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! calmodel - inspect, normalize and build iCalendar documents

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    calmodel_cli::run().await
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared documents and helpers for the integration tests.

mod fixtures;

#[allow(unused_imports)]
pub use fixtures::{CUSTOM_ZONE, MEETING, parse, tzids};

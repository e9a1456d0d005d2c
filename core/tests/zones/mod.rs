// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TZID resolution, registration and VTIMEZONE output.

mod attribution;
mod definitions;
mod detached;

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing entry points, error codes and output formatting.

mod async_parse;
mod errors;
mod formatting;

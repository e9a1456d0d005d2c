// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parameter names and value types.
//!
//! This module classifies iCalendar parameter names as defined in RFC 5545
//! Section 3.2, and the value data types selected by the `VALUE` parameter.

mod kind;

pub(crate) use kind::impl_keyword_enum;
pub use kind::{ParameterKind, ParameterName, ValueType, is_x_name};

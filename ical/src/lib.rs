// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, format and decode iCalendar content lines and values.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod component;
pub mod formatter;
pub mod keyword;
pub mod parameter;
mod parser;
pub mod property;
pub mod syntax;
pub mod value;

pub use crate::component::ComponentKind;
pub use crate::formatter::{FoldingStyle, FormatOptions};
pub use crate::parameter::{ParameterKind, ParameterName, ValueType};
pub use crate::parser::{ErrorCode, ParseError, parse, parse_content_line};
pub use crate::property::{InvalidPropertyName, Method, PropertyKind, Status};
pub use crate::syntax::{RawComponent, RawParameter, RawProperty, Span};
pub use crate::value::{
    Value, ValueDate, ValueDateTime, ValueDuration, ValueError, ValuePeriod, ValueTime,
    ValueUtcOffset,
};

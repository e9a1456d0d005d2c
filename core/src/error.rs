// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calmodel_ical::ErrorCode;

/// Base of the reserved error code range.
pub const ERROR_BASE: u32 = 0x805D_0000;

/// Base for codec errors, `ICS_ERROR_BASE + ErrorCode`.
pub const ICS_ERROR_BASE: u32 = ERROR_BASE + 0x100;

/// Errors of the calendar object model.
///
/// Absence of a value, parameter, property or component is never an error,
/// it is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IcsError {
    /// Unknown or unsupported kind name, malformed parameter name, bad value text.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The codec rejected the input text.
    #[error("parse error ({code}): {message}")]
    ParseError {
        /// Codec error number
        code: ErrorCode,
        /// Human readable description
        message: String,
    },

    /// The codec failed to produce text.
    #[error("serialization error ({code}): {message}")]
    SerializationError {
        /// Codec error number
        code: ErrorCode,
        /// Human readable description
        message: String,
    },

    /// Mutation of a value object after `make_immutable`.
    #[error("object is immutable")]
    ImmutableViolation,

    /// Internal invariant violated, or a value of the wrong type was requested.
    #[error("unexpected: {0}")]
    Unexpected(String),

    /// Allocation failure on construction.
    #[error("out of memory")]
    OutOfMemory,
}

impl IcsError {
    /// Stable numeric code of this error.
    ///
    /// Parse and serialization failures map one-to-one onto the codec
    /// numbering, offset by [`ICS_ERROR_BASE`].
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::ParseError { code, .. } | Self::SerializationError { code, .. } => {
                ICS_ERROR_BASE + code.as_i32().unsigned_abs()
            }
            Self::InvalidArgument(_) => ERROR_BASE + 1,
            Self::ImmutableViolation => ERROR_BASE + 2,
            Self::Unexpected(_) => ERROR_BASE + 3,
            Self::OutOfMemory => ERROR_BASE + 4,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl From<calmodel_ical::ParseError> for IcsError {
    fn from(err: calmodel_ical::ParseError) -> Self {
        Self::ParseError {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing component hierarchy from content lines.
//!
//! # Algorithm
//!
//! The tree builder uses a stack-based algorithm:
//! 1. On BEGIN:X, push a new component onto the stack
//! 2. On property, add to the current component (top of stack)
//! 3. On END:X, pop from stack and add to parent component
//!
//! Nesting deeper than [`MAX_DEPTH`] stops the build with
//! [`TreeBuildError::TooDeep`].

use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::Span;
use crate::syntax::scanner::ContentLine;

/// Deepest component nesting accepted, the root counting as one.
pub const MAX_DEPTH: usize = 64;

/// A parsed iCalendar component (e.g., VCALENDAR, VEVENT, VTODO)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawComponent {
    /// Component name (e.g., "VCALENDAR", "VEVENT", "VTIMEZONE", "VALARM")
    pub name: String,
    /// Properties in original order
    pub properties: Vec<RawProperty>,
    /// Nested child components
    pub children: Vec<RawComponent>,
}

impl RawComponent {
    /// Create an empty component with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// A parsed iCalendar property (name, optional parameters, and value)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperty {
    /// Property name (case-insensitive, original casing preserved)
    pub name: String,
    /// Property parameters (allow duplicates & multi-values)
    pub parameters: Vec<RawParameter>,
    /// Raw property value, still escaped
    pub value: String,
}

impl RawProperty {
    /// Create a property without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            value: value.into(),
        }
    }

    /// First parameter with the given name, compared case-insensitively.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&RawParameter> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// A parsed iCalendar parameter (e.g., `TZID=America/New_York`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameter {
    /// Parameter name (e.g., "TZID", "VALUE", "CN", "ROLE", "PARTSTAT")
    pub name: String,
    /// Parameter values split by commas, unquoted
    pub values: Vec<String>,
}

impl RawParameter {
    /// Create a single-valued parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// Values joined back with commas.
    #[must_use]
    pub fn joined(&self) -> String {
        self.values.join(",")
    }
}

impl From<&crate::syntax::scanner::ScannedParameter> for RawParameter {
    fn from(scanned: &crate::syntax::scanner::ScannedParameter) -> Self {
        Self {
            name: scanned.name.clone(),
            values: scanned.values.clone(),
        }
    }
}

/// Build a component tree from scanned content lines.
///
/// Lines carrying scanner errors are skipped; the caller decides whether
/// their presence is fatal. Structural problems are collected in
/// [`TreeBuilderResult::errors`] while building continues.
#[must_use]
pub fn build_tree(lines: &[ContentLine]) -> TreeBuilderResult {
    let mut stack: Vec<(RawComponent, Span)> = Vec::new();
    let mut roots: Vec<RawComponent> = Vec::new();
    let mut errors: Vec<TreeBuildError> = Vec::new();

    for line in lines {
        if line.error.is_some() {
            continue;
        }

        let is_begin = line.name.eq_ignore_ascii_case(KW_BEGIN);
        let is_end = line.name.eq_ignore_ascii_case(KW_END);
        if (is_begin || is_end) && !line.parameters.is_empty() {
            errors.push(TreeBuildError::BeginEndWithParameters {
                name: line.name.clone(),
                span: line.span,
            });
        }

        if is_begin {
            if stack.len() >= MAX_DEPTH {
                errors.push(TreeBuildError::TooDeep {
                    name: line.value.clone(),
                    span: line.span,
                });
                return TreeBuilderResult { roots, errors };
            }
            stack.push((RawComponent::new(line.value.clone()), line.span));
        } else if is_end {
            if let Some((component, _)) = stack.pop() {
                if !component.name.eq_ignore_ascii_case(&line.value) {
                    errors.push(TreeBuildError::MismatchedNesting {
                        expected: component.name.clone(),
                        found: line.value.clone(),
                        span: line.span,
                    });
                }

                match stack.last_mut() {
                    Some((parent, _)) => parent.children.push(component),
                    None => roots.push(component),
                }
            } else {
                errors.push(TreeBuildError::UnmatchedEnd {
                    name: line.value.clone(),
                    span: line.span,
                });
            }
        } else if let Some((current, _)) = stack.last_mut() {
            current.properties.push(RawProperty {
                name: line.name.clone(),
                parameters: line.parameters.iter().map(RawParameter::from).collect(),
                value: line.value.clone(),
            });
        } else {
            errors.push(TreeBuildError::OrphanProperty {
                name: line.name.clone(),
                span: line.span,
            });
        }
    }

    // Any remaining components on stack are unmatched BEGINs
    for (component, span) in stack {
        errors.push(TreeBuildError::UnmatchedBegin {
            name: component.name,
            span,
        });
    }

    TreeBuilderResult { roots, errors }
}

/// Errors that can occur during tree building.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeBuildError {
    /// Unmatched END (no corresponding BEGIN)
    #[error("unmatched END:{name} (no corresponding BEGIN)")]
    UnmatchedEnd {
        /// Component name that was being closed
        name: String,
        /// Span of the END line
        span: Span,
    },

    /// Unmatched BEGIN (component not closed)
    #[error("unmatched BEGIN:{name} (component not closed)")]
    UnmatchedBegin {
        /// Component name that was not closed
        name: String,
        /// Span of the BEGIN line
        span: Span,
    },

    /// Mismatched BEGIN/END names
    #[error("mismatched nesting: expected END:{expected}, found END:{found}")]
    MismatchedNesting {
        /// Expected component name
        expected: String,
        /// Actual component name found
        found: String,
        /// Span of the END line
        span: Span,
    },

    /// BEGIN or END line with parameters (not allowed per RFC 5545)
    #[error("{name} line with parameters (not allowed per RFC 5545)")]
    BeginEndWithParameters {
        /// The line name, BEGIN or END
        name: String,
        /// Span of the line
        span: Span,
    },

    /// Property outside of any component
    #[error("property {name} outside of any component")]
    OrphanProperty {
        /// Property name
        name: String,
        /// Span of the line
        span: Span,
    },

    /// Component nested deeper than [`MAX_DEPTH`]
    #[error("BEGIN:{name} nested deeper than {MAX_DEPTH} components")]
    TooDeep {
        /// Component name that was being opened
        name: String,
        /// Span of the BEGIN line
        span: Span,
    },
}

impl TreeBuildError {
    /// Span the error refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnmatchedEnd { span, .. }
            | Self::UnmatchedBegin { span, .. }
            | Self::MismatchedNesting { span, .. }
            | Self::BeginEndWithParameters { span, .. }
            | Self::OrphanProperty { span, .. }
            | Self::TooDeep { span, .. } => *span,
        }
    }
}

/// Result of building a tree.
#[derive(Debug, Clone)]
pub struct TreeBuilderResult {
    /// The root components (typically one VCALENDAR)
    pub roots: Vec<RawComponent>,
    /// Errors encountered during tree building
    pub errors: Vec<TreeBuildError>,
}

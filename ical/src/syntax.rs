// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Syntax layer: iCalendar text to raw component trees.
//!
//! ```text
//! Source Text → Lexer → Token Stream → Scanner → Content Lines → Tree Builder → Raw Components
//! ```
//!
//! The raw tree keeps names, parameters and values as owned strings exactly as
//! they appear in the source (unfolded). No value typing happens here.

pub mod lexer;
pub mod scanner;
pub mod tree_builder;

use std::ops::Range;

pub use scanner::{ContentLine, ContentLineError, ParameterErrorKind, ScanResult, scan_content_lines};
pub use tree_builder::{
    MAX_DEPTH, RawComponent, RawParameter, RawProperty, TreeBuildError, TreeBuilderResult,
    build_tree,
};

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert into a standard range, e.g. for error reports.
    #[must_use]
    pub const fn into_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

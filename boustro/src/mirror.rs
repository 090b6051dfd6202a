// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mirrored glyph lookup over a line's right-to-left runs.

use crate::data::BidiDataSource;
use crate::line::Line;

/// One mirrored-glyph substitution.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Mirror {
    /// Code unit index of the character in the sequence.
    pub index: usize,
    /// The character as written.
    pub codepoint: char,
    /// The glyph to render in its place.
    pub mirror: char,
}

/// Iterator of the mirrored-glyph substitutions a renderer must apply to
/// a line.
///
/// Runs are visited in visual order; only right-to-left runs mirror.
#[derive(Clone, Debug)]
pub struct MirrorLocator<'l, 'a, D> {
    line: &'l Line<'a>,
    data: &'l D,
    run_index: usize,
    cursor: Option<usize>,
}

#[cfg(feature = "icu_data")]
static PROPERTY_DATA: crate::data::PropertyData = crate::data::PropertyData;

#[cfg(feature = "icu_data")]
impl<'l, 'a> MirrorLocator<'l, 'a, crate::data::PropertyData> {
    /// Creates a locator over `line` using the bundled property data.
    pub fn new(line: &'l Line<'a>) -> Self {
        Self::with_data_source(line, &PROPERTY_DATA)
    }
}

impl<'l, 'a, D: BidiDataSource> MirrorLocator<'l, 'a, D> {
    /// Creates a locator over `line` with a caller-supplied property
    /// source.
    pub fn with_data_source(line: &'l Line<'a>, data: &'l D) -> Self {
        Self {
            line,
            data,
            run_index: 0,
            cursor: None,
        }
    }
}

impl<D: BidiDataSource> Iterator for MirrorLocator<'_, '_, D> {
    type Item = Mirror;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let run = *self.line.runs().get(self.run_index)?;
            if run.level.is_ltr() {
                self.run_index += 1;
                self.cursor = None;
                continue;
            }
            let cursor = *self.cursor.get_or_insert(run.offset);
            if cursor >= run.offset + run.len {
                self.run_index += 1;
                self.cursor = None;
                continue;
            }
            let decoded = self.line.sequence().codepoint_at(cursor)?;
            self.cursor = Some(cursor + decoded.len);
            if let Some(mirror) = self.data.mirror(decoded.codepoint) {
                return Some(Mirror {
                    index: cursor,
                    codepoint: decoded.codepoint,
                    mirror,
                });
            }
        }
    }
}

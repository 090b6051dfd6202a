// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines and visually ordered runs: rules L1-L2.

use alloc::vec::Vec;

use crate::class::BidiClass;
use crate::level::Level;
use crate::paragraph::Paragraph;
use crate::source::CodepointSequence;

/// A maximal span of one level, in visual order within its line.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Run {
    /// Start of the run in the sequence, in code units.
    pub offset: usize,
    /// Length of the run in code units.
    pub len: usize,
    /// The run's resolved level.
    pub level: Level,
}

impl Run {
    /// Returns `true` for an odd (right-to-left) run.
    pub fn is_rtl(&self) -> bool {
        self.level.is_rtl()
    }
}

/// A sub-range of a paragraph with its runs in visual order.
///
/// A line owns the levels and runs it derives at creation, so it stays
/// valid independently of the paragraph it came from.
#[derive(Clone, Debug)]
pub struct Line<'a> {
    seq: CodepointSequence<'a>,
    offset: usize,
    len: usize,
    levels: Vec<Level>,
    runs: Vec<Run>,
}

impl<'a> Line<'a> {
    /// Creates a line over `offset..offset + len` of the sequence, which
    /// must lie entirely within the paragraph. Returns `None` otherwise,
    /// or when `len` is zero.
    pub fn new(paragraph: &Paragraph<'a>, offset: usize, len: usize) -> Option<Self> {
        let para_end = paragraph.offset() + paragraph.len();
        if len == 0 || offset < paragraph.offset() || offset + len > para_end {
            return None;
        }

        let start = offset - paragraph.offset();
        let mut levels = paragraph.levels()[start..start + len].to_vec();
        let classes = &paragraph.original_classes()[start..start + len];
        reset_trailing_levels(&mut levels, classes, paragraph.base_level());

        let mut runs = split_runs(&levels, offset);
        reorder_runs(&mut runs);

        Some(Self {
            seq: *paragraph.sequence(),
            offset,
            len,
            levels,
            runs,
        })
    }

    /// The underlying codepoint sequence.
    pub fn sequence(&self) -> &CodepointSequence<'a> {
        &self.seq
    }

    /// Start of the line in the sequence, in code units.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the line in code units.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the line covers no code units; never the case
    /// for a constructed line.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The line's levels per code unit after rule L1, line-relative.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The line's runs in visual order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// Rule L1: segment and paragraph separators, and any whitespace or
/// isolate-format run leading up to one or to the line end, reset to the
/// paragraph level.
fn reset_trailing_levels(levels: &mut [Level], classes: &[BidiClass], base: Level) {
    use BidiClass::*;
    let mut resetting = true;
    for (level, class) in levels.iter_mut().zip(classes).rev() {
        match class {
            B | S => {
                *level = base;
                resetting = true;
            }
            // Retained explicit formatting characters count as whitespace
            // here (UAX #9 section 5.2).
            WS | LRI | RLI | FSI | PDI | LRE | RLE | LRO | RLO | PDF | BN => {
                if resetting {
                    *level = base;
                }
            }
            _ => resetting = false,
        }
    }
}

/// Partitions the line's levels into maximal same-level runs in logical
/// order.
fn split_runs(levels: &[Level], line_offset: usize) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut iter = levels.iter().enumerate();
    let Some((_, &first)) = iter.next() else {
        return runs;
    };
    let mut run = Run {
        offset: line_offset,
        len: 1,
        level: first,
    };
    for (index, &level) in iter {
        if level == run.level {
            run.len += 1;
        } else {
            runs.push(run);
            run = Run {
                offset: line_offset + index,
                len: 1,
                level,
            };
        }
    }
    runs.push(run);
    runs
}

/// Rule L2: from the highest level down to the lowest odd level, reverse
/// each maximal span of runs at or above it.
fn reorder_runs(runs: &mut [Run]) {
    let mut max_level = 0;
    let mut lowest_odd_level = u8::MAX;
    for run in runs.iter() {
        let number = run.level.number();
        max_level = max_level.max(number);
        if run.level.is_rtl() {
            lowest_odd_level = lowest_odd_level.min(number);
        }
    }
    if lowest_odd_level == u8::MAX {
        return;
    }

    for threshold in (lowest_odd_level..=max_level).rev() {
        let mut index = 0;
        while index < runs.len() {
            if runs[index].level.number() >= threshold {
                let start = index;
                while index < runs.len() && runs[index].level.number() >= threshold {
                    index += 1;
                }
                runs[start..index].reverse();
            }
            index += 1;
        }
    }
}

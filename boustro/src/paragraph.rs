// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved paragraphs.

use alloc::vec::Vec;

use crate::chain::BidiChain;
use crate::class::BidiClass;
use crate::data::BidiDataSource;
use crate::explicit;
use crate::isolating::ParagraphContext;
use crate::level::Level;
use crate::source::CodepointSequence;
use crate::status_stack::StatusStack;

/// The caller's choice of paragraph direction.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BaseDirection {
    /// Base level 0.
    Ltr,
    /// Base level 1.
    Rtl,
    /// Detect from the first strong character; left-to-right when the
    /// text has none.
    AutoLtr,
    /// Detect from the first strong character; right-to-left when the
    /// text has none.
    AutoRtl,
}

/// One paragraph with its per-code-unit embedding levels resolved.
///
/// A paragraph is immutable once created; wrap it in an `Arc` to share it
/// across threads.
#[derive(Clone, Debug)]
pub struct Paragraph<'a> {
    seq: CodepointSequence<'a>,
    offset: usize,
    len: usize,
    base_level: Level,
    levels: Vec<Level>,
    classes: Vec<BidiClass>,
}

impl<'a> Paragraph<'a> {
    /// Resolves the paragraph starting at `offset`, using the bundled
    /// property data.
    ///
    /// The paragraph ends at its first paragraph separator or after
    /// `suggested_len` code units, whichever comes first; a CR+LF
    /// separator is always included whole. Returns `None` for an empty or
    /// out-of-range request.
    #[cfg(feature = "icu_data")]
    pub fn new(
        seq: &CodepointSequence<'a>,
        offset: usize,
        suggested_len: usize,
        base: BaseDirection,
    ) -> Option<Self> {
        Self::new_with_data_source(&crate::data::PropertyData, seq, offset, suggested_len, base)
    }

    /// Like [`Paragraph::new`] with a caller-supplied property source.
    pub fn new_with_data_source<D: BidiDataSource>(
        data: &D,
        seq: &CodepointSequence<'a>,
        offset: usize,
        suggested_len: usize,
        base: BaseDirection,
    ) -> Option<Self> {
        if offset >= seq.len() || suggested_len == 0 {
            return None;
        }
        let len = seq.paragraph_boundary(offset, suggested_len).len;
        if len == 0 {
            return None;
        }

        let mut classes = Vec::new();
        let mut chain = explicit::populate(seq, offset, len, data, &mut classes);

        let base_level = match base {
            BaseDirection::Ltr => Level::ltr(),
            BaseDirection::Rtl => Level::rtl(),
            BaseDirection::AutoLtr => explicit::detect_base_level(&chain, Level::ltr()),
            BaseDirection::AutoRtl => explicit::detect_base_level(&chain, Level::rtl()),
        };

        let mut stack = StatusStack::new();
        explicit::resolve_explicit(&mut chain, base_level, &mut stack);

        let ctx = ParagraphContext {
            seq,
            offset,
            level: base_level,
            original_classes: &classes,
            data,
        };
        explicit::resolve_sequences(&mut chain, &ctx);

        let mut levels = Vec::new();
        explicit::write_levels(&chain, &mut levels, len, base_level);
        debug_assert_chain_partition(&chain, len);

        Some(Self {
            seq: *seq,
            offset,
            len,
            base_level,
            levels,
            classes,
        })
    }

    /// The underlying codepoint sequence.
    pub fn sequence(&self) -> &CodepointSequence<'a> {
        &self.seq
    }

    /// Start of the paragraph in the sequence, in code units.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the paragraph in code units, separator included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the paragraph covers no code units; never the
    /// case for a constructed paragraph.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The resolved base level, 0 or 1.
    pub fn base_level(&self) -> Level {
        self.base_level
    }

    /// The resolved level of every code unit, paragraph-relative.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The resolved level at a sequence-absolute code unit index.
    pub fn level_at(&self, index: usize) -> Option<Level> {
        self.levels.get(index.checked_sub(self.offset)?).copied()
    }

    /// Original classes per code unit, paragraph-relative; rule L1 and the
    /// locators read these.
    pub(crate) fn original_classes(&self) -> &[BidiClass] {
        &self.classes
    }
}

/// Iterator of resolved paragraphs over a whole sequence.
#[cfg(feature = "icu_data")]
#[derive(Clone, Debug)]
pub struct Paragraphs<'a> {
    seq: CodepointSequence<'a>,
    base: BaseDirection,
    cursor: usize,
}

#[cfg(feature = "icu_data")]
impl<'a> Paragraphs<'a> {
    /// Creates an iterator resolving each paragraph of `seq` with the
    /// same base direction request.
    pub fn new(seq: &CodepointSequence<'a>, base: BaseDirection) -> Self {
        Self {
            seq: *seq,
            base,
            cursor: 0,
        }
    }
}

#[cfg(feature = "icu_data")]
impl<'a> Iterator for Paragraphs<'a> {
    type Item = Paragraph<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.seq.len().checked_sub(self.cursor)?;
        let paragraph = Paragraph::new(&self.seq, self.cursor, remaining, self.base)?;
        self.cursor += paragraph.len();
        Some(paragraph)
    }
}

/// The chain must tile the paragraph range in order; verified after
/// resolution in debug builds.
fn debug_assert_chain_partition(chain: &BidiChain, len: usize) {
    if cfg!(debug_assertions) {
        let mut cursor = 0;
        for link in chain.iter() {
            debug_assert!(
                chain.offset(link) >= cursor,
                "chain links out of order or overlapping"
            );
            cursor = chain.offset(link) + chain.len(link);
        }
        debug_assert!(cursor <= len, "chain runs past the paragraph");
    }
}

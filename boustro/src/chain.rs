// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bidi chain: a run-merging list over one paragraph.
//!
//! Links live in an arena of parallel vectors and are addressed by `u32`
//! ids; `next` ids form a single circular list anchored by the roller
//! sentinel at id 0. Links partition the paragraph's code units in text
//! order at every stage; abandoned links leave gaps that level write-back
//! fills from the preceding link.

use alloc::vec::Vec;

use crate::class::BidiClass;
use crate::level::Level;

/// Identifies one link in a [`BidiChain`] arena.
pub(crate) type LinkId = u32;

/// The sentinel link: never carries data, never visited by traversal.
pub(crate) const ROLLER: LinkId = 0;

/// An array-backed circular list of character runs.
pub(crate) struct BidiChain {
    offsets: Vec<usize>,
    lengths: Vec<usize>,
    types: Vec<BidiClass>,
    levels: Vec<Level>,
    next: Vec<LinkId>,
    /// The most recently added link; the roller's predecessor.
    last: LinkId,
}

impl BidiChain {
    /// Creates a chain sized for a paragraph of `capacity` codepoints.
    ///
    /// The arena never reallocates afterwards: one link per codepoint plus
    /// the roller is an upper bound on the run count.
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity + 1;
        let mut chain = Self {
            offsets: Vec::with_capacity(capacity),
            lengths: Vec::with_capacity(capacity),
            types: Vec::with_capacity(capacity),
            levels: Vec::with_capacity(capacity),
            next: Vec::with_capacity(capacity),
            last: ROLLER,
        };
        chain.offsets.push(usize::MAX);
        chain.lengths.push(0);
        chain.types.push(BidiClass::Nil);
        chain.levels.push(Level::INVALID);
        chain.next.push(ROLLER);
        chain
    }

    /// Appends a link covering `len` code units at `offset`.
    pub(crate) fn add_link(&mut self, class: BidiClass, offset: usize, len: usize) -> LinkId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the arena holds at most one link per codepoint of a single paragraph"
        )]
        let id = self.offsets.len() as LinkId;
        self.offsets.push(offset);
        self.lengths.push(len);
        self.types.push(class);
        self.levels.push(Level::INVALID);
        self.next.push(ROLLER);
        self.next[self.last as usize] = id;
        self.last = id;
        id
    }

    /// Extends the most recently added link by `len` code units.
    pub(crate) fn extend_last(&mut self, len: usize) {
        debug_assert!(self.last != ROLLER, "no link to extend");
        self.lengths[self.last as usize] += len;
    }

    /// The class of the most recently added link, [`BidiClass::Nil`] for an
    /// empty chain.
    pub(crate) fn last_type(&self) -> BidiClass {
        self.types[self.last as usize]
    }

    pub(crate) fn offset(&self, link: LinkId) -> usize {
        self.offsets[link as usize]
    }

    pub(crate) fn len(&self, link: LinkId) -> usize {
        self.lengths[link as usize]
    }

    pub(crate) fn class(&self, link: LinkId) -> BidiClass {
        self.types[link as usize]
    }

    pub(crate) fn set_class(&mut self, link: LinkId, class: BidiClass) {
        self.types[link as usize] = class;
    }

    pub(crate) fn level(&self, link: LinkId) -> Level {
        self.levels[link as usize]
    }

    pub(crate) fn set_level(&mut self, link: LinkId, level: Level) {
        self.levels[link as usize] = level;
    }

    pub(crate) fn next(&self, link: LinkId) -> LinkId {
        self.next[link as usize]
    }

    pub(crate) fn set_next(&mut self, link: LinkId, next: LinkId) {
        self.next[link as usize] = next;
    }

    /// Merges `second` into `first` when both carry the same class and
    /// level and cover adjacent text.
    ///
    /// `second` must be the chain successor of `first`. The adjacency
    /// requirement keeps a merge across an isolating-run splice from gluing
    /// non-contiguous ranges into one span.
    pub(crate) fn merge_if_equal(&mut self, first: LinkId, second: LinkId) -> bool {
        debug_assert!(
            self.next(first) == second,
            "merge requires chain-adjacent links"
        );
        if self.class(first) == self.class(second)
            && self.level(first) == self.level(second)
            && self.offset(first) + self.len(first) == self.offset(second)
        {
            self.lengths[first as usize] += self.lengths[second as usize];
            self.next[first as usize] = self.next[second as usize];
            if self.last == second {
                self.last = first;
            }
            true
        } else {
            false
        }
    }

    /// Splices out the link following `prior` (rule X9 removal).
    ///
    /// The abandoned link's id is never revisited; its code units fall into
    /// the gap filled by the preceding link at write-back.
    pub(crate) fn abandon_next(&mut self, prior: LinkId) {
        let removed = self.next(prior);
        debug_assert!(removed != ROLLER, "cannot abandon the roller");
        self.next[prior as usize] = self.next(removed);
        if self.last == removed {
            self.last = prior;
        }
    }

    /// Iterates the data links in chain order, starting after the roller.
    pub(crate) fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            link: self.next(ROLLER),
        }
    }
}

impl core::fmt::Debug for BidiChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for link in self.iter() {
            list.entry(&(
                self.offset(link),
                self.len(link),
                self.class(link),
                self.level(link),
            ));
        }
        list.finish()
    }
}

/// Iterator over chain links, roller excluded.
pub(crate) struct ChainIter<'a> {
    chain: &'a BidiChain,
    link: LinkId,
}

impl Iterator for ChainIter<'_> {
    type Item = LinkId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.link == ROLLER {
            return None;
        }
        let link = self.link;
        self.link = self.chain.next(link);
        Some(link)
    }
}

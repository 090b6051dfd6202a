// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bracket pair queue of rule N0 (BD16).

use smallvec::SmallVec;

use crate::chain::LinkId;
use crate::class::BidiClass;

/// One candidate bracket pair.
///
/// A pair is open until [`BracketQueue::close_pair`] finds its closing
/// bracket; pairs that can no longer close are dropped outright.
#[derive(Copy, Clone, Debug)]
pub(crate) struct BracketPair {
    /// The nearest strong link before the opening bracket; `None` when the
    /// start of the isolating run precedes it.
    pub(crate) prior_strong_link: Option<LinkId>,
    /// The link of the opening bracket.
    pub(crate) opening_link: LinkId,
    /// The link of the closing bracket once matched.
    pub(crate) closing_link: Option<LinkId>,
    /// The canonical closing codepoint this pair awaits.
    expected: char,
    /// The strongest class seen between the brackets so far:
    /// the embedding direction once seen, else the opposite direction if
    /// seen, else [`BidiClass::Nil`].
    pub(crate) inner_strong: BidiClass,
}

/// A bounded queue of candidate bracket pairs, dequeued in opening order.
#[derive(Debug)]
pub(crate) struct BracketQueue {
    pairs: SmallVec<[BracketPair; 8]>,
    open_count: usize,
    /// The embedding direction of the isolating run, `L` or `R`.
    direction: BidiClass,
}

impl BracketQueue {
    /// The maximum number of concurrently open pairs (BD16).
    pub(crate) const MAX_OPEN: usize = 63;

    pub(crate) fn new() -> Self {
        Self {
            pairs: SmallVec::new(),
            open_count: 0,
            direction: BidiClass::Nil,
        }
    }

    /// Clears the queue for an isolating run with the given embedding
    /// direction.
    pub(crate) fn reset(&mut self, direction: BidiClass) {
        self.pairs.clear();
        self.open_count = 0;
        self.direction = direction;
    }

    /// Enqueues an open pair awaiting `expected`. Returns `false` without
    /// enqueuing once 63 pairs are open; the caller then stops considering
    /// opening brackets for the rest of the run.
    pub(crate) fn enqueue(
        &mut self,
        prior_strong_link: Option<LinkId>,
        opening_link: LinkId,
        expected: char,
    ) -> bool {
        if self.open_count >= Self::MAX_OPEN {
            return false;
        }
        self.pairs.push(BracketPair {
            prior_strong_link,
            opening_link,
            closing_link: None,
            expected: canonical(expected),
            inner_strong: BidiClass::Nil,
        });
        self.open_count += 1;
        true
    }

    /// Matches a closing bracket against the most recent compatible open
    /// pair, dropping every still-open pair enqueued after it: once an
    /// enclosing pair closes, those can no longer close validly.
    ///
    /// Returns `false` when no open pair matches.
    pub(crate) fn close_pair(&mut self, closing_link: LinkId, bracket: char) -> bool {
        let bracket = canonical(bracket);
        let Some(found) = self
            .pairs
            .iter()
            .rposition(|pair| pair.closing_link.is_none() && pair.expected == bracket)
        else {
            return false;
        };
        self.pairs[found].closing_link = Some(closing_link);
        let mut index = 0;
        self.pairs.retain(|pair| {
            let keep = index <= found || pair.closing_link.is_some();
            index += 1;
            keep
        });
        self.open_count = self
            .pairs
            .iter()
            .filter(|pair| pair.closing_link.is_none())
            .count();
        true
    }

    /// Records a strong class seen by the scan inside every open pair.
    ///
    /// The embedding direction always wins: once a pair has seen it, a
    /// later opposite class cannot displace it (N0 step b).
    pub(crate) fn set_inner_strong(&mut self, class: BidiClass) {
        for pair in &mut self.pairs {
            if pair.closing_link.is_none() && pair.inner_strong != self.direction {
                pair.inner_strong = class;
            }
        }
    }

    /// Returns `true` while the front pair is closed and ready for
    /// resolution.
    pub(crate) fn should_dequeue(&self) -> bool {
        self.pairs
            .first()
            .is_some_and(|pair| pair.closing_link.is_some())
    }

    /// Pops the front pair.
    pub(crate) fn dequeue(&mut self) -> BracketPair {
        debug_assert!(self.should_dequeue(), "dequeue of an unresolved front");
        self.pairs.remove(0)
    }

    /// Pops the front pair whether or not it closed; the final drain
    /// discards pairs that never found their closing bracket.
    pub(crate) fn pop_front(&mut self) -> Option<BracketPair> {
        if self.pairs.is_empty() {
            return None;
        }
        let pair = self.pairs.remove(0);
        if pair.closing_link.is_none() {
            self.open_count -= 1;
        }
        Some(pair)
    }
}

/// Folds the canonically equivalent CJK angle brackets onto their
/// mathematical counterparts (U+3008 ≅ U+2329, U+3009 ≅ U+232A).
pub(crate) fn canonical(bracket: char) -> char {
    match bracket {
        '\u{3008}' => '\u{2329}',
        '\u{3009}' => '\u{232A}',
        _ => bracket,
    }
}

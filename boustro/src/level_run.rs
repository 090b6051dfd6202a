// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level runs (BD7) and their isolate-chaining kinds.

use crate::chain::{BidiChain, LinkId};
use crate::class::BidiClass;
use crate::level::Level;

/// Classification of a level run within isolating-run assembly.
///
/// Stored as a flag set: a run both beginning with a PDI and ending with an
/// isolate initiator is terminator and isolate at once.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) struct RunKind(u8);

impl RunKind {
    /// Ends with an isolate initiator.
    const ISOLATE: u8 = 1 << 0;
    /// Still awaiting its terminating run.
    const PARTIAL: u8 = 1 << 1;
    /// Begins with a PDI.
    const TERMINATOR: u8 = 1 << 2;
    /// Has been attached to an isolate run and is no longer a sequence
    /// head.
    const ATTACHED: u8 = 1 << 3;

    fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub(crate) fn is_isolate(self) -> bool {
        self.contains(Self::ISOLATE)
    }

    pub(crate) fn is_partial(self) -> bool {
        self.contains(Self::PARTIAL)
    }

    pub(crate) fn is_terminator(self) -> bool {
        self.contains(Self::TERMINATOR)
    }

    pub(crate) fn is_attached(self) -> bool {
        self.contains(Self::ATTACHED)
    }
}

/// A maximal sequence of chain links sharing one level.
#[derive(Debug)]
pub(crate) struct LevelRun {
    /// First link of the run.
    pub(crate) first_link: LinkId,
    /// Last link of the run.
    pub(crate) last_link: LinkId,
    /// The link that followed `last_link` in the paragraph chain when the
    /// run was closed; restored after isolating-run resolution undoes the
    /// splice.
    pub(crate) subsequent_link: LinkId,
    /// The run's embedding level.
    pub(crate) level: Level,
    /// Start-of-run direction from the adjacent level extrema.
    pub(crate) sos: BidiClass,
    /// End-of-run direction from the adjacent level extrema.
    pub(crate) eos: BidiClass,
    pub(crate) kind: RunKind,
    /// The next run of this run's isolating run sequence.
    pub(crate) next: Option<usize>,
}

impl LevelRun {
    /// Builds a run over `first_link..=last_link`, deriving its kind from
    /// the boundary links' original classes.
    ///
    /// Kind detection reads `original_classes` because a directional
    /// override rewrites an isolate initiator's chain class to L or R,
    /// while X10 still chains its sequence across the isolate.
    pub(crate) fn new(
        chain: &BidiChain,
        original_classes: &[BidiClass],
        first_link: LinkId,
        last_link: LinkId,
        sos: BidiClass,
        eos: BidiClass,
    ) -> Self {
        let mut kind = 0;
        if original_classes[chain.offset(first_link)] == BidiClass::PDI {
            kind |= RunKind::TERMINATOR;
        }
        if original_classes[chain.offset(last_link)].is_isolate_initiator() {
            kind |= RunKind::ISOLATE | RunKind::PARTIAL;
        }
        Self {
            first_link,
            last_link,
            subsequent_link: chain.next(last_link),
            level: chain.level(first_link),
            sos,
            eos,
            kind: RunKind(kind),
            next: None,
        }
    }

    /// Marks this partial isolate run as completed by a terminating run.
    pub(crate) fn complete(&mut self, next: usize) {
        debug_assert!(
            self.kind.is_isolate() && self.kind.is_partial(),
            "only a partial isolate run accepts a terminator"
        );
        debug_assert!(self.next.is_none(), "a run terminates at most once");
        self.kind.0 &= !RunKind::PARTIAL;
        self.next = Some(next);
    }

    /// Marks this terminating run as attached to its isolate run.
    pub(crate) fn attach(&mut self) {
        debug_assert!(
            self.kind.is_terminator() && !self.kind.is_attached(),
            "only an unattached terminator run can attach"
        );
        self.kind.0 |= RunKind::ATTACHED;
    }
}

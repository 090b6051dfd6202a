// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The directional status stack of the explicit-levels pass.

use smallvec::SmallVec;

use crate::level::Level;

/// Directional override state of a stack entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum OverrideStatus {
    /// No override in effect.
    Neutral,
    /// Characters are forced to `L` (rule X5).
    Ltr,
    /// Characters are forced to `R` (rule X4).
    Rtl,
}

/// One entry of the status stack (rule X1).
#[derive(Copy, Clone, Debug)]
pub(crate) struct Status {
    pub(crate) level: Level,
    pub(crate) override_status: OverrideStatus,
    pub(crate) isolate: bool,
}

/// The bounded stack of embedding/override/isolate statuses.
///
/// Overflow is a contract violation, not a runtime condition: the explicit
/// pass bounds every push with the overflow counters of rules X2-X5c, which
/// refuse pushes that would exceed [`Level::MAX`].
#[derive(Debug)]
pub(crate) struct StatusStack {
    entries: SmallVec<[Status; 8]>,
}

impl StatusStack {
    /// The maximum entry count: one per level `0..=125` plus the initial
    /// entry.
    pub(crate) const MAX_ENTRIES: usize = 127;

    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Resets the stack to a single entry at the paragraph level.
    pub(crate) fn reset(&mut self, level: Level) {
        self.entries.clear();
        self.entries.push(Status {
            level,
            override_status: OverrideStatus::Neutral,
            isolate: false,
        });
    }

    pub(crate) fn push(&mut self, level: Level, override_status: OverrideStatus, isolate: bool) {
        assert!(
            self.entries.len() < Self::MAX_ENTRIES,
            "status stack overflow; the overflow counters must prevent this"
        );
        self.entries.push(Status {
            level,
            override_status,
            isolate,
        });
    }

    pub(crate) fn pop(&mut self) -> Status {
        self.entries
            .pop()
            .expect("status stack underflow; the X rules never pop the initial entry")
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// The embedding level of the top entry.
    pub(crate) fn level(&self) -> Level {
        self.top().level
    }

    /// The override status of the top entry.
    pub(crate) fn override_status(&self) -> OverrideStatus {
        self.top().override_status
    }

    /// Whether the top entry was pushed by an isolate initiator.
    pub(crate) fn isolate(&self) -> bool {
        self.top().isolate
    }

    fn top(&self) -> &Status {
        self.entries
            .last()
            .expect("status stack is never empty between reset and teardown")
    }
}

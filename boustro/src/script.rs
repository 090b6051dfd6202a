// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Script run segmentation.
//!
//! Characters of script Common or Inherited take the script of the run
//! around them, and paired punctuation remembers the script in effect at
//! its opening side, so a bracket closing after a script change rejoins
//! the run that opened it.

use smallvec::SmallVec;

use crate::bracket_queue::canonical;
use crate::data::{BidiDataSource, BracketKind, Script};
use crate::source::CodepointSequence;

/// A maximal sequence of codepoints resolving to one script.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ScriptRun {
    /// Start of the run in the sequence, in code units.
    pub offset: usize,
    /// Length of the run in code units.
    pub len: usize,
    /// The run's script; `Common` when the run never sees a real script.
    pub script: Script,
}

/// Iterator of [`ScriptRun`]s over a codepoint sequence.
#[derive(Clone, Debug)]
pub struct ScriptLocator<'a, D> {
    seq: CodepointSequence<'a>,
    data: &'a D,
    cursor: usize,
    /// Open paired punctuation: the awaited closing codepoint and the
    /// script in effect when it opened.
    brackets: SmallVec<[(char, Script); 8]>,
}

/// Open pairs remembered at most; deeper nesting loses script memory but
/// still segments correctly.
const MAX_OPEN_BRACKETS: usize = 63;

#[cfg(feature = "icu_data")]
impl<'a> ScriptLocator<'a, crate::data::PropertyData> {
    /// Creates a locator over `seq` using the bundled property data.
    pub fn new(seq: &CodepointSequence<'a>) -> Self {
        static PROPERTY_DATA: crate::data::PropertyData = crate::data::PropertyData;
        Self::with_data_source(seq, &PROPERTY_DATA)
    }
}

impl<'a, D: BidiDataSource> ScriptLocator<'a, D> {
    /// Creates a locator over `seq` with a caller-supplied property
    /// source.
    pub fn with_data_source(seq: &CodepointSequence<'a>, data: &'a D) -> Self {
        Self {
            seq: *seq,
            data,
            cursor: 0,
            brackets: SmallVec::new(),
        }
    }
}

impl<D: BidiDataSource> Iterator for ScriptLocator<'_, D> {
    type Item = ScriptRun;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.seq.len() {
            return None;
        }
        let start = self.cursor;
        let mut script = Script::Common;
        let mut pinned = false;

        while let Some(decoded) = self.seq.codepoint_at(self.cursor) {
            let codepoint = decoded.codepoint;
            let own = self.data.script(codepoint);
            let mut effective = own;
            let mut matched_open: Option<usize> = None;

            if is_common(own) {
                effective = script;
                match self.data.paired_bracket(codepoint) {
                    Some(bracket) if bracket.kind == BracketKind::Close => {
                        let closing = canonical(codepoint);
                        if let Some(found) = self
                            .brackets
                            .iter()
                            .rposition(|&(expected, _)| expected == closing)
                        {
                            matched_open = Some(found);
                            let opener_script = self.brackets[found].1;
                            if !is_common(opener_script) {
                                effective = opener_script;
                            }
                        }
                    }
                    _ => {}
                }
            }

            if !is_common(effective) {
                if !pinned {
                    script = effective;
                    pinned = true;
                } else if effective != script {
                    // The run ends before this codepoint; its bracket
                    // match, if any, is re-examined by the next run.
                    break;
                }
            }

            if let Some(found) = matched_open {
                self.brackets.truncate(found);
            } else if is_common(own) && self.brackets.len() < MAX_OPEN_BRACKETS {
                if let Some(bracket) = self.data.paired_bracket(codepoint) {
                    if bracket.kind == BracketKind::Open {
                        self.brackets.push((canonical(bracket.pair), script));
                    }
                }
            }

            self.cursor += decoded.len;
        }

        Some(ScriptRun {
            offset: start,
            len: self.cursor - start,
            script,
        })
    }
}

fn is_common(script: Script) -> bool {
    script == Script::Common || script == Script::Inherited
}

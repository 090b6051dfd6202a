// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_internals;
mod test_source;

use crate::{BaseDirection, CodepointSequence, Paragraph};

/// Resolves UTF-32 `text` as one paragraph and returns the level numbers
/// per codepoint.
fn levels_utf32(text: &[u32], base: BaseDirection) -> Vec<u8> {
    let seq = CodepointSequence::utf32(text);
    let para = Paragraph::new(&seq, 0, text.len(), base).expect("paragraph should resolve");
    para.levels().iter().map(|level| level.number()).collect()
}

/// Shorthand for the codepoints of a string.
fn codepoints(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

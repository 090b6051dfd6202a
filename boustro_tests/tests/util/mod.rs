// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the integration and conformance tests.

use boustro::{BaseDirection, CodepointSequence, Level, Line, Paragraph};

/// A representative codepoint for each bidi class token used by the
/// Unicode test files.
pub fn representative(token: &str) -> Option<u32> {
    Some(match token {
        "L" => 0x0061,
        "R" => 0x05D0,
        "AL" => 0x0627,
        "EN" => 0x0033,
        "ES" => 0x002B,
        "ET" => 0x0023,
        "AN" => 0x0660,
        "CS" => 0x002C,
        "NSM" => 0x0300,
        "BN" => 0x00AD,
        "B" => 0x2029,
        "S" => 0x0009,
        "WS" => 0x0020,
        "ON" => 0x0021,
        "LRE" => 0x202A,
        "RLE" => 0x202B,
        "PDF" => 0x202C,
        "LRO" => 0x202D,
        "RLO" => 0x202E,
        "LRI" => 0x2066,
        "RLI" => 0x2067,
        "FSI" => 0x2068,
        "PDI" => 0x2069,
        _ => return None,
    })
}

/// The full algorithm over a UTF-32 buffer: every paragraph resolved with
/// the same base request and laid out as a single line each.
///
/// Returns the first paragraph's base level, the per-codepoint levels,
/// and the visual order of the indices in `keep`.
pub fn resolve(text: &[u32], base: BaseDirection, keep: &[bool]) -> (Level, Vec<Level>, Vec<usize>) {
    let seq = CodepointSequence::utf32(text);
    let mut base_level = None;
    let mut levels = Vec::with_capacity(text.len());
    let mut order = Vec::new();

    let mut offset = 0;
    while offset < text.len() {
        let para = Paragraph::new(&seq, offset, text.len() - offset, base)
            .expect("conformance input must resolve");
        base_level.get_or_insert(para.base_level());
        let line = Line::new(&para, para.offset(), para.len()).expect("whole-paragraph line");
        levels.extend_from_slice(line.levels());
        for run in line.runs() {
            if run.is_rtl() {
                for index in (run.offset..run.offset + run.len).rev() {
                    if keep[index] {
                        order.push(index);
                    }
                }
            } else {
                for index in run.offset..run.offset + run.len {
                    if keep[index] {
                        order.push(index);
                    }
                }
            }
        }
        offset += para.len();
    }

    (base_level.expect("at least one paragraph"), levels, order)
}

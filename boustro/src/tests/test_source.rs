// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::CodepointSequence;

#[test]
fn utf8_decode_at_boundaries() {
    let text = "aé€𐍈";
    let seq = CodepointSequence::utf8(text.as_bytes());
    let mut index = 0;
    let mut decoded = Vec::new();
    while let Some(d) = seq.codepoint_at(index) {
        decoded.push((index, d.codepoint, d.len));
        index += d.len;
    }
    assert_eq!(
        decoded,
        [(0, 'a', 1), (1, 'é', 2), (3, '€', 3), (6, '𐍈', 4)]
    );
}

#[test]
fn utf8_malformed_decodes_to_replacement() {
    // Stray continuation byte, then a truncated three-byte lead.
    let seq = CodepointSequence::utf8(&[0x80, 0xE2, 0x82]);
    let first = seq.codepoint_at(0).unwrap();
    assert_eq!((first.codepoint, first.len), ('\u{FFFD}', 1));
    let second = seq.codepoint_at(1).unwrap();
    assert_eq!((second.codepoint, second.len), ('\u{FFFD}', 2));
}

#[test]
fn utf8_overlong_is_faulty() {
    // 0xC0 0xAF would be an overlong '/'.
    let seq = CodepointSequence::utf8(&[0xC0, 0xAF, b'a']);
    assert_eq!(seq.codepoint_at(0).unwrap().codepoint, '\u{FFFD}');
    assert_eq!(seq.codepoint_at(2).unwrap().codepoint, 'a');
}

#[test]
fn utf16_surrogate_pairs() {
    // "a𝄞b" with U+1D11E as a surrogate pair.
    let units = [0x0061, 0xD834, 0xDD1E, 0x0062];
    let seq = CodepointSequence::utf16(&units);
    let pair = seq.codepoint_at(1).unwrap();
    assert_eq!((pair.codepoint, pair.len), ('\u{1D11E}', 2));
    let before = seq.codepoint_before(3).unwrap();
    assert_eq!((before.codepoint, before.len), ('\u{1D11E}', 2));
}

#[test]
fn utf16_lone_surrogates_are_faulty() {
    let units = [0xD834, 0x0061, 0xDD1E];
    let seq = CodepointSequence::utf16(&units);
    assert_eq!(seq.codepoint_at(0).unwrap().codepoint, '\u{FFFD}');
    assert_eq!(seq.codepoint_at(1).unwrap().codepoint, 'a');
    assert_eq!(seq.codepoint_at(2).unwrap().codepoint, '\u{FFFD}');
}

#[test]
fn utf32_out_of_range_is_faulty() {
    let units = [0x0061, 0x110000, 0xD800, 0x05D0];
    let seq = CodepointSequence::utf32(&units);
    assert_eq!(seq.codepoint_at(0).unwrap().codepoint, 'a');
    assert_eq!(seq.codepoint_at(1).unwrap().codepoint, '\u{FFFD}');
    assert_eq!(seq.codepoint_at(2).unwrap().codepoint, '\u{FFFD}');
    assert_eq!(seq.codepoint_at(3).unwrap().codepoint, 'א');
}

#[test]
fn codepoint_before_utf8() {
    let text = "a€b";
    let seq = CodepointSequence::utf8(text.as_bytes());
    let before = seq.codepoint_before(4).unwrap();
    assert_eq!((before.codepoint, before.len), ('€', 3));
    assert!(seq.codepoint_before(0).is_none());
}

#[test]
fn paragraph_boundary_keeps_crlf_whole() {
    // "abcdابجد\r\n" in UTF-16: searching within the first nine units
    // still takes the LF that completes the separator.
    let units: Vec<u16> = "abcdابجد\r\n".encode_utf16().collect();
    assert_eq!(units.len(), 10);
    let seq = CodepointSequence::utf16(&units);
    let boundary = seq.paragraph_boundary(0, 9);
    assert_eq!(boundary.len, 10);
    assert_eq!(boundary.separator_len, 2);
}

#[test]
fn paragraph_boundary_without_separator() {
    let seq = CodepointSequence::utf8(b"plain text");
    let boundary = seq.paragraph_boundary(0, 10);
    assert_eq!(boundary.len, 10);
    assert_eq!(boundary.separator_len, 0);
}

#[test]
fn paragraph_boundary_separate_newlines() {
    let seq = CodepointSequence::utf8(b"a\n\nb");
    let boundary = seq.paragraph_boundary(0, 4);
    assert_eq!((boundary.len, boundary.separator_len), (2, 1));
    let second = seq.paragraph_boundary(2, 2);
    assert_eq!((second.len, second.separator_len), (1, 1));
}

// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit levels and directions: rules P2-P3 and X1-X10.

use alloc::vec::Vec;

use crate::chain::{BidiChain, LinkId, ROLLER};
use crate::class::BidiClass;
use crate::data::BidiDataSource;
use crate::isolating::{IsolatingRun, ParagraphContext};
use crate::level::Level;
use crate::level_run::LevelRun;
use crate::run_queue::RunQueue;
use crate::source::CodepointSequence;
use crate::status_stack::{OverrideStatus, StatusStack};

/// Classifies the paragraph's codepoints and builds its chain.
///
/// `classes` receives the original class of every code unit. Runs of one
/// class coalesce into single links, except the classes the later passes
/// must see one character at a time: explicit format characters and B
/// drive the status stack individually, and ON stays one codepoint wide
/// for bracket pairing.
pub(crate) fn populate<D: BidiDataSource>(
    seq: &CodepointSequence<'_>,
    offset: usize,
    len: usize,
    data: &D,
    classes: &mut Vec<BidiClass>,
) -> BidiChain {
    let mut chain = BidiChain::new(len);
    classes.clear();
    classes.reserve(len);
    for (index, decoded) in seq.codepoints(offset, offset + len) {
        let class = data.bidi_class(decoded.codepoint);
        for _ in 0..decoded.len {
            classes.push(class);
        }
        if coalesces(class) && chain.last_type() == class {
            chain.extend_last(decoded.len);
        } else {
            chain.add_link(class, index - offset, decoded.len);
        }
    }
    chain
}

fn coalesces(class: BidiClass) -> bool {
    use BidiClass::*;
    matches!(class, L | R | AL | EN | AN | ES | ET | CS | NSM | BN | WS | S)
}

/// Rules P2-P3: the base level from the first strong codepoint outside any
/// isolate, or `default` when the text has none.
pub(crate) fn detect_base_level(chain: &BidiChain, default: Level) -> Level {
    // P2 skips isolates but scans past an unmatched PDI.
    match first_strong(chain, chain.next(ROLLER), false) {
        Some(false) => Level::ltr(),
        Some(true) => Level::rtl(),
        None => default,
    }
}

/// Scans forward from `from` for the first strong class outside nested
/// isolates; `Some(true)` for R or AL. X5c's scan ends at the matching
/// PDI; P2's runs to the end of the paragraph.
fn first_strong(chain: &BidiChain, from: LinkId, stop_at_pdi: bool) -> Option<bool> {
    let mut depth = 0_usize;
    let mut link = from;
    while link != ROLLER {
        match chain.class(link) {
            class if class.is_isolate_initiator() => depth += 1,
            BidiClass::PDI => {
                if depth > 0 {
                    depth -= 1;
                } else if stop_at_pdi {
                    break;
                }
            }
            BidiClass::L if depth == 0 => return Some(false),
            BidiClass::R | BidiClass::AL if depth == 0 => return Some(true),
            _ => {}
        }
        link = chain.next(link);
    }
    None
}

/// Rules X1-X9: assigns every link its explicit level, rewrites overridden
/// classes, and abandons the links X9 removes from the chain.
pub(crate) fn resolve_explicit(chain: &mut BidiChain, para_level: Level, stack: &mut StatusStack) {
    stack.reset(para_level);
    let mut overflow_isolate = 0_usize;
    let mut overflow_embedding = 0_usize;
    let mut valid_isolate = 0_usize;

    let mut prior = ROLLER;
    let mut link = chain.next(ROLLER);
    while link != ROLLER {
        let class = chain.class(link);
        match class {
            // X2-X5
            BidiClass::LRE | BidiClass::RLE | BidiClass::LRO | BidiClass::RLO => {
                let new_level = if class.is_rtl_initiator() {
                    stack.level().next_odd()
                } else {
                    stack.level().next_even()
                };
                match new_level {
                    Some(level) if overflow_isolate == 0 && overflow_embedding == 0 => {
                        let override_status = match class {
                            BidiClass::LRO => OverrideStatus::Ltr,
                            BidiClass::RLO => OverrideStatus::Rtl,
                            _ => OverrideStatus::Neutral,
                        };
                        stack.push(level, override_status, false);
                    }
                    _ if overflow_isolate == 0 => overflow_embedding += 1,
                    _ => {}
                }
                // X9
                chain.abandon_next(prior);
            }
            // X5a-X5c
            BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => {
                chain.set_level(link, stack.level());
                match stack.override_status() {
                    OverrideStatus::Ltr => chain.set_class(link, BidiClass::L),
                    OverrideStatus::Rtl => chain.set_class(link, BidiClass::R),
                    OverrideStatus::Neutral => {}
                }
                let rtl = match class {
                    BidiClass::RLI => true,
                    BidiClass::LRI => false,
                    // X5c: the isolate's own first strong codepoint decides.
                    _ => first_strong(chain, chain.next(link), true).unwrap_or(false),
                };
                let new_level = if rtl {
                    stack.level().next_odd()
                } else {
                    stack.level().next_even()
                };
                match new_level {
                    Some(level) if overflow_isolate == 0 && overflow_embedding == 0 => {
                        valid_isolate += 1;
                        stack.push(level, OverrideStatus::Neutral, true);
                    }
                    _ => overflow_isolate += 1,
                }
                prior = link;
            }
            // X6a
            BidiClass::PDI => {
                if overflow_isolate > 0 {
                    overflow_isolate -= 1;
                } else if valid_isolate > 0 {
                    overflow_embedding = 0;
                    while !stack.pop().isolate {}
                    valid_isolate -= 1;
                }
                chain.set_level(link, stack.level());
                match stack.override_status() {
                    OverrideStatus::Ltr => chain.set_class(link, BidiClass::L),
                    OverrideStatus::Rtl => chain.set_class(link, BidiClass::R),
                    OverrideStatus::Neutral => {}
                }
                prior = link;
            }
            // X7
            BidiClass::PDF => {
                if overflow_isolate == 0 {
                    if overflow_embedding > 0 {
                        overflow_embedding -= 1;
                    } else if !stack.isolate() && stack.len() >= 2 {
                        stack.pop();
                    }
                }
                // X9
                chain.abandon_next(prior);
            }
            // X8: a separator resets to the paragraph state.
            BidiClass::B => {
                chain.set_level(link, para_level);
                stack.reset(para_level);
                overflow_isolate = 0;
                overflow_embedding = 0;
                valid_isolate = 0;
                prior = link;
            }
            BidiClass::BN => {
                // X9
                chain.abandon_next(prior);
            }
            // X6
            _ => {
                chain.set_level(link, stack.level());
                match stack.override_status() {
                    OverrideStatus::Ltr => chain.set_class(link, BidiClass::L),
                    OverrideStatus::Rtl => chain.set_class(link, BidiClass::R),
                    OverrideStatus::Neutral => {}
                }
                prior = link;
            }
        }
        link = chain.next(prior);
    }
}

/// Rule X10: partitions the chain into level runs, queues them until
/// isolate completeness is known, and resolves each isolating run
/// sequence.
pub(crate) fn resolve_sequences<D: BidiDataSource>(
    chain: &mut BidiChain,
    ctx: &ParagraphContext<'_, D>,
) {
    let mut queue = RunQueue::new();
    let mut isolating = IsolatingRun::new();

    let mut prior_level = ctx.level;
    let mut first = chain.next(ROLLER);
    while first != ROLLER {
        let level = chain.level(first);
        let mut last = first;
        loop {
            let next = chain.next(last);
            if next == ROLLER || chain.level(next) != level {
                break;
            }
            last = next;
        }
        let next = chain.next(last);

        // X10: boundary directions come from the higher of the adjacent
        // levels; the paragraph level borders the outermost runs.
        let sos = level.max(prior_level).bidi_class();
        let eos_level = if next == ROLLER {
            ctx.level
        } else {
            chain.level(next)
        };
        let eos = level.max(eos_level).bidi_class();

        queue.enqueue(LevelRun::new(
            chain,
            ctx.original_classes,
            first,
            last,
            sos,
            eos,
        ));
        while queue.should_dequeue() {
            let index = queue.dequeue();
            if !queue.run(index).kind.is_attached() {
                isolating.resolve(chain, &queue, index, ctx);
            }
        }

        prior_level = level;
        first = next;
    }

    // Paragraph end: any remaining runs belong to sequences cut short by
    // an unmatched isolate initiator; they resolve as partial.
    while !queue.is_drained() {
        let index = queue.dequeue();
        if !queue.run(index).kind.is_attached() {
            isolating.resolve(chain, &queue, index, ctx);
        }
    }
}

/// Walks the final chain and fills `levels` with each link's resolved
/// level; gaps left by abandoned links carry the preceding level.
pub(crate) fn write_levels(chain: &BidiChain, levels: &mut Vec<Level>, len: usize, base: Level) {
    levels.clear();
    levels.reserve(len);
    let mut carry = base;
    for link in chain.iter() {
        while levels.len() < chain.offset(link) {
            levels.push(carry);
        }
        carry = chain.level(link);
        for _ in 0..chain.len(link) {
            levels.push(carry);
        }
    }
    while levels.len() < len {
        levels.push(carry);
    }
}

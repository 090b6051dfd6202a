// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::bracket_queue::BracketQueue;
use crate::chain::BidiChain;
use crate::class::BidiClass;
use crate::level::Level;
use crate::status_stack::{OverrideStatus, StatusStack};

#[test]
fn chain_partitions_in_text_order() {
    let mut chain = BidiChain::new(8);
    chain.add_link(BidiClass::L, 0, 3);
    chain.add_link(BidiClass::WS, 3, 1);
    chain.add_link(BidiClass::R, 4, 4);

    let spans: Vec<_> = chain
        .iter()
        .map(|link| (chain.offset(link), chain.len(link)))
        .collect();
    assert_eq!(spans, [(0, 3), (3, 1), (4, 4)]);
}

#[test]
fn chain_extend_last_grows_the_tail_link() {
    let mut chain = BidiChain::new(4);
    chain.add_link(BidiClass::L, 0, 1);
    chain.extend_last(2);
    let link = chain.iter().next().unwrap();
    assert_eq!(chain.len(link), 3);
}

#[test]
fn chain_merge_requires_class_level_and_adjacency() {
    let mut chain = BidiChain::new(8);
    let a = chain.add_link(BidiClass::L, 0, 2);
    let b = chain.add_link(BidiClass::L, 2, 1);
    chain.set_level(a, Level::ltr());
    chain.set_level(b, Level::ltr());
    assert!(chain.merge_if_equal(a, b));
    assert_eq!(chain.len(a), 3);
    assert_eq!(chain.iter().count(), 1);

    // Same class and level but a text gap: refuse.
    let mut chain = BidiChain::new(8);
    let a = chain.add_link(BidiClass::L, 0, 2);
    let b = chain.add_link(BidiClass::L, 5, 1);
    chain.set_level(a, Level::ltr());
    chain.set_level(b, Level::ltr());
    assert!(!chain.merge_if_equal(a, b));
}

#[test]
fn chain_abandon_splices_around_a_link() {
    let mut chain = BidiChain::new(8);
    let a = chain.add_link(BidiClass::L, 0, 1);
    chain.add_link(BidiClass::BN, 1, 1);
    let c = chain.add_link(BidiClass::R, 2, 1);
    chain.abandon_next(a);
    assert_eq!(chain.next(a), c);
    assert_eq!(chain.iter().count(), 2);
}

#[test]
fn status_stack_tracks_top_entry() {
    let mut stack = StatusStack::new();
    stack.reset(Level::ltr());
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.level(), Level::ltr());

    stack.push(Level::new(1).unwrap(), OverrideStatus::Rtl, false);
    stack.push(Level::new(2).unwrap(), OverrideStatus::Neutral, true);
    assert!(stack.isolate());
    assert_eq!(stack.level().number(), 2);

    let popped = stack.pop();
    assert!(popped.isolate);
    assert_eq!(stack.override_status(), OverrideStatus::Rtl);
}

#[test]
#[should_panic(expected = "status stack overflow")]
fn status_stack_asserts_on_overflow() {
    let mut stack = StatusStack::new();
    stack.reset(Level::ltr());
    for _ in 0..StatusStack::MAX_ENTRIES {
        stack.push(Level::ltr(), OverrideStatus::Neutral, false);
    }
}

#[test]
fn bracket_queue_pairs_in_opening_order() {
    let mut queue = BracketQueue::new();
    queue.reset(BidiClass::L);
    assert!(queue.enqueue(None, 1, ')'));
    assert!(queue.enqueue(None, 2, ']'));
    // Inner closes first; the front stays blocked until its own close.
    assert!(queue.close_pair(3, ']'));
    assert!(!queue.should_dequeue());
    assert!(queue.close_pair(4, ')'));
    assert!(queue.should_dequeue());
    let first = queue.dequeue();
    assert_eq!((first.opening_link, first.closing_link), (1, Some(4)));
    let second = queue.dequeue();
    assert_eq!((second.opening_link, second.closing_link), (2, Some(3)));
}

#[test]
fn bracket_queue_drops_opens_enclosed_by_an_earlier_close() {
    // "( [ )" - once the parenthesis closes, the bracket can never close.
    let mut queue = BracketQueue::new();
    queue.reset(BidiClass::L);
    queue.enqueue(None, 1, ')');
    queue.enqueue(None, 2, ']');
    assert!(queue.close_pair(3, ')'));
    assert!(queue.should_dequeue());
    let pair = queue.dequeue();
    assert_eq!(pair.opening_link, 1);
    assert!(queue.pop_front().is_none());
}

#[test]
fn bracket_queue_ignores_unmatched_closers() {
    let mut queue = BracketQueue::new();
    queue.reset(BidiClass::L);
    queue.enqueue(None, 1, ')');
    assert!(!queue.close_pair(2, ']'));
    // The open pair survives a mismatched close.
    assert!(queue.close_pair(3, ')'));
}

#[test]
fn bracket_queue_matches_canonical_equivalents() {
    let mut queue = BracketQueue::new();
    queue.reset(BidiClass::L);
    // U+2329 expects U+232A; U+3009 closes it under canonical
    // equivalence.
    queue.enqueue(None, 1, '\u{232A}');
    assert!(queue.close_pair(2, '\u{3009}'));
}

#[test]
fn bracket_queue_refuses_the_64th_open() {
    let mut queue = BracketQueue::new();
    queue.reset(BidiClass::L);
    for link in 0..63 {
        assert!(queue.enqueue(None, link, ')'));
    }
    assert!(!queue.enqueue(None, 63, ')'));
}

#[test]
fn bracket_queue_inner_strong_prefers_embedding_direction() {
    let mut queue = BracketQueue::new();
    queue.reset(BidiClass::L);
    queue.enqueue(None, 1, ')');
    queue.set_inner_strong(BidiClass::R);
    // The embedding direction displaces an opposite sighting...
    queue.set_inner_strong(BidiClass::L);
    // ...and is not displaced afterwards.
    queue.set_inner_strong(BidiClass::R);
    queue.close_pair(2, ')');
    let pair = queue.dequeue();
    assert_eq!(pair.inner_strong, BidiClass::L);
}

#[test]
fn level_parity_helpers() {
    let level = Level::new(3).unwrap();
    assert!(level.is_rtl());
    assert_eq!(level.next_even().unwrap().number(), 4);
    assert_eq!(level.next_odd().unwrap().number(), 5);
    assert_eq!(Level::new(126), None);
    assert_eq!(Level::new(125).unwrap().next_odd(), None);
    assert_eq!(Level::new(125).unwrap().next_even(), None);
}

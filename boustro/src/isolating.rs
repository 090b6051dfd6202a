// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isolating run sequence resolution: rules W1-W7, N0, N1-N2 and I1-I2.
//!
//! A sequence's level runs are spliced into one contiguous chain for the
//! duration of the resolution and the original links are restored
//! afterwards, so the paragraph chain stays intact for level write-back.

use smallvec::SmallVec;

use crate::bracket_queue::{BracketPair, BracketQueue};
use crate::chain::{BidiChain, LinkId, ROLLER};
use crate::class::BidiClass;
use crate::data::{BidiDataSource, BracketKind};
use crate::level::Level;
use crate::run_queue::RunQueue;
use crate::source::CodepointSequence;

/// Resolver state reused across the isolating run sequences of a
/// paragraph.
pub(crate) struct IsolatingRun {
    bracket_queue: BracketQueue,
    /// Queue indices of the sequence's runs, head first.
    seq_runs: SmallVec<[usize; 4]>,
    /// Last links of those runs; merge targets must never be one of these,
    /// the restore step still addresses them.
    run_last_links: SmallVec<[LinkId; 4]>,
    first_link: LinkId,
    last_link: LinkId,
    level: Level,
    sos: BidiClass,
    eos: BidiClass,
}

/// Per-paragraph inputs shared by every sequence resolution.
pub(crate) struct ParagraphContext<'a, D> {
    pub(crate) seq: &'a CodepointSequence<'a>,
    /// Paragraph range start in the sequence, in code units.
    pub(crate) offset: usize,
    pub(crate) level: Level,
    /// Original classes per code unit, paragraph-relative.
    pub(crate) original_classes: &'a [BidiClass],
    pub(crate) data: &'a D,
}

impl IsolatingRun {
    pub(crate) fn new() -> Self {
        Self {
            bracket_queue: BracketQueue::new(),
            seq_runs: SmallVec::new(),
            run_last_links: SmallVec::new(),
            first_link: ROLLER,
            last_link: ROLLER,
            level: Level::ltr(),
            sos: BidiClass::Nil,
            eos: BidiClass::Nil,
        }
    }

    /// Resolves the sequence headed by run `head`, leaving every link with
    /// a class in `{L, R, EN, AN}` and its implicit level applied.
    pub(crate) fn resolve<D: BidiDataSource>(
        &mut self,
        chain: &mut BidiChain,
        queue: &RunQueue,
        head: usize,
        ctx: &ParagraphContext<'_, D>,
    ) {
        self.attach(chain, queue, head, ctx.level);
        self.resolve_weak(chain);
        self.resolve_brackets(chain, ctx);
        self.resolve_neutrals(chain);
        self.resolve_implicit(chain);
        self.restore(chain, queue);
    }

    /// Step 1: splice the constituent runs into one chain and derive the
    /// sequence's sos/eos.
    fn attach(&mut self, chain: &mut BidiChain, queue: &RunQueue, head: usize, para_level: Level) {
        self.seq_runs.clear();
        self.run_last_links.clear();

        let mut index = head;
        loop {
            self.seq_runs.push(index);
            let run = queue.run(index);
            self.run_last_links.push(run.last_link);
            match run.next {
                Some(next) => {
                    chain.set_next(run.last_link, queue.run(next).first_link);
                    index = next;
                }
                None => break,
            }
        }

        let head_run = queue.run(head);
        let tail_run = queue.run(index);
        self.first_link = head_run.first_link;
        self.last_link = tail_run.last_link;
        self.level = head_run.level;
        self.sos = head_run.sos;
        // An isolate initiator with no matching PDI takes its end-of-run
        // direction from the paragraph level (X10).
        self.eos = if tail_run.kind.is_partial() {
            tail_run.level.max(para_level).bidi_class()
        } else {
            tail_run.eos
        };
    }

    /// Step 6: undo the splice so the paragraph chain is whole again.
    fn restore(&mut self, chain: &mut BidiChain, queue: &RunQueue) {
        for &index in &self.seq_runs {
            let run = queue.run(index);
            chain.set_next(run.last_link, run.subsequent_link);
        }
    }

    /// Steps W1-W7 in a forward pass over the sequence, merging compacted
    /// links as they resolve.
    fn resolve_weak(&mut self, chain: &mut BidiChain) {
        let mut prior_class = self.sos;
        // W2 looks back to the most recent L, R or AL.
        let mut strong_w2 = self.sos;
        // ETs buffered by W5 until an EN or a non-ET settles them.
        let mut pending_et: SmallVec<[LinkId; 8]> = SmallVec::new();

        let mut prior_link = ROLLER;
        let mut link = self.first_link;
        loop {
            let mut class = chain.class(link);
            let copied = class == BidiClass::NSM;
            if copied {
                // W1: NSM takes the preceding type; ON after an isolate
                // format character.
                class = match prior_class {
                    BidiClass::LRI | BidiClass::RLI | BidiClass::FSI | BidiClass::PDI => {
                        BidiClass::ON
                    }
                    prior => prior,
                };
                chain.set_class(link, class);
            }

            match class {
                BidiClass::L | BidiClass::R => {
                    if !copied {
                        strong_w2 = class;
                    }
                }
                BidiClass::AL => {
                    // W3; W2 still needs to see the AL behind it.
                    strong_w2 = BidiClass::AL;
                    class = BidiClass::R;
                    chain.set_class(link, class);
                }
                BidiClass::EN => {
                    if strong_w2 == BidiClass::AL {
                        // W2
                        class = BidiClass::AN;
                        chain.set_class(link, class);
                    } else {
                        // W5: a run of ETs before this EN becomes EN.
                        for &et in &pending_et {
                            chain.set_class(et, BidiClass::EN);
                        }
                        pending_et.clear();
                    }
                }
                BidiClass::ES | BidiClass::CS => {
                    // W4 applies to a lone separator only; a longer link is
                    // already more than one separator.
                    let next_class = self.w4_lookahead(chain, link, strong_w2);
                    class = match (prior_class, class, next_class) {
                        (BidiClass::EN, BidiClass::ES, BidiClass::EN)
                        | (BidiClass::EN, BidiClass::CS, BidiClass::EN)
                            if chain.len(link) == 1 =>
                        {
                            BidiClass::EN
                        }
                        (BidiClass::AN, BidiClass::CS, BidiClass::AN) if chain.len(link) == 1 => {
                            BidiClass::AN
                        }
                        // W6
                        _ => BidiClass::ON,
                    };
                    chain.set_class(link, class);
                }
                BidiClass::ET => {
                    if prior_class == BidiClass::EN {
                        // W5: ET directly after EN.
                        class = BidiClass::EN;
                        chain.set_class(link, class);
                    } else {
                        pending_et.push(link);
                    }
                }
                _ => {}
            }

            // W6: a settled non-ET strands any buffered ETs.
            if class != BidiClass::ET && !pending_et.is_empty() {
                for &et in &pending_et {
                    chain.set_class(et, BidiClass::ON);
                }
                pending_et.clear();
            }

            prior_class = class;

            let at_end = link == self.last_link;
            if prior_link != ROLLER && self.can_merge(class, link) {
                if chain.merge_if_equal(prior_link, link) {
                    link = prior_link;
                }
            }
            if at_end {
                break;
            }
            prior_link = link;
            link = chain.next(link);
        }

        for &et in &pending_et {
            chain.set_class(et, BidiClass::ON);
        }

        // W7: EN becomes L back to the last strong L.
        let mut strong = self.sos;
        let mut link = self.first_link;
        loop {
            match chain.class(link) {
                class @ (BidiClass::L | BidiClass::R) => strong = class,
                BidiClass::EN if strong == BidiClass::L => {
                    chain.set_class(link, BidiClass::L);
                }
                _ => {}
            }
            if link == self.last_link {
                break;
            }
            link = chain.next(link);
        }
    }

    /// The effective class following `link` for W4: an upcoming EN folds
    /// through W2, an upcoming NSM copies the separator itself and so can
    /// never match.
    fn w4_lookahead(&self, chain: &BidiChain, link: LinkId, strong_w2: BidiClass) -> BidiClass {
        if link == self.last_link {
            return self.eos;
        }
        match chain.class(chain.next(link)) {
            BidiClass::EN if strong_w2 == BidiClass::AL => BidiClass::AN,
            BidiClass::EN => BidiClass::EN,
            BidiClass::AN => BidiClass::AN,
            other => other,
        }
    }

    /// Whether the weak pass may compact `link` into its predecessor.
    ///
    /// Only settled strong and number links merge: ON links must stay one
    /// codepoint wide for bracket pairing, and a run's boundary links are
    /// still addressed by attach/restore.
    fn can_merge(&self, class: BidiClass, link: LinkId) -> bool {
        matches!(
            class,
            BidiClass::L | BidiClass::R | BidiClass::EN | BidiClass::AN
        ) && !self.run_last_links.contains(&link)
    }

    /// Rule N0: identify bracket pairs (BD16) and resolve them.
    fn resolve_brackets<D: BidiDataSource>(
        &mut self,
        chain: &mut BidiChain,
        ctx: &ParagraphContext<'_, D>,
    ) {
        let embedding = self.level.bidi_class();
        self.bracket_queue.reset(embedding);

        let mut prior_strong: Option<LinkId> = None;
        let mut link = self.first_link;
        loop {
            let class = chain.class(link);
            match class {
                BidiClass::L | BidiClass::R | BidiClass::EN | BidiClass::AN => {
                    self.bracket_queue.set_inner_strong(fold_strong(class));
                    prior_strong = Some(link);
                }
                BidiClass::ON if chain.len(link) == 1 => {
                    let index = ctx.offset + chain.offset(link);
                    if let Some(decoded) = ctx.seq.codepoint_at(index) {
                        if let Some(bracket) = ctx.data.paired_bracket(decoded.codepoint) {
                            match bracket.kind {
                                BracketKind::Open => {
                                    if !self.bracket_queue.enqueue(prior_strong, link, bracket.pair)
                                    {
                                        // BD16: no room in the stack; stop
                                        // pairing for the rest of the run.
                                        break;
                                    }
                                }
                                BracketKind::Close => {
                                    if self.bracket_queue.close_pair(link, decoded.codepoint) {
                                        // Pairs resolve as soon as they
                                        // reach the front, in opening
                                        // order, so earlier pairs
                                        // establish context for later
                                        // ones.
                                        while self.bracket_queue.should_dequeue() {
                                            let pair = self.bracket_queue.dequeue();
                                            if let Some(closing) = pair.closing_link {
                                                self.resolve_pair(
                                                    chain, ctx, &pair, closing, embedding,
                                                );
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
            if link == self.last_link {
                break;
            }
            link = chain.next(link);
        }

        // Closed pairs stuck behind a pair that never found its closing
        // bracket resolve here; the unclosed ones are discarded.
        while let Some(pair) = self.bracket_queue.pop_front() {
            if let Some(closing) = pair.closing_link {
                self.resolve_pair(chain, ctx, &pair, closing, embedding);
            }
        }
    }

    /// N0 steps b and c for one closed pair.
    fn resolve_pair<D: BidiDataSource>(
        &self,
        chain: &mut BidiChain,
        ctx: &ParagraphContext<'_, D>,
        pair: &BracketPair,
        closing: LinkId,
        embedding: BidiClass,
    ) {
        let opposite = opposite_of(embedding);
        let new_class = if pair.inner_strong == embedding {
            Some(embedding)
        } else if pair.inner_strong == opposite {
            let context = self.preceding_strong(chain, pair.opening_link, pair.prior_strong_link);
            if context == opposite {
                Some(opposite)
            } else {
                Some(embedding)
            }
        } else {
            // No strong type inside: the pair stays neutral for N1-N2.
            None
        };

        if let Some(class) = new_class {
            self.set_bracket_class(chain, ctx, pair.opening_link, class);
            self.set_bracket_class(chain, ctx, closing, class);
        }
    }

    /// The strong context established before an opening bracket: the
    /// nearest preceding L or R (numbers fold to R), including brackets
    /// already resolved by earlier pairs, else sos.
    fn preceding_strong(
        &self,
        chain: &BidiChain,
        opening: LinkId,
        prior_strong: Option<LinkId>,
    ) -> BidiClass {
        let (start, mut strong) = match prior_strong {
            Some(link) => (link, BidiClass::Nil),
            None => (self.first_link, self.sos),
        };
        let mut link = start;
        while link != opening {
            match chain.class(link) {
                BidiClass::L => strong = BidiClass::L,
                BidiClass::R | BidiClass::EN | BidiClass::AN => strong = BidiClass::R,
                _ => {}
            }
            if link == self.last_link {
                break;
            }
            link = chain.next(link);
        }
        strong
    }

    /// Sets a resolved bracket's class, carrying it onto any characters
    /// that were NSM before W1 and directly follow the bracket (N0 note).
    fn set_bracket_class<D>(
        &self,
        chain: &mut BidiChain,
        ctx: &ParagraphContext<'_, D>,
        link: LinkId,
        class: BidiClass,
    ) {
        chain.set_class(link, class);
        let mut current = link;
        while current != self.last_link {
            let next = chain.next(current);
            if next == ROLLER || ctx.original_classes[chain.offset(next)] != BidiClass::NSM {
                break;
            }
            chain.set_class(next, class);
            current = next;
        }
    }

    /// Rules N1-N2: resolve maximal runs of neutral and isolate-format
    /// links from their enclosing strong context.
    fn resolve_neutrals(&mut self, chain: &mut BidiChain) {
        let embedding = self.level.bidi_class();
        let mut prior_strong = self.sos;
        let mut link = self.first_link;
        loop {
            let class = chain.class(link);
            if class.is_neutral_or_isolate() {
                // Collect the neutral run and find the strong type after
                // it.
                let neutral_start = link;
                let mut neutral_end = link;
                let mut next_strong = self.eos;
                while neutral_end != self.last_link {
                    let next = chain.next(neutral_end);
                    let next_class = chain.class(next);
                    if next_class.is_neutral_or_isolate() {
                        neutral_end = next;
                    } else {
                        next_strong = fold_strong(next_class);
                        break;
                    }
                }

                let resolved = if prior_strong == next_strong {
                    // N1
                    prior_strong
                } else {
                    // N2
                    embedding
                };
                let mut neutral = neutral_start;
                loop {
                    chain.set_class(neutral, resolved);
                    if neutral == neutral_end {
                        break;
                    }
                    neutral = chain.next(neutral);
                }

                prior_strong = next_strong;
                if neutral_end == self.last_link {
                    break;
                }
                // Skip over the strong link that ended the run; it already
                // fed `prior_strong`.
                link = chain.next(neutral_end);
                if link == self.last_link {
                    break;
                }
                link = chain.next(link);
                continue;
            }

            prior_strong = fold_strong(class);
            if link == self.last_link {
                break;
            }
            link = chain.next(link);
        }
    }

    /// Rules I1-I2: bump each link's level by its resolved class and the
    /// level's parity.
    fn resolve_implicit(&mut self, chain: &mut BidiChain) {
        let mut link = self.first_link;
        loop {
            let class = chain.class(link);
            let mut level = chain.level(link);
            if level.is_rtl() {
                // I1
                if matches!(class, BidiClass::L | BidiClass::EN | BidiClass::AN) {
                    level.raise(1);
                }
            } else {
                // I2
                match class {
                    BidiClass::R => level.raise(1),
                    BidiClass::EN | BidiClass::AN => level.raise(2),
                    _ => {}
                }
            }
            chain.set_level(link, level);
            if link == self.last_link {
                break;
            }
            link = chain.next(link);
        }
    }
}

/// Strong classes as N0-N2 see them: numbers count as R.
fn fold_strong(class: BidiClass) -> BidiClass {
    match class {
        BidiClass::L => BidiClass::L,
        BidiClass::R | BidiClass::EN | BidiClass::AN => BidiClass::R,
        other => other,
    }
}

fn opposite_of(direction: BidiClass) -> BidiClass {
    if direction == BidiClass::L {
        BidiClass::R
    } else {
        BidiClass::L
    }
}

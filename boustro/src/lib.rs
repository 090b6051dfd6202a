// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An implementation of the Unicode Bidirectional Algorithm ([UAX #9]).
//!
//! Given a buffer of UTF-8, UTF-16 or UTF-32 code units, the engine
//! resolves an embedding level for every code unit of a paragraph, orders
//! the runs of a line for rendering, and reports mirrored glyphs and
//! script runs along the way.
//!
//! ```
//! use boustro::{BaseDirection, CodepointSequence, Line, Paragraph};
//!
//! let text = "abc אבג";
//! let seq = CodepointSequence::utf8(text.as_bytes());
//! let para = Paragraph::new(&seq, 0, text.len(), BaseDirection::AutoLtr).unwrap();
//! assert!(para.base_level().is_ltr());
//!
//! let line = Line::new(&para, 0, para.len()).unwrap();
//! let levels: Vec<u8> = line.levels().iter().map(|l| l.number()).collect();
//! assert_eq!(levels, [0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);
//! assert_eq!(line.runs().len(), 2);
//! ```
//!
//! Resolution is pure and runs to completion without blocking; resolved
//! paragraphs and lines are immutable, so sharing them across threads is
//! a matter of wrapping them in an `Arc`.
//!
//! [UAX #9]: https://www.unicode.org/reports/tr9/

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod bracket_queue;
mod chain;
mod class;
mod data;
mod explicit;
mod isolating;
mod level;
mod level_run;
mod line;
mod mirror;
mod paragraph;
mod run_queue;
mod script;
mod source;
mod status_stack;

#[cfg(test)]
mod tests;

pub use class::BidiClass;
#[cfg(feature = "icu_data")]
pub use data::PropertyData;
pub use data::{BidiDataSource, BracketKind, GeneralCategory, PairedBracket, Script};
pub use level::Level;
pub use line::{Line, Run};
pub use mirror::{Mirror, MirrorLocator};
#[cfg(feature = "icu_data")]
pub use paragraph::Paragraphs;
pub use paragraph::{BaseDirection, Paragraph};
pub use script::{ScriptLocator, ScriptRun};
pub use source::{CodepointSequence, Codepoints, Decoded, ParagraphBoundary};

// Copyright 2026 the Boustro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character property lookup.
//!
//! The resolution passes consume properties through [`BidiDataSource`] so
//! that embedders with their own property tables (packed tries, composite
//! lookups) can supply them. [`PropertyData`] is the bundled default backed
//! by ICU4X compiled data.

use crate::class::BidiClass;

pub use icu_properties::props::{GeneralCategory, Script};

/// Which side of a bracket pair a character is.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BracketKind {
    /// An opening paired bracket.
    Open,
    /// A closing paired bracket.
    Close,
}

/// The `Bidi_Paired_Bracket` properties of a bracket character.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PairedBracket {
    /// The codepoint forming the other half of the pair.
    pub pair: char,
    /// Whether this codepoint opens or closes the pair.
    pub kind: BracketKind,
}

/// A source of the Unicode character properties the algorithm needs.
pub trait BidiDataSource {
    /// The bidirectional class of `codepoint`.
    fn bidi_class(&self, codepoint: char) -> BidiClass;

    /// The paired-bracket properties of `codepoint`, if it is one half of
    /// a bracket pair.
    fn paired_bracket(&self, codepoint: char) -> Option<PairedBracket>;

    /// The mirrored counterpart of `codepoint`, if it has one.
    fn mirror(&self, codepoint: char) -> Option<char>;

    /// The script of `codepoint`.
    fn script(&self, codepoint: char) -> Script;

    /// The general category of `codepoint`.
    fn general_category(&self, codepoint: char) -> GeneralCategory;
}

impl<D: BidiDataSource + ?Sized> BidiDataSource for &D {
    fn bidi_class(&self, codepoint: char) -> BidiClass {
        (**self).bidi_class(codepoint)
    }

    fn paired_bracket(&self, codepoint: char) -> Option<PairedBracket> {
        (**self).paired_bracket(codepoint)
    }

    fn mirror(&self, codepoint: char) -> Option<char> {
        (**self).mirror(codepoint)
    }

    fn script(&self, codepoint: char) -> Script {
        (**self).script(codepoint)
    }

    fn general_category(&self, codepoint: char) -> GeneralCategory {
        (**self).general_category(codepoint)
    }
}

/// The bundled property source, backed by ICU4X compiled data.
#[cfg(feature = "icu_data")]
#[derive(Copy, Clone, Default, Debug)]
pub struct PropertyData;

#[cfg(feature = "icu_data")]
impl BidiDataSource for PropertyData {
    fn bidi_class(&self, codepoint: char) -> BidiClass {
        let class = icu_properties::CodePointMapData::<icu_properties::props::BidiClass>::new()
            .get(codepoint);
        convert_bidi_class(class)
    }

    fn paired_bracket(&self, codepoint: char) -> Option<PairedBracket> {
        use icu_properties::props::{BidiMirroringGlyph, BidiPairedBracketType};
        let glyph = icu_properties::CodePointMapData::<BidiMirroringGlyph>::new().get(codepoint);
        let kind = match glyph.paired_bracket_type {
            BidiPairedBracketType::Open => BracketKind::Open,
            BidiPairedBracketType::Close => BracketKind::Close,
            _ => return None,
        };
        // Bidi_Paired_Bracket equals Bidi_Mirroring_Glyph for every entry
        // of BidiBrackets.txt.
        glyph.mirroring_glyph.map(|pair| PairedBracket { pair, kind })
    }

    fn mirror(&self, codepoint: char) -> Option<char> {
        use icu_properties::props::BidiMirroringGlyph;
        icu_properties::CodePointMapData::<BidiMirroringGlyph>::new()
            .get(codepoint)
            .mirroring_glyph
    }

    fn script(&self, codepoint: char) -> Script {
        icu_properties::CodePointMapData::<Script>::new().get(codepoint)
    }

    fn general_category(&self, codepoint: char) -> GeneralCategory {
        icu_properties::CodePointMapData::<GeneralCategory>::new().get(codepoint)
    }
}

#[cfg(feature = "icu_data")]
fn convert_bidi_class(class: icu_properties::props::BidiClass) -> BidiClass {
    use icu_properties::props::BidiClass as Icu;
    match class {
        Icu::LeftToRight => BidiClass::L,
        Icu::RightToLeft => BidiClass::R,
        Icu::ArabicLetter => BidiClass::AL,
        Icu::EuropeanNumber => BidiClass::EN,
        Icu::EuropeanSeparator => BidiClass::ES,
        Icu::EuropeanTerminator => BidiClass::ET,
        Icu::ArabicNumber => BidiClass::AN,
        Icu::CommonSeparator => BidiClass::CS,
        Icu::NonspacingMark => BidiClass::NSM,
        Icu::BoundaryNeutral => BidiClass::BN,
        Icu::ParagraphSeparator => BidiClass::B,
        Icu::SegmentSeparator => BidiClass::S,
        Icu::WhiteSpace => BidiClass::WS,
        Icu::OtherNeutral => BidiClass::ON,
        Icu::LeftToRightEmbedding => BidiClass::LRE,
        Icu::LeftToRightOverride => BidiClass::LRO,
        Icu::RightToLeftEmbedding => BidiClass::RLE,
        Icu::RightToLeftOverride => BidiClass::RLO,
        Icu::PopDirectionalFormat => BidiClass::PDF,
        Icu::LeftToRightIsolate => BidiClass::LRI,
        Icu::RightToLeftIsolate => BidiClass::RLI,
        Icu::FirstStrongIsolate => BidiClass::FSI,
        Icu::PopDirectionalIsolate => BidiClass::PDI,
        _ => BidiClass::ON,
    }
}

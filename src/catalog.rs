//! Phoneme catalog: the immutable, process-wide table of IPA records.
//!
//! The catalog is built once (either the full IPA table via
//! [`PhonemeCatalog::ipa`] or a fixture via
//! [`PhonemeCatalog::from_records`]) and read-only thereafter. Lookups,
//! ordering, and filtering all run against that frozen table, so the
//! catalog is safe to share across threads by reference.
//!
//! Coordinates and feature assignments follow the official IPA chart
//! (2020 revision): 28 vowels on the trapezoid, 59 pulmonic consonants
//! on the grid.

use crate::error::{AtlasError, Result};
use crate::phoneme::{Features, PhonemeKind, PhonemeRecord, CHART_X_MAX, CHART_Y_MAX};
use std::collections::{BTreeSet, HashMap};

/// Feature fields accepted by [`PhonemeCatalog::filter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureField {
    Height,
    Backness,
    Roundedness,
    Manner,
    Place,
    Voicing,
}

impl FeatureField {
    /// Parse a field name; unknown names are an error.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "height" => Ok(FeatureField::Height),
            "backness" => Ok(FeatureField::Backness),
            "roundedness" => Ok(FeatureField::Roundedness),
            "manner" => Ok(FeatureField::Manner),
            "place" => Ok(FeatureField::Place),
            "voicing" => Ok(FeatureField::Voicing),
            _ => Err(AtlasError::InvalidFeature {
                field: name.to_string(),
            }),
        }
    }
}

/// Immutable table of phoneme records with symbol-keyed lookup.
#[derive(Clone, Debug)]
pub struct PhonemeCatalog {
    /// Records in insertion order: vowels first, then consonants.
    records: Vec<PhonemeRecord>,
    /// Symbol -> index into `records`.
    index: HashMap<char, usize>,
}

impl PhonemeCatalog {
    /// Build the full IPA catalog.
    pub fn ipa() -> Self {
        // The full table is valid by construction.
        Self::from_records(ipa_records()).expect("builtin IPA table is valid")
    }

    /// Build a catalog from arbitrary records (e.g. a small test fixture).
    ///
    /// Validates that symbols are unique and coordinates lie within the
    /// chart bounding box.
    pub fn from_records(records: Vec<PhonemeRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, rec) in records.iter().enumerate() {
            if index.insert(rec.symbol, i).is_some() {
                return Err(AtlasError::InvalidArgument(format!(
                    "duplicate symbol in catalog: '{}'",
                    rec.symbol
                )));
            }
            let (x, y) = rec.coordinates;
            if !(0.0..=CHART_X_MAX).contains(&x) || !(0.0..=CHART_Y_MAX).contains(&y) {
                return Err(AtlasError::InvalidArgument(format!(
                    "coordinates ({x}, {y}) for '{}' are outside the chart bounding box",
                    rec.symbol
                )));
            }
        }
        Ok(Self { records, index })
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order (vowels before consonants,
    /// stable across calls).
    pub fn all(&self) -> &[PhonemeRecord] {
        &self.records
    }

    /// Look up a record by symbol.
    pub fn lookup(&self, symbol: char) -> Result<&PhonemeRecord> {
        self.index
            .get(&symbol)
            .map(|&i| &self.records[i])
            .ok_or(AtlasError::NotFound { symbol })
    }

    /// Insertion-order position of a symbol, if present.
    ///
    /// Used by the similarity engine for deterministic tie-breaking.
    pub fn position(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Whether the symbol names a vowel.
    pub fn is_vowel(&self, symbol: char) -> Result<bool> {
        Ok(self.lookup(symbol)?.is_vowel())
    }

    /// Whether the symbol names a consonant.
    pub fn is_consonant(&self, symbol: char) -> Result<bool> {
        Ok(self.lookup(symbol)?.is_consonant())
    }

    /// All vowel symbols in insertion order.
    pub fn vowels(&self) -> Vec<char> {
        self.symbols_of_kind(PhonemeKind::Vowel)
    }

    /// All consonant symbols in insertion order.
    pub fn consonants(&self) -> Vec<char> {
        self.symbols_of_kind(PhonemeKind::Consonant)
    }

    fn symbols_of_kind(&self, kind: PhonemeKind) -> Vec<char> {
        self.records
            .iter()
            .filter(|r| r.kind() == kind)
            .map(|r| r.symbol)
            .collect()
    }

    /// Human-readable gloss for a symbol.
    pub fn description(&self, symbol: char) -> Result<&str> {
        Ok(self.lookup(symbol)?.description.as_str())
    }

    /// Symbols whose present attributes equal every given (field, value)
    /// pair.
    ///
    /// Unknown field names are an error. A field that does not apply to a
    /// record's kind simply never matches on that record; a value string
    /// naming no variant of the field matches nothing.
    pub fn filter(&self, pairs: &[(&str, &str)]) -> Result<BTreeSet<char>> {
        let parsed: Vec<(FeatureField, &str)> = pairs
            .iter()
            .map(|&(field, value)| Ok((FeatureField::parse(field)?, value)))
            .collect::<Result<_>>()?;

        Ok(self
            .records
            .iter()
            .filter(|rec| parsed.iter().all(|&(field, value)| field_matches(rec, field, value)))
            .map(|rec| rec.symbol)
            .collect())
    }
}

/// Whether a record's attribute for `field` is present and labeled `value`.
fn field_matches(rec: &PhonemeRecord, field: FeatureField, value: &str) -> bool {
    match (&rec.features, field) {
        (Features::Vowel { height, .. }, FeatureField::Height) => height.label() == value,
        (Features::Vowel { backness, .. }, FeatureField::Backness) => backness.label() == value,
        (Features::Vowel { roundedness, .. }, FeatureField::Roundedness) => {
            roundedness.label() == value
        }
        (Features::Consonant { manner, .. }, FeatureField::Manner) => manner.label() == value,
        (Features::Consonant { place, .. }, FeatureField::Place) => place.label() == value,
        (Features::Consonant { voicing, .. }, FeatureField::Voicing) => voicing.label() == value,
        _ => false,
    }
}

/// The full IPA table: 28 vowels then 59 pulmonic consonants.
#[rustfmt::skip]
fn ipa_records() -> Vec<PhonemeRecord> {
    use crate::phoneme::Backness::*;
    use crate::phoneme::Height::*;
    use crate::phoneme::Manner::*;
    use crate::phoneme::Place::*;
    use crate::phoneme::Roundedness::*;
    use crate::phoneme::Voicing::*;

    let v = PhonemeRecord::vowel;
    let c = PhonemeRecord::consonant;

    vec![
        // Vowel trapezoid, top (close) to bottom (open).
        v('i', 0.0, 0.0, Close, Front, Unrounded, "Close front unrounded vowel"),
        v('y', 0.1, 0.0, Close, Front, Rounded, "Close front rounded vowel"),
        v('ɨ', 1.0, 0.0, Close, Central, Unrounded, "Close central unrounded vowel"),
        v('ʉ', 1.1, 0.0, Close, Central, Rounded, "Close central rounded vowel"),
        v('ɯ', 2.0, 0.0, Close, Back, Unrounded, "Close back unrounded vowel"),
        v('u', 2.1, 0.0, Close, Back, Rounded, "Close back rounded vowel"),
        v('ɪ', 0.3, 0.5, NearClose, NearFront, Unrounded, "Near-close near-front unrounded vowel"),
        v('ʏ', 0.4, 0.5, NearClose, NearFront, Rounded, "Near-close near-front rounded vowel"),
        v('ʊ', 1.8, 0.5, NearClose, NearBack, Rounded, "Near-close near-back rounded vowel"),
        v('e', 0.2, 1.0, CloseMid, Front, Unrounded, "Close-mid front unrounded vowel"),
        v('ø', 0.3, 1.0, CloseMid, Front, Rounded, "Close-mid front rounded vowel"),
        v('ɘ', 1.0, 1.0, CloseMid, Central, Unrounded, "Close-mid central unrounded vowel"),
        v('ɵ', 1.1, 1.0, CloseMid, Central, Rounded, "Close-mid central rounded vowel"),
        v('ɤ', 2.0, 1.0, CloseMid, Back, Unrounded, "Close-mid back unrounded vowel"),
        v('o', 2.1, 1.0, CloseMid, Back, Rounded, "Close-mid back rounded vowel"),
        v('ə', 1.0, 1.5, Mid, Central, Unrounded, "Mid central vowel (schwa)"),
        v('ɛ', 0.4, 2.0, OpenMid, Front, Unrounded, "Open-mid front unrounded vowel"),
        v('œ', 0.5, 2.0, OpenMid, Front, Rounded, "Open-mid front rounded vowel"),
        v('ɜ', 1.0, 2.0, OpenMid, Central, Unrounded, "Open-mid central unrounded vowel"),
        v('ɞ', 1.1, 2.0, OpenMid, Central, Rounded, "Open-mid central rounded vowel"),
        v('ʌ', 1.8, 2.0, OpenMid, Back, Unrounded, "Open-mid back unrounded vowel"),
        v('ɔ', 2.1, 2.0, OpenMid, Back, Rounded, "Open-mid back rounded vowel"),
        v('æ', 0.5, 2.5, NearOpen, Front, Unrounded, "Near-open front unrounded vowel"),
        v('ɐ', 1.2, 2.5, NearOpen, Central, Unrounded, "Near-open central vowel"),
        v('a', 0.6, 3.0, Open, Front, Unrounded, "Open front unrounded vowel"),
        v('ɶ', 0.7, 3.0, Open, Front, Rounded, "Open front rounded vowel"),
        v('ɑ', 2.0, 3.0, Open, Back, Unrounded, "Open back unrounded vowel"),
        v('ɒ', 2.1, 3.0, Open, Back, Rounded, "Open back rounded vowel"),
        // Consonant grid: x = place, y = manner. In a shared cell the
        // voiced member sits at x + 0.1.
        c('p', 0.0, 0.0, Plosive, Bilabial, Voiceless, "Voiceless bilabial plosive"),
        c('b', 0.1, 0.0, Plosive, Bilabial, Voiced, "Voiced bilabial plosive"),
        c('t', 3.0, 0.0, Plosive, Alveolar, Voiceless, "Voiceless alveolar plosive"),
        c('d', 3.1, 0.0, Plosive, Alveolar, Voiced, "Voiced alveolar plosive"),
        c('ʈ', 5.0, 0.0, Plosive, Retroflex, Voiceless, "Voiceless retroflex plosive"),
        c('ɖ', 5.1, 0.0, Plosive, Retroflex, Voiced, "Voiced retroflex plosive"),
        c('c', 6.0, 0.0, Plosive, Palatal, Voiceless, "Voiceless palatal plosive"),
        c('ɟ', 6.1, 0.0, Plosive, Palatal, Voiced, "Voiced palatal plosive"),
        c('k', 7.0, 0.0, Plosive, Velar, Voiceless, "Voiceless velar plosive"),
        c('g', 7.1, 0.0, Plosive, Velar, Voiced, "Voiced velar plosive"),
        c('q', 8.0, 0.0, Plosive, Uvular, Voiceless, "Voiceless uvular plosive"),
        c('ɢ', 8.1, 0.0, Plosive, Uvular, Voiced, "Voiced uvular plosive"),
        c('ʔ', 10.0, 0.0, Plosive, Glottal, Voiceless, "Glottal stop"),
        c('m', 0.0, 1.0, Nasal, Bilabial, Voiced, "Voiced bilabial nasal"),
        c('ɱ', 1.0, 1.0, Nasal, Labiodental, Voiced, "Voiced labiodental nasal"),
        c('n', 3.0, 1.0, Nasal, Alveolar, Voiced, "Voiced alveolar nasal"),
        c('ɳ', 5.0, 1.0, Nasal, Retroflex, Voiced, "Voiced retroflex nasal"),
        c('ɲ', 6.0, 1.0, Nasal, Palatal, Voiced, "Voiced palatal nasal"),
        c('ŋ', 7.0, 1.0, Nasal, Velar, Voiced, "Voiced velar nasal"),
        c('ɴ', 8.0, 1.0, Nasal, Uvular, Voiced, "Voiced uvular nasal"),
        c('ʙ', 0.0, 2.0, Trill, Bilabial, Voiced, "Voiced bilabial trill"),
        c('r', 3.0, 2.0, Trill, Alveolar, Voiced, "Voiced alveolar trill"),
        c('ʀ', 8.0, 2.0, Trill, Uvular, Voiced, "Voiced uvular trill"),
        c('ⱱ', 1.0, 3.0, Tap, Labiodental, Voiced, "Voiced labiodental flap"),
        c('ɾ', 3.0, 3.0, Tap, Alveolar, Voiced, "Voiced alveolar tap"),
        c('ɽ', 5.0, 3.0, Tap, Retroflex, Voiced, "Voiced retroflex flap"),
        c('ɸ', 0.0, 4.0, Fricative, Bilabial, Voiceless, "Voiceless bilabial fricative"),
        c('β', 0.1, 4.0, Fricative, Bilabial, Voiced, "Voiced bilabial fricative"),
        c('f', 1.0, 4.0, Fricative, Labiodental, Voiceless, "Voiceless labiodental fricative"),
        c('v', 1.1, 4.0, Fricative, Labiodental, Voiced, "Voiced labiodental fricative"),
        c('θ', 2.0, 4.0, Fricative, Dental, Voiceless, "Voiceless dental fricative"),
        c('ð', 2.1, 4.0, Fricative, Dental, Voiced, "Voiced dental fricative"),
        c('s', 3.0, 4.0, Fricative, Alveolar, Voiceless, "Voiceless alveolar fricative"),
        c('z', 3.1, 4.0, Fricative, Alveolar, Voiced, "Voiced alveolar fricative"),
        c('ʃ', 4.0, 4.0, Fricative, Postalveolar, Voiceless, "Voiceless postalveolar fricative"),
        c('ʒ', 4.1, 4.0, Fricative, Postalveolar, Voiced, "Voiced postalveolar fricative"),
        c('ʂ', 5.0, 4.0, Fricative, Retroflex, Voiceless, "Voiceless retroflex fricative"),
        c('ʐ', 5.1, 4.0, Fricative, Retroflex, Voiced, "Voiced retroflex fricative"),
        c('ç', 6.0, 4.0, Fricative, Palatal, Voiceless, "Voiceless palatal fricative"),
        c('ʝ', 6.1, 4.0, Fricative, Palatal, Voiced, "Voiced palatal fricative"),
        c('x', 7.0, 4.0, Fricative, Velar, Voiceless, "Voiceless velar fricative"),
        c('ɣ', 7.1, 4.0, Fricative, Velar, Voiced, "Voiced velar fricative"),
        c('χ', 8.0, 4.0, Fricative, Uvular, Voiceless, "Voiceless uvular fricative"),
        c('ʁ', 8.1, 4.0, Fricative, Uvular, Voiced, "Voiced uvular fricative"),
        c('ħ', 9.0, 4.0, Fricative, Pharyngeal, Voiceless, "Voiceless pharyngeal fricative"),
        c('ʕ', 9.1, 4.0, Fricative, Pharyngeal, Voiced, "Voiced pharyngeal fricative"),
        c('h', 10.0, 4.0, Fricative, Glottal, Voiceless, "Voiceless glottal fricative"),
        c('ɦ', 10.1, 4.0, Fricative, Glottal, Voiced, "Voiced glottal fricative"),
        c('ɬ', 3.0, 5.0, LateralFricative, Alveolar, Voiceless, "Voiceless alveolar lateral fricative"),
        c('ɮ', 3.1, 5.0, LateralFricative, Alveolar, Voiced, "Voiced alveolar lateral fricative"),
        c('ʋ', 1.0, 6.0, Approximant, Labiodental, Voiced, "Voiced labiodental approximant"),
        c('ɹ', 3.0, 6.0, Approximant, Alveolar, Voiced, "Voiced alveolar approximant"),
        c('ɻ', 5.0, 6.0, Approximant, Retroflex, Voiced, "Voiced retroflex approximant"),
        c('j', 6.0, 6.0, Approximant, Palatal, Voiced, "Voiced palatal approximant"),
        c('ɰ', 7.0, 6.0, Approximant, Velar, Voiced, "Voiced velar approximant"),
        c('l', 3.0, 7.0, LateralApproximant, Alveolar, Voiced, "Voiced alveolar lateral approximant"),
        c('ɭ', 5.0, 7.0, LateralApproximant, Retroflex, Voiced, "Voiced retroflex lateral approximant"),
        c('ʎ', 6.0, 7.0, LateralApproximant, Palatal, Voiced, "Voiced palatal lateral approximant"),
        c('ʟ', 7.0, 7.0, LateralApproximant, Velar, Voiced, "Voiced velar lateral approximant"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phoneme::{Backness, Height, Roundedness};

    #[test]
    fn test_ipa_catalog_shape() {
        let cat = PhonemeCatalog::ipa();
        assert_eq!(cat.vowels().len(), 28);
        assert_eq!(cat.consonants().len(), 59);
        assert_eq!(cat.len(), 87);
    }

    #[test]
    fn test_vowels_precede_consonants() {
        let cat = PhonemeCatalog::ipa();
        let first_consonant = cat
            .all()
            .iter()
            .position(|r| r.is_consonant())
            .expect("catalog has consonants");
        assert!(cat.all()[..first_consonant].iter().all(|r| r.is_vowel()));
        assert!(cat.all()[first_consonant..].iter().all(|r| r.is_consonant()));
    }

    #[test]
    fn test_lookup_known() {
        let cat = PhonemeCatalog::ipa();
        let rec = cat.lookup('i').unwrap();
        assert_eq!(rec.coordinates, (0.0, 0.0));
        match rec.features {
            Features::Vowel { height, roundedness, .. } => {
                assert_eq!(height, Height::Close);
                assert_eq!(roundedness, Roundedness::Unrounded);
            }
            _ => panic!("'i' should be a vowel"),
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let cat = PhonemeCatalog::ipa();
        assert_eq!(cat.lookup('Z'), Err(AtlasError::NotFound { symbol: 'Z' }));
    }

    #[test]
    fn test_is_vowel_is_consonant() {
        let cat = PhonemeCatalog::ipa();
        assert!(cat.is_vowel('ə').unwrap());
        assert!(cat.is_consonant('ʔ').unwrap());
        assert!(!cat.is_vowel('ʔ').unwrap());
        assert!(cat.is_vowel('!').is_err());
    }

    #[test]
    fn test_description() {
        let cat = PhonemeCatalog::ipa();
        assert_eq!(cat.description('ə').unwrap(), "Mid central vowel (schwa)");
        assert!(cat.description('7').is_err());
    }

    #[test]
    fn test_filter_bilabial() {
        let cat = PhonemeCatalog::ipa();
        let bilabial = cat.filter(&[("place", "bilabial")]).unwrap();
        let expected: BTreeSet<char> = ['p', 'b', 'm', 'ʙ', 'ɸ', 'β'].into_iter().collect();
        assert_eq!(bilabial, expected);
    }

    #[test]
    fn test_filter_conjunction() {
        let cat = PhonemeCatalog::ipa();
        let result = cat
            .filter(&[("manner", "plosive"), ("voicing", "voiced")])
            .unwrap();
        let expected: BTreeSet<char> = ['b', 'd', 'ɖ', 'ɟ', 'g', 'ɢ'].into_iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_filter_vowel_field_skips_consonants() {
        let cat = PhonemeCatalog::ipa();
        let close = cat.filter(&[("height", "close")]).unwrap();
        assert_eq!(close.len(), 6); // i y ɨ ʉ ɯ u
        assert!(close.iter().all(|&s| cat.is_vowel(s).unwrap()));
    }

    #[test]
    fn test_filter_unknown_field() {
        let cat = PhonemeCatalog::ipa();
        let err = cat.filter(&[("sonority", "high")]).unwrap_err();
        assert_eq!(
            err,
            AtlasError::InvalidFeature {
                field: "sonority".to_string()
            }
        );
    }

    #[test]
    fn test_filter_unknown_value_matches_nothing() {
        let cat = PhonemeCatalog::ipa();
        let result = cat.filter(&[("place", "interdental")]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let rec = PhonemeRecord::vowel(
            'i',
            0.0,
            0.0,
            Height::Close,
            Backness::Front,
            Roundedness::Unrounded,
            "Close front unrounded vowel",
        );
        let err = PhonemeCatalog::from_records(vec![rec.clone(), rec]).unwrap_err();
        assert!(matches!(err, AtlasError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_records_rejects_out_of_bounds() {
        let rec = PhonemeRecord::vowel(
            'i',
            99.0,
            0.0,
            Height::Close,
            Backness::Front,
            Roundedness::Unrounded,
            "off the chart",
        );
        assert!(PhonemeCatalog::from_records(vec![rec]).is_err());
    }

    #[test]
    fn test_position_follows_insertion_order() {
        let cat = PhonemeCatalog::ipa();
        assert_eq!(cat.position('i'), Some(0));
        assert_eq!(cat.position('y'), Some(1));
        assert!(cat.position('p').unwrap() > cat.position('ɒ').unwrap());
        assert_eq!(cat.position('#'), None);
    }
}

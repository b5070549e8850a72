//! Phoneme records and articulatory feature enums.
//!
//! Every catalog entry is a [`PhonemeRecord`]: an IPA symbol, a fixed 2D
//! position on the chart, and a kind-tagged set of articulatory features.
//! Vowels carry height/backness/roundedness; consonants carry
//! manner/place/voicing. The tagged variant makes it impossible for a
//! record to carry features that do not apply to its kind.
//!
//! Coordinates follow the 2020 IPA chart: vowels on the trapezoid
//! (x = backness, y = height), consonants on the pulmonic grid
//! (x = place, y = manner). Both planes fit inside one bounding box,
//! [`CHART_X_MAX`] x [`CHART_Y_MAX`], which the similarity engine uses to
//! normalize distances.

use serde::{Deserialize, Serialize};

/// Upper x bound of the chart bounding box.
pub const CHART_X_MAX: f64 = 10.5;

/// Upper y bound of the chart bounding box.
pub const CHART_Y_MAX: f64 = 7.5;

/// Maximum possible distance between two points on the chart
/// (the bounding-box diagonal).
pub fn max_chart_distance() -> f64 {
    (CHART_X_MAX * CHART_X_MAX + CHART_Y_MAX * CHART_Y_MAX).sqrt()
}

/// Phoneme kind discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeKind {
    Vowel,
    Consonant,
}

/// Vowel height (tongue position), ordered close to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Height {
    Close,
    NearClose,
    CloseMid,
    Mid,
    OpenMid,
    NearOpen,
    Open,
}

impl Height {
    /// Number of height values.
    pub const COUNT: usize = 7;

    /// Ordinal rank, 0 = close.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Canonical lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Height::Close => "close",
            Height::NearClose => "near-close",
            Height::CloseMid => "close-mid",
            Height::Mid => "mid",
            Height::OpenMid => "open-mid",
            Height::NearOpen => "near-open",
            Height::Open => "open",
        }
    }
}

/// Vowel backness (tongue position), ordered front to back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backness {
    Front,
    NearFront,
    Central,
    NearBack,
    Back,
}

impl Backness {
    /// Number of backness values.
    pub const COUNT: usize = 5;

    /// Ordinal rank, 0 = front.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Canonical lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Backness::Front => "front",
            Backness::NearFront => "near-front",
            Backness::Central => "central",
            Backness::NearBack => "near-back",
            Backness::Back => "back",
        }
    }
}

/// Lip roundedness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Roundedness {
    Unrounded,
    Rounded,
}

impl Roundedness {
    /// Binary flag: 0.0 unrounded, 1.0 rounded.
    pub fn flag(self) -> f64 {
        match self {
            Roundedness::Unrounded => 0.0,
            Roundedness::Rounded => 1.0,
        }
    }

    /// Canonical lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Roundedness::Unrounded => "unrounded",
            Roundedness::Rounded => "rounded",
        }
    }
}

/// Manner of articulation. Unordered categorical; rank is only used to
/// index the one-hot block in the feature vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Manner {
    Plosive,
    Nasal,
    Trill,
    Tap,
    Fricative,
    LateralFricative,
    Approximant,
    LateralApproximant,
}

impl Manner {
    /// Number of manner values (width of the one-hot block).
    pub const COUNT: usize = 8;

    /// One-hot slot index for this manner.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Canonical lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Manner::Plosive => "plosive",
            Manner::Nasal => "nasal",
            Manner::Trill => "trill",
            Manner::Tap => "tap",
            Manner::Fricative => "fricative",
            Manner::LateralFricative => "lateral-fricative",
            Manner::Approximant => "approximant",
            Manner::LateralApproximant => "lateral-approximant",
        }
    }
}

/// Place of articulation, ordered roughly front-to-back in the mouth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Place {
    Bilabial,
    Labiodental,
    Dental,
    Alveolar,
    Postalveolar,
    Retroflex,
    Palatal,
    Velar,
    Uvular,
    Pharyngeal,
    Glottal,
}

impl Place {
    /// Number of place values.
    pub const COUNT: usize = 11;

    /// Ordinal rank, 0 = bilabial.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Canonical lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Place::Bilabial => "bilabial",
            Place::Labiodental => "labiodental",
            Place::Dental => "dental",
            Place::Alveolar => "alveolar",
            Place::Postalveolar => "postalveolar",
            Place::Retroflex => "retroflex",
            Place::Palatal => "palatal",
            Place::Velar => "velar",
            Place::Uvular => "uvular",
            Place::Pharyngeal => "pharyngeal",
            Place::Glottal => "glottal",
        }
    }
}

/// Vocal fold vibration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voicing {
    Voiceless,
    Voiced,
}

impl Voicing {
    /// Binary flag: 0.0 voiceless, 1.0 voiced.
    pub fn flag(self) -> f64 {
        match self {
            Voicing::Voiceless => 0.0,
            Voicing::Voiced => 1.0,
        }
    }

    /// Canonical lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Voicing::Voiceless => "voiceless",
            Voicing::Voiced => "voiced",
        }
    }
}

/// Kind-tagged articulatory features of a phoneme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Features {
    Vowel {
        height: Height,
        backness: Backness,
        roundedness: Roundedness,
    },
    Consonant {
        manner: Manner,
        place: Place,
        voicing: Voicing,
    },
}

impl Features {
    /// The kind this feature set belongs to.
    pub fn kind(&self) -> PhonemeKind {
        match self {
            Features::Vowel { .. } => PhonemeKind::Vowel,
            Features::Consonant { .. } => PhonemeKind::Consonant,
        }
    }
}

/// One immutable catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhonemeRecord {
    /// Unique IPA symbol, the primary key.
    pub symbol: char,
    /// Chart position (x, y) within the bounding box.
    pub coordinates: (f64, f64),
    /// Kind-tagged articulatory features.
    pub features: Features,
    /// Human-readable gloss; never used in computation.
    pub description: String,
}

impl PhonemeRecord {
    /// Build a vowel record.
    pub fn vowel(
        symbol: char,
        x: f64,
        y: f64,
        height: Height,
        backness: Backness,
        roundedness: Roundedness,
        description: &str,
    ) -> Self {
        Self {
            symbol,
            coordinates: (x, y),
            features: Features::Vowel {
                height,
                backness,
                roundedness,
            },
            description: description.to_string(),
        }
    }

    /// Build a consonant record.
    pub fn consonant(
        symbol: char,
        x: f64,
        y: f64,
        manner: Manner,
        place: Place,
        voicing: Voicing,
        description: &str,
    ) -> Self {
        Self {
            symbol,
            coordinates: (x, y),
            features: Features::Consonant {
                manner,
                place,
                voicing,
            },
            description: description.to_string(),
        }
    }

    /// The record's kind.
    pub fn kind(&self) -> PhonemeKind {
        self.features.kind()
    }

    /// Whether the record is a vowel.
    pub fn is_vowel(&self) -> bool {
        self.kind() == PhonemeKind::Vowel
    }

    /// Whether the record is a consonant.
    pub fn is_consonant(&self) -> bool {
        self.kind() == PhonemeKind::Consonant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert_eq!(Height::Close.rank(), 0);
        assert_eq!(Height::Open.rank(), Height::COUNT - 1);
        assert_eq!(Backness::Front.rank(), 0);
        assert_eq!(Backness::Back.rank(), Backness::COUNT - 1);
        assert_eq!(Place::Bilabial.rank(), 0);
        assert_eq!(Place::Glottal.rank(), Place::COUNT - 1);
        assert_eq!(Manner::LateralApproximant.rank(), Manner::COUNT - 1);
    }

    #[test]
    fn test_labels_are_kebab_case() {
        assert_eq!(Height::NearClose.label(), "near-close");
        assert_eq!(Manner::LateralFricative.label(), "lateral-fricative");
        assert_eq!(Place::Postalveolar.label(), "postalveolar");
    }

    #[test]
    fn test_record_kind() {
        let v = PhonemeRecord::vowel(
            'i',
            0.0,
            0.0,
            Height::Close,
            Backness::Front,
            Roundedness::Unrounded,
            "Close front unrounded vowel",
        );
        assert!(v.is_vowel());
        assert!(!v.is_consonant());

        let c = PhonemeRecord::consonant(
            'p',
            0.0,
            0.0,
            Manner::Plosive,
            Place::Bilabial,
            Voicing::Voiceless,
            "Voiceless bilabial plosive",
        );
        assert!(c.is_consonant());
        assert_eq!(c.kind(), PhonemeKind::Consonant);
    }

    #[test]
    fn test_max_chart_distance() {
        let d = max_chart_distance();
        assert!((d * d - (CHART_X_MAX * CHART_X_MAX + CHART_Y_MAX * CHART_Y_MAX)).abs() < 1e-9);
    }

    #[test]
    fn test_serde_round_trip() {
        let rec = PhonemeRecord::vowel(
            'ø',
            0.3,
            1.0,
            Height::CloseMid,
            Backness::Front,
            Roundedness::Rounded,
            "Close-mid front rounded vowel",
        );
        let json = serde_json::to_string(&rec).unwrap();
        let back: PhonemeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, back);
    }

    #[test]
    fn test_serde_kind_tag() {
        let rec = PhonemeRecord::consonant(
            'm',
            0.0,
            1.0,
            Manner::Nasal,
            Place::Bilabial,
            Voicing::Voiced,
            "Voiced bilabial nasal",
        );
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""kind":"consonant""#));
        assert!(json.contains(r#""manner":"nasal""#));
    }
}

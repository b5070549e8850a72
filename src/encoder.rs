//! Feature encoder: phoneme records to fixed-length vectors.
//!
//! The encoder maps each record's categorical articulatory features and
//! chart coordinates into one global vector layout so that any two
//! records — vowel or consonant — are directly comparable:
//!
//! | slots  | content                                        |
//! |--------|------------------------------------------------|
//! | 0–1    | kind one-hot (vowel, consonant)                |
//! | 2      | height rank / 6                                |
//! | 3      | backness rank / 4                              |
//! | 4      | roundedness flag                               |
//! | 5–12   | manner one-hot                                 |
//! | 13     | place rank / 10                                |
//! | 14     | voicing flag                                   |
//! | 15–16  | chart coordinates / bounding box               |
//!
//! Slots for attributes that do not apply to the record's kind stay
//! zero. The kind one-hot is the tagged variant in vector form: it keeps
//! every real record away from the zero vector (so self-cosine is well
//! defined) and pushes cross-kind cosine similarity low.

use crate::phoneme::{Backness, Features, Height, Manner, PhonemeRecord, CHART_X_MAX, CHART_Y_MAX};
use crate::vector::FeatureVector;

/// Global feature-vector length: kind one-hot, three vowel slots, the
/// manner one-hot block, two consonant slots, two coordinate slots.
pub const FEATURE_DIM: usize = 2 + 3 + Manner::COUNT + 2 + 2;

/// Pure, deterministic encoder from [`PhonemeRecord`] to [`FeatureVector`].
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Encode a record into the global feature layout.
    pub fn encode(record: &PhonemeRecord) -> FeatureVector {
        let mut components = Vec::with_capacity(FEATURE_DIM);

        match &record.features {
            Features::Vowel {
                height,
                backness,
                roundedness,
            } => {
                components.extend([1.0, 0.0]);
                components.push(height.rank() as f64 / (Height::COUNT - 1) as f64);
                components.push(backness.rank() as f64 / (Backness::COUNT - 1) as f64);
                components.push(roundedness.flag());
                components.extend(std::iter::repeat(0.0).take(Manner::COUNT));
                components.extend([0.0, 0.0]); // place, voicing
            }
            Features::Consonant {
                manner,
                place,
                voicing,
            } => {
                components.extend([0.0, 1.0]);
                components.extend([0.0, 0.0, 0.0]); // height, backness, roundedness
                let mut one_hot = [0.0; Manner::COUNT];
                one_hot[manner.rank()] = 1.0;
                components.extend(one_hot);
                components.push(place.rank() as f64 / (crate::phoneme::Place::COUNT - 1) as f64);
                components.push(voicing.flag());
            }
        }

        let (x, y) = record.coordinates;
        components.push(x / CHART_X_MAX);
        components.push(y / CHART_Y_MAX);

        debug_assert_eq!(components.len(), FEATURE_DIM);
        FeatureVector::from_components(components)
    }
}

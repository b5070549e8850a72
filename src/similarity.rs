//! Similarity engine: two-channel phoneme similarity, matrices, and
//! nearest-neighbor queries.
//!
//! Each pairwise score combines two complementary signals:
//!
//! 1. **Chart proximity** — Euclidean distance between chart coordinates,
//!    normalized by the bounding-box diagonal and inverted so that
//!    distance 0 scores 1 and the maximum diagonal scores 0.
//! 2. **Feature cosine** — cosine similarity between the two encoded
//!    feature vectors, clamped to [0, 1].
//!
//! The channels are blended with a fixed weighted average
//! (default 0.4 chart / 0.6 feature). Both channels are symmetric in
//! their arguments slot-for-slot, so the combined score is exactly
//! symmetric; identical symbols score exactly 1.

use crate::catalog::PhonemeCatalog;
use crate::encoder::FeatureEncoder;
use crate::error::{AtlasError, Result};
use crate::phoneme::{max_chart_distance, PhonemeKind, PhonemeRecord};
use serde::{Deserialize, Serialize};

/// Channel weights for the combined similarity score.
///
/// Weights must be finite, non-negative, and sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    chart: f64,
    feature: f64,
}

impl SimilarityWeights {
    /// Create validated weights.
    pub fn new(chart: f64, feature: f64) -> Result<Self> {
        if !chart.is_finite() || !feature.is_finite() || chart < 0.0 || feature < 0.0 {
            return Err(AtlasError::InvalidArgument(format!(
                "weights must be finite and non-negative, got ({chart}, {feature})"
            )));
        }
        if (chart + feature - 1.0).abs() > 1e-9 {
            return Err(AtlasError::InvalidArgument(format!(
                "weights must sum to 1, got {chart} + {feature} = {}",
                chart + feature
            )));
        }
        Ok(Self { chart, feature })
    }

    /// Weight of the chart-proximity channel.
    pub fn chart(&self) -> f64 {
        self.chart
    }

    /// Weight of the feature-cosine channel.
    pub fn feature(&self) -> f64 {
        self.feature
    }
}

impl Default for SimilarityWeights {
    /// Default blend: 0.4 chart, 0.6 feature.
    fn default() -> Self {
        Self {
            chart: 0.4,
            feature: 0.6,
        }
    }
}

/// Square matrix of pairwise similarity scores over an ordered symbol set.
///
/// Symmetric with an all-ones diagonal. Each unordered pair is computed
/// once and mirrored, which guarantees exact numerical symmetry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    symbols: Vec<char>,
    /// Row-major, `symbols.len()` squared entries.
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Side length of the matrix.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The ordered symbols the matrix is indexed by.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Score at (row, column).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.len() && col < self.len(), "matrix index out of bounds");
        self.values[row * self.symbols.len() + col]
    }

    /// Score for a pair of symbols, if both are in the matrix.
    pub fn get_symbols(&self, a: char, b: char) -> Option<f64> {
        let row = self.symbols.iter().position(|&s| s == a)?;
        let col = self.symbols.iter().position(|&s| s == b)?;
        Some(self.get(row, col))
    }

    /// One row of scores.
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.len(), "matrix row out of bounds");
        let n = self.symbols.len();
        &self.values[row * n..(row + 1) * n]
    }
}

/// Pairwise similarity scoring over a catalog.
pub struct SimilarityEngine<'c> {
    catalog: &'c PhonemeCatalog,
    weights: SimilarityWeights,
}

impl<'c> SimilarityEngine<'c> {
    /// Create an engine with default weights.
    pub fn new(catalog: &'c PhonemeCatalog) -> Self {
        Self {
            catalog,
            weights: SimilarityWeights::default(),
        }
    }

    /// Create an engine with explicit weights.
    pub fn with_weights(catalog: &'c PhonemeCatalog, weights: SimilarityWeights) -> Self {
        Self { catalog, weights }
    }

    /// The engine's channel weights.
    pub fn weights(&self) -> SimilarityWeights {
        self.weights
    }

    /// Combined similarity between two phonemes, in [0, 1].
    ///
    /// Identical symbols score exactly 1.0.
    pub fn phoneme_similarity(&self, a: char, b: char) -> Result<f64> {
        let rec_a = self.catalog.lookup(a)?;
        let rec_b = self.catalog.lookup(b)?;
        if a == b {
            return Ok(1.0);
        }
        Ok(self.record_similarity(rec_a, rec_b))
    }

    /// Raw Euclidean distance between two phonemes' chart coordinates.
    pub fn chart_distance(&self, a: char, b: char) -> Result<f64> {
        let rec_a = self.catalog.lookup(a)?;
        let rec_b = self.catalog.lookup(b)?;
        Ok(coordinate_distance(rec_a, rec_b))
    }

    /// Euclidean distance between two phonemes' feature vectors.
    pub fn feature_distance(&self, a: char, b: char) -> Result<f64> {
        let rec_a = self.catalog.lookup(a)?;
        let rec_b = self.catalog.lookup(b)?;
        Ok(FeatureEncoder::encode(rec_a).euclidean_distance(&FeatureEncoder::encode(rec_b)))
    }

    /// Similarity matrix over an ordered symbol set.
    ///
    /// The upper triangle is computed once and mirrored; the diagonal is
    /// exactly 1.
    pub fn similarity_matrix(&self, symbols: &[char]) -> Result<SimilarityMatrix> {
        let n = symbols.len();
        let records: Vec<&PhonemeRecord> = symbols
            .iter()
            .map(|&s| self.catalog.lookup(s))
            .collect::<Result<_>>()?;

        let mut values = vec![0.0; n * n];
        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let score = if symbols[i] == symbols[j] {
                    1.0
                } else {
                    self.record_similarity(records[i], records[j])
                };
                values[i * n + j] = score;
                values[j * n + i] = score;
            }
        }

        Ok(SimilarityMatrix {
            symbols: symbols.to_vec(),
            values,
        })
    }

    /// Top-k most similar phonemes to `target`.
    ///
    /// `candidates` defaults to the entire catalog; the target itself is
    /// always excluded. An optional kind filter restricts the pool before
    /// scoring. Results are sorted by descending score, ties broken by
    /// catalog insertion order, and truncated to `top_k` (fewer if the
    /// pool is smaller).
    pub fn most_similar(
        &self,
        target: char,
        candidates: Option<&[char]>,
        top_k: usize,
        kind_filter: Option<PhonemeKind>,
    ) -> Result<Vec<(char, f64)>> {
        if top_k == 0 {
            return Err(AtlasError::InvalidArgument(
                "top_k must be at least 1".to_string(),
            ));
        }
        let target_rec = self.catalog.lookup(target)?;

        let pool: Vec<char> = match candidates {
            Some(list) => list.to_vec(),
            None => self.catalog.all().iter().map(|r| r.symbol).collect(),
        };

        let mut scored: Vec<(char, f64, usize)> = Vec::with_capacity(pool.len());
        for symbol in pool {
            let rec = self.catalog.lookup(symbol)?;
            if symbol == target {
                continue;
            }
            if let Some(kind) = kind_filter {
                if rec.kind() != kind {
                    continue;
                }
            }
            // Position is always present: lookup above succeeded.
            let position = self.catalog.position(symbol).unwrap_or(usize::MAX);
            scored.push((symbol, self.record_similarity(target_rec, rec), position));
        }

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });
        scored.truncate(top_k);
        Ok(scored.into_iter().map(|(s, score, _)| (s, score)).collect())
    }

    /// Weighted combination of the two channels for distinct records.
    fn record_similarity(&self, a: &PhonemeRecord, b: &PhonemeRecord) -> f64 {
        let chart_score = 1.0 - coordinate_distance(a, b) / max_chart_distance();
        let feature_score = FeatureEncoder::encode(a)
            .cosine(&FeatureEncoder::encode(b))
            .clamp(0.0, 1.0);
        self.weights.chart * chart_score.clamp(0.0, 1.0) + self.weights.feature * feature_score
    }
}

fn coordinate_distance(a: &PhonemeRecord, b: &PhonemeRecord) -> f64 {
    let dx = a.coordinates.0 - b.coordinates.0;
    let dy = a.coordinates.1 - b.coordinates.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PhonemeCatalog {
        PhonemeCatalog::ipa()
    }

    #[test]
    fn test_weights_validation() {
        assert!(SimilarityWeights::new(0.4, 0.6).is_ok());
        assert!(SimilarityWeights::new(0.0, 1.0).is_ok());
        assert!(SimilarityWeights::new(0.7, 0.2).is_err());
        assert!(SimilarityWeights::new(-0.1, 1.1).is_err());
        assert!(SimilarityWeights::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_self_similarity_is_exactly_one() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        for rec in cat.all() {
            assert_eq!(engine.phoneme_similarity(rec.symbol, rec.symbol).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_similarity_is_exactly_symmetric() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        for &(a, b) in &[('i', 'u'), ('p', 'k'), ('a', 's'), ('ə', 'ʃ')] {
            let ab = engine.phoneme_similarity(a, b).unwrap();
            let ba = engine.phoneme_similarity(b, a).unwrap();
            assert_eq!(ab, ba, "asymmetry for ({a}, {b})");
        }
    }

    #[test]
    fn test_similarity_in_unit_interval() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        for a in cat.all() {
            for b in cat.all() {
                let s = engine.phoneme_similarity(a.symbol, b.symbol).unwrap();
                assert!((0.0..=1.0).contains(&s), "({}, {}) scored {s}", a.symbol, b.symbol);
            }
        }
    }

    #[test]
    fn test_unknown_symbol() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        assert_eq!(
            engine.phoneme_similarity('i', 'Q'),
            Err(AtlasError::NotFound { symbol: 'Q' })
        );
    }

    #[test]
    fn test_nearby_vowels_beat_distant_vowels() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let close = engine.phoneme_similarity('i', 'e').unwrap();
        let distant = engine.phoneme_similarity('i', 'ɒ').unwrap();
        assert!(close > distant, "expected sim(i,e) > sim(i,ɒ), got {close} vs {distant}");
    }

    #[test]
    fn test_cross_kind_scores_low() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let within = engine.phoneme_similarity('p', 't').unwrap();
        let across = engine.phoneme_similarity('i', 'p').unwrap();
        assert!(across < within, "expected sim(i,p) < sim(p,t), got {across} vs {within}");
    }

    #[test]
    fn test_chart_distance() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        // 'p' at (0, 0), 't' at (3, 0).
        assert!((engine.chart_distance('p', 't').unwrap() - 3.0).abs() < 1e-10);
        assert_eq!(engine.chart_distance('p', 'p').unwrap(), 0.0);
        assert!(engine.chart_distance('p', '?').is_err());
    }

    #[test]
    fn test_feature_distance() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        assert_eq!(engine.feature_distance('s', 's').unwrap(), 0.0);
        // Voicing is the only categorical difference between s and z.
        let s_z = engine.feature_distance('s', 'z').unwrap();
        let s_x = engine.feature_distance('s', 'x').unwrap();
        assert!(s_z < s_x, "expected d(s,z) < d(s,x), got {s_z} vs {s_x}");
    }

    #[test]
    fn test_matrix_symmetric_unit_diagonal() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let symbols = ['i', 'e', 'a', 'p', 't', 'k'];
        let m = engine.similarity_matrix(&symbols).unwrap();
        assert_eq!(m.len(), 6);
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_matrix_get_symbols() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let m = engine.similarity_matrix(&['i', 'u']).unwrap();
        let direct = engine.phoneme_similarity('i', 'u').unwrap();
        assert_eq!(m.get_symbols('i', 'u'), Some(direct));
        assert_eq!(m.get_symbols('i', 'x'), None);
    }

    #[test]
    fn test_matrix_unknown_symbol() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        assert!(engine.similarity_matrix(&['i', '!']).is_err());
    }

    #[test]
    fn test_most_similar_front_vowel_ranking() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let pool = ['i', 'e', 'a', 'u', 'o'];
        let top = engine.most_similar('i', Some(&pool), 2, None).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, 'e');
        assert!(top[0].1 > top[1].1 || top[0].1 == top[1].1);
        assert!(top.iter().all(|&(s, _)| s != 'i'));
    }

    #[test]
    fn test_most_similar_excludes_target_and_sorts() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let all = engine.most_similar('i', None, cat.len(), None).unwrap();
        assert_eq!(all.len(), cat.len() - 1);
        assert!(all.iter().all(|&(s, _)| s != 'i'));
        assert!(all.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_most_similar_kind_filter() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let top = engine
            .most_similar('i', None, 5, Some(PhonemeKind::Consonant))
            .unwrap();
        assert_eq!(top.len(), 5);
        for (s, _) in top {
            assert!(cat.is_consonant(s).unwrap());
        }
    }

    #[test]
    fn test_most_similar_small_and_empty_pools() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        let few = engine.most_similar('i', Some(&['e']), 10, None).unwrap();
        assert_eq!(few.len(), 1);
        let none = engine.most_similar('i', Some(&[]), 3, None).unwrap();
        assert!(none.is_empty());
        let only_self = engine.most_similar('i', Some(&['i']), 3, None).unwrap();
        assert!(only_self.is_empty());
    }

    #[test]
    fn test_most_similar_invalid_top_k() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        assert!(matches!(
            engine.most_similar('i', None, 0, None),
            Err(AtlasError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_most_similar_unknown_candidate_surfaces() {
        let cat = catalog();
        let engine = SimilarityEngine::new(&cat);
        assert_eq!(
            engine.most_similar('i', Some(&['e', '?']), 2, None),
            Err(AtlasError::NotFound { symbol: '?' })
        );
    }

    #[test]
    fn test_custom_weights_shift_the_blend() {
        let cat = catalog();
        let chart_only =
            SimilarityEngine::with_weights(&cat, SimilarityWeights::new(1.0, 0.0).unwrap());
        let feature_only =
            SimilarityEngine::with_weights(&cat, SimilarityWeights::new(0.0, 1.0).unwrap());
        // 'i' and 'p' coincide on the chart but share no features.
        let chart_score = chart_only.phoneme_similarity('i', 'p').unwrap();
        let feature_score = feature_only.phoneme_similarity('i', 'p').unwrap();
        assert!((chart_score - 1.0).abs() < 1e-10);
        assert!(feature_score.abs() < 1e-10);
    }
}

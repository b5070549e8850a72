//! # ipa-atlas: IPA phoneme catalog and articulatory similarity
//!
//! ipa-atlas is a queryable catalog of IPA phonemes annotated with
//! articulatory features and 2D chart coordinates, plus a similarity
//! engine scoring how close two phonemes are in mouth shape.
//!
//! ## Quick Start
//!
//! ```rust
//! use ipa_atlas::IpaAtlas;
//!
//! let atlas = IpaAtlas::new();
//!
//! // Pairwise similarity in [0, 1]
//! let sim = atlas.phoneme_similarity('i', 'e').unwrap();
//! assert!(sim > 0.8);
//!
//! // Nearest neighbors
//! let top = atlas.most_similar('i', None, 3, None).unwrap();
//! println!("closest to 'i': {:?}", top);
//!
//! // Similarity-driven clustering
//! let clusters = atlas.cluster(&['i', 'e', 'a', 'p', 't', 'k'], 2).unwrap();
//! assert_eq!(clusters.len(), 2);
//! ```
//!
//! ## Core Concepts
//!
//! - **Catalog**: immutable table of phoneme records, built once
//! - **Feature vector**: fixed-length numeric encoding of articulatory
//!   features and chart position
//! - **Similarity**: weighted blend of chart proximity and feature cosine
//! - **Clustering**: deterministic k-medoids over `1 - similarity`

pub mod catalog;
pub mod cluster;
pub mod encoder;
pub mod error;
pub mod phoneme;
pub mod similarity;
pub mod vector;

// Re-exports for convenience
pub use catalog::{FeatureField, PhonemeCatalog};
pub use cluster::{ClusterAssignment, ClusterEngine};
pub use encoder::{FeatureEncoder, FEATURE_DIM};
pub use error::{AtlasError, Result};
pub use phoneme::{
    Backness, Features, Height, Manner, PhonemeKind, PhonemeRecord, Place, Roundedness, Voicing,
};
pub use similarity::{SimilarityEngine, SimilarityMatrix, SimilarityWeights};
pub use vector::FeatureVector;

/// The main atlas client - primary interface for all operations.
///
/// Owns the catalog and the channel weights and builds borrowing
/// [`SimilarityEngine`]/[`ClusterEngine`] values on demand. Every method
/// delegates to the same public types you can use directly.
///
/// # Example
///
/// ```rust
/// use ipa_atlas::{IpaAtlas, SimilarityWeights};
///
/// let atlas = IpaAtlas::new();
/// assert_eq!(atlas.phoneme_similarity('a', 'a').unwrap(), 1.0);
///
/// // Lean harder on chart proximity
/// let weights = SimilarityWeights::new(0.7, 0.3).unwrap();
/// let atlas = IpaAtlas::with_weights(weights);
/// assert!(atlas.phoneme_similarity('p', 'b').unwrap() > 0.9);
/// ```
pub struct IpaAtlas {
    catalog: PhonemeCatalog,
    weights: SimilarityWeights,
}

impl IpaAtlas {
    /// Create an atlas over the full IPA catalog with default weights.
    pub fn new() -> Self {
        Self {
            catalog: PhonemeCatalog::ipa(),
            weights: SimilarityWeights::default(),
        }
    }

    /// Create an atlas over the full IPA catalog with explicit weights.
    pub fn with_weights(weights: SimilarityWeights) -> Self {
        Self {
            catalog: PhonemeCatalog::ipa(),
            weights,
        }
    }

    /// Create an atlas over a custom catalog (e.g. a test fixture).
    pub fn from_catalog(catalog: PhonemeCatalog, weights: SimilarityWeights) -> Self {
        Self { catalog, weights }
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &PhonemeCatalog {
        &self.catalog
    }

    fn engine(&self) -> SimilarityEngine<'_> {
        SimilarityEngine::with_weights(&self.catalog, self.weights)
    }

    fn clusterer(&self) -> ClusterEngine<'_> {
        ClusterEngine::new(self.engine())
    }

    // =========================================================================
    // Catalog queries
    // =========================================================================

    /// Look up a record by symbol.
    pub fn lookup(&self, symbol: char) -> Result<&PhonemeRecord> {
        self.catalog.lookup(symbol)
    }

    /// All records, vowels before consonants, in insertion order.
    pub fn all(&self) -> &[PhonemeRecord] {
        self.catalog.all()
    }

    /// Whether the symbol names a vowel.
    pub fn is_vowel(&self, symbol: char) -> Result<bool> {
        self.catalog.is_vowel(symbol)
    }

    /// Whether the symbol names a consonant.
    pub fn is_consonant(&self, symbol: char) -> Result<bool> {
        self.catalog.is_consonant(symbol)
    }

    /// All vowel symbols.
    pub fn vowels(&self) -> Vec<char> {
        self.catalog.vowels()
    }

    /// All consonant symbols.
    pub fn consonants(&self) -> Vec<char> {
        self.catalog.consonants()
    }

    /// Human-readable gloss for a symbol.
    pub fn description(&self, symbol: char) -> Result<&str> {
        self.catalog.description(symbol)
    }

    /// Symbols matching every given (field, value) pair.
    pub fn filter(&self, pairs: &[(&str, &str)]) -> Result<std::collections::BTreeSet<char>> {
        self.catalog.filter(pairs)
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encode a symbol's record into the global feature layout.
    pub fn encode(&self, symbol: char) -> Result<FeatureVector> {
        Ok(FeatureEncoder::encode(self.catalog.lookup(symbol)?))
    }

    // =========================================================================
    // Similarity
    // =========================================================================

    /// Combined similarity between two phonemes, in [0, 1].
    pub fn phoneme_similarity(&self, a: char, b: char) -> Result<f64> {
        self.engine().phoneme_similarity(a, b)
    }

    /// Raw Euclidean distance between two phonemes on the chart.
    pub fn chart_distance(&self, a: char, b: char) -> Result<f64> {
        self.engine().chart_distance(a, b)
    }

    /// Euclidean distance between two phonemes' feature vectors.
    pub fn feature_distance(&self, a: char, b: char) -> Result<f64> {
        self.engine().feature_distance(a, b)
    }

    /// Similarity matrix over an ordered symbol set.
    pub fn similarity_matrix(&self, symbols: &[char]) -> Result<SimilarityMatrix> {
        self.engine().similarity_matrix(symbols)
    }

    /// Top-k most similar phonemes to `target`.
    ///
    /// `candidates` defaults to the whole catalog minus the target;
    /// `kind_filter` optionally restricts the pool to one phoneme kind.
    pub fn most_similar(
        &self,
        target: char,
        candidates: Option<&[char]>,
        top_k: usize,
        kind_filter: Option<PhonemeKind>,
    ) -> Result<Vec<(char, f64)>> {
        self.engine().most_similar(target, candidates, top_k, kind_filter)
    }

    // =========================================================================
    // Clustering
    // =========================================================================

    /// Partition `symbols` into `n_clusters` groups by similarity.
    pub fn cluster(&self, symbols: &[char], n_clusters: usize) -> Result<ClusterAssignment> {
        self.clusterer().cluster(symbols, n_clusters)
    }
}

impl Default for IpaAtlas {
    fn default() -> Self {
        Self::new()
    }
}

//! Feature vector type.
//!
//! A [`FeatureVector`] is the fixed-length numeric encoding of a phoneme's
//! articulatory features and chart position. All vectors produced by the
//! encoder share one global length, so vowels and consonants are directly
//! comparable.

use serde::{Deserialize, Serialize};

/// A fixed-length vector of normalized feature components in [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    components: Vec<f64>,
}

impl FeatureVector {
    /// Create a vector from raw components.
    pub fn from_components(components: Vec<f64>) -> Self {
        Self { components }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the vector has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        assert_eq!(
            self.len(),
            other.len(),
            "Dimension mismatch in dot product"
        );
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(&x, &y)| x * y)
            .sum()
    }

    /// L2 norm.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another vector.
    pub fn euclidean_distance(&self, other: &FeatureVector) -> f64 {
        assert_eq!(
            self.len(),
            other.len(),
            "Dimension mismatch in euclidean distance"
        );
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(&x, &y)| {
                let diff = x - y;
                diff * diff
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Whether every component is (numerically) zero.
    pub fn is_zero(&self) -> bool {
        self.norm() < 1e-10
    }

    /// Cosine similarity with another vector.
    ///
    /// Defined as 0 when either vector is the zero vector. Over
    /// non-negative components the result lies in [0, 1] up to
    /// floating-point drift; the similarity engine clamps it.
    pub fn cosine(&self, other: &FeatureVector) -> f64 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a < 1e-10 || norm_b < 1e-10 {
            return 0.0;
        }
        self.dot(other) / (norm_a * norm_b)
    }
}

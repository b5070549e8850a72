//! Cluster engine: deterministic k-medoids over similarity distances.
//!
//! The engine derives the full similarity matrix for the requested
//! symbols, converts it to distances (`1 - similarity`), and partitions
//! with a PAM-style alternating assignment/update loop. Every choice the
//! algorithm makes — seeding, assignment, medoid update, cluster ids —
//! breaks ties by input index, so identical inputs always produce
//! identical partitions. No random initialization anywhere.
//!
//! Seeding: the first medoid is the point with minimal total distance to
//! all others; the rest are chosen by the farthest-point (maximin) rule.

use crate::error::{AtlasError, Result};
use crate::similarity::{SimilarityEngine, SimilarityMatrix};
use std::collections::{BTreeMap, BTreeSet};

/// Partition of a symbol set, keyed by cluster id `0..n_clusters-1`.
pub type ClusterAssignment = BTreeMap<usize, BTreeSet<char>>;

/// Iteration cap for the assignment/update loop. PAM converges in a
/// handful of rounds on catalog-sized inputs.
const MAX_ITERATIONS: usize = 100;

/// Similarity-driven phoneme clustering.
pub struct ClusterEngine<'c> {
    engine: SimilarityEngine<'c>,
}

impl<'c> ClusterEngine<'c> {
    /// Create a cluster engine over a similarity engine.
    pub fn new(engine: SimilarityEngine<'c>) -> Self {
        Self { engine }
    }

    /// Partition `symbols` into `n_clusters` groups.
    ///
    /// Cluster ids are assigned by the input position of each cluster's
    /// earliest member, so repeated calls agree on ids as well as
    /// membership.
    pub fn cluster(&self, symbols: &[char], n_clusters: usize) -> Result<ClusterAssignment> {
        let n = symbols.len();
        if n_clusters < 1 || n_clusters > n {
            return Err(AtlasError::InvalidArgument(format!(
                "n_clusters must be in 1..={n}, got {n_clusters}"
            )));
        }
        let unique: BTreeSet<char> = symbols.iter().copied().collect();
        if unique.len() != n {
            return Err(AtlasError::InvalidArgument(
                "duplicate symbols in clustering input".to_string(),
            ));
        }

        // Surfaces NotFound for any unknown symbol.
        let matrix = self.engine.similarity_matrix(symbols)?;

        if n_clusters == n {
            return Ok(symbols
                .iter()
                .enumerate()
                .map(|(id, &s)| (id, BTreeSet::from([s])))
                .collect());
        }

        let assignments = k_medoids(&matrix, n_clusters);
        Ok(label_by_first_member(symbols, &assignments, n_clusters))
    }
}

/// Distance between two points of the matrix.
fn distance(matrix: &SimilarityMatrix, i: usize, j: usize) -> f64 {
    1.0 - matrix.get(i, j)
}

/// PAM-style k-medoids. Returns, for each point, the index of its cluster
/// in medoid order.
fn k_medoids(matrix: &SimilarityMatrix, k: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut medoids = seed_medoids(matrix, k);
    let mut assignments = vec![0usize; n];

    for _ in 0..MAX_ITERATIONS {
        // Assignment: nearest medoid, ties to the lowest medoid index.
        // A medoid always belongs to its own cluster.
        for point in 0..n {
            if let Some(own) = medoids.iter().position(|&m| m == point) {
                assignments[point] = own;
                continue;
            }
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (cluster, &medoid) in medoids.iter().enumerate() {
                let d = distance(matrix, point, medoid);
                if d < best_dist {
                    best_dist = d;
                    best = cluster;
                }
            }
            assignments[point] = best;
        }

        // Update: each cluster's medoid becomes the member minimizing
        // total distance to the rest, ties to the lowest input index.
        let mut next_medoids = medoids.clone();
        for cluster in 0..k {
            let members: Vec<usize> = (0..n).filter(|&p| assignments[p] == cluster).collect();
            let mut best = medoids[cluster];
            let mut best_cost = f64::INFINITY;
            for &candidate in &members {
                let cost: f64 = members
                    .iter()
                    .map(|&other| distance(matrix, candidate, other))
                    .sum();
                if cost < best_cost {
                    best_cost = cost;
                    best = candidate;
                }
            }
            next_medoids[cluster] = best;
        }

        if next_medoids == medoids {
            break;
        }
        medoids = next_medoids;
    }

    assignments
}

/// Deterministic seeding: central point first, then maximin.
fn seed_medoids(matrix: &SimilarityMatrix, k: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut medoids = Vec::with_capacity(k);

    // Most central point: minimal total distance to all others.
    let mut first = 0;
    let mut first_cost = f64::INFINITY;
    for candidate in 0..n {
        let cost: f64 = (0..n).map(|other| distance(matrix, candidate, other)).sum();
        if cost < first_cost {
            first_cost = cost;
            first = candidate;
        }
    }
    medoids.push(first);

    // Remaining seeds: the point farthest from its nearest seed.
    while medoids.len() < k {
        let mut farthest = 0;
        let mut farthest_dist = f64::NEG_INFINITY;
        for candidate in 0..n {
            if medoids.contains(&candidate) {
                continue;
            }
            let nearest = medoids
                .iter()
                .map(|&m| distance(matrix, candidate, m))
                .fold(f64::INFINITY, f64::min);
            if nearest > farthest_dist {
                farthest_dist = nearest;
                farthest = candidate;
            }
        }
        medoids.push(farthest);
    }

    medoids
}

/// Relabel clusters so ids follow the input position of each cluster's
/// earliest member.
fn label_by_first_member(
    symbols: &[char],
    assignments: &[usize],
    k: usize,
) -> ClusterAssignment {
    let mut relabel = vec![usize::MAX; k];
    let mut next_id = 0;
    for &cluster in assignments {
        if relabel[cluster] == usize::MAX {
            relabel[cluster] = next_id;
            next_id += 1;
        }
    }

    let mut result: ClusterAssignment = (0..k).map(|id| (id, BTreeSet::new())).collect();
    for (point, &cluster) in assignments.iter().enumerate() {
        result
            .get_mut(&relabel[cluster])
            .expect("relabeled id in range")
            .insert(symbols[point]);
    }
    result
}

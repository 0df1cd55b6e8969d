//! k-nearest-neighbor classification over a labelled corpus

use crate::classify::result::{ClassResult, ClassificationResult};
use crate::corpus::Corpus;
use crate::cost::CostTable;
use crate::sequence::Sequence;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors for classifier configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierConfigError {
    #[error("the neighbor count k must be at least 1")]
    ZeroNeighborCount,
}

/// Tunable parameters of the k-NN classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Number of nearest neighbors taking part in the vote
    pub k: usize,

    /// Keep exactly `k` neighbors, breaking distance ties by corpus order.
    /// When `false`, every neighbor tied with the k-th nearest also votes.
    pub exact_k: bool,

    /// Drop corpus members farther than this absolute distance before the
    /// k-selection
    pub distance_threshold: Option<usize>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            k: 1,
            exact_k: false,
            distance_threshold: None,
        }
    }
}

impl ClassifierConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ClassifierConfigError> {
        if self.k == 0 {
            return Err(ClassifierConfigError::ZeroNeighborCount);
        }
        Ok(())
    }
}

/// One corpus member with its distance to the current query
#[derive(Debug, Clone, PartialEq)]
struct Neighbor<'a> {
    label: &'a str,
    distance: usize,
    distance_norm: f64,
    /// Position in corpus iteration order, the final tie-breaker so results
    /// are deterministic
    order: usize,
}

impl Eq for Neighbor<'_> {}

impl Ord for Neighbor<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // distance ties break by corpus order, the normalized distance is
        // informational only
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for Neighbor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn normalized(distance: usize, a: &Sequence, b: &Sequence) -> f64 {
    if distance == 0 {
        0.0
    } else {
        distance as f64 / a.len().max(b.len()) as f64
    }
}

/// Compute sorted neighbors of `query`, optionally excluding one corpus
/// member (identified by entry and sequence index) for leave-one-out runs
fn collect_neighbors<'a>(
    corpus: &'a Corpus,
    query: &Sequence,
    table: &CostTable,
    config: &ClassifierConfig,
    exclude: Option<(usize, usize)>,
) -> Vec<Neighbor<'a>> {
    let members: Vec<(&str, &Sequence)> = corpus
        .entries()
        .iter()
        .enumerate()
        .flat_map(|(entry_idx, entry)| {
            entry
                .sequences
                .iter()
                .enumerate()
                .filter(move |&(seq_idx, _)| exclude != Some((entry_idx, seq_idx)))
                .map(move |(_, member)| (entry.label.as_str(), member))
        })
        .collect();

    let mut neighbors: Vec<Neighbor<'a>> = members
        .par_iter()
        .enumerate()
        .filter_map(|(order, &(label, member))| {
            let distance = query.distance_with_table(table, member);
            if let Some(threshold) = config.distance_threshold {
                if distance > threshold {
                    return None;
                }
            }
            Some(Neighbor {
                label,
                distance,
                distance_norm: normalized(distance, query, member),
                order,
            })
        })
        .collect();
    neighbors.sort_unstable();
    neighbors
}

/// Cut the sorted neighbor list down to the voting set
fn select<'n, 'a>(neighbors: &'n [Neighbor<'a>], config: &ClassifierConfig) -> &'n [Neighbor<'a>] {
    if neighbors.len() <= config.k {
        return neighbors;
    }
    if config.exact_k {
        return &neighbors[..config.k];
    }
    let cutoff = neighbors[config.k - 1].distance;
    let end = neighbors.partition_point(|n| n.distance <= cutoff);
    &neighbors[..end]
}

pub(crate) fn classify_excluding(
    corpus: &Corpus,
    query: &Sequence,
    table: &CostTable,
    config: &ClassifierConfig,
    exclude: Option<(usize, usize)>,
) -> ClassificationResult {
    let neighbors = collect_neighbors(corpus, query, table, config, exclude);
    let voting = select(&neighbors, config);

    ClassificationResult {
        id: query.id().to_string(),
        k: config.k,
        label: None,
        reason: None,
        class_result: ClassResult::from_neighbors(
            voting
                .iter()
                .map(|n| (n.label, n.distance, n.distance_norm)),
        ),
    }
}

/// Classify one query against the corpus
pub fn classify(
    corpus: &Corpus,
    query: &Sequence,
    table: &CostTable,
    config: &ClassifierConfig,
) -> ClassificationResult {
    classify_excluding(corpus, query, table, config, None)
}

/// Classify many queries in parallel
pub fn classify_all(
    corpus: &Corpus,
    queries: &[Sequence],
    table: &CostTable,
    config: &ClassifierConfig,
) -> Vec<ClassificationResult> {
    queries
        .par_iter()
        .map(|query| classify(corpus, query, table, config))
        .collect()
}

//! Cross-validation of a corpus against itself
//!
//! Leave-one-out validation classifies every corpus member against all the
//! others; fold splitting carves the corpus into disjoint training and test
//! halves for cheaper repeated experiments.

use crate::classify::knn::{classify_excluding, ClassifierConfig};
use crate::classify::result::{ClassificationResult, ClassificationResultQuality};
use crate::corpus::{Corpus, LabelledSequences};
use crate::cost::CostTable;
use crate::sequence::Sequence;
use rayon::prelude::*;
use tracing::debug;

/// Leave-one-out cross-validation over the whole corpus
///
/// Every sequence is classified against the corpus minus itself. Results
/// carry the true label; undetermined or misclassified sequences matching a
/// known degenerate shape additionally carry its reason code.
pub fn cross_validate(
    corpus: &Corpus,
    table: &CostTable,
    config: &ClassifierConfig,
) -> Vec<ClassificationResult> {
    let members: Vec<(usize, usize, &str, &Sequence)> = corpus
        .entries()
        .iter()
        .enumerate()
        .flat_map(|(entry_idx, entry)| {
            entry
                .sequences
                .iter()
                .enumerate()
                .map(move |(seq_idx, seq)| (entry_idx, seq_idx, entry.label.as_str(), seq))
        })
        .collect();
    debug!(
        sequences = members.len(),
        labels = corpus.label_count(),
        "leave-one-out cross-validation"
    );

    members
        .par_iter()
        .map(|&(entry_idx, seq_idx, label, query)| {
            let mut result =
                classify_excluding(corpus, query, table, config, Some((entry_idx, seq_idx)));
            result.label = Some(label.to_string());
            if result.determine_quality(label) <= ClassificationResultQuality::Contains {
                result.reason = query.common_pattern().map(str::to_string);
            }
            result
        })
        .collect()
}

/// Split the corpus into training data and held-out test pairs
///
/// Within each label, every `n_folds`-th sequence (offset by `fold`) becomes
/// a test pair of `(label, sequence)`; the rest stays in the returned
/// training corpus. `fold` must be smaller than `n_folds`.
pub fn split_folds(corpus: &Corpus, fold: usize, n_folds: usize) -> (Corpus, Vec<(String, Sequence)>) {
    assert!(n_folds > 0 && fold < n_folds);

    let mut training = Vec::with_capacity(corpus.label_count());
    let mut test = Vec::new();

    for entry in corpus.entries() {
        let mut kept = Vec::with_capacity(entry.sequences.len());
        for (idx, seq) in entry.sequences.iter().enumerate() {
            if idx % n_folds == fold {
                test.push((entry.label.clone(), seq.clone()));
            } else {
                kept.push(seq.clone());
            }
        }
        training.push(LabelledSequences {
            label: entry.label.clone(),
            sequences: kept,
        });
    }

    (Corpus::from_labelled(training), test)
}

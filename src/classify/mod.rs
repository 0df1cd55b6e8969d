//! k-NN classification, result grading, and corpus cross-validation
//!
//! The classifier votes among the `k` nearest corpus members of a query,
//! graded into [`ClassificationResultQuality`] levels from `NoResult` up to
//! `Exact`. Cross-validation replays the corpus against itself to measure
//! how separable the labels are under a given cost model.

mod crossval;
mod knn;
mod result;
mod stats;

pub use crossval::{cross_validate, split_folds};
pub use knn::{classify, classify_all, ClassifierConfig, ClassifierConfigError};
pub use result::{ClassResult, ClassificationResult, ClassificationResultQuality, LabelOption};
pub use stats::QualityStats;

//! Website fingerprinting for encrypted DNS traffic
//!
//! Encrypted DNS hides query contents but not traffic shape. This crate
//! reduces a captured resolution to a symbolic sequence of padded message
//! sizes and quantized timing gaps, measures similarity between sequences
//! with a cost-weighted edit distance, and identifies the visited website by
//! k-nearest-neighbor voting against a labelled corpus.
//!
//! # Example
//! ```
//! use dnsfp::classify::{classify, ClassifierConfig};
//! use dnsfp::corpus::{Corpus, LabelledSequences};
//! use dnsfp::cost::CostTable;
//! use dnsfp::element::SequenceElement::{Gap, Size};
//! use dnsfp::sequence::Sequence;
//!
//! let corpus = Corpus::from_labelled(vec![LabelledSequences {
//!     label: "example.com".to_string(),
//!     sequences: vec![Sequence::new(
//!         vec![Size(1), Gap(3), Size(2)],
//!         "example.com/capture-0".to_string(),
//!     )],
//! }]);
//!
//! let query = Sequence::new(vec![Size(1), Gap(3), Size(2)], "unknown".to_string());
//! let result = classify(
//!     &corpus,
//!     &query,
//!     CostTable::shared_default(),
//!     &ClassifierConfig::default(),
//! );
//! assert_eq!(result.predicted_label(), Some("example.com"));
//! ```

pub mod classify;
pub mod cli;
pub mod corpus;
pub mod cost;
pub mod distance;
pub mod element;
pub mod sequence;

pub use classify::{
    classify, classify_all, cross_validate, ClassificationResult, ClassificationResultQuality,
    ClassifierConfig,
};
pub use corpus::{Corpus, LabelledSequences};
pub use cost::{CostConfig, CostTable};
pub use element::SequenceElement;
pub use sequence::Sequence;

//! Derived scalar features of a sequence
//!
//! Length, message count, complexity, and the Shannon entropy of the 1-, 2-,
//! and 3-gram distributions of the symbol stream. Pure functions of the
//! sequence, used for corpus curation and result diagnostics, never inside
//! the distance or classification algorithms.

use crate::element::SequenceElement;
use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Memoized derived features of one [`Sequence`]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Symbol count
    pub length: usize,

    /// DNS message count including boundary markers
    pub message_count: usize,

    /// Sum of all size buckets
    pub complexity: usize,

    /// Shannon entropy of the unigram distribution (bits)
    pub shannon_n1: f64,

    /// Shannon entropy of the bigram distribution (bits)
    pub shannon_n2: f64,

    /// Shannon entropy of the trigram distribution (bits)
    pub shannon_n3: f64,
}

impl Features {
    pub(crate) fn compute(sequence: &Sequence) -> Features {
        let elements = sequence.as_elements();
        Features {
            length: elements.len(),
            message_count: sequence.message_count(),
            complexity: sequence.complexity(),
            shannon_n1: shannon_entropy(elements, 1),
            shannon_n2: shannon_entropy(elements, 2),
            shannon_n3: shannon_entropy(elements, 3),
        }
    }
}

/// Shannon entropy (base 2) of the empirical n-gram distribution
///
/// N-grams longer than the sequence are undefined and reported as 0.
pub fn shannon_entropy(elements: &[SequenceElement], n: usize) -> f64 {
    if n == 0 || elements.len() < n {
        return 0.0;
    }

    let mut counts: HashMap<&[SequenceElement], usize> = HashMap::new();
    for window in elements.windows(n) {
        *counts.entry(window).or_insert(0) += 1;
    }

    let total = (elements.len() - n + 1) as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::SequenceElement::{Gap, Size};

    #[test]
    fn test_entropy_uniform() {
        // four distinct symbols, each once: H = log2(4) = 2 bits
        let elements = vec![Size(1), Size(2), Size(3), Size(4)];
        assert!((shannon_entropy(&elements, 1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_constant_stream() {
        let elements = vec![Size(1); 16];
        assert_eq!(shannon_entropy(&elements, 1), 0.0);
        assert_eq!(shannon_entropy(&elements, 2), 0.0);
        assert_eq!(shannon_entropy(&elements, 3), 0.0);
    }

    #[test]
    fn test_entropy_bigrams() {
        // bigrams: (S1,G2), (G2,S1), (S1,G2) -> probabilities 2/3 and 1/3
        let elements = vec![Size(1), Gap(2), Size(1), Gap(2)];
        let expected = -(2.0 / 3.0f64) * (2.0 / 3.0f64).log2() - (1.0 / 3.0f64) * (1.0 / 3.0f64).log2();
        assert!((shannon_entropy(&elements, 2) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_entropy_ngram_longer_than_sequence() {
        let elements = vec![Size(1), Size(2)];
        assert_eq!(shannon_entropy(&elements, 3), 0.0);
        assert_eq!(shannon_entropy(&[], 1), 0.0);
    }
}

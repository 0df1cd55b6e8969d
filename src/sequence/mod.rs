//! Symbolic trace of one DNS resolution burst
//!
//! A [`Sequence`] owns the ordered symbol stream of a single capture, an
//! opaque identifier (usually the source file path), and lazily memoized
//! derived features. Sequences are created once by an external decoder and
//! never mutated; classification compares them only through the distance
//! engine, never by raw content equality.

mod entropy;
mod patterns;

pub use entropy::Features;
pub use patterns::common_patterns;

use crate::cost::CostTable;
use crate::distance::{self, CostBreakdown};
use crate::element::SequenceElement;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Number of synthetic boundary messages stripped from every capture
///
/// Each capture is bracketed by a start and an end marker query; query and
/// response of both markers count towards the message total.
const BOUNDARY_MESSAGES: usize = 4;

/// An ordered, immutable trace of quantized DNS events
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sequence {
    elements: Vec<SequenceElement>,
    id: String,
    #[serde(skip)]
    features: OnceLock<Features>,
}

impl Sequence {
    /// Create a sequence from already-quantized symbols
    ///
    /// `identifier` is a provenance string, typically the capture file path.
    pub fn new(elements: Vec<SequenceElement>, identifier: String) -> Sequence {
        Sequence {
            elements,
            id: identifier,
            features: OnceLock::new(),
        }
    }

    /// Unique identifier of this sequence
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of symbols in the sequence
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Underlying symbol stream
    pub fn as_elements(&self) -> &[SequenceElement] {
        &self.elements
    }

    /// Sum of all size buckets, a rough measure of how much data the
    /// resolution moved
    pub fn complexity(&self) -> usize {
        self.elements
            .iter()
            .filter_map(|x| match x {
                SequenceElement::Size(n) => Some(*n as usize),
                _ => None,
            })
            .sum()
    }

    /// Number of DNS messages represented by this sequence, including the
    /// stripped boundary markers
    pub fn message_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_size()).count() + BOUNDARY_MESSAGES
    }

    /// Memoized derived features (length, message count, entropies)
    pub fn features(&self) -> &Features {
        self.features.get_or_init(|| Features::compute(self))
    }

    /// Edit distance to `other` under the process-wide default cost table
    pub fn distance(&self, other: &Self) -> usize {
        self.distance_with_table(CostTable::shared_default(), other)
    }

    /// Edit distance to `other` under an explicit cost table
    pub fn distance_with_table(&self, table: &CostTable, other: &Self) -> usize {
        distance::distance(table, self.as_elements(), other.as_elements())
    }

    /// Edit distance plus a per-transition cost breakdown
    pub fn distance_with_details(
        &self,
        table: &CostTable,
        other: &Self,
    ) -> (usize, CostBreakdown) {
        distance::distance_with_details(table, self.as_elements(), other.as_elements())
    }

    /// JSON representation of this sequence
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        // compare IDs first, only then the symbol streams
        self.id == other.id && self.elements == other.elements
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.elements.hash(state);
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.complexity()
            .cmp(&other.complexity())
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests;

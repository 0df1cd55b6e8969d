//! Labelled reference collection for classification
//!
//! A [`Corpus`] groups training sequences under their ground-truth labels.
//! It is built once, normalized (sorted by label, empty groups dropped), and
//! afterwards only read, so it can be shared freely across worker threads.

use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// All training sequences collected for one label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledSequences {
    pub label: String,
    pub sequences: Vec<Sequence>,
}

/// Immutable, label-sorted collection of [`LabelledSequences`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Corpus {
    entries: Vec<LabelledSequences>,
}

impl Corpus {
    /// Normalize raw labelled groups into a corpus
    ///
    /// Groups are sorted by label; groups without any sequence are dropped
    /// with a warning since they could never win a vote.
    pub fn from_labelled(groups: Vec<LabelledSequences>) -> Corpus {
        let mut entries: Vec<_> = groups
            .into_iter()
            .filter(|group| {
                if group.sequences.is_empty() {
                    warn!(label = %group.label, "dropping label without sequences");
                    false
                } else {
                    true
                }
            })
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        Corpus { entries }
    }

    /// All labelled groups, sorted by label
    pub fn entries(&self) -> &[LabelledSequences] {
        &self.entries
    }

    /// The group for `label`, if present
    pub fn get(&self, label: &str) -> Option<&LabelledSequences> {
        self.entries
            .binary_search_by(|entry| entry.label.as_str().cmp(label))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Number of distinct labels
    pub fn label_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of sequences across all labels
    pub fn sequence_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.sequences.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap the corpus for shared, read-only use across threads
    pub fn into_shared(self) -> Arc<Corpus> {
        Arc::new(self)
    }
}

impl<'de> Deserialize<'de> for Corpus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let groups = Vec::<LabelledSequences>::deserialize(deserializer)?;
        Ok(Corpus::from_labelled(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::SequenceElement::{Gap, Size};

    fn group(label: &str, sequences: Vec<Sequence>) -> LabelledSequences {
        LabelledSequences {
            label: label.to_string(),
            sequences,
        }
    }

    fn seq(elements: Vec<crate::element::SequenceElement>, id: &str) -> Sequence {
        Sequence::new(elements, id.to_string())
    }

    #[test]
    fn test_sorted_by_label() {
        let corpus = Corpus::from_labelled(vec![
            group("zeta.example", vec![seq(vec![Size(1)], "z/0")]),
            group("alpha.example", vec![seq(vec![Size(2)], "a/0")]),
        ]);
        let labels: Vec<_> = corpus.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["alpha.example", "zeta.example"]);
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let corpus = Corpus::from_labelled(vec![
            group("kept.example", vec![seq(vec![Size(1), Gap(2)], "k/0")]),
            group("dropped.example", vec![]),
        ]);
        assert_eq!(corpus.label_count(), 1);
        assert_eq!(corpus.sequence_count(), 1);
        assert!(corpus.get("dropped.example").is_none());
        assert!(corpus.get("kept.example").is_some());
    }

    #[test]
    fn test_counts() {
        let corpus = Corpus::from_labelled(vec![
            group(
                "a.example",
                vec![seq(vec![Size(1)], "a/0"), seq(vec![Size(2)], "a/1")],
            ),
            group("b.example", vec![seq(vec![Size(1)], "b/0")]),
        ]);
        assert_eq!(corpus.label_count(), 2);
        assert_eq!(corpus.sequence_count(), 3);
        assert!(!corpus.is_empty());
        assert!(Corpus::from_labelled(vec![]).is_empty());
    }

    #[test]
    fn test_deserialize_normalizes() -> Result<(), serde_json::Error> {
        let raw = r#"[
            {"label": "b.example", "sequences": [{"elements": ["S01"], "id": "b/0"}]},
            {"label": "a.example", "sequences": [{"elements": ["S01", "G02"], "id": "a/0"}]},
            {"label": "empty.example", "sequences": []}
        ]"#;
        let corpus: Corpus = serde_json::from_str(raw)?;
        assert_eq!(corpus.label_count(), 2);
        assert_eq!(corpus.entries()[0].label, "a.example");
        Ok(())
    }
}

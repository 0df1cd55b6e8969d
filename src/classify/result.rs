//! Classification outcome and its graded quality
//!
//! A [`ClassificationResult`] records the neighbor vote for one query; the
//! graded [`ClassificationResultQuality`] says how decisively the vote went
//! and, given ground truth, whether it went to the right label.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How good a classification result is, ordered from worst to best
///
/// The lower three grades require ground truth; the upper four describe the
/// vote alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassificationResultQuality {
    /// No neighbor voted, or the vote could not be resolved
    NoResult,
    /// The predicted label is not the true label and the true label received
    /// no votes at all
    Wrong,
    /// The true label received votes but did not win
    Contains,
    /// Multiple labels tied on votes; the winner was picked by minimal
    /// distance
    PluralityThenMinDist,
    /// A unique label got the most votes, but no absolute majority
    Plurality,
    /// A unique label got more than half of the `k` votes
    Majority,
    /// Every voting neighbor carried the same label and the nearest matched
    /// at distance zero
    Exact,
}

impl ClassificationResultQuality {
    /// All variants from worst to best
    pub fn iter_variants() -> impl Iterator<Item = ClassificationResultQuality> {
        use ClassificationResultQuality::*;
        [
            NoResult,
            Wrong,
            Contains,
            PluralityThenMinDist,
            Plurality,
            Majority,
            Exact,
        ]
        .into_iter()
    }

    /// Stable snake_case name, used for CSV columns
    pub fn name(self) -> &'static str {
        use ClassificationResultQuality::*;
        match self {
            NoResult => "no_result",
            Wrong => "wrong",
            Contains => "contains",
            PluralityThenMinDist => "plurality_then_min_dist",
            Plurality => "plurality",
            Majority => "majority",
            Exact => "exact",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ClassificationResultQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vote summary for one candidate label
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelOption {
    pub name: String,
    /// Number of neighbors carrying this label
    pub count: usize,
    pub distance_min: usize,
    pub distance_max: usize,
    pub distance_min_norm: f64,
    pub distance_max_norm: f64,
}

/// All label options of one vote, nearest label first
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassResult {
    pub options: Vec<LabelOption>,
}

impl ClassResult {
    /// Aggregate neighbors, given in nearest-first order, into label options
    pub(crate) fn from_neighbors<'a>(
        neighbors: impl IntoIterator<Item = (&'a str, usize, f64)>,
    ) -> ClassResult {
        let mut options: Vec<LabelOption> = Vec::new();
        for (label, distance, norm) in neighbors {
            match options.iter_mut().find(|option| option.name == label) {
                Some(option) => {
                    option.count += 1;
                    option.distance_min = option.distance_min.min(distance);
                    option.distance_max = option.distance_max.max(distance);
                    option.distance_min_norm = option.distance_min_norm.min(norm);
                    option.distance_max_norm = option.distance_max_norm.max(norm);
                }
                None => options.push(LabelOption {
                    name: label.to_string(),
                    count: 1,
                    distance_min: distance,
                    distance_max: distance,
                    distance_min_norm: norm,
                    distance_max_norm: norm,
                }),
            }
        }
        ClassResult { options }
    }
}

/// The outcome of classifying one query sequence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Identifier of the classified sequence
    pub id: String,
    /// The `k` the classifier was configured with
    pub k: usize,
    /// Ground-truth label, if known (set during cross-validation)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    /// Reason code if the query matches a known degenerate shape
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
    pub class_result: ClassResult,
}

impl ClassificationResult {
    /// The winning label option, if the vote resolves
    ///
    /// A unique maximal vote count wins directly. On a count tie the option
    /// with the smallest minimal distance wins; if even that is tied the vote
    /// is unresolved.
    pub fn selected(&self) -> Option<&LabelOption> {
        let top_count = self.class_result.options.iter().map(|o| o.count).max()?;
        let mut tied = self
            .class_result
            .options
            .iter()
            .filter(|o| o.count == top_count);

        let first = tied.next()?;
        if tied.clone().next().is_none() {
            return Some(first);
        }

        let best_dist = tied
            .clone()
            .map(|o| o.distance_min)
            .chain(Some(first.distance_min))
            .min()?;
        let mut closest = std::iter::once(first)
            .chain(tied)
            .filter(|o| o.distance_min == best_dist);
        let winner = closest.next()?;
        if closest.next().is_none() {
            Some(winner)
        } else {
            None
        }
    }

    /// The predicted label, if the vote resolves
    pub fn predicted_label(&self) -> Option<&str> {
        self.selected().map(|option| option.name.as_str())
    }

    /// Grade the vote without ground truth
    pub fn quality(&self) -> ClassificationResultQuality {
        use ClassificationResultQuality::*;

        let Some(selected) = self.selected() else {
            return NoResult;
        };
        let unique_top = self
            .class_result
            .options
            .iter()
            .filter(|o| o.count == selected.count)
            .count()
            == 1;

        // Exact demands unanimity: a single dissenting voter demotes even a
        // zero-distance win
        if self.class_result.options.len() == 1 && selected.distance_min == 0 {
            Exact
        } else if unique_top && selected.count * 2 > self.k {
            Majority
        } else if unique_top {
            Plurality
        } else {
            PluralityThenMinDist
        }
    }

    /// Grade the vote against the known true label
    pub fn determine_quality(&self, real_label: &str) -> ClassificationResultQuality {
        use ClassificationResultQuality::*;

        let contains = self
            .class_result
            .options
            .iter()
            .any(|o| o.name == real_label);

        match self.selected() {
            Some(selected) if selected.name == real_label => self.quality(),
            Some(_) if contains => Contains,
            Some(_) => Wrong,
            None if self.class_result.options.is_empty() => NoResult,
            None if contains => Contains,
            None => Wrong,
        }
    }
}

//! Per-label quality statistics over many classification results

use crate::classify::result::{ClassificationResult, ClassificationResultQuality};
use std::collections::BTreeMap;

const QUALITY_COUNT: usize = 7;

/// Quality histogram for one true label at one `k`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualityStats {
    pub k: usize,
    pub label: String,
    counts: [usize; QUALITY_COUNT],
    counts_with_reason: [usize; QUALITY_COUNT],
}

impl QualityStats {
    fn new(k: usize, label: String) -> QualityStats {
        QualityStats {
            k,
            label,
            counts: [0; QUALITY_COUNT],
            counts_with_reason: [0; QUALITY_COUNT],
        }
    }

    fn record(&mut self, quality: ClassificationResultQuality, has_reason: bool) {
        self.counts[quality.index()] += 1;
        if has_reason {
            self.counts_with_reason[quality.index()] += 1;
        }
    }

    /// Number of results graded with `quality`
    pub fn count(&self, quality: ClassificationResultQuality) -> usize {
        self.counts[quality.index()]
    }

    /// Number of `quality`-graded results carrying a reason code
    pub fn count_with_reason(&self, quality: ClassificationResultQuality) -> usize {
        self.counts_with_reason[quality.index()]
    }

    /// Total number of recorded results
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Aggregate results into per-label statistics, sorted by label
    ///
    /// Results with a known true label are graded against it; unlabelled
    /// results are graded on the vote alone and grouped under the empty
    /// label.
    pub fn aggregate(k: usize, results: &[ClassificationResult]) -> Vec<QualityStats> {
        let mut by_label: BTreeMap<&str, QualityStats> = BTreeMap::new();
        for result in results {
            let label = result.label.as_deref().unwrap_or("");
            let quality = match &result.label {
                Some(real) => result.determine_quality(real),
                None => result.quality(),
            };
            by_label
                .entry(label)
                .or_insert_with(|| QualityStats::new(k, label.to_string()))
                .record(quality, result.reason.is_some());
        }
        by_label.into_values().collect()
    }

    /// CSV header matching [`QualityStats::to_csv_row`]
    pub fn csv_header() -> String {
        let mut columns = vec!["label".to_string(), "k".to_string()];
        for quality in ClassificationResultQuality::iter_variants() {
            columns.push(quality.name().to_string());
            columns.push(format!("{}_w_reason", quality.name()));
        }
        columns.push("total".to_string());
        columns.join(",")
    }

    pub fn to_csv_row(&self) -> String {
        let mut columns = vec![self.label.clone(), self.k.to_string()];
        for quality in ClassificationResultQuality::iter_variants() {
            columns.push(self.count(quality).to_string());
            columns.push(self.count_with_reason(quality).to_string());
        }
        columns.push(self.total().to_string());
        columns.join(",")
    }
}

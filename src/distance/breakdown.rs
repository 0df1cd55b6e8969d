//! Full-matrix distance with per-transition cost attribution
//!
//! Used for diagnosing why two sequences are close or far apart. Keeps the
//! whole DP matrix plus an operation tag per cell and backtracks one optimal
//! alignment, so it is strictly more expensive than the scalar variant and
//! only invoked on explicit request.

use crate::cost::CostTable;
use crate::element::SequenceElement;
use std::collections::BTreeMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Op {
    Start,
    Delete,
    Insert,
    Substitute,
}

/// Attribution of a total edit cost to named transition kinds
///
/// Keys are stable strings such as `insert_size`, `gap3_to_gap5`, or
/// `size1_to_size2`. Zero-cost matches are not recorded, so the values always
/// sum to the total distance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CostBreakdown(BTreeMap<String, usize>);

impl CostBreakdown {
    /// Sum of all attributed costs, equal to the scalar distance
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// The attribution map, keyed by transition label
    pub fn as_btreemap(&self) -> &BTreeMap<String, usize> {
        &self.0
    }

    fn record(&mut self, label: String, cost: usize) {
        if cost > 0 {
            *self.0.entry(label).or_insert(0) += cost;
        }
    }

    fn record_indel(&mut self, direction: &str, elem: SequenceElement, cost: usize) {
        let kind = if elem.is_size() { "size" } else { "gap" };
        self.record(format!("{direction}_{kind}"), cost);
    }

    fn record_substitute(&mut self, a: SequenceElement, b: SequenceElement, cost: usize) {
        use SequenceElement::{Gap, Size};
        let label = match (a, b) {
            (Size(s1), Size(s2)) => format!("size{}_to_size{}", s1.min(s2), s1.max(s2)),
            (Gap(g1), Gap(g2)) => format!("gap{}_to_gap{}", g1.min(g2), g1.max(g2)),
            (Size(_), Gap(_)) => "substitute_size_gap".to_string(),
            (Gap(_), Size(_)) => "substitute_gap_size".to_string(),
        };
        self.record(label, cost);
    }
}

/// Edit distance plus the per-transition breakdown of one optimal alignment
///
/// The returned total always equals [`super::distance`] for the same inputs;
/// the breakdown describes one of the possibly many optimal alignments.
pub fn distance_with_details(
    table: &CostTable,
    a: &[SequenceElement],
    b: &[SequenceElement],
) -> (usize, CostBreakdown) {
    let rows = a.len() + 1;
    let cols = b.len() + 1;

    let mut costs = vec![0usize; rows * cols];
    let mut ops = vec![Op::Start; rows * cols];
    let at = |i: usize, j: usize| i * cols + j;

    for i in 1..rows {
        costs[at(i, 0)] = costs[at(i - 1, 0)] + table.delete_cost(a[i - 1]);
        ops[at(i, 0)] = Op::Delete;
    }
    for j in 1..cols {
        costs[at(0, j)] = costs[at(0, j - 1)] + table.insert_cost(b[j - 1]);
        ops[at(0, j)] = Op::Insert;
    }

    for i in 1..rows {
        for j in 1..cols {
            let delete = costs[at(i - 1, j)] + table.delete_cost(a[i - 1]);
            let insert = costs[at(i, j - 1)] + table.insert_cost(b[j - 1]);
            let substitute = costs[at(i - 1, j - 1)] + table.substitute_cost(a[i - 1], b[j - 1]);

            // substitution wins ties so matches are preferred on the diagonal
            let (cost, op) = if substitute <= delete && substitute <= insert {
                (substitute, Op::Substitute)
            } else if delete <= insert {
                (delete, Op::Delete)
            } else {
                (insert, Op::Insert)
            };
            costs[at(i, j)] = cost;
            ops[at(i, j)] = op;
        }
    }

    let total = costs[at(a.len(), b.len())];

    let mut breakdown = CostBreakdown::default();
    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 || j > 0 {
        match ops[at(i, j)] {
            Op::Delete => {
                let step = costs[at(i, j)] - costs[at(i - 1, j)];
                breakdown.record_indel("delete", a[i - 1], step);
                i -= 1;
            }
            Op::Insert => {
                let step = costs[at(i, j)] - costs[at(i, j - 1)];
                breakdown.record_indel("insert", b[j - 1], step);
                j -= 1;
            }
            Op::Substitute => {
                let step = costs[at(i, j)] - costs[at(i - 1, j - 1)];
                breakdown.record_substitute(a[i - 1], b[j - 1], step);
                i -= 1;
                j -= 1;
            }
            Op::Start => break,
        }
    }

    (total, breakdown)
}

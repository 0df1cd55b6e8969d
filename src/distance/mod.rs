//! Edit distance between two symbol streams
//!
//! Classic dynamic-programming edit distance with insert, delete, and
//! substitute operations priced by a [`CostTable`]. The scalar variant keeps
//! only two rows, O(min(|a|, |b|)) memory; the breakdown variant in
//! [`breakdown`] materializes the full matrix and backtracks to attribute the
//! total cost to individual transitions.

mod breakdown;

pub use breakdown::{distance_with_details, CostBreakdown};

use crate::cost::CostTable;
use crate::element::SequenceElement;

/// Edit distance between `a` and `b` under `table`
///
/// Symmetric in its arguments as long as the table is symmetric, which every
/// table built from a [`crate::cost::CostConfig`] is.
///
/// # Example
/// ```
/// use dnsfp::cost::CostTable;
/// use dnsfp::distance::distance;
/// use dnsfp::element::SequenceElement::{Gap, Size};
///
/// let table = CostTable::shared_default();
/// let a = [Size(1), Gap(2), Size(1)];
/// let b = [Size(1), Gap(2), Size(2)];
/// assert_eq!(distance(table, &a, &a), 0);
/// assert_eq!(distance(table, &a, &b), 6);
/// ```
pub fn distance(table: &CostTable, a: &[SequenceElement], b: &[SequenceElement]) -> usize {
    // keep the row buffer as small as possible
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.iter().map(|&elem| table.insert_cost(elem)).sum();
    }

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for (j, &elem) in short.iter().enumerate() {
        prev[j + 1] = prev[j] + table.insert_cost(elem);
    }

    for &long_elem in long {
        curr[0] = prev[0] + table.delete_cost(long_elem);
        for (j, &short_elem) in short.iter().enumerate() {
            let delete = prev[j + 1] + table.delete_cost(long_elem);
            let insert = curr[j] + table.insert_cost(short_elem);
            let substitute = prev[j] + table.substitute_cost(long_elem, short_elem);
            curr[j + 1] = delete.min(insert).min(substitute);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests;

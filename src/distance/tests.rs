use super::*;
use crate::cost::{CostConfig, CostTable};
use crate::element::SequenceElement::{Gap, Size};

#[test]
fn test_equal_sequences_cost_nothing() {
    let table = CostTable::shared_default();
    let a = [Size(1), Gap(3), Size(2), Gap(9), Size(1)];
    assert_eq!(distance(table, &a, &a), 0);
    assert_eq!(distance(table, &[], &[]), 0);
}

#[test]
fn test_empty_against_nonempty() {
    let table = CostTable::shared_default();
    let a = [Size(1), Gap(2), Size(1)];
    // sum of the insert costs: 12 + 2 + 12
    assert_eq!(distance(table, &a, &[]), 26);
    assert_eq!(distance(table, &[], &a), 26);
}

#[test]
fn test_single_substitution() {
    let table = CostTable::shared_default();
    let a = [Size(1), Gap(3), Size(1)];
    let b = [Size(2), Gap(3), Size(1)];
    assert_eq!(distance(table, &a, &b), 6);
}

#[test]
fn test_gap_substitution_scales_with_bucket_distance() {
    let table = CostTable::shared_default();
    let base = [Gap(10)];
    assert_eq!(distance(table, &base, &[Gap(10)]), 0);
    assert_eq!(distance(table, &base, &[Gap(9)]), 3);
    assert_eq!(distance(table, &base, &[Gap(8)]), 6);
    assert_eq!(distance(table, &base, &[Gap(5)]), 15);
    // far apart buckets fall back to delete + insert: 10 + 2 < 8 * 3
    assert_eq!(distance(table, &base, &[Gap(2)]), 12);
}

#[test]
fn test_symmetry() {
    let table = CostTable::shared_default();
    let a = [Size(1), Gap(9), Size(2), Size(2), Gap(3)];
    let b = [Size(2), Gap(8), Size(1)];
    assert_eq!(distance(table, &a, &b), distance(table, &b, &a));
}

#[test]
fn test_pre_optimization_cost_model() {
    let table = CostTable::new(&CostConfig::pre_optimization()).unwrap();

    // substitution: (20 + 20) / 3
    assert_eq!(
        distance(&table, &[Size(1), Size(2)], &[Size(3), Size(2)]),
        13
    );
    // swapped neighbors are two substitutions, there is no transposition op
    assert_eq!(
        distance(&table, &[Size(1), Size(2)], &[Size(2), Size(1)]),
        26
    );
    // deletion of a Gap(2): 2 * 5
    assert_eq!(
        distance(&table, &[Size(1), Gap(2), Size(2)], &[Size(1), Size(2)]),
        10
    );
    // insertion of a Size: 20
    assert_eq!(distance(&table, &[Size(1)], &[Size(1), Size(2)]), 20);
}

#[test]
fn test_triangle_inequality_sample() {
    let table = CostTable::shared_default();
    let a = [Size(1), Gap(3), Size(2)];
    let b = [Size(2), Gap(3)];
    let c = [Size(2), Gap(9), Size(2), Size(1)];
    let ab = distance(table, &a, &b);
    let bc = distance(table, &b, &c);
    let ac = distance(table, &a, &c);
    assert!(ac <= ab + bc);
}

#[test]
fn test_breakdown_matches_scalar_distance() {
    let table = CostTable::shared_default();
    let cases: &[(&[_], &[_])] = &[
        (&[Size(1), Gap(3), Size(2)], &[Size(2), Gap(3)]),
        (&[Size(1), Size(2)], &[Size(2), Size(1)]),
        (&[], &[Size(1), Gap(9)]),
        (&[Gap(10), Size(1)], &[Gap(2), Size(1), Size(2)]),
        (&[Size(1), Gap(2), Size(1)], &[Size(1), Gap(2), Size(1)]),
    ];
    for (a, b) in cases {
        let scalar = distance(table, a, b);
        let (total, breakdown) = distance_with_details(table, a, b);
        assert_eq!(total, scalar);
        assert_eq!(breakdown.total(), scalar);
    }
}

#[test]
fn test_breakdown_labels() {
    let table = CostTable::shared_default();

    let (total, breakdown) =
        distance_with_details(table, &[Size(1), Gap(3), Size(1)], &[Size(2), Gap(5), Size(1)]);
    assert_eq!(total, 12);
    let map = breakdown.as_btreemap();
    assert_eq!(map.get("size1_to_size2"), Some(&6));
    assert_eq!(map.get("gap3_to_gap5"), Some(&6));
    assert_eq!(map.len(), 2);

    let (total, breakdown) = distance_with_details(table, &[Size(1)], &[Size(1), Gap(4)]);
    assert_eq!(total, 4);
    assert_eq!(breakdown.as_btreemap().get("insert_gap"), Some(&4));

    // identical sequences leave the breakdown empty
    let (total, breakdown) = distance_with_details(table, &[Size(1), Gap(2)], &[Size(1), Gap(2)]);
    assert_eq!(total, 0);
    assert!(breakdown.as_btreemap().is_empty());
}

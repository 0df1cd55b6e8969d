use super::*;
use crate::element::SequenceElement::{Gap, Size};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn seq(elements: Vec<SequenceElement>, id: &str) -> Sequence {
    Sequence::new(elements, id.to_string())
}

#[test]
fn test_accessors() {
    let s = seq(vec![Size(1), Gap(2), Size(2)], "example.com");
    assert_eq!(s.id(), "example.com");
    assert_eq!(s.len(), 3);
    assert!(!s.is_empty());
    assert_eq!(s.as_elements(), &[Size(1), Gap(2), Size(2)]);

    let empty = seq(vec![], "empty");
    assert_eq!(empty.len(), 0);
    assert!(empty.is_empty());
}

#[test]
fn test_complexity_counts_only_sizes() {
    let s = seq(vec![Size(1), Gap(9), Size(2), Gap(3), Size(3)], "a");
    assert_eq!(s.complexity(), 6);
    assert_eq!(seq(vec![Gap(9), Gap(3)], "b").complexity(), 0);
}

#[test]
fn test_message_count_includes_boundary_markers() {
    let s = seq(vec![Size(1), Gap(9), Size(2), Gap(3), Size(1)], "a");
    assert_eq!(s.message_count(), 3 + 4);
    assert_eq!(seq(vec![], "empty").message_count(), 4);
}

#[test]
fn test_equality_requires_matching_id() {
    let a = seq(vec![Size(1), Size(2)], "a");
    let a2 = seq(vec![Size(1), Size(2)], "a");
    let b = seq(vec![Size(1), Size(2)], "b");
    assert_eq!(a, a2);
    assert_ne!(a, b);

    let hash = |s: &Sequence| {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(hash(&a), hash(&a2));
}

#[test]
fn test_ordering_by_complexity_then_id() {
    let small = seq(vec![Size(1)], "zzz");
    let large = seq(vec![Size(2)], "aaa");
    assert!(small < large);

    let a = seq(vec![Size(2)], "aaa");
    let b = seq(vec![Size(2)], "bbb");
    assert!(a < b);
}

#[test]
fn test_features_are_memoized() {
    let s = seq(vec![Size(1), Gap(2), Size(1), Gap(2)], "a");
    let first = *s.features();
    let second = *s.features();
    assert_eq!(first, second);
    assert_eq!(first.length, 4);
    assert_eq!(first.message_count, 2 + 4);
    assert_eq!(first.complexity, 2);
    // two distinct symbols with equal frequency
    assert!((first.shannon_n1 - 1.0).abs() < 1e-12);
}

#[test]
fn test_distance_uses_default_table() {
    let a = seq(vec![Size(1), Gap(2), Size(1)], "a");
    let b = seq(vec![Size(2), Gap(2), Size(1)], "b");
    assert_eq!(a.distance(&b), 6);
    assert_eq!(
        a.distance(&b),
        a.distance_with_table(CostTable::shared_default(), &b)
    );
}

#[test]
fn test_serde_round_trip() -> Result<(), serde_json::Error> {
    let s = seq(vec![Size(1), Gap(3), Size(2)], "example.com");
    let json = s.to_json()?;
    assert_eq!(
        json,
        r#"{"elements":["S01","G03","S02"],"id":"example.com"}"#
    );
    let back: Sequence = serde_json::from_str(&json)?;
    assert_eq!(s, back);
    Ok(())
}

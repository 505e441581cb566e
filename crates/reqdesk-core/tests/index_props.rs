// Rust guideline compliant 2026-10-14

//! Property-based tests for the ordered indices.
//!
//! Every tree is checked against the canonical list sorted by
//! `(submitted_at, id)`, and the balanced trees against their structural
//! invariants.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use reqdesk_core::{
    AvlTree, OrderedIndex, PlainTree, Record, RedBlackTree, SubmissionIndex, SubmissionKey,
};
use std::sync::Arc;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// Records with arbitrary (possibly repeated) submission offsets.
fn arb_records(max: usize) -> impl Strategy<Value = Vec<Arc<Record>>> {
    prop::collection::vec(0i64..500, 0..max).prop_map(|offsets| {
        offsets
            .into_iter()
            .map(|minutes| {
                Arc::new(Record::at(
                    base_time() + Duration::minutes(minutes),
                    "Main St",
                    "Roads",
                    "",
                ))
            })
            .collect()
    })
}

fn sorted_keys(records: &[Arc<Record>]) -> Vec<SubmissionKey> {
    let mut keys: Vec<SubmissionKey> = records.iter().map(|r| r.submission_key()).collect();
    keys.sort();
    keys
}

fn keys_of(records: &[Arc<Record>]) -> Vec<SubmissionKey> {
    records.iter().map(|r| r.submission_key()).collect()
}

fn avl_bound(n: usize) -> usize {
    (1.44 * ((n + 2) as f64).log2()).ceil() as usize
}

proptest! {
    #[test]
    fn prop_plain_in_order_is_sorted(records in arb_records(80)) {
        let mut tree = PlainTree::new();
        for record in &records {
            prop_assert!(tree.insert(Arc::clone(record)));
        }
        prop_assert_eq!(keys_of(&tree.in_order()), sorted_keys(&records));
        prop_assert_eq!(tree.len(), records.len());
    }

    #[test]
    fn prop_avl_height_is_logarithmic(records in arb_records(200)) {
        let mut tree = AvlTree::new();
        for record in &records {
            tree.insert(Arc::clone(record));
        }
        prop_assert!(tree.verify().is_ok());
        prop_assert!(tree.height() <= avl_bound(records.len()));
        prop_assert_eq!(keys_of(&tree.in_order()), sorted_keys(&records));
    }

    #[test]
    fn prop_red_black_invariants_hold(records in arb_records(200)) {
        let mut tree = RedBlackTree::new();
        for record in &records {
            tree.insert(Arc::clone(record));
        }
        let black_height = tree.verify();
        prop_assert!(black_height.is_ok(), "violation: {:?}", black_height);
        prop_assert_eq!(keys_of(&tree.in_order()), sorted_keys(&records));
    }

    #[test]
    fn prop_every_index_finds_every_record(records in arb_records(60)) {
        let mut plain = PlainTree::new();
        let mut avl = AvlTree::new();
        let mut red_black = RedBlackTree::new();
        let canonical: SubmissionIndex = records.iter().cloned().collect();
        for record in &records {
            plain.insert(Arc::clone(record));
            avl.insert(Arc::clone(record));
            red_black.insert(Arc::clone(record));
        }

        let indices: [&dyn OrderedIndex; 4] = [&plain, &avl, &red_black, &canonical];
        for index in indices {
            for record in &records {
                prop_assert_eq!(index.search(record.id).map(|r| r.id), Some(record.id));
                prop_assert_eq!(index.get(&record.submission_key()).map(|r| r.id), Some(record.id));
            }
        }
    }
}

#[test]
fn test_duplicate_key_is_rejected_everywhere() {
    let record = Arc::new(Record::at(base_time(), "Main St", "Roads", ""));
    let mut shifted = (*record).clone();
    shifted.submitted_at = record.submitted_at + Duration::hours(1);
    let shifted = Arc::new(shifted);

    let mut plain = PlainTree::new();
    let mut avl = AvlTree::new();
    let mut red_black = RedBlackTree::new();
    let mut canonical = SubmissionIndex::new();

    let indices: [&mut dyn OrderedIndex; 4] = [&mut plain, &mut avl, &mut red_black, &mut canonical];
    for index in indices {
        assert!(index.insert(Arc::clone(&record)));
        assert!(!index.insert(Arc::clone(&record)));
        assert!(!index.insert(Arc::clone(&shifted)));
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.search(record.id).map(|r| r.submitted_at),
            Some(record.submitted_at)
        );
        assert!(index.get(&shifted.submission_key()).is_none());
    }
}

#[test]
fn test_plain_tree_degenerates_on_ascending_input() {
    let mut plain = PlainTree::new();
    let mut avl = AvlTree::new();
    for i in 0..300 {
        let record = Arc::new(Record::at(base_time() + Duration::seconds(i), "A", "B", ""));
        plain.insert(Arc::clone(&record));
        avl.insert(record);
    }
    assert_eq!(plain.height(), 300);
    assert!(avl.height() <= avl_bound(300));
}

#[test]
fn test_unknown_lookups_are_none() {
    let record = Arc::new(Record::at(base_time(), "A", "B", ""));
    let other = Record::at(base_time(), "A", "B", "");
    let mut tree = RedBlackTree::new();
    tree.insert(record);
    assert!(tree.search(other.id).is_none());
    assert!(tree.get(&other.submission_key()).is_none());
}

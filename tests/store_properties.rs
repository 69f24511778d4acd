use std::collections::{BTreeSet, HashSet};

use iexpense::{ExpenseError, ExpenseRecord, ExpenseStore};
use uuid::Uuid;

fn filled(count: usize) -> ExpenseStore {
    let mut store = ExpenseStore::new();
    for n in 0..count {
        store.add(ExpenseRecord::new(format!("item-{n}"), "Personal", n as f64));
    }
    store
}

fn ids(store: &ExpenseStore) -> Vec<Uuid> {
    store.iter().map(ExpenseRecord::id).collect()
}

#[test]
fn length_tracks_number_of_adds_in_order() {
    for count in [0, 1, 2, 7, 50] {
        let store = filled(count);
        assert_eq!(store.len(), count);
        let names: Vec<String> = store.iter().map(|r| r.name().to_string()).collect();
        let expected: Vec<String> = (0..count).map(|n| format!("item-{n}")).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn ids_are_pairwise_distinct() {
    let store = filled(500);
    let unique: HashSet<Uuid> = ids(&store).into_iter().collect();
    assert_eq!(unique.len(), 500);
}

#[test]
fn remove_at_keeps_survivors_in_order_for_every_subset() {
    let len = 6;
    for mask in 0u32..(1 << len) {
        let mut store = filled(len);
        let before = ids(&store);
        let positions: BTreeSet<usize> = (0..len).filter(|bit| mask & (1 << bit) != 0).collect();

        let removed = store.remove_at(positions.iter().copied()).unwrap();

        let expected_kept: Vec<Uuid> = before
            .iter()
            .enumerate()
            .filter(|(index, _)| !positions.contains(index))
            .map(|(_, id)| *id)
            .collect();
        let expected_removed: Vec<Uuid> = positions.iter().map(|&index| before[index]).collect();

        assert_eq!(store.len(), len - positions.len());
        assert_eq!(ids(&store), expected_kept, "mask {mask:#08b}");
        assert_eq!(removed.iter().map(ExpenseRecord::id).collect::<Vec<_>>(), expected_removed);
    }
}

#[test]
fn lunch_then_taxi_scenario() {
    let mut store = ExpenseStore::new();
    store.add(ExpenseRecord::new("Lunch", "personal", 5.0));
    store.add(ExpenseRecord::new("Taxi", "travel", 12.0));

    let items = store.items();
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].name(), items[0].category(), items[0].amount()), ("Lunch", "personal", 5.0));
    assert_eq!((items[1].name(), items[1].category(), items[1].amount()), ("Taxi", "travel", 12.0));
}

#[test]
fn batched_removal_scenario() {
    let mut store = ExpenseStore::new();
    for name in ["A", "B", "C", "D"] {
        store.add(ExpenseRecord::new(name, "Personal", 1.0));
    }
    let a = store.get(0).unwrap().id();
    let c = store.get(2).unwrap().id();

    store.remove_at([1, 3]).unwrap();

    assert_eq!(ids(&store), vec![a, c]);
}

#[test]
fn invalid_index_rejects_the_whole_batch() {
    let mut store = filled(3);
    let before = ids(&store);
    let err = store.remove_at([0, 1, 3]).unwrap_err();
    assert!(matches!(err, ExpenseError::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(ids(&store), before);
}

//! In-memory, observable list of expense records owned by one session.

mod observer;

use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ExpenseRecord;
use crate::errors::{ExpenseError, Result};

pub use observer::{StoreEvent, SubscriptionId};
use observer::Observers;

/// Ordered collection of expenses. Insertion order is display order.
///
/// Every effective mutation is reported to subscribers once, after the
/// change has been applied. Calls that change nothing notify nobody.
pub struct ExpenseStore {
    items: Vec<ExpenseRecord>,
    observers: Observers,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            items: Vec::new(),
            observers: Observers::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Registers a callback invoked with each event and the post-mutation items.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &[ExpenseRecord]) + 'static,
    {
        let id = self.observers.subscribe(callback);
        tracing::debug!(subscribers = self.observers.len(), "store observer subscribed");
        id
    }

    /// Removes a callback. Returns `false` when the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Appends a record and returns its identifier.
    pub fn add(&mut self, record: ExpenseRecord) -> Uuid {
        let id = record.id();
        self.items.push(record);
        let index = self.items.len() - 1;
        tracing::debug!(%id, index, "expense added");
        self.publish(StoreEvent::Added { index, id });
        id
    }

    /// Removes every record whose position is in `indices`, as one update.
    ///
    /// Positions refer to the list as it was before the call, so a batch of
    /// offsets reported by a multi-row delete removes exactly those rows.
    /// Duplicate positions collapse. Any out-of-range position rejects the
    /// whole batch and leaves the store untouched.
    pub fn remove_at<I>(&mut self, indices: I) -> Result<Vec<ExpenseRecord>>
    where
        I: IntoIterator<Item = usize>,
    {
        let positions: BTreeSet<usize> = indices.into_iter().collect();
        let len = self.items.len();
        if let Some(&index) = positions.last() {
            if index >= len {
                return Err(ExpenseError::IndexOutOfRange { index, len });
            }
        } else {
            return Ok(Vec::new());
        }

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .enumerate()
            .partition(|(position, _)| positions.contains(position));
        self.items = kept.into_iter().map(|(_, record)| record).collect();
        let removed: Vec<ExpenseRecord> = removed.into_iter().map(|(_, record)| record).collect();

        self.publish_removed(&removed);
        Ok(removed)
    }

    /// Removes every record whose identifier is listed. Unknown ids are ignored.
    pub fn remove_ids(&mut self, ids: &[Uuid]) -> Vec<ExpenseRecord> {
        let targets: BTreeSet<Uuid> = ids.iter().copied().collect();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|record| targets.contains(&record.id()));
        self.items = kept;
        if !removed.is_empty() {
            self.publish_removed(&removed);
        }
        removed
    }

    pub fn items(&self) -> &[ExpenseRecord] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ExpenseRecord> {
        self.items.get(index)
    }

    pub fn find(&self, id: Uuid) -> Option<&ExpenseRecord> {
        self.items.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Plain sum of all amounts.
    pub fn total(&self) -> f64 {
        self.items.iter().map(ExpenseRecord::amount).sum()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn publish_removed(&mut self, removed: &[ExpenseRecord]) {
        let ids: Vec<Uuid> = removed.iter().map(ExpenseRecord::id).collect();
        tracing::debug!(count = ids.len(), remaining = self.items.len(), "expenses removed");
        self.publish(StoreEvent::Removed { ids });
    }

    fn publish(&mut self, event: StoreEvent) {
        self.touch();
        self.observers.notify(&event, &self.items);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExpenseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl<'a> IntoIterator for &'a ExpenseStore {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn store_with(names: &[&str]) -> ExpenseStore {
        let mut store = ExpenseStore::new();
        for name in names {
            store.add(ExpenseRecord::new(*name, "Personal", 1.0));
        }
        store
    }

    fn names(store: &ExpenseStore) -> Vec<&str> {
        store.iter().map(ExpenseRecord::name).collect()
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = ExpenseStore::new();
        store.add(ExpenseRecord::new("Lunch", "personal", 5.0));
        store.add(ExpenseRecord::new("Taxi", "travel", 12.0));
        assert_eq!(names(&store), vec!["Lunch", "Taxi"]);
        assert_eq!(store.total(), 17.0);
    }

    #[test]
    fn remove_at_uses_pre_removal_positions() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        let removed = store.remove_at([1, 3]).unwrap();
        assert_eq!(names(&store), vec!["A", "C"]);
        let removed: Vec<&str> = removed.iter().map(ExpenseRecord::name).collect();
        assert_eq!(removed, vec!["B", "D"]);
    }

    #[test]
    fn remove_at_collapses_duplicate_positions() {
        let mut store = store_with(&["A", "B", "C"]);
        store.remove_at(vec![0, 0, 2]).unwrap();
        assert_eq!(names(&store), vec!["B"]);
    }

    #[test]
    fn out_of_range_batch_leaves_store_untouched() {
        let mut store = store_with(&["A", "B"]);
        let err = store.remove_at([0, 5]).expect_err("index 5 is invalid");
        assert!(
            matches!(err, ExpenseError::IndexOutOfRange { index: 5, len: 2 }),
            "unexpected error: {err:?}"
        );
        assert_eq!(names(&store), vec!["A", "B"]);
    }

    #[test]
    fn remove_ids_ignores_unknown_ids() {
        let mut store = store_with(&["A", "B", "C"]);
        let target = store.get(1).unwrap().id();
        let removed = store.remove_ids(&[target, Uuid::new_v4()]);
        assert_eq!(removed.len(), 1);
        assert_eq!(names(&store), vec!["A", "C"]);
        assert!(store.find(target).is_none());
    }

    #[test]
    fn observers_see_each_effective_mutation_once() {
        let mut store = ExpenseStore::new();
        let events: Rc<RefCell<Vec<(StoreEvent, usize)>>> = Rc::default();
        let sink = Rc::clone(&events);
        store.subscribe(move |event, items| sink.borrow_mut().push((event.clone(), items.len())));

        let id = store.add(ExpenseRecord::new("Lunch", "Personal", 5.0));
        store.remove_at(Vec::<usize>::new()).unwrap();
        store.remove_ids(&[Uuid::new_v4()]);
        store.remove_at([0]).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], (StoreEvent::Added { index: 0, id }, 1));
        assert_eq!(events[1], (StoreEvent::Removed { ids: vec![id] }, 0));
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let mut store = ExpenseStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let handle = store.subscribe(move |_, _| *counter.borrow_mut() += 1);

        store.add(ExpenseRecord::new("A", "Personal", 1.0));
        assert!(store.unsubscribe(handle));
        assert!(!store.unsubscribe(handle));
        store.add(ExpenseRecord::new("B", "Personal", 1.0));

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn mutation_refreshes_updated_at() {
        let mut store = ExpenseStore::new();
        let before = store.updated_at();
        store.add(ExpenseRecord::new("A", "Personal", 1.0));
        assert!(store.updated_at() >= before);
        assert!(store.created_at() <= store.updated_at());
    }
}

use uuid::Uuid;

use crate::domain::ExpenseRecord;

/// Handle returned by [`super::ExpenseStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Describes a mutation that has already been applied to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added { index: usize, id: Uuid },
    Removed { ids: Vec<Uuid> },
}

type Callback = Box<dyn FnMut(&StoreEvent, &[ExpenseRecord])>;

/// Ordered list of change callbacks.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &[ExpenseRecord]) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &StoreEvent, items: &[ExpenseRecord]) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event, items);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

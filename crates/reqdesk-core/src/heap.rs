// Rust guideline compliant 2026-10-14

//! Array-backed binary heap of records ordered by priority.

use crate::models::Record;
use std::sync::Arc;

/// Which end of the priority scale surfaces first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapOrder {
    /// Lowest priority number (most urgent) first; earlier submissions win ties.
    #[default]
    Min,
    /// Highest priority number (least urgent) first; earlier submissions win ties.
    Max,
}

/// Binary heap over records.
///
/// The store keeps a persistent [`HeapOrder::Min`] heap. The max ordering is
/// a building block with no caller in the store.
#[derive(Debug, Clone, Default)]
pub struct PriorityHeap {
    items: Vec<Arc<Record>>,
    order: HeapOrder,
}

impl PriorityHeap {
    /// Creates an empty min-heap.
    #[must_use]
    pub fn min() -> Self {
        Self::with_order(HeapOrder::Min)
    }

    /// Creates an empty max-heap.
    #[must_use]
    pub fn max() -> Self {
        Self::with_order(HeapOrder::Max)
    }

    /// Creates an empty heap with the given ordering.
    #[must_use]
    pub fn with_order(order: HeapOrder) -> Self {
        Self {
            items: Vec::new(),
            order,
        }
    }

    /// Builds a heap by inserting each record in turn.
    pub fn from_records<I>(order: HeapOrder, records: I) -> Self
    where
        I: IntoIterator<Item = Arc<Record>>,
    {
        let mut heap = Self::with_order(order);
        for record in records {
            heap.insert(record);
        }
        heap
    }

    /// Returns the heap ordering.
    #[must_use]
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Adds a record and sifts it up.
    pub fn insert(&mut self, record: Arc<Record>) {
        self.items.push(record);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the top record.
    ///
    /// The root is swapped with the last element, popped, and the new root
    /// is sifted down.
    pub fn extract(&mut self) -> Option<Arc<Record>> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let top = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// Removes and returns the most urgent record of a min-heap.
    ///
    /// Equivalent to [`extract`](Self::extract); on a max-heap it returns the
    /// least urgent record.
    pub fn extract_min(&mut self) -> Option<Arc<Record>> {
        self.extract()
    }

    /// Returns the top record without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Arc<Record>> {
        self.items.first()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates records in storage (not priority) order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Record>> + '_ {
        self.items.iter()
    }

    fn precedes(&self, a: &Record, b: &Record) -> bool {
        match self.order {
            HeapOrder::Min => (a.priority, a.submitted_at) < (b.priority, b.submitted_at),
            HeapOrder::Max => {
                a.priority > b.priority
                    || (a.priority == b.priority && a.submitted_at < b.submitted_at)
            }
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.precedes(&self.items[index], &self.items[parent]) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut best = index;

            if left < len && self.precedes(&self.items[left], &self.items[best]) {
                best = left;
            }
            if right < len && self.precedes(&self.items[right], &self.items[best]) {
                best = right;
            }
            if best == index {
                break;
            }
            self.items.swap(index, best);
            index = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, Utc};

    fn record(priority: u8, minutes: i64) -> Arc<Record> {
        let mut record = Record::at(Utc::now() + Duration::minutes(minutes), "A", "B", "");
        record.priority = Priority::new(priority).unwrap();
        Arc::new(record)
    }

    #[test]
    fn test_min_heap_orders_by_priority_then_time() {
        let mut heap = PriorityHeap::min();
        heap.insert(record(3, 0));
        heap.insert(record(1, 10));
        heap.insert(record(1, 5));
        heap.insert(record(5, -5));

        let order: Vec<(u8, i64)> = std::iter::from_fn(|| heap.extract_min())
            .map(|r| (r.priority.get(), r.submitted_at.timestamp()))
            .collect();
        let priorities: Vec<u8> = order.iter().map(|(p, _)| *p).collect();
        assert_eq!(priorities, vec![1, 1, 3, 5]);
        assert!(order[0].1 <= order[1].1, "earlier submission wins the tie");
    }

    #[test]
    fn test_max_heap_surfaces_least_urgent() {
        let records = vec![record(2, 0), record(5, 3), record(4, 1), record(5, 1)];
        let mut heap = PriorityHeap::from_records(HeapOrder::Max, records);
        let first = heap.extract().unwrap();
        let second = heap.extract().unwrap();
        assert_eq!(first.priority.get(), 5);
        assert_eq!(second.priority.get(), 5);
        assert!(first.submitted_at < second.submitted_at);
        assert_eq!(heap.peek().map(|r| r.priority.get()), Some(4));
    }

    #[test]
    fn test_empty_heap() {
        let mut heap = PriorityHeap::min();
        assert!(heap.is_empty());
        assert!(heap.peek().is_none());
        assert!(heap.extract_min().is_none());
    }
}

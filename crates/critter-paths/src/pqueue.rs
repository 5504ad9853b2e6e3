//! Indexed binary min-heap with mutable priorities.
//!
//! Keys are distinct. Each is stored once in the heap array and once in a
//! key → slot map; the two are kept a bijection across every mutation, so
//! membership tests are `O(1)` and priority changes sift from the key's own
//! slot in `O(log n)`.
//!
//! Equal priorities are broken by update order: the key whose priority was
//! set least recently comes out first (FIFO).

use std::collections::HashMap;
use std::hash::Hash;

use crate::PathError;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    priority: f64,
    /// Stamp of the last `add_or_update` touching this key. Lower = older.
    seq: u64,
}

impl<K> Entry<K> {
    /// Strict "comes out before" relation.
    #[inline]
    fn precedes(&self, other: &Self) -> bool {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
            .is_lt()
    }
}

/// A min-priority queue over distinct keys with updatable priorities.
///
/// Priorities are ordered with [`f64::total_cmp`], so every value,
/// including NaN, has a well-defined place.
#[derive(Debug, Clone)]
pub struct IndexedMinQueue<K> {
    heap: Vec<Entry<K>>,
    index: HashMap<K, usize>,
    seq: u64,
}

impl<K: Eq + Hash + Clone> IndexedMinQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
            seq: 0,
        }
    }

    /// Create an empty queue with room for `cap` keys.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            heap: Vec::with_capacity(cap),
            index: HashMap::with_capacity(cap),
            seq: 0,
        }
    }

    /// Whether the queue holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of keys in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether `key` is queued.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Current priority of `key`, if queued.
    pub fn priority_of(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&slot| self.heap[slot].priority)
    }

    /// The key with the smallest priority.
    pub fn peek_min(&self) -> Result<&K, PathError> {
        self.heap
            .first()
            .map(|e| &e.key)
            .ok_or(PathError::EmptyQueue)
    }

    /// The smallest priority in the queue.
    pub fn min_priority(&self) -> Result<f64, PathError> {
        self.heap
            .first()
            .map(|e| e.priority)
            .ok_or(PathError::EmptyQueue)
    }

    /// Insert `key` at `priority`, or move an already-queued `key` to
    /// `priority`. Either direction is allowed.
    pub fn add_or_update(&mut self, key: K, priority: f64) {
        let seq = self.seq;
        self.seq += 1;

        if let Some(&slot) = self.index.get(&key) {
            let entry = &mut self.heap[slot];
            let lowered = priority.total_cmp(&entry.priority).is_lt();
            entry.priority = priority;
            entry.seq = seq;
            if lowered {
                self.sift_up(slot);
            } else {
                // An equal priority still moves behind its ties.
                self.sift_down(slot);
            }
            return;
        }

        let slot = self.heap.len();
        self.index.insert(key.clone(), slot);
        self.heap.push(Entry { key, priority, seq });
        self.sift_up(slot);
    }

    /// Remove and return the key with the smallest priority.
    pub fn remove_min(&mut self) -> Result<K, PathError> {
        self.remove_min_with_priority().map(|(key, _)| key)
    }

    /// Remove the key with the smallest priority, returning it together with
    /// that priority.
    pub fn remove_min_with_priority(&mut self) -> Result<(K, f64), PathError> {
        if self.heap.is_empty() {
            return Err(PathError::EmptyQueue);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let Some(entry) = self.heap.pop() else {
            return Err(PathError::EmptyQueue);
        };
        self.index.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok((entry.key, entry.priority))
    }

    /// Drop every key.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Iterate over `(key, priority)` pairs in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.heap.iter().map(|e| (&e.key, e.priority))
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    /// Swap two heap slots and repoint both keys.
    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(slot) = self.index.get_mut(&self.heap[a].key) {
            *slot = a;
        }
        if let Some(slot) = self.index.get_mut(&self.heap[b].key) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.heap[i].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;
            if left < n && self.heap[left].precedes(&self.heap[best]) {
                best = left;
            }
            if right < n && self.heap[right].precedes(&self.heap[best]) {
                best = right;
            }
            if best == i {
                break;
            }
            self.swap(i, best);
            i = best;
        }
    }

    /// Panics if the heap order or the key index is broken.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.heap.len(), self.index.len(), "index size mismatch");
        for (slot, entry) in self.heap.iter().enumerate() {
            assert_eq!(self.index.get(&entry.key), Some(&slot), "stale index");
            if slot > 0 {
                let parent = (slot - 1) / 2;
                assert!(
                    !entry.precedes(&self.heap[parent]),
                    "heap order violated at slot {slot}"
                );
            }
        }
    }
}

impl<K: Eq + Hash + Clone> Default for IndexedMinQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn empty_queue_errors() {
        let mut q = IndexedMinQueue::<u32>::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.peek_min(), Err(PathError::EmptyQueue));
        assert_eq!(q.min_priority(), Err(PathError::EmptyQueue));
        assert_eq!(q.remove_min(), Err(PathError::EmptyQueue));
    }

    #[test]
    fn basic_ordering() {
        let mut q = IndexedMinQueue::new();
        q.add_or_update("a", 3.0);
        q.add_or_update("b", 1.0);
        q.add_or_update("c", 2.0);
        assert_eq!(q.peek_min(), Ok(&"b"));
        assert_eq!(q.min_priority(), Ok(1.0));
        assert_eq!(q.remove_min(), Ok("b"));
        assert_eq!(q.remove_min(), Ok("c"));
        assert_eq!(q.remove_min(), Ok("a"));
        assert!(q.is_empty());
    }

    #[test]
    fn update_changes_priority_not_count() {
        let mut q = IndexedMinQueue::new();
        q.add_or_update('x', 5.0);
        q.add_or_update('y', 4.0);
        q.add_or_update('x', 1.0);
        assert_eq!(q.len(), 2);
        assert_eq!(q.priority_of(&'x'), Some(1.0));
        assert_eq!(q.peek_min(), Ok(&'x'));

        q.add_or_update('x', 9.0);
        assert_eq!(q.len(), 2);
        assert_eq!(q.remove_min(), Ok('y'));
        assert_eq!(q.remove_min_with_priority(), Ok(('x', 9.0)));
        q.assert_consistent();
    }

    #[test]
    fn ties_come_out_fifo() {
        let mut q = IndexedMinQueue::new();
        q.add_or_update("first", 1.0);
        q.add_or_update("second", 1.0);
        q.add_or_update("third", 1.0);
        assert_eq!(q.remove_min(), Ok("first"));
        assert_eq!(q.remove_min(), Ok("second"));
        assert_eq!(q.remove_min(), Ok("third"));
    }

    #[test]
    fn reupdating_a_tie_moves_it_back() {
        let mut q = IndexedMinQueue::new();
        q.add_or_update(1, 2.0);
        q.add_or_update(2, 2.0);
        q.add_or_update(1, 2.0);
        assert_eq!(q.remove_min(), Ok(2));
        assert_eq!(q.remove_min(), Ok(1));
    }

    #[test]
    fn contains_tracks_membership() {
        let mut q = IndexedMinQueue::new();
        q.add_or_update(7u8, 0.5);
        assert!(q.contains(&7));
        q.remove_min().unwrap();
        assert!(!q.contains(&7));
        assert_eq!(q.priority_of(&7), None);
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = IndexedMinQueue::new();
        for i in 0..10 {
            q.add_or_update(i, f64::from(i));
        }
        q.clear();
        assert!(q.is_empty());
        assert!(!q.contains(&3));
        q.add_or_update(3, 1.0);
        assert_eq!(q.remove_min(), Ok(3));
    }

    #[test]
    fn negative_priorities_sort_first() {
        let mut q = IndexedMinQueue::new();
        q.add_or_update("pos", 0.0);
        q.add_or_update("neg", -10.0);
        assert_eq!(q.remove_min(), Ok("neg"));
    }

    #[test]
    fn iter_visits_every_key() {
        let mut q = IndexedMinQueue::new();
        q.add_or_update(1, 3.0);
        q.add_or_update(2, 1.0);
        let mut seen: Vec<_> = q.iter().map(|(k, p)| (*k, p)).collect();
        seen.sort_by_key(|&(k, _)| k);
        assert_eq!(seen, vec![(1, 3.0), (2, 1.0)]);
    }

    #[test]
    fn randomized_updates_drain_in_order() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for _ in 0..20 {
            let mut q = IndexedMinQueue::new();
            let mut expected = HashMap::new();
            for _ in 0..200 {
                let key = rng.random_range(0..64u32);
                let pri = rng.random_range(-50.0..50.0);
                q.add_or_update(key, pri);
                expected.insert(key, pri);
                q.assert_consistent();
            }
            assert_eq!(q.len(), expected.len());

            let mut last = f64::NEG_INFINITY;
            while let Ok((key, pri)) = q.remove_min_with_priority() {
                assert!(pri >= last, "out of order: {pri} after {last}");
                assert_eq!(expected.remove(&key), Some(pri));
                last = pri;
                q.assert_consistent();
            }
            assert!(expected.is_empty());
            assert_eq!(q.len(), 0);
        }
    }
}

//! Bounded top-N collector.
//!
//! Keeps the N highest-scoring `(row, score)` pairs seen so far. Backed by a
//! binary min-heap whose root is the worst retained entry, so the pruning
//! threshold of the branch-and-bound search is an O(1) peek.

use std::cmp::Ordering;

/// Bounded container of the N best `(row, score)` pairs offered to it.
///
/// Ordering is total: entries compare by score (`f64::total_cmp`), and equal
/// scores compare by row index with the *larger* row ranked worse. When the
/// collector is full, a new entry replaces the current minimum only if its
/// score strictly exceeds the minimum's score, so among equal scores the
/// first-offered rows are retained.
///
/// [`TopN::into_sorted_vec`] yields descending score order with ties broken
/// by ascending row index.
#[derive(Debug, Clone)]
pub struct TopN {
    capacity: usize,
    // min-heap: heap[0] is the worst retained entry
    heap: Vec<(usize, f64)>,
}

// Total order used by the heap: worse entries are "less".
fn worse(a: (usize, f64), b: (usize, f64)) -> bool {
    match a.1.total_cmp(&b.1) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => a.0 > b.0,
    }
}

impl TopN {
    /// Collector retaining at most `capacity` entries.
    ///
    /// A zero-capacity collector accepts nothing and stays empty.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Offer `(row, score)`. Returns whether the entry was retained.
    ///
    /// Below capacity every offer is retained; at capacity the entry replaces
    /// the current minimum only if `score` strictly exceeds it.
    pub fn add(&mut self, row: usize, score: f64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() < self.capacity {
            self.heap.push((row, score));
            self.sift_up(self.heap.len() - 1);
            return true;
        }
        if score > self.heap[0].1 {
            self.heap[0] = (row, score);
            self.sift_down(0);
            return true;
        }
        false
    }

    /// The worst retained `(row, score)`, without removal.
    #[must_use]
    pub fn peek(&self) -> Option<(usize, f64)> {
        self.heap.first().copied()
    }

    /// Whether any entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the collector holds `capacity` entries.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() == self.capacity
    }

    /// Maximum number of entries this collector retains.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consume the collector, yielding entries in descending score order,
    /// ties broken by ascending row index.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<(usize, f64)> {
        let mut entries = self.heap;
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if worse(self.heap[i], self.heap[parent]) {
                self.heap.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;
            if left < self.heap.len() && worse(self.heap[left], self.heap[smallest]) {
                smallest = left;
            }
            if right < self.heap.len() && worse(self.heap[right], self.heap[smallest]) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}

//! Generic min-heap with pluggable membership index. Component G.
//!
//! Ported from spec.md §4.G. A binary min-heap ordered on a priority `P`
//! (`P: PartialOrd`), storing elements `E` alongside their priority. The
//! [`MembershipIndex`] plugged in as `Ix` is what lets [`Heap::update`] find
//! an element's current slot in O(1)/O(log n) instead of a linear scan,
//! which is what makes Dijkstra- and Prim-style decrease-key practical.

use crate::heap::index::MembershipIndex;

/// A binary min-heap over `(priority, element)` pairs.
///
/// `Ix` is the plugged-in [`MembershipIndex`] that tracks which slot each
/// live element currently occupies, kept in sync on every swap.
pub struct Heap<P, E, Ix> {
    priorities: Vec<P>,
    elts: Vec<E>,
    index: Ix,
}

impl<P, E, Ix> Heap<P, E, Ix>
where
    P: PartialOrd,
    Ix: MembershipIndex<E>,
{
    /// Creates an empty heap backed by the given membership index.
    pub fn new(index: Ix) -> Self {
        Heap {
            priorities: Vec::new(),
            elts: Vec::new(),
            index,
        }
    }

    /// Creates an empty heap with room for at least `capacity` elements
    /// without reallocating.
    pub fn with_capacity(capacity: usize, index: Ix) -> Self {
        Heap {
            priorities: Vec::with_capacity(capacity),
            elts: Vec::with_capacity(capacity),
            index,
        }
    }

    /// Number of elements currently in the heap.
    pub fn len(&self) -> usize {
        self.elts.len()
    }

    /// `true` if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elts.is_empty()
    }

    /// Returns the minimum-priority element without removing it.
    pub fn peek(&self) -> Option<(&P, &E)> {
        self.priorities.first().zip(self.elts.first())
    }

    /// Returns `elt`'s current priority, if it is present in the heap.
    pub fn priority_of(&self, elt: &E) -> Option<&P> {
        self.index.search(elt).map(|slot| &self.priorities[slot])
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.priorities.swap(a, b);
        self.elts.swap(a, b);
        self.index.insert(&self.elts[a], a);
        self.index.insert(&self.elts[b], b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.priorities[i] < self.priorities[parent] {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elts.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;
            if left < n && self.priorities[left] < self.priorities[smallest] {
                smallest = left;
            }
            if right < n && self.priorities[right] < self.priorities[smallest] {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    /// Inserts `elt` with priority `p`.
    pub fn push(&mut self, p: P, elt: E) {
        let slot = self.elts.len();
        self.priorities.push(p);
        self.elts.push(elt);
        self.index.insert(&self.elts[slot], slot);
        self.sift_up(slot);
    }

    /// Removes and returns the minimum-priority `(priority, element)` pair.
    pub fn pop(&mut self) -> Option<(P, E)> {
        if self.elts.is_empty() {
            return None;
        }
        let last = self.elts.len() - 1;
        self.swap(0, last);
        let p = self.priorities.pop().unwrap();
        let e = self.elts.pop().unwrap();
        self.index.remove(&e);
        if !self.elts.is_empty() {
            self.sift_down(0);
        }
        Some((p, e))
    }

    /// Lowers `elt`'s priority to `new_p` and restores heap order.
    ///
    /// # Panics
    ///
    /// Panics if `elt` is not currently in the heap, or if `new_p` is not
    /// lower than its current priority — this mirrors spec.md's
    /// decrease-key-only contract; use [`Heap::push`] to insert an element
    /// that has never been seen before.
    pub fn update(&mut self, elt: &E, new_p: P) {
        let slot = self
            .index
            .search(elt)
            .expect("update called on an element not present in the heap");
        assert!(
            new_p < self.priorities[slot],
            "update must strictly decrease the key"
        );
        self.priorities[slot] = new_p;
        self.sift_up(slot);
    }

    /// Returns `true` if `elt` is currently present in the heap.
    pub fn contains(&self, elt: &E) -> bool {
        self.index.search(elt).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::index::DenseIndex;

    fn dense_heap(n: usize) -> Heap<u64, usize, DenseIndex> {
        Heap::new(DenseIndex::new(n))
    }

    #[test]
    fn push_pop_yields_ascending_priority_order() {
        let mut h = dense_heap(10);
        h.push(5, 0);
        h.push(1, 1);
        h.push(3, 2);
        h.push(2, 3);
        let mut out = Vec::new();
        while let Some((p, e)) = h.pop() {
            out.push((p, e));
        }
        assert_eq!(out, vec![(1, 1), (2, 3), (3, 2), (5, 0)]);
    }

    #[test]
    fn update_decreases_key_and_reorders() {
        let mut h = dense_heap(5);
        h.push(10, 0);
        h.push(20, 1);
        h.push(30, 2);
        h.update(&2, 1);
        assert_eq!(h.peek(), Some((&1, &2)));
    }

    #[test]
    fn contains_reflects_membership() {
        let mut h = dense_heap(5);
        h.push(1, 0);
        assert!(h.contains(&0));
        assert!(!h.contains(&1));
        h.pop();
        assert!(!h.contains(&0));
    }

    #[test]
    #[should_panic(expected = "not present")]
    fn update_on_absent_element_panics() {
        let mut h = dense_heap(5);
        h.push(1, 0);
        h.update(&99, 0);
    }

    #[test]
    fn many_pushes_preserve_heap_order() {
        let mut h = dense_heap(200);
        for i in (0..200u64).rev() {
            h.push(i, i as usize);
        }
        let mut last = None;
        while let Some((p, _)) = h.pop() {
            if let Some(prev) = last {
                assert!(p >= prev);
            }
            last = Some(p);
        }
    }
}

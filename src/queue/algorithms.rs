use crate::queue::Queue;
use std::ffi::CStr;

use self::sort::move_node;

mod sort;

impl Queue {
    /// Delete the middle element of the queue: for *n* elements, the one
    /// at index ⌊*n* / 2⌋ counting from the head (zero-based). With six
    /// elements, the element at index 3 is deleted.
    ///
    /// The middle is located with a slow/fast two-pointer walk: both
    /// pointers start at the sentinel, the fast one advances two links per
    /// step and the slow one advances one, until the fast pointer runs out
    /// of ring. The element is unlinked *and* released.
    ///
    /// Returns `false` if the queue is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for text in ["0", "1", "2", "3", "4", "5"] {
    ///     queue.push_back(text).unwrap();
    /// }
    ///
    /// assert!(queue.delete_middle());
    /// let remaining: Vec<_> = queue.iter().map(|v| v.to_str().unwrap()).collect();
    /// assert_eq!(remaining, ["0", "1", "2", "4", "5"]);
    /// ```
    pub fn delete_middle(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let ghost = self.ghost_node();
        let (mut slow, mut fast) = (ghost, ghost);
        unsafe {
            while fast.as_ref().next != ghost && fast.as_ref().next.as_ref().next != ghost {
                slow = slow.as_ref().next;
                fast = fast.as_ref().next.as_ref().next;
            }
            let middle = slow.as_ref().next;
            // SAFETY: the queue is non-empty, so `slow.next` is a real
            // element node of this ring.
            drop(self.detach_node(middle));
        }
        true
    }

    /// Delete every element whose string occurs more than once in the
    /// queue, keeping only the values that appear exactly once.
    ///
    /// The queue must already be sorted ascending (for example by
    /// [`sort`](Queue::sort)); this is the caller's responsibility and is
    /// not checked. On an unsorted queue the pass still terminates and
    /// only removes runs of adjacent equal values, but which values
    /// survive is unspecified.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, in a single
    /// forward pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for text in ["a", "a", "b", "c", "c"] {
    ///     queue.push_back(text).unwrap();
    /// }
    ///
    /// queue.delete_duplicates();
    /// assert_eq!(queue.len(), 1);
    /// assert_eq!(queue.front().unwrap().to_bytes(), b"b");
    /// ```
    pub fn delete_duplicates(&mut self) {
        let ghost = self.ghost_node();
        let mut cur = self.front_node();
        let mut run_tail = false;
        while cur != ghost {
            // SAFETY: `cur` is a real element node of this ring; its
            // `next` link is read before the node is detached.
            unsafe {
                let next = cur.as_ref().next;
                let equals_next = next != ghost
                    && cur.as_ref().element.value() == next.as_ref().element.value();
                if equals_next || run_tail {
                    drop(self.detach_node(cur));
                }
                run_tail = equals_next;
                cur = next;
            }
        }
    }

    /// Swap each disjoint pair of adjacent elements: positions 0 and 1,
    /// 2 and 3, and so on. With an odd number of elements, the last one
    /// stays in place.
    ///
    /// Only links move; the elements themselves are not copied, so node
    /// identity is preserved. No-op on a queue with fewer than two
    /// elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for text in ["1", "2", "3", "4", "5"] {
    ///     queue.push_back(text).unwrap();
    /// }
    ///
    /// queue.swap_pairs();
    /// let swapped: Vec<_> = queue.iter().map(|v| v.to_str().unwrap()).collect();
    /// assert_eq!(swapped, ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn swap_pairs(&mut self) {
        if self.len < 2 {
            return;
        }
        let ghost = self.ghost_node();
        let mut cur = self.front_node();
        unsafe {
            while cur != ghost && cur.as_ref().next != ghost {
                let next = cur.as_ref().next;
                // Move `cur` to right after its successor; the pair swaps
                // in place and `cur.next` becomes the head of the next pair.
                move_node(cur, next.as_ref().next);
                cur = cur.as_ref().next;
            }
        }
    }

    /// Reverse the order of the elements in place.
    ///
    /// One pass around the ring swaps the `next` and `prev` links of every
    /// node, the sentinel included. No allocation, no release, and no
    /// element moves; only the ring order changes. No-op on a queue with
    /// fewer than two elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for text in ["a", "b", "c"] {
    ///     queue.push_back(text).unwrap();
    /// }
    ///
    /// queue.reverse();
    /// let reversed: Vec<_> = queue.iter().map(|v| v.to_str().unwrap()).collect();
    /// assert_eq!(reversed, ["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }
        let ghost = self.ghost_node();
        let mut cur = ghost;
        loop {
            // SAFETY: every node of the ring is live; after the swap, the
            // old `next` link is found in `prev`.
            unsafe {
                let node = cur.as_mut();
                std::mem::swap(&mut node.next, &mut node.prev);
                cur = node.prev;
            }
            if cur == ghost {
                break;
            }
        }
    }

    /// Returns `true` if the queue contains a string equal to the given
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    /// use std::ffi::CString;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("a").unwrap();
    ///
    /// let a = CString::new("a").unwrap();
    /// let b = CString::new("b").unwrap();
    /// assert!(queue.contains(&a));
    /// assert!(!queue.contains(&b));
    /// ```
    pub fn contains(&self, value: &CStr) -> bool {
        self.iter().any(|v| v == value)
    }
}

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl Eq for Queue {}

impl Clone for Queue {
    fn clone(&self) -> Self {
        self.iter().map(CStr::to_owned).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::queue::testing::{queue_of, values};
    use crate::queue::Queue;

    #[test]
    fn delete_middle_zero_indexed_floor() {
        let mut queue = queue_of(&["0", "1", "2", "3", "4", "5"]);
        assert!(queue.delete_middle());
        assert_eq!(values(&queue), ["0", "1", "2", "4", "5"]);

        let mut queue = queue_of(&["0", "1", "2", "3", "4"]);
        assert!(queue.delete_middle());
        assert_eq!(values(&queue), ["0", "1", "3", "4"]);

        let mut queue = queue_of(&["0", "1"]);
        assert!(queue.delete_middle());
        assert_eq!(values(&queue), ["0"]);

        assert!(queue.delete_middle());
        assert!(queue.is_empty());
        assert!(!queue.delete_middle());
    }

    #[test]
    fn delete_duplicates_removes_whole_runs() {
        let mut queue = queue_of(&["a", "a", "b", "c", "c"]);
        queue.delete_duplicates();
        assert_eq!(values(&queue), ["b"]);

        let mut queue = queue_of(&["a", "a", "a", "a"]);
        queue.delete_duplicates();
        assert!(queue.is_empty());

        let mut queue = queue_of(&["a", "b", "c"]);
        queue.delete_duplicates();
        assert_eq!(values(&queue), ["a", "b", "c"]);

        let mut queue = queue_of(&["a", "b", "b", "b", "c"]);
        queue.delete_duplicates();
        assert_eq!(values(&queue), ["a", "c"]);

        let mut queue = Queue::new();
        queue.delete_duplicates();
        assert!(queue.is_empty());
    }

    #[test]
    fn swap_pairs_leaves_odd_tail() {
        let mut queue = queue_of(&["1", "2", "3", "4", "5"]);
        queue.swap_pairs();
        assert_eq!(values(&queue), ["2", "1", "4", "3", "5"]);

        let mut queue = queue_of(&["1", "2", "3", "4"]);
        queue.swap_pairs();
        assert_eq!(values(&queue), ["2", "1", "4", "3"]);

        let mut queue = queue_of(&["1"]);
        queue.swap_pairs();
        assert_eq!(values(&queue), ["1"]);

        let mut queue = Queue::new();
        queue.swap_pairs();
        assert!(queue.is_empty());
    }

    #[test]
    fn reverse_reverses_in_place() {
        let mut queue = queue_of(&["a", "b", "c", "d"]);
        queue.reverse();
        assert_eq!(values(&queue), ["d", "c", "b", "a"]);
        assert_eq!(queue.len(), 4);

        let mut queue = queue_of(&["a"]);
        queue.reverse();
        assert_eq!(values(&queue), ["a"]);

        let mut queue = Queue::new();
        queue.reverse();
        assert!(queue.is_empty());
    }

    #[test]
    fn reverse_is_an_involution() {
        for items in [
            &[][..],
            &["a"][..],
            &["a", "b"][..],
            &["c", "a", "b", "b", "e"][..],
        ] {
            let mut queue = queue_of(items);
            let original = queue.clone();
            queue.reverse();
            queue.reverse();
            assert_eq!(queue, original);
        }
    }

    #[test]
    fn reverse_then_pop_both_ends() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.reverse();
        assert_eq!(queue.pop_front().unwrap().value().to_bytes(), b"c");
        assert_eq!(queue.pop_back().unwrap().value().to_bytes(), b"a");
        assert_eq!(values(&queue), ["b"]);
    }

    #[test]
    fn clone_and_eq() {
        let queue = queue_of(&["a", "b"]);
        let cloned = queue.clone();
        assert_eq!(queue, cloned);
        assert_ne!(queue, queue_of(&["a"]));
        assert_ne!(queue, queue_of(&["b", "a"]));
    }
}

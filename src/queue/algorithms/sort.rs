use crate::queue::element::Element;
use crate::queue::{connect, Node, Queue};
use std::ptr::NonNull;

/// Ranges at or below this length are finished by the insertion sort;
/// stability and the *O*(*n* log *n*) bound are unaffected.
const INSERTION_SORT_THRESHOLD: usize = 8;

impl Queue {
    /// Sort the elements ascending by byte-wise string comparison.
    ///
    /// This sort is stable (i.e., does not reorder equal elements) and
    /// in-place: only links move, never string payloads. No-op on a queue
    /// with fewer than two elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* log *n*) time and *O*(1)
    /// memory.
    ///
    /// # Current Implementation
    ///
    /// A merge sort over the ring: the range is bisected with a slow/fast
    /// two-pointer walk, both halves are sorted recursively, and the
    /// sorted halves are merged by splicing runs of nodes in front of
    /// their insertion points. There is no extra temporary storage during
    /// merging.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// for text in ["pear", "apple", "quince", "fig"] {
    ///     queue.push_back(text).unwrap();
    /// }
    ///
    /// queue.sort();
    /// let sorted: Vec<_> = queue.iter().map(|v| v.to_str().unwrap()).collect();
    /// assert_eq!(sorted, ["apple", "fig", "pear", "quince"]);
    /// ```
    pub fn sort(&mut self) {
        if self.len < 2 {
            return;
        }
        let (start, end) = (self.front_node(), self.ghost_node());
        if self.len <= INSERTION_SORT_THRESHOLD {
            unsafe { insertion_sort_range(start, end) };
        } else {
            unsafe { merge_sort_range(start, end) };
        }
    }
}

/// Strict byte-wise order on the stored strings. Every comparison in the
/// sort is this strict `less`, so equal elements never move past each
/// other.
fn less(a: &Element, b: &Element) -> bool {
    a.value() < b.value()
}

/// Find the midpoint of `start..end` with a slow/fast two-pointer walk
/// (the fast pointer advances two links per step, the slow one link every
/// other step), and return it together with the range length.
unsafe fn mid_of_range(
    mut start: NonNull<Node<Element>>,
    end: NonNull<Node<Element>>,
) -> (NonNull<Node<Element>>, usize) {
    let mut mid = start;
    let mut len = 0;
    while start != end {
        len += 1;
        start = start.as_ref().next;
        if start != end {
            len += 1;
            start = start.as_ref().next;
            mid = mid.as_ref().next;
        }
    }
    (mid, len)
}

/// Sort the range `start..end` and return its new first node.
unsafe fn merge_sort_range(
    mut start: NonNull<Node<Element>>,
    end: NonNull<Node<Element>>,
) -> NonNull<Node<Element>> {
    let (mut mid, len) = mid_of_range(start, end);
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort_range(start, end);
    }

    if start != mid && start.as_ref().next != mid {
        start = merge_sort_range(start, mid);
    }
    if mid != end && mid.as_ref().next != end {
        mid = merge_sort_range(mid, end);
    }

    if start != mid && mid != end {
        start = merge_range(start, mid, end);
    }
    start
}

/// Merge the two sorted sub-ranges `start..mid` and `mid..end` into one
/// sorted range, and return its new first node.
unsafe fn merge_range(
    mut start: NonNull<Node<Element>>,
    mid: NonNull<Node<Element>>,
    end: NonNull<Node<Element>>,
) -> NonNull<Node<Element>> {
    // The range is logically partitioned into the merged range
    // `start..mid` and the unmerged range `mid..end`, both internally
    // sorted. Nodes of the unmerged range are then spliced into the
    // merged range, a maximal run at a time.
    let (mut merged, merged_back, mut to_merge) = (start, mid.as_ref().prev, mid);
    // If the back of the merged range <= the front of the unmerged range,
    // the whole range is already sorted and the merge stops here.
    while to_merge != end && less(&to_merge.as_ref().element, &merged_back.as_ref().element) {
        // Find the first `merged` position whose element is > the current
        // node to merge.
        while merged != to_merge && !less(&to_merge.as_ref().element, &merged.as_ref().element) {
            merged = merged.as_ref().next;
        }
        if merged == to_merge {
            break;
        }

        // Extend to the maximal run `to_merge..next_to_merge` of unmerged
        // nodes that all sort before `*merged`.
        let mut next_to_merge = to_merge.as_ref().next;
        while next_to_merge != end
            && less(&next_to_merge.as_ref().element, &merged.as_ref().element)
        {
            next_to_merge = next_to_merge.as_ref().next;
        }
        if merged == start {
            start = to_merge;
        }
        // Splice the whole run in front of `merged` in O(1).
        move_nodes(to_merge, next_to_merge.as_ref().prev, merged);
        to_merge = next_to_merge;
    }
    start
}

/// Sort the range `start..end` by insertion, and return its new first
/// node. Stable: a node only moves when strictly less than the one it
/// passes.
unsafe fn insertion_sort_range(
    mut start: NonNull<Node<Element>>,
    end: NonNull<Node<Element>>,
) -> NonNull<Node<Element>> {
    let (mut sorted_back, mut to_sort) = (start, start.as_ref().next);
    loop {
        // While the back of the sorted range <= the current node, the
        // node is already in place; move on.
        while to_sort != end && !less(&to_sort.as_ref().element, &sorted_back.as_ref().element) {
            sorted_back = to_sort;
            to_sort = to_sort.as_ref().next;
        }
        if to_sort == end {
            break;
        }
        // Find the first `sorted` position whose element is > the current
        // node to sort.
        let mut sorted = start;
        while sorted != to_sort && !less(&to_sort.as_ref().element, &sorted.as_ref().element) {
            sorted = sorted.as_ref().next;
        }
        if sorted == start {
            start = to_sort;
        }
        let next = to_sort.as_ref().next;
        // Move the node in front of `sorted`.
        move_node(std::mem::replace(&mut to_sort, next), sorted);
    }
    start
}

/// Move the single node `from` in front of `to`.
pub(crate) unsafe fn move_node(from: NonNull<Node<Element>>, to: NonNull<Node<Element>>) {
    move_nodes(from, from, to);
}

/// Move the run `from_front..=from_back` in front of `to`, closing the
/// ring over the gap it leaves. Three splices, O(1).
pub(crate) unsafe fn move_nodes(
    from_front: NonNull<Node<Element>>,
    from_back: NonNull<Node<Element>>,
    to: NonNull<Node<Element>>,
) {
    connect(from_front.as_ref().prev, from_back.as_ref().next);
    connect(to.as_ref().prev, from_front);
    connect(from_back, to);
}

#[cfg(test)]
mod tests {
    use crate::queue::element::Element;
    use crate::queue::testing::{queue_of, values};
    use crate::queue::{Node, Queue};
    use rand::distributions::Alphanumeric;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::ptr::NonNull;

    /// Walk the ring and collect each element node's address together
    /// with its value. Node addresses are stable across sorting, so they
    /// witness the order of equal elements.
    fn node_addrs(queue: &Queue) -> Vec<(NonNull<Node<Element>>, String)> {
        let ghost = queue.ghost_node();
        let mut out = Vec::new();
        let mut cur = queue.front_node();
        while cur != ghost {
            let node = unsafe { cur.as_ref() };
            out.push((cur, node.element.value().to_str().unwrap().to_owned()));
            cur = node.next;
        }
        out
    }

    #[test]
    fn sort_small_queues() {
        let mut queue = Queue::new();
        queue.sort();
        assert!(queue.is_empty());

        let mut queue = queue_of(&["z"]);
        queue.sort();
        assert_eq!(values(&queue), ["z"]);

        let mut queue = queue_of(&["b", "a"]);
        queue.sort();
        assert_eq!(values(&queue), ["a", "b"]);

        let mut queue = queue_of(&["pear", "apple", "quince", "fig", "date"]);
        queue.sort();
        assert_eq!(values(&queue), ["apple", "date", "fig", "pear", "quince"]);
    }

    #[test]
    fn sort_crosses_the_insertion_threshold() {
        // 12 elements force the merge path; 8 or fewer take the
        // insertion path. Both must agree with a reference sort.
        for n in [3usize, 8, 9, 12, 33] {
            let items: Vec<String> = (0..n).map(|i| format!("{}", (i * 7) % n)).collect();
            let refs: Vec<&str> = items.iter().map(String::as_str).collect();
            let mut queue = queue_of(&refs);
            queue.sort();

            let mut expected = items.clone();
            expected.sort();
            assert_eq!(values(&queue), expected);
        }
    }

    #[test]
    fn sort_is_idempotent() {
        let mut queue = queue_of(&["c", "a", "b", "a"]);
        queue.sort();
        let once = values(&queue);
        queue.sort();
        assert_eq!(values(&queue), once);
    }

    #[test]
    fn sort_is_stable() {
        // Equal strings are indistinguishable by value, so stability is
        // witnessed by node addresses, which sorting never changes.
        let mut queue = queue_of(&["b", "a", "b"]);
        let before = node_addrs(&queue);
        let (first_b, second_b) = (before[0].0, before[2].0);

        queue.sort();
        let after = node_addrs(&queue);
        assert_eq!(values(&queue), ["a", "b", "b"]);
        assert_eq!(after[1].0, first_b);
        assert_eq!(after[2].0, second_b);
    }

    #[test]
    fn sort_all_equal_preserves_order() {
        let mut queue = queue_of(&["x", "x", "x", "x", "x"]);
        let before = node_addrs(&queue);
        queue.sort();
        let after = node_addrs(&queue);
        assert_eq!(before, after);
    }

    #[test]
    fn sort_sorted_input() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        queue.sort();
        assert_eq!(
            values(&queue),
            ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]
        );
    }

    #[test]
    fn sort_matches_reference_on_random_strings() {
        let mut rng = StdRng::seed_from_u64(0x0051_c357);
        let words: Vec<String> = (0..1000)
            .map(|_| {
                let len = rng.gen_range(0..12);
                (&mut rng)
                    .sample_iter(&Alphanumeric)
                    .take(len)
                    .map(char::from)
                    .collect()
            })
            .collect();

        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let mut queue = queue_of(&refs);
        queue.sort();

        let mut expected = words.clone();
        expected.sort();
        assert_eq!(queue.len(), 1000);
        assert_eq!(values(&queue), expected);
    }

    #[test]
    fn sort_then_delete_duplicates() {
        let mut queue = queue_of(&["c", "a", "b", "a", "c", "d"]);
        queue.sort();
        queue.delete_duplicates();
        assert_eq!(values(&queue), ["b", "d"]);
    }
}

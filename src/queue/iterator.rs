use crate::queue::element::Element;
use crate::queue::{Node, Queue};
use std::ffi::{CStr, CString};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the strings of a `Queue`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the ring, where `start` is inclusive and `end` is not.
///
/// Though the `Iter` does not hold a reference to the queue, it actually
/// *borrows* (immutably) from it, so a phantom marker of `&'a Queue` is
/// added to protect the queue from being written.
#[derive(Clone)]
pub struct Iter<'a> {
    start: NonNull<Node<Element>>,
    end: NonNull<Node<Element>>,
    len: usize,
    _marker: PhantomData<&'a Queue>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(queue: &'a Queue) -> Self {
        let start = queue.front_node();
        let end = queue.ghost_node();
        let len = queue.len();
        let _marker = PhantomData;
        Self {
            start,
            end,
            len,
            _marker,
        }
    }
}

impl<'a> fmt::Debug for Iter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CStr;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of the ring, and it
        // is not empty here, so `start` is a real element node.
        let current = unsafe { self.start.as_ref() };
        self.start = current.next;
        self.len -= 1;
        Some(current.element.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of the ring, and it
        // is not empty here, so `end.prev` is a real element node.
        self.end = unsafe { self.end.as_ref().prev };
        let current = unsafe { self.end.as_ref() };
        self.len -= 1;
        Some(current.element.value())
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// An owning iterator over the elements of a `Queue`.
///
/// This `struct` is created by the [`into_iter`] method on [`Queue`]
/// (provided by the `IntoIterator` trait). Dropping it releases every
/// element not yet yielded.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter {
    queue: Queue,
}

impl fmt::Debug for IntoIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("queue", &self.queue)
            .finish()
    }
}

impl Iterator for IntoIter {
    type Item = Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.queue.pop_back()
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl IntoIterator for Queue {
    type Item = Element;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a CStr;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<CString> for Queue {
    fn from_iter<I: IntoIterator<Item = CString>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl Extend<CString> for Queue {
    fn extend<I: IntoIterator<Item = CString>>(&mut self, iter: I) {
        iter.into_iter()
            .for_each(|value| self.push_back_value(value));
    }
}

unsafe impl Send for Iter<'_> {}

unsafe impl Sync for Iter<'_> {}

#[cfg(test)]
mod tests {
    use crate::queue::testing::queue_of;
    use crate::queue::Queue;
    use std::ffi::CString;
    use std::iter::FromIterator;

    #[test]
    fn iter_forward_and_backward() {
        let queue = queue_of(&["a", "b", "c"]);

        let mut iter = queue.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next().unwrap().to_bytes(), b"a");
        assert_eq!(iter.next_back().unwrap().to_bytes(), b"c");
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next().unwrap().to_bytes(), b"b");
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn iter_empty() {
        let queue = Queue::new();
        let mut iter = queue.iter();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn into_iter_drains_front_to_back() {
        let queue = queue_of(&["a", "b", "c"]);
        let drained: Vec<CString> = queue.into_iter().map(|e| e.into_value()).collect();
        assert_eq!(
            drained,
            vec![
                CString::new("a").unwrap(),
                CString::new("b").unwrap(),
                CString::new("c").unwrap(),
            ]
        );
    }

    #[test]
    fn from_iterator_round_trip() {
        let source = vec![
            CString::new("x").unwrap(),
            CString::new("y").unwrap(),
        ];
        let queue = Queue::from_iter(source.clone());
        assert_eq!(queue.len(), 2);
        let drained: Vec<CString> = queue.into_iter().map(|e| e.into_value()).collect();
        assert_eq!(drained, source);
    }
}

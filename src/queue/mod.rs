use std::ffi::{CStr, CString, NulError};
use std::fmt::{Debug, Formatter};
use std::ptr::NonNull;

use crate::queue::element::Element;
use crate::queue::iterator::Iter;

pub mod element;
pub mod iterator;

mod algorithms;

/// The `Queue` is a queue of owned strings, implemented as a cyclic
/// doubly-linked list with a payload-less sentinel node.
///
/// Insertion and removal at either end compute in *O*(1) time. The
/// structural algorithms ([`delete_middle`], [`delete_duplicates`],
/// [`swap_pairs`], [`reverse`], [`sort`]) rearrange links only and never
/// copy string payloads.
///
/// The `Queue` contains:
/// - the owned `ghost` sentinel node, whose `next`/`prev` links close the
///   ring (`ghost.next` is the first element, `ghost.prev` the last; an
///   empty queue has the sentinel linked to itself);
/// - a length field `len`, maintained on every attach and detach.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of ring nodes, both inclusive;
/// - `start..end`: a half-open range of ring nodes, left inclusive and
///   right exclusive (probably the ghost node).
///
/// [`delete_middle`]: Queue::delete_middle
/// [`delete_duplicates`]: Queue::delete_duplicates
/// [`swap_pairs`]: Queue::swap_pairs
/// [`reverse`]: Queue::reverse
/// [`sort`]: Queue::sort
pub struct Queue {
    ghost: Box<Node<Erased>>,
    /// the number of linked elements
    pub(crate) len: usize,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// Payload slot of the sentinel. `Node<Erased>` and `Node<Element>` share
/// their link layout (`#[repr(C)]`, links first), so the sentinel casts to
/// `NonNull<Node<Element>>` as long as its payload is never read.
struct Erased;

/// A run of nodes detached from the ring, used for *O*(1) splicing.
///
/// While detached, reading `front.prev` and `back.next` is invalid.
pub(crate) struct DetachedNodes {
    pub(crate) front: NonNull<Node<Element>>,
    pub(crate) back: NonNull<Node<Element>>,
    pub(crate) len: usize,
}

/// Link `prev` and `next` to each other.
///
/// It is unsafe because both pointers must refer to live ring nodes.
pub(crate) unsafe fn connect(
    mut prev: NonNull<Node<Element>>,
    mut next: NonNull<Node<Element>>,
) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

// private methods
impl Queue {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<Element>> {
        NonNull::from(self.ghost.as_ref()).cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<Element>> {
        // SAFETY: `ghost.next` is always valid (either the ghost itself,
        // or the first element of the ring).
        unsafe { self.ghost_node().as_ref().next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<Element>> {
        // SAFETY: `ghost.prev` is always valid (either the ghost itself,
        // or the last element of the ring).
        unsafe { self.ghost_node().as_ref().prev }
    }

    /// Detach a single node `node` from the ring, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to
    /// the ring, or whether it is the ghost node.
    ///
    /// After the call, the box owns the node; its link fields are stale
    /// and must not be read again.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<Element>>) -> Box<Node<Element>> {
        self.len -= 1;
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node
    }

    /// Attach a single node `node` to the ring, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the ring, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<Element>>,
        next: NonNull<Node<Element>>,
        node: NonNull<Node<Element>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Detach the range of nodes `front..=back` from the ring, closing the
    /// ring over the gap, and return the detached run.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a
    /// valid range of the ring (`front` must not be at the right of
    /// `back`), or whether `len` is its length.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<Element>>,
        back: NonNull<Node<Element>>,
        len: usize,
    ) -> DetachedNodes {
        self.len -= len;
        connect(front.as_ref().prev, back.as_ref().next);
        DetachedNodes::new(front, back, len)
    }

    /// Attach a detached run to the ring, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the ring, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<Element>>,
        next: NonNull<Node<Element>>,
        detached: DetachedNodes,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        self.len += detached.len;
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, detached.front);
            assert_adjacent(detached.back, next);
        }
    }

    /// Detach every element from the ring, or return `None` if the queue
    /// is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a
    /// valid range whenever the queue is non-empty.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node(), self.len)) }
    }

    fn push_node_front(&mut self, node: NonNull<Node<Element>>) {
        // SAFETY: the ghost node and the front node are valid adjacent
        // ring nodes, so it is safe.
        unsafe { self.attach_node(self.ghost_node(), self.front_node(), node) };
    }

    fn push_node_back(&mut self, node: NonNull<Node<Element>>) {
        // SAFETY: the back node and the ghost node are valid adjacent
        // ring nodes, so it is safe.
        unsafe { self.attach_node(self.back_node(), self.ghost_node(), node) };
    }
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// # Examples
    /// ```
    /// use ringq::Queue;
    /// let queue = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let ghost = new_ghost();
        Self { ghost, len: 0 }
    }

    /// Returns `true` if the `Queue` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements in the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time; the length is
    /// maintained on every attach and detach.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.len(), 0);
    ///
    /// queue.push_back("a").unwrap();
    /// queue.push_back("b").unwrap();
    /// assert_eq!(queue.len(), 2);
    ///
    /// queue.pop_front();
    /// assert_eq!(queue.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes and releases all elements of the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front string, or `None` if the queue
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.front(), None);
    ///
    /// queue.push_front("first").unwrap();
    /// assert_eq!(queue.front().unwrap().to_bytes(), b"first");
    /// ```
    pub fn front(&self) -> Option<&CStr> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is non-empty, so the front node is a real
        // element node and its payload is initialized.
        Some(unsafe { &self.front_node().as_ref().element }.value())
    }

    /// Provides a reference to the back string, or `None` if the queue
    /// is empty.
    pub fn back(&self) -> Option<&CStr> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is non-empty, so the back node is a real
        // element node and its payload is initialized.
        Some(unsafe { &self.back_node().as_ref().element }.value())
    }

    /// Insert a copy of `text` at the head of the queue.
    ///
    /// The text is copied into owned, null-terminated storage before any
    /// node is linked, so a failed insert leaves the queue structurally
    /// unchanged. Fails if `text` contains an interior NUL byte.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_front("b").unwrap();
    /// queue.push_front("a").unwrap();
    /// assert_eq!(queue.front().unwrap().to_bytes(), b"a");
    ///
    /// assert!(queue.push_front("bad\0text").is_err());
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn push_front(&mut self, text: &str) -> Result<(), NulError> {
        let value = CString::new(text)?;
        self.push_front_value(value);
        Ok(())
    }

    /// Insert a copy of `text` at the tail of the queue.
    ///
    /// The text is copied into owned, null-terminated storage before any
    /// node is linked, so a failed insert leaves the queue structurally
    /// unchanged. Fails if `text` contains an interior NUL byte.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, text: &str) -> Result<(), NulError> {
        let value = CString::new(text)?;
        self.push_back_value(value);
        Ok(())
    }

    /// Insert an already-owned string at the head of the queue.
    ///
    /// Infallible counterpart of [`push_front`](Queue::push_front).
    pub fn push_front_value(&mut self, value: CString) {
        let node = Node::new_detached(Element::new(value));
        self.push_node_front(node);
    }

    /// Insert an already-owned string at the tail of the queue.
    ///
    /// Infallible counterpart of [`push_back`](Queue::push_back).
    pub fn push_back_value(&mut self, value: CString) {
        let node = Node::new_detached(Element::new(value));
        self.push_node_back(node);
    }

    /// Unlink the first element and return it, or `None` if the queue is
    /// empty.
    ///
    /// The element is *removed*, not deleted: ownership transfers to the
    /// caller, and the string is released only when the returned
    /// [`Element`] is dropped.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert!(queue.pop_front().is_none());
    ///
    /// queue.push_back("a").unwrap();
    /// queue.push_back("b").unwrap();
    /// assert_eq!(queue.pop_front().unwrap().value().to_bytes(), b"a");
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn pop_front(&mut self) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is non-empty, so the front node is a real
        // element node of this ring.
        let node = unsafe { self.detach_node(self.front_node()) };
        Some(node.into_element())
    }

    /// Unlink the last element and return it, or `None` if the queue is
    /// empty.
    ///
    /// See [`pop_front`](Queue::pop_front) for the ownership contract.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the queue is non-empty, so the back node is a real
        // element node of this ring.
        let node = unsafe { self.detach_node(self.back_node()) };
        Some(node.into_element())
    }

    /// Unlink the first element, copy its string into `buf` (truncating
    /// to `buf.len() - 1` bytes plus a NUL terminator), and return the
    /// element, or return `None` if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("dolphin").unwrap();
    ///
    /// let mut buf = [0u8; 4];
    /// let element = queue.pop_front_into(&mut buf).unwrap();
    /// assert_eq!(&buf, b"dol\0");
    /// assert_eq!(element.value().to_bytes(), b"dolphin");
    /// ```
    pub fn pop_front_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.pop_front()?;
        element.copy_to(buf);
        Some(element)
    }

    /// Unlink the last element, copy its string into `buf` (truncating to
    /// `buf.len() - 1` bytes plus a NUL terminator), and return the
    /// element, or return `None` if the queue is empty.
    pub fn pop_back_into(&mut self, buf: &mut [u8]) -> Option<Element> {
        let element = self.pop_back()?;
        element.copy_to(buf);
        Some(element)
    }

    /// Moves all elements from `other` to the end of the queue.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`.
    /// After this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut first = Queue::new();
    /// first.push_back("a").unwrap();
    ///
    /// let mut second = Queue::new();
    /// second.push_back("b").unwrap();
    /// second.push_back("c").unwrap();
    ///
    /// first.append(&mut second);
    ///
    /// let mut iter = first.iter();
    /// assert_eq!(iter.next().unwrap().to_bytes(), b"a");
    /// assert_eq!(iter.next().unwrap().to_bytes(), b"b");
    /// assert_eq!(iter.next().unwrap().to_bytes(), b"c");
    /// assert!(iter.next().is_none());
    ///
    /// assert!(second.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: `self.back_node()` and `self.ghost_node()` are valid
            // adjacent nodes of this ring, so it is safe.
            unsafe { self.attach_nodes(self.back_node(), self.ghost_node(), detached) }
        }
    }

    /// Provides a forward iterator over the stored strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("a").unwrap();
    /// queue.push_back("b").unwrap();
    ///
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next().unwrap().to_bytes(), b"a");
    /// assert_eq!(iter.next().unwrap().to_bytes(), b"b");
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Node<Element> {
    pub(crate) fn into_element(self: Box<Self>) -> Element {
        self.element
    }
}

impl<T> Node<T> {
    /// Create a node that is not yet linked into any ring. The link
    /// fields are dangling until the node is attached.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        })))
    }
}

impl DetachedNodes {
    /// It is unsafe because it must be guaranteed that `front..=back` is
    /// a valid detached range of length `len`.
    unsafe fn new(
        front: NonNull<Node<Element>>,
        back: NonNull<Node<Element>>,
        len: usize,
    ) -> Self {
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self { front, back, len }
    }
}

fn new_ghost() -> Box<Node<Erased>> {
    let ghost_ptr = Node::new_detached(Erased);
    // SAFETY: the pointer comes from `Box::leak` in `new_detached`; the
    // links are initialized to close the empty ring before the box is
    // handed out, and the `Erased` payload is never read.
    let mut ghost = unsafe { Box::from_raw(ghost_ptr.as_ptr()) };
    ghost.next = ghost_ptr;
    ghost.prev = ghost_ptr;
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent(prev: NonNull<Node<Element>>, next: NonNull<Node<Element>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl Send for Queue {}

unsafe impl Sync for Queue {}

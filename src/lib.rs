//! This crate provides a queue of owned, null-terminated strings,
//! implemented as a cyclic doubly-linked list.
//!
//! The [`Queue`] inserts and removes at both ends in constant time, and
//! carries a small set of structural algorithms (middle deletion,
//! duplicate-run removal, adjacent-pair swapping, in-place reversal, and
//! a stable in-place merge sort) that rearrange links only and never
//! copy string payloads.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use ringq::Queue;
//!
//! let mut queue = Queue::new();
//! queue.push_back("pear").unwrap();
//! queue.push_back("apple").unwrap();
//! queue.push_front("fig").unwrap();
//!
//! queue.sort(); // becomes [apple, fig, pear]
//! assert_eq!(queue.front().unwrap().to_bytes(), b"apple");
//!
//! let element = queue.pop_back().unwrap(); // ownership moves to the caller
//! assert_eq!(element.value().to_bytes(), b"pear");
//! assert_eq!(queue.len(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌───────────────────────────────────────────────────────────┐
//!          ↓                                          Ghost node       │
//!    ╔═══════════╗        ╔═══════════╗              ┌───────────┐     │
//!    ║   next    ║ ─────→ ║   next    ║ ─→ ┄┄ ─────→ │   next    │ ────┘
//!    ╟───────────╢        ╟───────────╢              ├───────────┤
//! ┌─ ║   prev    ║ ←───── ║   prev    ║ ←─ ┄┄ ←───── │   prev    │
//! │  ╟───────────╢        ╟───────────╢              ├───────────┤
//! │  ║  Element  ║        ║  Element  ║              ┊No payload ┊
//! │  ╚═══════════╝        ╚═══════════╝              └╌╌╌╌╌╌╌╌╌╌╌┘
//! │    Element 0             Element 1                   ↑   ↑
//! └──────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                              │
//! ║   ghost   ║ ─────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     Queue
//! ```
//!
//! The ghost node carries no payload and is never handed to a caller; it
//! only closes the ring, so the empty and non-empty queues share one
//! uniform representation (`ghost.next == ghost` if and only if the
//! queue is empty). Each [`Element`] owns exactly one heap-allocated
//! `CString`; removal unlinks the node and moves the element out to the
//! caller, while the delete operations unlink *and* release.
//!
//! # Iteration
//!
//! [`Queue::iter`] walks the stored strings front to back (double-ended
//! and fused); consuming the queue with `into_iter` drains it into owned
//! [`Element`]s.
//!
//! ```
//! use ringq::Queue;
//!
//! let mut queue = Queue::new();
//! queue.push_back("a").unwrap();
//! queue.push_back("b").unwrap();
//!
//! let mut iter = queue.iter();
//! assert_eq!(iter.next().unwrap().to_bytes(), b"a");
//! assert_eq!(iter.next_back().unwrap().to_bytes(), b"b");
//! assert_eq!(iter.next(), None);
//! ```

#[doc(inline)]
pub use queue::element::Element;
#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use queue::Queue;

pub mod queue;

use std::ffi::{CStr, CString};

/// A queue element: one owned, null-terminated string.
///
/// An `Element` is created by the insert operations of [`Queue`] and handed
/// back by the remove operations. While linked, the element lives inside a
/// ring node; removal moves it out, so the caller becomes its only owner
/// and dropping it releases the string. A second release is impossible by
/// construction.
///
/// [`Queue`]: crate::Queue
///
/// # Examples
///
/// ```
/// use ringq::Queue;
///
/// let mut queue = Queue::new();
/// queue.push_back("hello").unwrap();
///
/// let element = queue.pop_front().unwrap();
/// assert_eq!(element.value().to_bytes(), b"hello");
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    value: CString,
}

impl Element {
    pub(crate) fn new(value: CString) -> Self {
        Self { value }
    }

    /// Return the stored string.
    pub fn value(&self) -> &CStr {
        &self.value
    }

    /// Consume the element and return the stored string.
    pub fn into_value(self) -> CString {
        self.value
    }

    /// Copy the stored string into `buf`, truncating to `buf.len() - 1`
    /// bytes, and terminate it with a NUL byte. Returns the number of
    /// bytes copied, not counting the terminator.
    ///
    /// An empty buffer is left untouched and `0` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringq::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("dolphin").unwrap();
    ///
    /// let mut buf = [0xffu8; 4];
    /// let element = queue.pop_front().unwrap();
    /// assert_eq!(element.copy_to(&mut buf), 3);
    /// assert_eq!(&buf, b"dol\0");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let capacity = match buf.len().checked_sub(1) {
            Some(capacity) => capacity,
            None => return 0,
        };
        let bytes = self.value.to_bytes();
        let copied = bytes.len().min(capacity);
        buf[..copied].copy_from_slice(&bytes[..copied]);
        buf[copied] = 0;
        copied
    }
}

#[cfg(test)]
mod tests {
    use super::Element;
    use std::ffi::CString;

    fn element(text: &str) -> Element {
        Element::new(CString::new(text).unwrap())
    }

    #[test]
    fn copy_to_fits() {
        let mut buf = [0xffu8; 8];
        assert_eq!(element("abc").copy_to(&mut buf), 3);
        assert_eq!(&buf[..4], b"abc\0");
    }

    #[test]
    fn copy_to_truncates() {
        let mut buf = [0xffu8; 3];
        assert_eq!(element("abcdef").copy_to(&mut buf), 2);
        assert_eq!(&buf, b"ab\0");
    }

    #[test]
    fn copy_to_exact_boundary() {
        let mut buf = [0xffu8; 4];
        assert_eq!(element("abc").copy_to(&mut buf), 3);
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn copy_to_tiny_buffers() {
        let mut buf = [0xffu8; 1];
        assert_eq!(element("abc").copy_to(&mut buf), 0);
        assert_eq!(&buf, b"\0");

        let mut empty: [u8; 0] = [];
        assert_eq!(element("abc").copy_to(&mut empty), 0);
    }

    #[test]
    fn copy_to_empty_value() {
        let mut buf = [0xffu8; 4];
        assert_eq!(element("").copy_to(&mut buf), 0);
        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 0xff);
    }
}

use std::iter::FusedIterator;

/// Owning iterator over a point-in-time copy of a concurrent set.
///
/// The copy is taken under the set's read lock and the lock is released
/// before the first element is yielded. Later writes to the set are not
/// observed, and dropping the iterator early leaves nothing behind.
///
/// # Examples
///
/// ```rust
/// use setwise::concurrent::ConcurrentOrderedSet;
///
/// let set: ConcurrentOrderedSet<i32> = [1, 2, 3].into_iter().collect();
/// let snapshot = set.iter();
/// set.add(4);
///
/// assert_eq!(snapshot.collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    elements: std::vec::IntoIter<T>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(elements: Vec<T>) -> Self {
        Self {
            elements: elements.into_iter(),
        }
    }

    /// Returns the elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.elements.as_slice()
    }
}

impl<T> Iterator for Snapshot<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl<T> DoubleEndedIterator for Snapshot<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.elements.next_back()
    }
}

impl<T> ExactSizeIterator for Snapshot<T> {}

impl<T> FusedIterator for Snapshot<T> {}

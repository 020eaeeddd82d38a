//! Unordered set store.
//!
//! [`UnorderedStore`] keeps its elements densely packed in a `Vec` and lets
//! its equality strategy index them by slot. Removal swaps the last element
//! into the vacated slot, so the buffer never holds gaps and iteration order
//! is unspecified.
//!
//! # Time Complexity
//!
//! | Operation      | `Intrinsic`  | `Structural` |
//! |----------------|--------------|--------------|
//! | `add`          | O(1)*        | O(n)         |
//! | `remove`       | O(1)*        | O(n)         |
//! | `contains`     | O(1)*        | O(n)         |
//! | `len`          | O(1)         | O(1)         |
//! | `add_from`     | O(m)*        | O(n * m)     |
//! | `remove_from`  | O(n)*        | O(n * m)     |
//! | `retain_from`  | O(n)*        | O(n * m)     |
//!
//! \* amortized

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use super::Set;
use crate::equality::{EqualityStrategy, Intrinsic};

#[inline]
fn resolver<'a, T>(elements: &'a [T]) -> impl Fn(usize) -> Option<&'a T> + 'a {
    move |slot| elements.get(slot)
}

/// A set with no ordering guarantee.
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `E` - The equality strategy; [`Intrinsic`] by default
///
/// # Examples
///
/// ```rust
/// use setwise::store::UnorderedStore;
///
/// let mut store: UnorderedStore<&str> = UnorderedStore::new();
/// assert!(store.add("a"));
/// assert!(!store.add("a"));
/// assert!(store.contains(&"a"));
/// assert_eq!(store.len(), 1);
/// ```
pub struct UnorderedStore<T, E = Intrinsic> {
    elements: Vec<T>,
    index: E,
}

impl<T, E: EqualityStrategy<T> + Default> UnorderedStore<T, E> {
    /// Creates an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(E::default())
    }

    /// Creates an empty store with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut store = Self::new();
        store.elements.reserve(capacity);
        store
    }
}

impl<T, S: BuildHasher> UnorderedStore<T, Intrinsic<S>> {
    /// Creates an empty store using `hasher` for the intrinsic index.
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            elements: Vec::new(),
            index: Intrinsic::with_hasher(hasher),
        }
    }
}

impl<T, E: EqualityStrategy<T>> UnorderedStore<T, E> {
    /// Creates an empty store around the given strategy.
    ///
    /// Any slots already recorded in `index` are discarded.
    #[must_use]
    pub fn with_strategy(mut index: E) -> Self {
        index.reset();
        Self {
            elements: Vec::new(),
            index,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    fn slot_of(&self, element: &T) -> Option<usize> {
        self.index.find(element, resolver(&self.elements))
    }

    /// Returns `true` if an element equal to `element` is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.slot_of(element).is_some()
    }

    /// Returns `true` if every element of `elements` is present.
    ///
    /// An empty list is vacuously contained.
    pub fn contains_all<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        elements.into_iter().all(|element| self.contains(element))
    }

    /// Returns `true` if at least one element of `elements` is present.
    pub fn contains_any<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        elements.into_iter().any(|element| self.contains(element))
    }

    /// Adds `element`, returning `false` if an equal element is present.
    pub fn add(&mut self, element: T) -> bool {
        if self.contains(&element) {
            return false;
        }
        self.push_unique(element);
        true
    }

    /// Adds every element of `elements`, returning how many were new.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, elements: I) -> usize {
        elements
            .into_iter()
            .fold(0, |added, element| added + usize::from(self.add(element)))
    }

    fn push_unique(&mut self, element: T) {
        let slot = self.elements.len();
        self.elements.push(element);
        self.index.record(slot, resolver(&self.elements));
    }

    /// Removes and returns the element equal to `element`.
    pub fn take(&mut self, element: &T) -> Option<T> {
        let slot = self.slot_of(element)?;
        Some(self.evict(slot))
    }

    /// Removes the element equal to `element`, returning `false` if absent.
    pub fn remove(&mut self, element: &T) -> bool {
        self.take(element).is_some()
    }

    /// Swap-removes the element at `slot`, re-pointing the moved element.
    fn evict(&mut self, slot: usize) -> T {
        self.index.forget(slot, resolver(&self.elements));
        let removed = self.elements.swap_remove(slot);
        let moved_from = self.elements.len();
        if slot < moved_from {
            self.index
                .relocate(moved_from, slot, resolver(&self.elements));
        }
        removed
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut slot = 0;
        while slot < self.elements.len() {
            if keep(&self.elements[slot]) {
                slot += 1;
            } else {
                self.evict(slot);
            }
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.index.reset();
    }

    /// Returns an iterator over the elements in unspecified order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> UnorderedStoreIterator<'_, T> {
        UnorderedStoreIterator {
            elements: self.elements.iter(),
        }
    }

    /// Returns `true` if both stores hold the same elements.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|element| other.contains(element))
            && (E::SYMMETRIC || other.iter().all(|element| self.contains(element)))
    }

    /// Difference: removes every element also present in `other`.
    pub fn remove_from(&mut self, other: &Self) {
        self.retain(|element| !other.contains(element));
    }

    /// Intersection: removes every element not present in `other`.
    pub fn retain_from(&mut self, other: &Self) {
        self.retain(|element| other.contains(element));
    }
}

impl<T: Clone, E: EqualityStrategy<T>> UnorderedStore<T, E> {
    /// Union: adds every element of `other` not already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::UnorderedStore;
    ///
    /// let mut left: UnorderedStore<i32> = [1, 2, 3].into_iter().collect();
    /// let right: UnorderedStore<i32> = [3, 4].into_iter().collect();
    /// left.add_from(&right);
    /// assert_eq!(left.len(), 4);
    /// ```
    pub fn add_from(&mut self, other: &Self) {
        for element in other {
            if !self.contains(element) {
                self.push_unique(element.clone());
            }
        }
    }

    /// Copies the elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }
}

impl<T: Clone, E: EqualityStrategy<T>> Clone for UnorderedStore<T, E> {
    fn clone(&self) -> Self {
        let mut cloned = Self::with_strategy(self.index.empty_like());
        cloned.elements.reserve(self.len());
        for element in self {
            cloned.push_unique(element.clone());
        }
        cloned
    }
}

impl<T: Clone, E: EqualityStrategy<T>> Set for UnorderedStore<T, E> {
    type Element = T;
    type Iter<'a>
        = UnorderedStoreIterator<'a, T>
    where
        Self: 'a;

    #[inline]
    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    #[inline]
    fn remove(&mut self, element: &T) -> bool {
        Self::remove(self, element)
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn equal(&self, other: &Self) -> bool {
        Self::equal(self, other)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        Self::iter(self)
    }

    fn to_vec(&self) -> Vec<T> {
        Self::to_vec(self)
    }

    fn add_from(&mut self, other: &Self) {
        Self::add_from(self, other);
    }

    fn remove_from(&mut self, other: &Self) {
        Self::remove_from(self, other);
    }

    fn retain_from(&mut self, other: &Self) {
        Self::retain_from(self, other);
    }
}

impl<T, E: EqualityStrategy<T> + Default> Default for UnorderedStore<T, E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, E> fmt::Debug for UnorderedStore<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.elements.iter()).finish()
    }
}

impl<T, E: EqualityStrategy<T>> PartialEq for UnorderedStore<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

/// Only hash-indexed stores are `Eq`: [`Equality`](crate::equality::Equality)
/// need not be symmetric or transitive.
impl<T: Hash + Eq, S: BuildHasher + Clone> Eq for UnorderedStore<T, Intrinsic<S>> {}

impl<T, E: EqualityStrategy<T> + Default> FromIterator<T> for UnorderedStore<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        store.add_all(iter);
        store
    }
}

impl<T, E: EqualityStrategy<T>> Extend<T> for UnorderedStore<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, T, E: EqualityStrategy<T>> IntoIterator for &'a UnorderedStore<T, E> {
    type Item = &'a T;
    type IntoIter = UnorderedStoreIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, E> IntoIterator for UnorderedStore<T, E> {
    type Item = T;
    type IntoIter = UnorderedStoreIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        UnorderedStoreIntoIterator {
            elements: self.elements.into_iter(),
        }
    }
}

/// Iterator over references to the elements of an [`UnorderedStore`].
pub struct UnorderedStoreIterator<'a, T> {
    elements: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for UnorderedStoreIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl<T> ExactSizeIterator for UnorderedStoreIterator<'_, T> {}

impl<T> FusedIterator for UnorderedStoreIterator<'_, T> {}

/// Owning iterator over the elements of an [`UnorderedStore`].
pub struct UnorderedStoreIntoIterator<T> {
    elements: std::vec::IntoIter<T>,
}

impl<T> Iterator for UnorderedStoreIntoIterator<T> {
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

impl<T> ExactSizeIterator for UnorderedStoreIntoIterator<T> {}

impl<T> FusedIterator for UnorderedStoreIntoIterator<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::{Equality, Structural};
    use rstest::rstest;

    fn assert_indexed<T, E: EqualityStrategy<T>>(store: &UnorderedStore<T, E>) {
        assert_eq!(store.index.len(), store.elements.len());
        for (slot, element) in store.elements.iter().enumerate() {
            assert_eq!(store.slot_of(element), Some(slot));
        }
    }

    fn sorted(store: &UnorderedStore<i32>) -> Vec<i32> {
        let mut elements = store.to_vec();
        elements.sort_unstable();
        elements
    }

    #[derive(Debug, Clone)]
    struct Approx(f64);

    impl Equality for Approx {
        fn equals(&self, other: &Self) -> bool {
            (self.0 - other.0).abs() < 1e-9
        }
    }

    #[rstest]
    fn add_is_idempotent() {
        let mut store: UnorderedStore<i32> = UnorderedStore::new();
        assert!(store.add(1));
        assert!(store.add(2));
        assert!(!store.add(1));
        assert_eq!(store.len(), 2);
        assert_indexed(&store);
    }

    #[rstest]
    #[case::first(0)]
    #[case::middle(2)]
    #[case::last(4)]
    fn remove_relocates_the_last_element(#[case] removed: i32) {
        let mut store: UnorderedStore<i32> = (0..5).collect();
        assert!(store.remove(&removed));
        assert!(!store.contains(&removed));
        assert_eq!(store.len(), 4);
        assert_indexed(&store);
    }

    #[rstest]
    fn remove_absent_is_a_no_op() {
        let mut store: UnorderedStore<i32> = [1, 2].into_iter().collect();
        assert!(!store.remove(&3));
        assert_eq!(sorted(&store), vec![1, 2]);
    }

    #[rstest]
    fn retain_keeps_the_index_in_step() {
        let mut store: UnorderedStore<i32> = (0..50).collect();
        store.retain(|element| element % 7 == 0);
        assert_eq!(sorted(&store), vec![0, 7, 14, 21, 28, 35, 42, 49]);
        assert_indexed(&store);
    }

    #[rstest]
    fn clear_then_reuse() {
        let mut store: UnorderedStore<i32> = (0..10).collect();
        store.clear();
        assert!(store.is_empty());
        store.add(3);
        assert!(store.contains(&3));
        assert_indexed(&store);
    }

    #[rstest]
    #[case::union_with_empty(vec![1, 2], vec![], vec![1, 2])]
    #[case::union_overlapping(vec![1, 2], vec![2, 3], vec![1, 2, 3])]
    fn add_from_unions(
        #[case] left: Vec<i32>,
        #[case] right: Vec<i32>,
        #[case] expected: Vec<i32>,
    ) {
        let mut left: UnorderedStore<i32> = left.into_iter().collect();
        let right: UnorderedStore<i32> = right.into_iter().collect();
        left.add_from(&right);
        assert_eq!(sorted(&left), expected);
    }

    #[rstest]
    #[case::difference(vec![1, 2, 3], vec![1, 3, 4, 5, 6, 99], vec![2])]
    #[case::difference_of_empty(vec![], vec![1], vec![])]
    fn remove_from_subtracts(
        #[case] left: Vec<i32>,
        #[case] right: Vec<i32>,
        #[case] expected: Vec<i32>,
    ) {
        let mut left: UnorderedStore<i32> = left.into_iter().collect();
        let right: UnorderedStore<i32> = right.into_iter().collect();
        left.remove_from(&right);
        assert_eq!(sorted(&left), expected);
        assert_indexed(&left);
    }

    #[rstest]
    fn retain_from_intersects() {
        let mut left: UnorderedStore<i32> = [1, 2, 3, 10].into_iter().collect();
        let right: UnorderedStore<i32> = [10, 3, 7].into_iter().collect();
        left.retain_from(&right);
        assert_eq!(sorted(&left), vec![3, 10]);
    }

    #[rstest]
    fn clone_is_deep() {
        let original: UnorderedStore<String> =
            ["a".to_string(), "b".to_string()].into_iter().collect();
        let mut cloned = original.clone();
        cloned.remove(&"a".to_string());

        assert!(original.contains(&"a".to_string()));
        assert!(!cloned.contains(&"a".to_string()));
        assert_indexed(&cloned);
    }

    #[rstest]
    fn equal_compares_membership() {
        let left: UnorderedStore<i32> = [1, 2, 3].into_iter().collect();
        let right: UnorderedStore<i32> = [3, 2, 1].into_iter().collect();
        let shorter: UnorderedStore<i32> = [1, 2].into_iter().collect();
        assert!(left.equal(&right));
        assert!(!left.equal(&shorter));
        assert_eq!(left, right);
    }

    #[rstest]
    fn structural_strategy_uses_the_capability() {
        let mut store: UnorderedStore<Approx, Structural> = UnorderedStore::new();
        assert!(store.add(Approx(0.1 + 0.2)));
        assert!(!store.add(Approx(0.3)));
        assert!(store.remove(&Approx(0.3)));
        assert!(store.is_empty());
    }

    #[rstest]
    fn iterator_reports_exact_length() {
        let store: UnorderedStore<i32> = (0..3).collect();
        assert_eq!(store.iter().len(), 3);
        assert_eq!(store.into_iter().len(), 3);
    }
}

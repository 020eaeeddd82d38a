//! Insertion-ordered set store.
//!
//! This module provides [`OrderedStore`], a set that iterates its elements in
//! the order they were first added.
//!
//! # Layout
//!
//! Elements live in an append-only arena of entries. Each entry carries the
//! insertion *position* it was assigned and an optional element; a removed
//! element leaves a tombstone behind. The equality strategy indexes element
//! to arena slot. Position to element and element to position are therefore
//! two views of a single structure:
//!
//! ```text
//!   arena:  [ #0 "a" | #1 ---- | #2 "c" | #3 "d" ]     next position: 4
//!   index:  "a" -> 0, "c" -> 2, "d" -> 3
//! ```
//!
//! Positions come from a monotonic counter that only [`OrderedStore::clear`]
//! resets, so a position is never handed out twice. When tombstones outnumber
//! live entries the arena is compacted: tombstones are dropped, survivors keep
//! their relative order and their positions, and the index is rebuilt.
//!
//! # Time Complexity
//!
//! | Operation      | `Intrinsic`  | `Structural` |
//! |----------------|--------------|--------------|
//! | `add`          | O(1)*        | O(n)         |
//! | `remove`       | O(1)*        | O(n)         |
//! | `contains`     | O(1)*        | O(n)         |
//! | `len`          | O(1)         | O(1)         |
//! | `iter`         | O(1) + O(n)  | O(1) + O(n)  |
//! | `add_from`     | O(m)*        | O(n * m)     |
//! | `remove_from`  | O(n)*        | O(n * m)     |
//! | `retain_from`  | O(n)*        | O(n * m)     |
//!
//! \* amortized; removals may trigger an O(n) compaction.
//!
//! # Examples
//!
//! ```rust
//! use setwise::store::OrderedStore;
//!
//! let mut store: OrderedStore<i32> = OrderedStore::new();
//! store.add(7);
//! store.add(5);
//! store.add(3);
//! store.remove(&5);
//!
//! let order: Vec<i32> = store.iter().copied().collect();
//! assert_eq!(order, vec![7, 3]);
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use super::Set;
use crate::equality::{EqualityStrategy, Intrinsic};

/// Arenas smaller than this are never compacted.
const COMPACTION_FLOOR: usize = 16;

struct Entry<T> {
    position: u64,
    element: Option<T>,
}

#[inline]
fn resolver<'a, T>(entries: &'a [Entry<T>]) -> impl Fn(usize) -> Option<&'a T> + 'a {
    move |slot| entries.get(slot).and_then(|entry| entry.element.as_ref())
}

/// A set that remembers the order in which its elements were first added.
///
/// Re-adding a present element changes nothing: it keeps its original
/// position and the position counter does not advance. Equality between two
/// ordered stores ignores order.
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `E` - The equality strategy; [`Intrinsic`] by default
///
/// # Examples
///
/// ```rust
/// use setwise::store::OrderedStore;
///
/// let first: OrderedStore<i32> = [1, 2].into_iter().collect();
/// let second: OrderedStore<i32> = [2, 1].into_iter().collect();
///
/// assert_eq!(first, second);
/// assert_eq!(first.first(), Some(&1));
/// assert_eq!(second.first(), Some(&2));
/// ```
pub struct OrderedStore<T, E = Intrinsic> {
    entries: Vec<Entry<T>>,
    live: usize,
    next_position: u64,
    index: E,
}

impl<T, E: EqualityStrategy<T> + Default> OrderedStore<T, E> {
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
        store.entries.reserve(capacity);
        store
    }
}

impl<T, S> OrderedStore<T, Intrinsic<S>> {
    /// Creates an empty store using `hasher` for the intrinsic index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::hash::RandomState;
    /// use setwise::store::OrderedStore;
    ///
    /// let mut store = OrderedStore::with_hasher(RandomState::new());
    /// store.add("x");
    /// assert!(store.contains(&"x"));
    /// ```
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self
    where
        S: BuildHasher,
    {
        Self {
            entries: Vec::new(),
            live: 0,
            next_position: 0,
            index: Intrinsic::with_hasher(hasher),
        }
    }
}

impl<T, E: EqualityStrategy<T>> OrderedStore<T, E> {
    /// Creates an empty store around the given strategy.
    ///
    /// Any slots already recorded in `index` are discarded.
    #[must_use]
    pub fn with_strategy(mut index: E) -> Self {
        index.reset();
        Self {
            entries: Vec::new(),
            live: 0,
            next_position: 0,
            index,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the store holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the position the next new element will receive.
    ///
    /// This grows with every successful [`add`](Self::add) and is only reset
    /// by [`clear`](Self::clear); removals never give positions back.
    #[inline]
    #[must_use]
    pub const fn next_position(&self) -> u64 {
        self.next_position
    }

    #[inline]
    fn slot_of(&self, element: &T) -> Option<usize> {
        self.index.find(element, resolver(&self.entries))
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
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::OrderedStore;
    ///
    /// let store: OrderedStore<i32> = [8, 6, 7, 5, 3, 0, 9].into_iter().collect();
    /// assert!(store.contains_all(&[8, 6, 7, 5, 3, 0, 9]));
    /// assert!(!store.contains_all(&[8, 6, 11, 5, 3, 0, 9]));
    /// ```
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

    /// Returns the insertion position of the element equal to `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::OrderedStore;
    ///
    /// let mut store: OrderedStore<char> = OrderedStore::new();
    /// store.add('a');
    /// store.add('b');
    /// store.remove(&'a');
    /// store.add('c');
    ///
    /// assert_eq!(store.position_of(&'b'), Some(1));
    /// assert_eq!(store.position_of(&'c'), Some(2));
    /// assert_eq!(store.position_of(&'a'), None);
    /// ```
    #[must_use]
    pub fn position_of(&self, element: &T) -> Option<u64> {
        self.slot_of(element)
            .and_then(|slot| self.entries.get(slot))
            .map(|entry| entry.position)
    }

    /// Adds `element` at the end of the insertion order.
    ///
    /// Returns `false`, leaving the store untouched, if an equal element is
    /// already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::OrderedStore;
    ///
    /// let mut store: OrderedStore<i32> = OrderedStore::new();
    /// assert!(store.add(7));
    /// assert!(!store.add(7));
    /// assert_eq!(store.next_position(), 1);
    /// ```
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

    /// Appends an element known to be absent.
    fn push_unique(&mut self, element: T) {
        let slot = self.entries.len();
        self.entries.push(Entry {
            position: self.next_position,
            element: Some(element),
        });
        self.index.record(slot, resolver(&self.entries));
        self.next_position += 1;
        self.live += 1;
    }

    /// Removes and returns the element equal to `element`.
    pub fn take(&mut self, element: &T) -> Option<T> {
        let slot = self.slot_of(element)?;
        let removed = self.vacate(slot);
        self.compact_if_sparse();
        removed
    }

    /// Removes the element equal to `element`.
    ///
    /// Returns `false` if no such element was present; the survivors keep
    /// their relative order.
    pub fn remove(&mut self, element: &T) -> bool {
        self.take(element).is_some()
    }

    /// Turns `slot` into a tombstone, keeping the index in step.
    fn vacate(&mut self, slot: usize) -> Option<T> {
        self.index.forget(slot, resolver(&self.entries));
        let removed = self.entries.get_mut(slot)?.element.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Keeps only the elements for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::OrderedStore;
    ///
    /// let mut store: OrderedStore<i32> = (1..=6).collect();
    /// store.retain(|element| element % 2 == 0);
    /// assert_eq!(store.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    /// ```
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut removed = 0_usize;
        for slot in 0..self.entries.len() {
            let discard = self.entries[slot]
                .element
                .as_ref()
                .is_some_and(|element| !keep(element));
            if discard && self.vacate(slot).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.compact_if_sparse();
        }
    }

    fn compact_if_sparse(&mut self) {
        while self
            .entries
            .last()
            .is_some_and(|entry| entry.element.is_none())
        {
            self.entries.pop();
        }

        let tombstones = self.entries.len() - self.live;
        if tombstones <= self.live || self.entries.len() < COMPACTION_FLOOR {
            return;
        }

        self.entries.retain(|entry| entry.element.is_some());
        self.index.reset();
        for slot in 0..self.entries.len() {
            self.index.record(slot, resolver(&self.entries));
        }
        tracing::trace!(
            live = self.live,
            dropped = tombstones,
            "compacted ordered store arena"
        );
    }

    /// Removes every element and resets the position counter to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::OrderedStore;
    ///
    /// let mut store: OrderedStore<i32> = [1, 2, 3].into_iter().collect();
    /// store.clear();
    /// assert!(store.is_empty());
    /// assert_eq!(store.next_position(), 0);
    /// ```
    pub fn clear(&mut self) {
        let index = self.index.empty_like();
        *self = Self {
            entries: Vec::new(),
            live: 0,
            next_position: 0,
            index,
        };
        tracing::trace!("cleared ordered store");
    }

    /// Returns an iterator over the elements in insertion order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> OrderedStoreIterator<'_, T> {
        OrderedStoreIterator {
            entries: self.entries.iter(),
            remaining: self.live,
        }
    }

    /// Returns the earliest-added live element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    /// Returns the latest-added live element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.iter().next_back()
    }

    /// Returns `true` if both stores hold the same elements, in any order.
    ///
    /// Under a strategy that is not known to be symmetric, containment is
    /// checked in both directions.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|element| other.contains(element))
            && (E::SYMMETRIC || other.iter().all(|element| self.contains(element)))
    }

    /// Difference: removes every element also present in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::OrderedStore;
    ///
    /// let mut left: OrderedStore<i32> = [1, 2, 3].into_iter().collect();
    /// let right: OrderedStore<i32> = [1, 3, 4, 5, 6, 99].into_iter().collect();
    /// left.remove_from(&right);
    /// assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![2]);
    /// ```
    pub fn remove_from(&mut self, other: &Self) {
        self.retain(|element| !other.contains(element));
    }

    /// Intersection: removes every element not present in `other`.
    pub fn retain_from(&mut self, other: &Self) {
        self.retain(|element| other.contains(element));
    }

    #[cfg(test)]
    fn arena_len(&self) -> usize {
        self.entries.len()
    }
}

impl<T: Clone, E: EqualityStrategy<T>> OrderedStore<T, E> {
    /// Union: appends the elements of `other` that are not present, in
    /// `other`'s order. Existing elements keep their positions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::store::OrderedStore;
    ///
    /// let mut left: OrderedStore<i32> = [3, 1].into_iter().collect();
    /// let right: OrderedStore<i32> = [2, 3, 4].into_iter().collect();
    /// left.add_from(&right);
    /// assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2, 4]);
    /// ```
    pub fn add_from(&mut self, other: &Self) {
        for element in other {
            if !self.contains(element) {
                self.push_unique(element.clone());
            }
        }
    }

    /// Copies the elements into a `Vec` in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone, E: EqualityStrategy<T>> Clone for OrderedStore<T, E> {
    /// Re-inserts the elements in order into a fresh store.
    ///
    /// Relative order is preserved; positions restart from zero.
    fn clone(&self) -> Self {
        let mut cloned = Self::with_strategy(self.index.empty_like());
        cloned.entries.reserve(self.live);
        for element in self {
            cloned.push_unique(element.clone());
        }
        cloned
    }
}

impl<T: Clone, E: EqualityStrategy<T>> Set for OrderedStore<T, E> {
    type Element = T;
    type Iter<'a>
        = OrderedStoreIterator<'a, T>
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

impl<T, E: EqualityStrategy<T> + Default> Default for OrderedStore<T, E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, E: EqualityStrategy<T>> fmt::Debug for OrderedStore<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T, E: EqualityStrategy<T>> PartialEq for OrderedStore<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

/// Only hash-indexed stores are `Eq`: [`Equality`](crate::equality::Equality)
/// need not be symmetric or transitive.
impl<T: Hash + Eq, S: BuildHasher + Clone> Eq for OrderedStore<T, Intrinsic<S>> {}

impl<T, E: EqualityStrategy<T> + Default> FromIterator<T> for OrderedStore<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        store.add_all(iter);
        store
    }
}

impl<T, E: EqualityStrategy<T>> Extend<T> for OrderedStore<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, T, E: EqualityStrategy<T>> IntoIterator for &'a OrderedStore<T, E> {
    type Item = &'a T;
    type IntoIter = OrderedStoreIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, E> IntoIterator for OrderedStore<T, E> {
    type Item = T;
    type IntoIter = OrderedStoreIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        OrderedStoreIntoIterator {
            entries: self.entries.into_iter(),
            remaining: self.live,
        }
    }
}

/// Iterator over references to the elements of an [`OrderedStore`], in
/// insertion order.
pub struct OrderedStoreIterator<'a, T> {
    entries: std::slice::Iter<'a, Entry<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for OrderedStoreIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let element = self.entries.find_map(|entry| entry.element.as_ref())?;
        self.remaining -= 1;
        Some(element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for OrderedStoreIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let element = self
            .entries
            .by_ref()
            .rev()
            .find_map(|entry| entry.element.as_ref())?;
        self.remaining -= 1;
        Some(element)
    }
}

impl<T> ExactSizeIterator for OrderedStoreIterator<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for OrderedStoreIterator<'_, T> {}

/// Owning iterator over the elements of an [`OrderedStore`], in insertion
/// order.
pub struct OrderedStoreIntoIterator<T> {
    entries: std::vec::IntoIter<Entry<T>>,
    remaining: usize,
}

impl<T> Iterator for OrderedStoreIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let element = self.entries.find_map(|entry| entry.element)?;
        self.remaining -= 1;
        Some(element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for OrderedStoreIntoIterator<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let element = self.entries.by_ref().rev().find_map(|entry| entry.element)?;
        self.remaining -= 1;
        Some(element)
    }
}

impl<T> ExactSizeIterator for OrderedStoreIntoIterator<T> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for OrderedStoreIntoIterator<T> {}

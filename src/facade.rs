//! Constructors for the four set variants.
//!
//! | Constructor                | Ordering  | Thread-safe |
//! |----------------------------|-----------|-------------|
//! | [`new_set`]                | none      | yes         |
//! | [`new_unsync_set`]         | none      | no          |
//! | [`new_ordered_set`]        | insertion | yes         |
//! | [`new_unsync_ordered_set`] | insertion | no          |
//!
//! Each has a `*_from_slice` twin that clones its elements from a slice. All
//! of them use the [`Intrinsic`](crate::equality::Intrinsic) strategy; build stores directly for
//! [`Structural`](crate::equality::Structural) elements. [`SetBuilder`]
//! chooses the variant at runtime and returns a type-erased set.
//!
//! # Examples
//!
//! ```rust
//! use setwise::facade::{new_ordered_set, new_unsync_set};
//!
//! let shared = new_ordered_set(["b", "a", "b"]);
//! assert_eq!(shared.to_vec(), vec!["b", "a"]);
//!
//! let mut local = new_unsync_set([1, 2]);
//! local.add(3);
//! assert_eq!(local.len(), 3);
//! ```

use std::hash::Hash;

use crate::concurrent::{ConcurrentOrderedSet, ConcurrentSet};
use crate::store::{OrderedStore, UnorderedStore};

#[cfg(feature = "dynamic")]
use crate::concurrent::Concurrent;
#[cfg(feature = "dynamic")]
use crate::dynamic::DynSet;
#[cfg(feature = "dynamic")]
use crate::equality::{EqualityStrategy, Intrinsic};

/// Creates a thread-safe unordered set holding `elements`.
pub fn new_set<T, I>(elements: I) -> ConcurrentSet<T>
where
    T: Hash + Eq + Clone,
    I: IntoIterator<Item = T>,
{
    elements.into_iter().collect()
}

/// Creates a thread-safe unordered set from a slice.
pub fn new_set_from_slice<T: Hash + Eq + Clone>(elements: &[T]) -> ConcurrentSet<T> {
    new_set(elements.iter().cloned())
}

/// Creates an unsynchronized unordered set holding `elements`.
///
/// The caller is responsible for any synchronization.
pub fn new_unsync_set<T, I>(elements: I) -> UnorderedStore<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    elements.into_iter().collect()
}

/// Creates an unsynchronized unordered set from a slice.
pub fn new_unsync_set_from_slice<T: Hash + Eq + Clone>(elements: &[T]) -> UnorderedStore<T> {
    new_unsync_set(elements.iter().cloned())
}

/// Creates a thread-safe set that iterates in insertion order.
///
/// # Examples
///
/// ```rust
/// use setwise::facade::new_ordered_set;
///
/// let set = new_ordered_set([8, 6, 7, 5, 3, 0, 9]);
/// assert_eq!(set.to_vec(), vec![8, 6, 7, 5, 3, 0, 9]);
/// ```
pub fn new_ordered_set<T, I>(elements: I) -> ConcurrentOrderedSet<T>
where
    T: Hash + Eq + Clone,
    I: IntoIterator<Item = T>,
{
    elements.into_iter().collect()
}

/// Creates a thread-safe insertion-ordered set from a slice.
pub fn new_ordered_set_from_slice<T: Hash + Eq + Clone>(
    elements: &[T],
) -> ConcurrentOrderedSet<T> {
    new_ordered_set(elements.iter().cloned())
}

/// Creates an unsynchronized insertion-ordered set holding `elements`.
pub fn new_unsync_ordered_set<T, I>(elements: I) -> OrderedStore<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    elements.into_iter().collect()
}

/// Creates an unsynchronized insertion-ordered set from a slice.
pub fn new_unsync_ordered_set_from_slice<T: Hash + Eq + Clone>(
    elements: &[T],
) -> OrderedStore<T> {
    new_unsync_ordered_set(elements.iter().cloned())
}

/// Builds a thread-safe unordered set from a list of elements.
///
/// # Examples
///
/// ```rust
/// use setwise::set;
///
/// let set = set![1, 2, 2, 3];
/// assert_eq!(set.len(), 3);
/// ```
#[macro_export]
macro_rules! set {
    ($($element:expr),* $(,)?) => {
        $crate::facade::new_set([$($element),*])
    };
}

/// Builds a thread-safe insertion-ordered set from a list of elements.
///
/// # Examples
///
/// ```rust
/// use setwise::ordered_set;
///
/// let set = ordered_set!["c", "a", "b"];
/// assert_eq!(set.to_vec(), vec!["c", "a", "b"]);
/// ```
#[macro_export]
macro_rules! ordered_set {
    ($($element:expr),* $(,)?) => {
        $crate::facade::new_ordered_set([$($element),*])
    };
}

/// Iteration order of a built set.
#[cfg(feature = "dynamic")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ordering {
    /// No ordering guarantee.
    #[default]
    Unordered,
    /// Elements iterate in the order they were first added.
    Insertion,
}

/// Synchronization of a built set.
#[cfg(feature = "dynamic")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Concurrency {
    /// Guarded by a reader-writer lock.
    #[default]
    Synchronized,
    /// No lock; the caller synchronizes.
    Unsynchronized,
}

/// Runtime selection of a set variant.
///
/// # Examples
///
/// ```rust
/// use setwise::facade::{Concurrency, Ordering, SetBuilder};
///
/// let mut set = SetBuilder::new()
///     .ordering(Ordering::Insertion)
///     .concurrency(Concurrency::Unsynchronized)
///     .capacity(8)
///     .build::<u32>();
///
/// set.add(2);
/// set.add(1);
/// assert_eq!(set.to_vec(), vec![2, 1]);
/// ```
#[cfg(feature = "dynamic")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetBuilder {
    ordering: Ordering,
    concurrency: Concurrency,
    capacity: usize,
}

#[cfg(feature = "dynamic")]
impl SetBuilder {
    /// Starts from a synchronized unordered set with no preallocation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ordering: Ordering::Unordered,
            concurrency: Concurrency::Synchronized,
            capacity: 0,
        }
    }

    /// Sets the iteration order.
    #[must_use]
    pub const fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the synchronization.
    #[must_use]
    pub const fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the number of elements to preallocate room for.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builds an empty set using the [`Intrinsic`] strategy.
    #[must_use]
    pub fn build<T>(self) -> Box<dyn DynSet<T>>
    where
        T: Hash + Eq + Clone + Send + Sync + 'static,
    {
        self.build_with::<T, Intrinsic>()
    }

    /// Builds an empty set using the strategy `E`.
    #[must_use]
    pub fn build_with<T, E>(self) -> Box<dyn DynSet<T>>
    where
        T: Clone + Send + Sync + 'static,
        E: EqualityStrategy<T> + Default + Send + Sync + 'static,
    {
        tracing::trace!(
            ordering = ?self.ordering,
            concurrency = ?self.concurrency,
            capacity = self.capacity,
            "building set"
        );
        match (self.ordering, self.concurrency) {
            (Ordering::Unordered, Concurrency::Unsynchronized) => {
                Box::new(UnorderedStore::<T, E>::with_capacity(self.capacity))
            }
            (Ordering::Unordered, Concurrency::Synchronized) => Box::new(Concurrent::from_store(
                UnorderedStore::<T, E>::with_capacity(self.capacity),
            )),
            (Ordering::Insertion, Concurrency::Unsynchronized) => {
                Box::new(OrderedStore::<T, E>::with_capacity(self.capacity))
            }
            (Ordering::Insertion, Concurrency::Synchronized) => Box::new(Concurrent::from_store(
                OrderedStore::<T, E>::with_capacity(self.capacity),
            )),
        }
    }
}

//! Lock-guarded set wrappers safe to share across threads.
//!
//! [`Concurrent`] wraps any [`Set`] in a reader-writer lock and exposes the
//! full set contract through `&self`, so a set can be shared behind an
//! `Arc` without further synchronization:
//!
//! - Queries (`contains`, `len`, `equal`, `iter`, ...) take the read lock.
//! - Mutations (`add`, `remove`, `clear`, ...) take the write lock.
//! - Two-set operations lock both sets, always in the order in which the
//!   sets were created, so `a.add_from(&b)` racing `b.add_from(&a)` cannot deadlock.
//!   The receiver is write-locked and the argument read-locked.
//! - Iteration hands out a [`Snapshot`]: a copy taken under the read lock,
//!   which is released before the first element is yielded.
//!
//! Passing a set as its own argument is handled without locking twice:
//! `add_from` and `retain_from` leave it unchanged, `remove_from` empties it
//! and `equal` is `true`.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use setwise::concurrent::ConcurrentSet;
//!
//! let set: Arc<ConcurrentSet<i32>> = Arc::new(ConcurrentSet::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for element in 0..100 {
//!                 set.add(worker * 100 + element);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(set.len(), 400);
//! ```

mod iter;
mod lock;

pub use iter::Snapshot;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use lock::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::equality::Intrinsic;
use crate::store::{OrderedStore, Set, UnorderedStore};

/// A thread-safe set with no ordering guarantee.
pub type ConcurrentSet<T, E = Intrinsic> = Concurrent<UnorderedStore<T, E>>;

/// A thread-safe set that iterates in insertion order.
pub type ConcurrentOrderedSet<T, E = Intrinsic> = Concurrent<OrderedStore<T, E>>;

/// A set guarded by a reader-writer lock.
///
/// # Type Parameters
///
/// * `S` - The wrapped store, usually [`UnorderedStore`] or [`OrderedStore`]
pub struct Concurrent<S> {
    id: u64,
    store: RwLock<S>,
}

/// Source of [`Concurrent`] ids, which fix the order two sets are locked in.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

static_assertions::assert_impl_all!(ConcurrentSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(ConcurrentOrderedSet<String>: Send, Sync);

impl<S> Concurrent<S> {
    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: S) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            store: RwLock::new(store),
        }
    }

    /// Unwraps the guarded store.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }

    /// Runs `query` against the store under the read lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setwise::concurrent::ConcurrentOrderedSet;
    ///
    /// let set: ConcurrentOrderedSet<&str> = ["a", "b"].into_iter().collect();
    /// assert_eq!(set.with(|store| store.first().copied()), Some("a"));
    /// ```
    pub fn with<R>(&self, query: impl FnOnce(&S) -> R) -> R {
        query(&self.store.read())
    }

    /// Runs `mutation` against the store under the write lock.
    ///
    /// Several changes made in one call are observed atomically by readers.
    pub fn update<R>(&self, mutation: impl FnOnce(&mut S) -> R) -> R {
        mutation(&mut self.store.write())
    }

    #[inline]
    const fn is_same(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Write-locks `self` and read-locks `other`, older set first.
    ///
    /// Creation order is stable across runs, so the lock schedule is too.
    ///
    /// Must not be called with `self` and `other` being the same set.
    fn lock_pair<'a>(
        &'a self,
        other: &'a Self,
    ) -> (RwLockWriteGuard<'a, S>, RwLockReadGuard<'a, S>) {
        if self.id < other.id {
            tracing::trace!("locking receiver before argument");
            let target = self.store.write();
            let source = other.store.read();
            (target, source)
        } else {
            tracing::trace!("locking argument before receiver");
            let source = other.store.read();
            let target = self.store.write();
            (target, source)
        }
    }

    /// Read-locks both sets, older set first.
    fn read_pair<'a>(
        &'a self,
        other: &'a Self,
    ) -> (RwLockReadGuard<'a, S>, RwLockReadGuard<'a, S>) {
        if self.id < other.id {
            let mine = self.store.read();
            let theirs = other.store.read();
            (mine, theirs)
        } else {
            let theirs = other.store.read();
            let mine = self.store.read();
            (mine, theirs)
        }
    }
}

impl<S: Set> Concurrent<S> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::from_store(S::default())
    }

    /// Adds `element`, returning `false` if an equal element is present.
    pub fn add(&self, element: S::Element) -> bool {
        self.store.write().add(element)
    }

    /// Adds every element of `elements` under a single write lock.
    ///
    /// Returns how many were new.
    pub fn add_all<I: IntoIterator<Item = S::Element>>(&self, elements: I) -> usize {
        self.store.write().add_all(elements)
    }

    /// Removes the element equal to `element`, returning `false` if absent.
    pub fn remove(&self, element: &S::Element) -> bool {
        self.store.write().remove(element)
    }

    /// Returns `true` if an element equal to `element` is present.
    pub fn contains(&self, element: &S::Element) -> bool {
        self.store.read().contains(element)
    }

    /// Returns `true` if every element of `elements` is present.
    ///
    /// All elements are checked under one read lock.
    pub fn contains_all<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a S::Element>,
        S::Element: 'a,
    {
        self.store.read().contains_all(elements)
    }

    /// Returns `true` if at least one element of `elements` is present.
    pub fn contains_any<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a S::Element>,
        S::Element: 'a,
    {
        self.store.read().contains_any(elements)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns `true` if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.store.write().clear();
    }

    /// Returns `true` if both sets hold the same elements.
    pub fn equal(&self, other: &Self) -> bool {
        if self.is_same(other) {
            return true;
        }
        let (mine, theirs) = self.read_pair(other);
        mine.equal(&theirs)
    }

    /// Union: adds every element of `other` not already present.
    pub fn add_from(&self, other: &Self) {
        if self.is_same(other) {
            return;
        }
        let (mut target, source) = self.lock_pair(other);
        target.add_from(&source);
    }

    /// Difference: removes every element also present in `other`.
    ///
    /// A set subtracted from itself becomes empty.
    pub fn remove_from(&self, other: &Self) {
        if self.is_same(other) {
            self.clear();
            return;
        }
        let (mut target, source) = self.lock_pair(other);
        target.remove_from(&source);
    }

    /// Intersection: removes every element not present in `other`.
    pub fn retain_from(&self, other: &Self) {
        if self.is_same(other) {
            return;
        }
        let (mut target, source) = self.lock_pair(other);
        target.retain_from(&source);
    }
}

impl<S: Set> Concurrent<S>
where
    S::Element: Clone,
{
    /// Returns a snapshot iterator over the elements.
    ///
    /// The snapshot follows the wrapped store's iteration order.
    pub fn iter(&self) -> Snapshot<S::Element> {
        Snapshot::new(self.to_vec())
    }

    /// Copies the elements into a `Vec` under the read lock.
    pub fn to_vec(&self) -> Vec<S::Element> {
        self.store.read().to_vec()
    }
}

impl<S: Set> Clone for Concurrent<S> {
    /// Copies the store under the read lock into a fresh, unlocked set.
    fn clone(&self) -> Self {
        Self::from_store(S::clone(&self.store.read()))
    }
}

impl<S: Set> Set for Concurrent<S>
where
    S::Element: Clone,
{
    type Element = S::Element;
    type Iter<'a>
        = Snapshot<S::Element>
    where
        Self: 'a;

    fn add(&mut self, element: Self::Element) -> bool {
        Self::add(self, element)
    }

    fn remove(&mut self, element: &Self::Element) -> bool {
        Self::remove(self, element)
    }

    fn contains(&self, element: &Self::Element) -> bool {
        Self::contains(self, element)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn equal(&self, other: &Self) -> bool {
        Self::equal(self, other)
    }

    fn iter(&self) -> Self::Iter<'_> {
        Self::iter(self)
    }

    fn to_vec(&self) -> Vec<Self::Element> {
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

impl<S: Set + Default> Default for Concurrent<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> From<S> for Concurrent<S> {
    fn from(store: S) -> Self {
        Self::from_store(store)
    }
}

impl<S: Set> PartialEq for Concurrent<S> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<S: Set + Eq> Eq for Concurrent<S> {}

impl<S: fmt::Debug> fmt::Debug for Concurrent<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.store.read(), formatter)
    }
}

impl<S: FromIterator<T>, T> FromIterator<T> for Concurrent<S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_store(iter.into_iter().collect())
    }
}

impl<S: Set> IntoIterator for &Concurrent<S>
where
    S::Element: Clone,
{
    type Item = S::Element;
    type IntoIter = Snapshot<S::Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
